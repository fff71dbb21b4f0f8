//! Application [`State`] and the [`Event`]s changing it.

use std::{collections::BTreeSet, str::FromStr};

use common::{operations::All, Date};
use rust_decimal::Decimal;
use service::{
    command,
    domain::{
        booking::{
            self, Breakdown, Confirmation, Email, PaymentMethod, Phone,
            TenantName, Term, Wizard,
        },
        district,
        listing::{self, Amenity, Criteria, Furnishing, Kind, Rooms, SortKey},
        District, Landlord, Listing,
    },
    query, Query as _,
};
use tracing as log;

use crate::{define_error, route, AsError as _, Error, Service};

/// State of the application.
#[derive(Clone, Debug, Default)]
pub struct State {
    /// Current search [`Criteria`].
    pub criteria: Criteria,

    /// Current search [`SortKey`].
    pub sort: SortKey,

    /// [`Listing`]s found by the current search.
    pub results: Vec<Listing>,

    /// IDs of the favorite [`Listing`]s.
    pub favorites: BTreeSet<listing::Id>,

    /// Currently shown [`Page`].
    pub page: Page,

    /// Opened [`Listing`] details, if any.
    pub details: Option<Details>,

    /// [`Booking`] in progress, if any.
    pub booking: Option<Booking>,
}

/// Page shown when neither [`Details`] nor a [`Booking`] are open.
#[derive(Clone, Debug, Default)]
pub enum Page {
    /// Search page with the [`State::results`].
    #[default]
    Search,

    /// Home page.
    Home {
        /// Featured [`Listing`]s.
        featured: Vec<Listing>,

        /// The most recently created [`Listing`]s.
        latest: Vec<Listing>,
    },

    /// Favorite [`Listing`]s.
    Favorites(Vec<Listing>),

    /// Overview of the [`District`]s.
    Districts {
        /// All the [`district::Info`]s.
        all: Vec<district::Info>,

        /// The most popular [`district::Info`]s.
        popular: Vec<district::Info>,
    },

    /// Page of a single [`District`].
    District {
        /// [`District`] being shown.
        id: District,

        /// Overview of the [`District`], if known.
        info: Option<district::Info>,

        /// [`Listing`]s located in the [`District`].
        listings: Vec<Listing>,
    },
}

/// Details of a single [`Listing`].
#[derive(Clone, Debug)]
pub struct Details {
    /// Opened [`Listing`].
    pub listing: Listing,

    /// [`Landlord`] of the [`Listing`], if known.
    pub landlord: Option<Landlord>,
}

/// Booking of a [`Listing`] in progress.
#[derive(Clone, Debug)]
pub struct Booking {
    /// [`Listing`] being booked.
    pub listing: Listing,

    /// Booking form.
    pub wizard: Wizard,

    /// Price [`Breakdown`] of the [`Listing`].
    pub breakdown: Breakdown,

    /// [`Confirmation`] once the booking is submitted.
    pub confirmation: Option<Confirmation>,
}

/// Event changing the [`State`].
#[derive(Clone, Debug)]
pub enum Event {
    /// Opens the search page URL.
    Navigate(String),

    /// Toggles a [`District`] in the [`Criteria`].
    ToggleDistrict(District),

    /// Toggles a [`Rooms`] threshold in the [`Criteria`].
    ToggleRooms(Rooms),

    /// Toggles a [`Kind`] in the [`Criteria`].
    ToggleKind(Kind),

    /// Toggles a required [`Amenity`] in the [`Criteria`].
    ToggleAmenity(Amenity),

    /// Toggles a [`Furnishing`] level in the [`Criteria`].
    ToggleFurnishing(Furnishing),

    /// Sets the price range of the [`Criteria`].
    SetPriceRange {
        /// Inclusive lower bound.
        min: Option<Decimal>,

        /// Inclusive upper bound.
        max: Option<Decimal>,
    },

    /// Sets the free-text query of the [`Criteria`].
    SetText(Option<String>),

    /// Changes the [`SortKey`].
    Sort(SortKey),

    /// Clears all the [`Criteria`].
    ClearFilters,

    /// Toggles whether a [`Listing`] is a favorite.
    ToggleFavorite(listing::Id),

    /// Saves a [`Listing`] to favorites.
    Save(listing::Id),

    /// Removes a [`Listing`] from favorites.
    Unsave(listing::Id),

    /// Shows the home [`Page`].
    Home,

    /// Shows the favorite [`Listing`]s.
    ShowFavorites,

    /// Shows the overview of the [`District`]s.
    ShowDistricts,

    /// Shows the [`Page`] of a single [`District`].
    ShowDistrict(District),

    /// Opens [`Details`] of a [`Listing`] by its slug or ID.
    Open(String),

    /// Closes the opened [`Details`].
    Close,

    /// Starts a [`Booking`] of a [`Listing`].
    StartBooking(listing::Id),

    /// Sets the move-in [`Date`] of the [`Booking`].
    SetMoveIn(Date),

    /// Sets the [`Term`] of the [`Booking`].
    SetTerm(Term),

    /// Sets the message to the landlord.
    SetMessage(String),

    /// Sets the tenant [`TenantName`].
    SetName(TenantName),

    /// Sets the tenant [`Email`].
    SetEmail(Email),

    /// Sets the tenant [`Phone`].
    SetPhone(Phone),

    /// Chooses the [`PaymentMethod`].
    SetPayment(PaymentMethod),

    /// Moves the [`Booking`] to the next step.
    Next,

    /// Moves the [`Booking`] to the previous step.
    Back,

    /// Submits the [`Booking`].
    Submit,

    /// Abandons the [`Booking`].
    CancelBooking,
}

impl FromStr for Event {
    type Err = &'static str;

    /// Parses a shell line, like `district chilanzar` or `term 12`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (cmd, arg) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let arg = arg.trim();

        Ok(match cmd {
            "search" | "open-url" | "go" => Self::Navigate(arg.to_owned()),
            "district" => Self::ToggleDistrict(parse(arg, "unknown district")?),
            "rooms" => Self::ToggleRooms(parse(
                arg.trim_end_matches('+'),
                "rooms must be a number",
            )?),
            "type" => Self::ToggleKind(parse(arg, "unknown property type")?),
            "amenity" => Self::ToggleAmenity(parse(arg, "unknown amenity")?),
            "furnished" => {
                Self::ToggleFurnishing(parse(arg, "unknown furnishing")?)
            }
            "price" => {
                let (min, max) = arg.split_once(' ').unwrap_or((arg, "-"));
                Self::SetPriceRange {
                    min: bound(min)?,
                    max: bound(max)?,
                }
            }
            "q" | "find" => {
                Self::SetText(Some(arg.to_owned()).filter(|q| !q.is_empty()))
            }
            "sort" => Self::Sort(parse(arg, "unknown sort option")?),
            "clear" => Self::ClearFilters,
            "fav" | "favorite" => {
                Self::ToggleFavorite(parse(arg, "invalid listing ID")?)
            }
            "save" => Self::Save(parse(arg, "invalid listing ID")?),
            "unsave" => Self::Unsave(parse(arg, "invalid listing ID")?),
            "home" => Self::Home,
            "favorites" | "saved" => Self::ShowFavorites,
            "districts" => Self::ShowDistricts,
            "district-page" => {
                Self::ShowDistrict(parse(arg, "unknown district")?)
            }
            "open" | "show" => {
                if arg.is_empty() {
                    return Err("listing slug or ID is required");
                }
                Self::Open(arg.to_owned())
            }
            "close" => Self::Close,
            "book" => Self::StartBooking(parse(arg, "invalid listing ID")?),
            "move-in" => Self::SetMoveIn(
                Date::from_iso8601(arg)
                    .map_err(|_| "move-in date must be like `2026-02-01`")?,
            ),
            "term" => Self::SetTerm(
                arg.trim_end_matches(" months")
                    .parse::<u8>()
                    .ok()
                    .and_then(|m| Term::try_from(m).ok())
                    .ok_or("term must be 6, 12 or 24 months")?,
            ),
            "message" => Self::SetMessage(arg.to_owned()),
            "name" => Self::SetName(parse(arg, "name must not be empty")?),
            "email" => Self::SetEmail(parse(arg, "invalid email address")?),
            "phone" => Self::SetPhone(parse(
                arg,
                "phone must be like `+998 90 123 45 67`",
            )?),
            "pay" => Self::SetPayment(parse(arg, "unknown payment method")?),
            "next" => Self::Next,
            "back" => Self::Back,
            "submit" => Self::Submit,
            "cancel" => Self::CancelBooking,
            _ => return Err("unknown command, type `help` to list commands"),
        })
    }
}

/// Parses the provided `arg`, replacing the error with the provided one.
fn parse<T: FromStr>(arg: &str, err: &'static str) -> Result<T, &'static str> {
    arg.parse().map_err(|_| err)
}

/// Parses a price bound, where `-` means no bound.
fn bound(arg: &str) -> Result<Option<Decimal>, &'static str> {
    match arg.trim() {
        "" | "-" => Ok(None),
        v => parse(&v.replace(['_', ' '], ""), "price must be a number")
            .map(Some),
    }
}

define_error! {
    enum StateError {
        #[code = "NO_BOOKING"]
        #[message = "No booking in progress, start one with `book <id>`"]
        NoBooking,

        #[code = "LISTING_NOT_EXISTS"]
        #[message = "No such listing"]
        ListingNotExists,
    }
}

impl State {
    /// Loads the initial [`State`] of the search page.
    ///
    /// # Errors
    ///
    /// If the [`Service`] fails to load [`Listing`]s.
    pub async fn load(service: &Service) -> Result<Self, Error> {
        let favorites = service
            .execute(query::favorites::Ids::by(All))
            .await
            .map_err(|e| e.into_error())?
            .into_iter()
            .map(Into::into)
            .collect();

        let mut state = Self {
            favorites,
            ..Self::default()
        };
        state.search(service).await?;
        Ok(state)
    }

    /// Applies the provided [`Event`] to this [`State`].
    ///
    /// # Errors
    ///
    /// If the [`Event`] cannot be applied. The [`State`] stays usable.
    #[tracing::instrument(skip_all, fields(event = ?event))]
    pub async fn dispatch(
        &mut self,
        service: &Service,
        event: Event,
    ) -> Result<(), Error> {
        use Event as Ev;

        match event {
            Ev::Navigate(url) => {
                (self.criteria, self.sort) = route::parse(&url);
                self.details = None;
            }
            Ev::ToggleDistrict(d) => toggle(&mut self.criteria.districts, d),
            Ev::ToggleRooms(r) => toggle(&mut self.criteria.rooms, r),
            Ev::ToggleKind(k) => toggle(&mut self.criteria.kinds, k),
            Ev::ToggleAmenity(a) => toggle(&mut self.criteria.amenities, a),
            Ev::ToggleFurnishing(f) => {
                toggle(&mut self.criteria.furnishing, f);
            }
            Ev::SetPriceRange { min, max } => {
                self.criteria.price_min = min;
                self.criteria.price_max = max;
            }
            Ev::SetText(text) => self.criteria.text = text,
            Ev::Sort(sort) => self.sort = sort,
            Ev::ClearFilters => self.criteria = Criteria::default(),
            Ev::ToggleFavorite(listing_id) => {
                return self.toggle_favorite(service, listing_id).await;
            }
            Ev::Save(listing_id) => {
                _ = service
                    .execute(command::AddFavorite {
                        listing_id: listing_id.clone(),
                    })
                    .await
                    .map_err(|e| e.into_error())?;
                _ = self.favorites.insert(listing_id);
                return self.refresh_favorites(service).await;
            }
            Ev::Unsave(listing_id) => {
                _ = service
                    .execute(command::RemoveFavorite {
                        listing_id: listing_id.clone(),
                    })
                    .await
                    .map_err(|e| e.into_error())?;
                _ = self.favorites.remove(&listing_id);
                return self.refresh_favorites(service).await;
            }
            Ev::Home => {
                let featured = service
                    .execute(query::listings::Featured)
                    .await
                    .map_err(|e| e.into_error())?;
                let latest = service
                    .execute(query::listings::Latest::default())
                    .await
                    .map_err(|e| e.into_error())?;
                self.show(Page::Home { featured, latest });
                return Ok(());
            }
            Ev::ShowFavorites => {
                let listings = service
                    .execute(query::favorites::List)
                    .await
                    .map_err(|e| e.into_error())?;
                self.show(Page::Favorites(listings));
                return Ok(());
            }
            Ev::ShowDistricts => {
                let all = service
                    .execute(query::districts::All::by(All))
                    .await
                    .map_err(|e| e.into_error())?;
                let popular = service
                    .execute(query::districts::Popular)
                    .await
                    .map_err(|e| e.into_error())?;
                self.show(Page::Districts { all, popular });
                return Ok(());
            }
            Ev::ShowDistrict(id) => {
                let info = service
                    .execute(query::districts::ById::by(id))
                    .await
                    .map_err(|e| e.into_error())?;
                let listings = service
                    .execute(query::listings::ByDistrict::by(id))
                    .await
                    .map_err(|e| e.into_error())?;
                self.show(Page::District { id, info, listings });
                return Ok(());
            }
            Ev::Open(slug_or_id) => {
                return self.open(service, &slug_or_id).await;
            }
            Ev::Close => {
                self.details = None;
                return Ok(());
            }
            Ev::StartBooking(listing_id) => {
                return self.start_booking(service, listing_id).await;
            }
            Ev::SetMoveIn(date) => {
                return self
                    .wizard()?
                    .set_move_in(date)
                    .map_err(|e| e.into_error());
            }
            Ev::SetTerm(term) => {
                return self
                    .wizard()?
                    .set_term(term)
                    .map_err(|e| e.into_error());
            }
            Ev::SetMessage(msg) => {
                self.wizard()?.message = Some(msg).filter(|m| !m.is_empty());
                return Ok(());
            }
            Ev::SetName(name) => {
                self.wizard()?.name = Some(name);
                return Ok(());
            }
            Ev::SetEmail(email) => {
                self.wizard()?.email = Some(email);
                return Ok(());
            }
            Ev::SetPhone(phone) => {
                self.wizard()?.phone = Some(phone);
                return Ok(());
            }
            Ev::SetPayment(method) => {
                self.wizard()?.payment = method;
                return Ok(());
            }
            Ev::Next => {
                return self
                    .wizard()?
                    .advance()
                    .map(drop)
                    .map_err(|e| e.into_error());
            }
            Ev::Back => {
                _ = self.wizard()?.back();
                return Ok(());
            }
            Ev::Submit => return self.submit(service).await,
            Ev::CancelBooking => {
                if self.booking.take().is_none() {
                    return Err(StateError::NoBooking.into());
                }
                return Ok(());
            }
        }

        // Every search page change re-runs the search.
        self.page = Page::Search;
        self.search(service).await
    }

    /// Re-runs the search with the current [`Criteria`] and [`SortKey`].
    async fn search(&mut self, service: &Service) -> Result<(), Error> {
        self.results = service
            .execute(query::listings::Search {
                criteria: self.criteria.clone(),
                sort: self.sort,
            })
            .await
            .map_err(|e| e.into_error())?;
        log::debug!(
            "found {} listings at `{}`",
            self.results.len(),
            route::to_url(&self.criteria, self.sort),
        );
        Ok(())
    }

    /// Toggles whether the [`Listing`] is a favorite.
    async fn toggle_favorite(
        &mut self,
        service: &Service,
        listing_id: listing::Id,
    ) -> Result<(), Error> {
        let saved = service
            .execute(command::ToggleFavorite {
                listing_id: listing_id.clone(),
            })
            .await
            .map_err(|e| e.into_error())?;
        if saved {
            _ = self.favorites.insert(listing_id);
        } else {
            _ = self.favorites.remove(&listing_id);
        }
        self.refresh_favorites(service).await
    }

    /// Reloads the favorite [`Listing`]s if their [`Page`] is shown.
    async fn refresh_favorites(
        &mut self,
        service: &Service,
    ) -> Result<(), Error> {
        if let Page::Favorites(listings) = &mut self.page {
            *listings = service
                .execute(query::favorites::List)
                .await
                .map_err(|e| e.into_error())?;
        }
        Ok(())
    }

    /// Shows the provided [`Page`], closing any opened [`Details`].
    fn show(&mut self, page: Page) {
        self.details = None;
        self.page = page;
    }

    /// Opens [`Details`] of a [`Listing`] by its slug or ID.
    async fn open(
        &mut self,
        service: &Service,
        slug_or_id: &str,
    ) -> Result<(), Error> {
        let by_slug = match listing::Slug::new(slug_or_id) {
            Some(slug) => service
                .execute(query::listing::BySlug::by(slug))
                .await
                .map_err(|e| e.into_error())?,
            None => None,
        };
        let found = match (by_slug, listing::Id::new(slug_or_id)) {
            (Some(l), _) => Some(l),
            (None, Some(id)) => service
                .execute(query::listing::ById::by(id))
                .await
                .map_err(|e| e.into_error())?,
            (None, None) => None,
        };
        let listing = found.ok_or(StateError::ListingNotExists)?;

        let landlord = service
            .execute(query::landlord::ById::by(listing.landlord_id.clone()))
            .await
            .map_err(|e| e.into_error())?;
        if landlord.is_none() {
            log::warn!(
                "`Landlord(id: {})` of `Listing(id: {})` not found",
                listing.landlord_id,
                listing.id,
            );
        }

        self.details = Some(Details { listing, landlord });
        Ok(())
    }

    /// Starts a [`Booking`] of a [`Listing`].
    async fn start_booking(
        &mut self,
        service: &Service,
        listing_id: listing::Id,
    ) -> Result<(), Error> {
        let listing = service
            .execute(query::listing::ById::by(listing_id))
            .await
            .map_err(|e| e.into_error())?
            .ok_or(StateError::ListingNotExists)?;

        self.booking = Some(Booking {
            wizard: Wizard::new(&listing),
            breakdown: Breakdown::new(
                listing.price,
                service.config().service_fee,
            ),
            listing,
            confirmation: None,
        });
        Ok(())
    }

    /// Submits the [`Booking`] in progress.
    async fn submit(&mut self, service: &Service) -> Result<(), Error> {
        let booking = self.booking.as_mut().ok_or(StateError::NoBooking)?;

        let request = booking.wizard.request().map_err(|e| e.into_error())?;
        let confirmation = service
            .execute(command::SubmitBooking(request))
            .await
            .map_err(|e| e.into_error())?;
        booking
            .wizard
            .complete(&confirmation)
            .map_err(|e| e.into_error())?;

        log::info!(
            "booking `{}` of `Listing(id: {})` is confirmed",
            confirmation.reference,
            booking.listing.id,
        );
        booking.confirmation = Some(confirmation);
        Ok(())
    }

    /// Returns the [`Wizard`] of the [`Booking`] in progress.
    fn wizard(&mut self) -> Result<&mut Wizard, Error> {
        self.booking
            .as_mut()
            .map(|b| &mut b.wizard)
            .ok_or_else(|| StateError::NoBooking.into())
    }
}

/// Inserts the `value` into the `set` if it's absent, or removes it
/// otherwise.
fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        _ = set.insert(value);
    }
}

impl Booking {
    /// Returns the current [`booking::Step`].
    #[must_use]
    pub fn step(&self) -> booking::Step {
        self.wizard.step()
    }
}
