//! Text rendering of the [`State`].

use std::{collections::BTreeSet, fmt};

use common::{format, DateTime};
use itertools::Itertools as _;
use service::domain::{
    booking::{Breakdown, Step},
    district, listing, District, Listing,
};

use crate::{
    route,
    state::{Booking, Details, Page},
    State,
};

/// Maximum number of description characters shown on a search result card.
const CARD_DESCRIPTION_LEN: usize = 90;

/// Help on the shell commands.
pub const HELP: &str = "\
search <url>          open a search page URL, like `/search?rooms=2`
district <name>       toggle a district filter, like `mirzo-ulugbek`
rooms <n>             toggle a rooms threshold, like `2` or `4+`
type <kind>           toggle a property type filter
amenity <tag>         toggle a required amenity, like `wifi`
furnished <level>     toggle a furnishing filter
price <min> <max>     set the monthly price range, `-` for no bound
q <text>              set the text query, empty to reset
sort <key>            newest, price-low, price-high, area-low, area-high, popular
clear                 clear all filters
home                  show featured and just listed properties
districts             show the districts overview
district-page <name>  show the properties of a district
open <slug or id>     show listing details
close                 close listing details
fav <id>              toggle a favorite
save <id>             save a listing to favorites
unsave <id>           remove a listing from favorites
favorites             show the saved listings
book <id>             start booking a listing
move-in <date>        set the move-in date, like `2026-02-01`
term <months>         set the term, 6, 12 or 24 months
message <text>        set a message to the landlord
name|email|phone <v>  set contact details
pay <method>          payme, click, uzcard or visa
next | back           move between booking steps
submit                send the booking request
cancel                abandon the booking
help                  show this help
quit                  exit";

/// Renders the current page of the provided [`State`].
///
/// A [`Booking`] in progress takes precedence over opened [`Details`], which
/// take precedence over the current [`Page`].
#[must_use]
pub fn render(state: &State, now: DateTime) -> String {
    if let Some(booking) = &state.booking {
        return BookingPage(booking).to_string();
    }
    if let Some(details) = &state.details {
        return DetailsPage {
            details,
            is_favorite: state.favorites.contains(&details.listing.id),
            now,
        }
        .to_string();
    }

    let favorites = &state.favorites;
    match &state.page {
        Page::Search => SearchPage(state).to_string(),
        Page::Home { featured, latest } => HomePage {
            featured,
            latest,
            favorites,
        }
        .to_string(),
        Page::Favorites(listings) => FavoritesPage(listings).to_string(),
        Page::Districts { all, popular } => {
            DistrictsPage { all, popular }.to_string()
        }
        Page::District { id, info, listings } => DistrictPage {
            id: *id,
            info: info.as_ref(),
            listings,
            favorites,
        }
        .to_string(),
    }
}

/// Search page with the results of the current search.
#[derive(Clone, Copy, Debug)]
pub struct SearchPage<'s>(pub &'s State);

impl fmt::Display for SearchPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let State {
            criteria,
            sort,
            results,
            favorites,
            ..
        } = self.0;

        writeln!(f, "{}", route::to_url(criteria, *sort))?;
        write!(f, "{} found", plural(results.len(), "listing"))?;
        match criteria.active_count() {
            0 => {}
            n => write!(f, ", {} active", plural(n, "filter"))?,
        }
        writeln!(f, ", sorted by {}", sort.label())?;

        if results.is_empty() {
            return write!(
                f,
                "\nNo properties match your filters. Type `clear` to reset \
                 them.",
            );
        }
        for listing in results {
            writeln!(f)?;
            card(f, listing, favorites.contains(&listing.id))?;
        }
        Ok(())
    }
}

/// Home page with featured and the latest [`Listing`]s.
#[derive(Clone, Copy, Debug)]
pub struct HomePage<'l> {
    /// Featured [`Listing`]s.
    pub featured: &'l [Listing],

    /// The most recently created [`Listing`]s.
    pub latest: &'l [Listing],

    /// IDs of the favorite [`Listing`]s.
    pub favorites: &'l BTreeSet<listing::Id>,
}

impl fmt::Display for HomePage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hand-Picked Properties")?;
        for listing in self.featured {
            writeln!(f)?;
            card(f, listing, self.favorites.contains(&listing.id))?;
        }

        writeln!(f, "\nJust Listed")?;
        for listing in self.latest {
            writeln!(f)?;
            card(f, listing, self.favorites.contains(&listing.id))?;
        }
        Ok(())
    }
}

/// Page of the favorite [`Listing`]s.
#[derive(Clone, Copy, Debug)]
pub struct FavoritesPage<'l>(pub &'l [Listing]);

impl fmt::Display for FavoritesPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "My Favorites")?;
        writeln!(f, "{} saved", plural(self.0.len(), "property"))?;

        if self.0.is_empty() {
            return write!(
                f,
                "\nNo favorites yet. Save a listing with `save <id>`.",
            );
        }
        for listing in self.0 {
            writeln!(f)?;
            card(f, listing, true)?;
        }
        Ok(())
    }
}

/// Page of a single [`District`] with its [`Listing`]s.
#[derive(Clone, Copy, Debug)]
pub struct DistrictPage<'d> {
    /// [`District`] to render.
    pub id: District,

    /// Overview of the [`District`], if known.
    pub info: Option<&'d district::Info>,

    /// [`Listing`]s located in the [`District`].
    pub listings: &'d [Listing],

    /// IDs of the favorite [`Listing`]s.
    pub favorites: &'d BTreeSet<listing::Id>,
}

impl fmt::Display for DistrictPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.id.label(), self.id)?;
        if let Some(info) = self.info {
            writeln!(f, "{}", info.description)?;
            writeln!(
                f,
                "{} properties, average {}/month",
                info.property_count,
                info.average_price.grouped(),
            )?;
        }

        writeln!(f, "\n{} listed", plural(self.listings.len(), "property"))?;
        for listing in self.listings {
            writeln!(f)?;
            card(f, listing, self.favorites.contains(&listing.id))?;
        }
        Ok(())
    }
}

/// Writes a search result card of the provided [`Listing`].
fn card(
    f: &mut fmt::Formatter<'_>,
    listing: &Listing,
    is_favorite: bool,
) -> fmt::Result {
    writeln!(
        f,
        "{}[{}] {}{}",
        if is_favorite { "* " } else { "" },
        listing.id,
        listing.title,
        if listing.is_verified { " (verified)" } else { "" },
    )?;
    writeln!(
        f,
        "    {} in {}, {}, {}, floor {}/{}",
        listing.kind.label(),
        listing.district.label(),
        plural(listing.rooms, "room"),
        format::area(listing.area),
        listing.floor,
        listing.num_floors,
    )?;
    writeln!(
        f,
        "    {}/month{}",
        listing.price.grouped(),
        if listing.is_available() {
            String::new()
        } else {
            format!(", {}", listing.status.label())
        },
    )?;
    writeln!(
        f,
        "    {}",
        format::truncate(listing.description.as_ref(), CARD_DESCRIPTION_LEN),
    )
}

/// Details page of a single [`Listing`].
#[derive(Clone, Copy, Debug)]
pub struct DetailsPage<'d> {
    /// [`Details`] to render.
    pub details: &'d Details,

    /// Indicator whether the [`Listing`] is a favorite.
    pub is_favorite: bool,

    /// Current [`DateTime`] to render relative times against.
    pub now: DateTime,
}

impl fmt::Display for DetailsPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Details { listing: l, landlord } = self.details;

        writeln!(
            f,
            "{} [{}]{}",
            l.title,
            l.id,
            if self.is_favorite { " (saved)" } else { "" },
        )?;
        writeln!(f, "{}", l.address)?;
        writeln!(
            f,
            "{}/month ({}/m\u{b2})",
            l.price.grouped(),
            l.price_per_sqm.grouped(),
        )?;
        writeln!(
            f,
            "{}, {} ({}, {}), {}, floor {}/{}",
            l.kind.label(),
            plural(l.rooms, "room"),
            plural(l.bedrooms, "bedroom"),
            plural(l.bathrooms, "bathroom"),
            format::area(l.area),
            l.floor,
            l.num_floors,
        )?;
        writeln!(
            f,
            "{}, {} renovation, {}",
            l.furnishing.label(),
            l.renovation.label(),
            l.status.label(),
        )?;
        writeln!(
            f,
            "Available from {}, minimum stay {} months",
            l.available_from, l.minimum_stay,
        )?;
        writeln!(
            f,
            "Amenities: {}",
            l.amenities.iter().map(|a| a.label()).format(", "),
        )?;

        if !l.nearby_places.is_empty() {
            writeln!(f, "Nearby:")?;
            for place in &l.nearby_places {
                writeln!(
                    f,
                    "  - {} ({}), {}",
                    place.name,
                    place.kind.label(),
                    format::distance(place.distance),
                )?;
            }
        }

        if let Some(landlord) = landlord {
            writeln!(
                f,
                "Landlord: [{}] {}{}, rating {} ({}), responds {}, {} \
                 response rate",
                format::initials(landlord.name.as_ref()),
                landlord.name,
                if landlord.is_verified { " (verified)" } else { "" },
                landlord.rating,
                plural(landlord.review_count, "review"),
                landlord.response_time,
                landlord.response_rate,
            )?;
        }
        writeln!(
            f,
            "Posted: {}, updated: {}, {} views, {} saves",
            format::relative_time(l.created_at, self.now),
            format::relative_time(l.updated_at, self.now),
            l.views,
            l.favorites,
        )?;

        write!(f, "\n{}\n", l.description)
    }
}

/// Booking page of a [`Booking`] in progress.
#[derive(Clone, Copy, Debug)]
pub struct BookingPage<'b>(pub &'b Booking);

impl fmt::Display for BookingPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Booking {
            listing,
            wizard,
            breakdown,
            confirmation,
        } = self.0;

        if let Some(c) = confirmation {
            writeln!(f, "{}", Step::Complete)?;
            writeln!(f, "Reference: {}", c.reference)?;
            writeln!(f, "{} [{}]", listing.title, listing.id)?;
            writeln!(
                f,
                "Move-in {} for {}, paying with {}",
                c.request.move_in,
                c.request.term.label(),
                c.request.payment.label(),
            )?;
            writeln!(f, "Due now: {}", c.breakdown.total.grouped())?;
            return write!(
                f,
                "The landlord will contact {} shortly.",
                c.request.tenant.email,
            );
        }

        writeln!(f, "Booking {} [{}]", listing.title, listing.id)?;
        writeln!(f, "{}", wizard.step())?;

        match wizard.step() {
            Step::Schedule => {
                writeln!(
                    f,
                    "  Move-in: {}  (available from {})",
                    or_dash(wizard.move_in()),
                    listing.available_from,
                )?;
                writeln!(
                    f,
                    "  Term: {}  (minimum stay {} months)",
                    or_dash(wizard.term().map(|t| t.label())),
                    listing.minimum_stay,
                )?;
                writeln!(
                    f,
                    "  Message: {}",
                    or_dash(wizard.message.as_deref()),
                )?;
            }
            Step::Contact => {
                writeln!(f, "  Full name: {}", or_dash(wizard.name.as_ref()))?;
                writeln!(f, "  Email: {}", or_dash(wizard.email.as_ref()))?;
                writeln!(f, "  Phone: {}", or_dash(wizard.phone.as_ref()))?;
            }
            Step::Payment | Step::Complete => {
                writeln!(f, "  Pay with: {}", wizard.payment.label())?;
                breakdown_lines(f, breakdown)?;
            }
        }

        let missing = wizard.missing();
        if missing.is_empty() {
            write!(f, "Type `next` to continue")?;
            if wizard.step() == Step::Payment {
                write!(f, " or `submit` to send the request")?;
            }
            writeln!(f, ".")
        } else {
            writeln!(f, "Required: {}", missing.iter().format(", "))
        }
    }
}

/// Writes the price [`Breakdown`] lines.
fn breakdown_lines(
    f: &mut fmt::Formatter<'_>,
    breakdown: &Breakdown,
) -> fmt::Result {
    writeln!(f, "  Monthly rent:  {}", breakdown.price.grouped())?;
    writeln!(f, "  Service fee:   {}", breakdown.service_fee.grouped())?;
    writeln!(f, "  Total:         {}", breakdown.total.grouped())
}

/// Overview of the [`district::Info`]s.
#[derive(Clone, Copy, Debug)]
pub struct DistrictsPage<'i> {
    /// All the [`district::Info`]s.
    pub all: &'i [district::Info],

    /// The most popular [`district::Info`]s.
    pub popular: &'i [district::Info],
}

impl fmt::Display for DistrictsPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Popular districts")?;
        for d in self.popular {
            writeln!(
                f,
                "  {}: {} properties, from {}/month",
                d.name(),
                d.property_count,
                d.average_price.grouped(),
            )?;
        }

        writeln!(f, "\nAll districts")?;
        for d in self.all {
            writeln!(f, "  {} ({})", d.name(), d.id)?;
            writeln!(f, "    {}", d.description)?;
            writeln!(
                f,
                "    {} properties, average {}/month",
                d.property_count,
                d.average_price.grouped(),
            )?;
            writeln!(f, "    {}", d.highlights.iter().format(", "))?;
        }
        Ok(())
    }
}

/// Formats the provided `count` of `noun`s, like `1 room`, `3 rooms` or
/// `2 properties`.
fn plural<N>(count: N, noun: &str) -> String
where
    N: fmt::Display + From<u8> + PartialEq,
{
    if count == N::from(1) {
        format!("{count} {noun}")
    } else if let Some(stem) = noun.strip_suffix('y') {
        format!("{count} {stem}ies")
    } else {
        format!("{count} {noun}s")
    }
}

/// Formats the provided optional value, using `-` for [`None`].
fn or_dash<T: fmt::Display>(val: Option<T>) -> String {
    val.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

#[cfg(test)]
mod spec {
    use common::{Date, DateTime};
    use service::{
        domain::{
            booking::{Breakdown, Step, Wizard},
            listing::{self, Criteria, SortKey},
            District, Listing,
        },
        infra::memory::fixture,
        Config,
    };

    use crate::{
        state::{Booking, Details, Page},
        State,
    };

    use super::{render, DistrictsPage, HELP};

    fn listing(id: &str) -> Listing {
        fixture::listings()
            .into_iter()
            .find(|l| l.id.to_string() == id)
            .unwrap()
    }

    fn now() -> DateTime {
        DateTime::from_rfc3339("2026-01-16T10:00:00Z").unwrap()
    }

    #[test]
    fn renders_search_results() {
        let state = State {
            criteria: Criteria {
                rooms: [1].into(),
                ..Criteria::default()
            },
            sort: SortKey::PriceLow,
            results: vec![listing("p8"), listing("p1")],
            favorites: [listing::Id::new("p1").unwrap()].into(),
            ..State::default()
        };

        let page = render(&state, now());

        assert!(page.starts_with("/search?rooms=1&sort=price-low\n"), "{page}");
        assert!(page.contains(
            "2 listings found, 1 filter active, sorted by Price: Low to High",
        ));
        assert!(page.contains("[p8] Budget Room in Almazar District\n"));
        assert!(page.contains("* [p1] Modern Studio near IT Park (verified)"));
        assert!(page.contains(
            "Studio in Mirzo Ulugbek, 1 room, 40 m\u{b2}, floor 12/16",
        ));
        assert!(page.contains("5 500 000 UZS/month"));
    }

    #[test]
    fn renders_empty_results() {
        let page = render(&State::default(), now());

        assert!(page.contains("0 listings found, sorted by Newest First"));
        assert!(page.contains("No properties match your filters"));
    }

    #[test]
    fn renders_details() {
        let state = State {
            details: Some(Details {
                listing: listing("p1"),
                landlord: fixture::landlords().into_iter().next(),
            }),
            ..State::default()
        };

        let page = render(&state, now());

        assert!(page.starts_with("Modern Studio near IT Park [p1]\n"), "{page}");
        assert!(page.contains("  - IT Park (Mall), 500 m\n"));
        assert!(page.contains("  - INHA University (University), 1.2 km\n"));
        assert!(page.contains("Landlord: [AK] Aziza Karimova (verified)"));
        assert!(page.contains("rating 4.9 (47 reviews)"));
        assert!(page.contains("Posted: 6 days ago, updated: 19 hours ago"));
    }

    #[test]
    fn renders_booking_steps() {
        let p8 = listing("p8");
        let mut booking = Booking {
            wizard: Wizard::new(&p8),
            breakdown: Breakdown::new(p8.price, Config::default().service_fee),
            listing: p8,
            confirmation: None,
        };

        let page = super::BookingPage(&booking).to_string();
        assert!(page.contains("1. Booking details\n"), "{page}");
        assert!(page.contains("Move-in: -  (available from 2026-01-20)"));
        assert!(page.contains("Required: move-in date"));

        booking
            .wizard
            .set_move_in(Date::from_iso8601("2026-01-25").unwrap())
            .unwrap();
        let page = super::BookingPage(&booking).to_string();
        assert!(page.contains("Term: 12 months"));
        assert!(page.contains("Type `next` to continue."));

        booking.wizard.name = "Ali Valiyev".parse().ok();
        booking.wizard.email = "ali@example.uz".parse().ok();
        booking.wizard.phone = "901234567".parse().ok();
        assert_eq!(booking.wizard.advance().unwrap(), Step::Contact);
        assert_eq!(booking.wizard.advance().unwrap(), Step::Payment);

        let page = super::BookingPage(&booking).to_string();
        assert!(page.contains("Pay with: Payme"));
        assert!(page.contains("Monthly rent:  1 800 000 UZS"));
        assert!(page.contains("Service fee:   270 000 UZS"));
        assert!(page.contains("Total:         2 070 000 UZS"));
        assert!(page.contains("or `submit` to send the request."));
    }

    #[test]
    fn renders_districts() {
        let all = fixture::districts();
        let popular = &all[2..3];

        let page = DistrictsPage {
            all: &all,
            popular,
        }
        .to_string();

        assert!(page.starts_with(
            "Popular districts\n  Chilanzar: 534 properties, from 6 500 000 \
             UZS/month\n",
        ));
        assert!(page.contains("  Mirzo Ulugbek (mirzo-ulugbek)\n"));
        assert!(page.contains("    IT Park, Tech Companies, INHA University\n"));
    }

    #[test]
    fn renders_home() {
        let state = State {
            page: Page::Home {
                featured: vec![listing("p1"), listing("p2")],
                latest: vec![listing("p8")],
            },
            favorites: [listing::Id::new("p2").unwrap()].into(),
            ..State::default()
        };

        let page = render(&state, now());

        assert!(page.starts_with("Hand-Picked Properties\n\n[p1]"), "{page}");
        assert!(page.contains("* [p2] Spacious 3-Room Apartment in Yunusabad"));
        assert!(page.contains(
            "\nJust Listed\n\n[p8] Budget Room in Almazar District\n",
        ));
    }

    #[test]
    fn renders_favorites() {
        let empty = State {
            page: Page::Favorites(vec![]),
            ..State::default()
        };
        let saved = State {
            page: Page::Favorites(vec![listing("p5")]),
            ..State::default()
        };

        let page = render(&empty, now());
        assert!(page.starts_with("My Favorites\n0 properties saved\n"));
        assert!(page.contains("No favorites yet"));

        let page = render(&saved, now());
        assert!(page.contains("1 property saved\n"), "{page}");
        assert!(page.contains("* [p5] Affordable Studio in Chilanzar"));
    }

    #[test]
    fn renders_district() {
        let info = fixture::districts()
            .into_iter()
            .find(|d| d.id == District::MirzoUlugbek);
        let known = State {
            page: Page::District {
                id: District::MirzoUlugbek,
                info,
                listings: vec![listing("p1")],
            },
            ..State::default()
        };
        let unknown = State {
            page: Page::District {
                id: District::Uchtepa,
                info: None,
                listings: vec![],
            },
            ..State::default()
        };

        let page = render(&known, now());
        assert!(page.starts_with("Mirzo Ulugbek (mirzo-ulugbek)\n"), "{page}");
        assert!(page.contains("\n1 property listed\n\n[p1] Modern Studio"));

        let page = render(&unknown, now());
        assert_eq!(page, "Uchtepa (uchtepa)\n\n0 properties listed\n");
    }

    #[test]
    fn prefers_details_over_page() {
        let state = State {
            page: Page::Favorites(vec![]),
            details: Some(Details {
                listing: listing("p8"),
                landlord: None,
            }),
            ..State::default()
        };

        let page = render(&state, now());

        assert!(page.starts_with("Budget Room in Almazar District [p8]\n"));
    }

    #[test]
    fn documents_every_command() {
        for cmd in [
            "search",
            "district",
            "district-page",
            "home",
            "favorites",
            "save",
            "unsave",
            "book",
            "submit",
            "cancel",
            "quit",
        ] {
            assert!(HELP.contains(cmd), "`{cmd}` is not documented");
        }
    }
}
