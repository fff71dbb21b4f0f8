//! Filtering and ordering of [`Listing`]s.
//!
//! Every constraint of [`Criteria`] is a no-op when left empty, and all the
//! constraints are combined with AND. Inside a single constraint the values
//! are OR'ed, except the required [`Amenity`] set, which must be contained
//! in a [`Listing`] completely.

use std::collections::BTreeSet;

use common::define_kind;
use rust_decimal::Decimal;

use crate::domain::District;

use super::{Amenity, Area, Furnishing, Kind, Listing, Rooms};

/// Filter constraints selected by a user.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Criteria {
    /// Free-text query matched case-insensitively against a [`Listing`]
    /// title, description and address.
    pub text: Option<String>,

    /// Allowed [`District`]s.
    pub districts: BTreeSet<District>,

    /// Inclusive lower bound of a [`Listing`] price amount.
    pub price_min: Option<Decimal>,

    /// Inclusive upper bound of a [`Listing`] price amount.
    pub price_max: Option<Decimal>,

    /// Inclusive lower bound of a [`Listing`] [`Area`].
    pub area_min: Option<Area>,

    /// Inclusive upper bound of a [`Listing`] [`Area`].
    pub area_max: Option<Area>,

    /// Minimum [`Rooms`] thresholds, any of which is enough to match
    /// ("2+ rooms").
    pub rooms: BTreeSet<Rooms>,

    /// Allowed [`Kind`]s.
    pub kinds: BTreeSet<Kind>,

    /// [`Amenity`] tags a [`Listing`] must have all of.
    pub amenities: BTreeSet<Amenity>,

    /// Allowed [`Furnishing`] levels.
    pub furnishing: BTreeSet<Furnishing>,
}

impl Criteria {
    /// Indicates whether the provided [`Listing`] satisfies these
    /// [`Criteria`].
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_text(listing)
            && (self.districts.is_empty()
                || self.districts.contains(&listing.district))
            && self.price_min.map_or(true, |min| listing.price.amount >= min)
            && self.price_max.map_or(true, |max| listing.price.amount <= max)
            && self.area_min.map_or(true, |min| listing.area >= min)
            && self.area_max.map_or(true, |max| listing.area <= max)
            && (self.rooms.is_empty()
                || self.rooms.iter().any(|&min| min <= listing.rooms))
            && (self.kinds.is_empty() || self.kinds.contains(&listing.kind))
            && self.amenities.iter().all(|&a| listing.has(a))
            && (self.furnishing.is_empty()
                || self.furnishing.contains(&listing.furnishing))
    }

    /// Matches the [`Criteria::text`] query, if any.
    fn matches_text(&self, listing: &Listing) -> bool {
        let Some(text) = self.text.as_deref().map(str::trim) else {
            return true;
        };
        if text.is_empty() {
            return true;
        }

        let needle = text.to_lowercase();
        let fields: [&str; 3] = [
            listing.title.as_ref(),
            listing.description.as_ref(),
            listing.address.as_ref(),
        ];
        fields
            .into_iter()
            .any(|haystack| haystack.to_lowercase().contains(&needle))
    }

    /// Returns the number of active filters.
    ///
    /// Every selected value of a set constraint counts separately, while
    /// ranges and the text query count once each.
    #[must_use]
    pub fn active_count(&self) -> usize {
        let text = self
            .text
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        let price = self.price_min.is_some() || self.price_max.is_some();
        let area = self.area_min.is_some() || self.area_max.is_some();

        self.districts.len()
            + self.rooms.len()
            + self.kinds.len()
            + self.amenities.len()
            + self.furnishing.len()
            + usize::from(text)
            + usize::from(price)
            + usize::from(area)
    }

    /// Indicates whether no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

define_kind! {
    #[doc = "Order of [`Listing`]s in search results."]
    enum SortKey {
        #[doc = "Most recently created first."]
        #[label = "Newest First"]
        Newest = 1,

        #[doc = "Cheapest first."]
        #[label = "Price: Low to High"]
        PriceLow = 2,

        #[doc = "Most expensive first."]
        #[label = "Price: High to Low"]
        PriceHigh = 3,

        #[doc = "Smallest first."]
        #[label = "Size: Smallest"]
        AreaLow = 4,

        #[doc = "Largest first."]
        #[label = "Size: Largest"]
        AreaHigh = 5,

        #[doc = "Most viewed first."]
        #[label = "Most Popular"]
        Popular = 6,
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Newest
    }
}

impl SortKey {
    /// Sorts the provided [`Listing`]s in place.
    ///
    /// The sort is stable, so [`Listing`]s with equal keys keep their
    /// relative order.
    pub fn sort(self, listings: &mut [Listing]) {
        match self {
            Self::Newest => {
                listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            Self::PriceLow => listings.sort_by_key(|l| l.price.amount),
            Self::PriceHigh => {
                listings.sort_by(|a, b| b.price.amount.cmp(&a.price.amount));
            }
            Self::AreaLow => listings.sort_by_key(|l| l.area),
            Self::AreaHigh => listings.sort_by(|a, b| b.area.cmp(&a.area)),
            Self::Popular => listings.sort_by(|a, b| b.views.cmp(&a.views)),
        }
    }
}

/// Selects the [`Listing`]s matching the provided [`Criteria`] and orders
/// them by the provided [`SortKey`].
///
/// The input is left untouched: the result is a sorted copy of the matching
/// subsequence. Contradictory [`Criteria`] simply produce no [`Listing`]s.
#[must_use]
pub fn query<'l, I>(
    listings: I,
    criteria: &Criteria,
    sort: SortKey,
) -> Vec<Listing>
where
    I: IntoIterator<Item = &'l Listing>,
{
    let mut found = listings
        .into_iter()
        .filter(|l| criteria.matches(l))
        .cloned()
        .collect::<Vec<_>>();
    sort.sort(&mut found);
    found
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::{Date, DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::{
        landlord,
        listing::{
            Address, Amenity, Area, Coordinates, Description, Furnishing, Id,
            Kind, Listing, Renovation, Slug, Status, Title,
        },
        District,
    };

    use super::{query, Criteria, SortKey};

    #[expect(unsafe_code, reason = "test fixtures")]
    fn listing(
        id: &str,
        price: i64,
        rooms: u8,
        district: District,
        created_at: &str,
    ) -> Listing {
        unsafe {
            Listing {
                id: Id::new_unchecked(id),
                slug: Slug::new_unchecked(id),
                title: Title::new_unchecked(format!("Listing {id}")),
                description: Description::new_unchecked("Sunny and quiet."),
                kind: Kind::Apartment,
                status: Status::Available,
                address: Address::new_unchecked(format!("{district}, {id}")),
                district,
                coordinates: Coordinates {
                    lat: 41.3,
                    lng: 69.2,
                },
                nearby_places: vec![],
                price: Money::uzs(price),
                price_per_sqm: Money::uzs(price / 50),
                area: Area::from(50),
                rooms,
                bedrooms: rooms.saturating_sub(1),
                bathrooms: 1,
                floor: 1,
                num_floors: 9,
                amenities: BTreeSet::new(),
                furnishing: Furnishing::Fully,
                renovation: Renovation::Euro,
                landlord_id: landlord::Id::new_unchecked("l1"),
                views: 0,
                favorites: 0,
                is_verified: true,
                is_featured: false,
                available_from: Date::from_iso8601("2026-02-01").unwrap(),
                minimum_stay: 6,
                created_at: DateTime::from_rfc3339(created_at)
                    .unwrap()
                    .coerce(),
                updated_at: DateTime::from_rfc3339(created_at)
                    .unwrap()
                    .coerce(),
            }
        }
    }

    /// A(3M, 1 room, chilanzar), B(12M, 3 rooms, yunusabad),
    /// C(18M, 2 rooms, mirabad).
    fn abc() -> Vec<Listing> {
        vec![
            listing(
                "a",
                3_000_000,
                1,
                District::Chilanzar,
                "2026-01-03T00:00:00Z",
            ),
            listing(
                "b",
                12_000_000,
                3,
                District::Yunusabad,
                "2026-01-01T00:00:00Z",
            ),
            listing(
                "c",
                18_000_000,
                2,
                District::Mirabad,
                "2026-01-02T00:00:00Z",
            ),
        ]
    }

    fn ids(listings: &[Listing]) -> Vec<String> {
        listings.iter().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn empty_criteria_returns_everything_newest_first() {
        let all = abc();

        let found = query(&all, &Criteria::default(), SortKey::default());

        assert_eq!(ids(&found), ["a", "c", "b"]);
    }

    #[test]
    fn filters_by_price_range_and_sorts() {
        let all = abc();
        let criteria = Criteria {
            price_min: Some(Decimal::from(5_000_000)),
            price_max: Some(Decimal::from(20_000_000)),
            ..Criteria::default()
        };

        let found = query(&all, &criteria, SortKey::PriceLow);

        assert_eq!(ids(&found), ["b", "c"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let all = abc();
        let criteria = Criteria {
            price_min: Some(Decimal::from(12_000_000)),
            price_max: Some(Decimal::from(18_000_000)),
            ..Criteria::default()
        };

        let found = query(&all, &criteria, SortKey::PriceLow);

        assert_eq!(ids(&found), ["b", "c"]);
    }

    #[test]
    fn filters_by_district() {
        let all = abc();
        let criteria = Criteria {
            districts: BTreeSet::from([District::Chilanzar]),
            ..Criteria::default()
        };

        let found = query(&all, &criteria, SortKey::default());

        assert_eq!(ids(&found), ["a"]);
        assert!(found.iter().all(|l| l.district == District::Chilanzar));
    }

    #[test]
    fn room_thresholds_are_disjunctive() {
        let all = abc();
        let with_rooms = |rooms: &[u8]| Criteria {
            rooms: rooms.iter().copied().collect(),
            ..Criteria::default()
        };

        let found = query(&all, &with_rooms(&[2, 4]), SortKey::PriceLow);
        assert_eq!(ids(&found), ["b", "c"]);

        let found = query(&all, &with_rooms(&[4, 5]), SortKey::PriceLow);
        assert!(found.is_empty());

        let found = query(&all, &with_rooms(&[1]), SortKey::PriceLow);
        assert_eq!(ids(&found), ["a", "b", "c"]);
    }

    #[test]
    fn amenities_are_conjunctive() {
        let mut all = abc();
        all[0].amenities = BTreeSet::from([Amenity::Wifi, Amenity::Ac]);
        all[1].amenities =
            BTreeSet::from([Amenity::Wifi, Amenity::Ac, Amenity::Parking]);
        all[2].amenities = BTreeSet::from([Amenity::Wifi, Amenity::Parking]);
        let criteria = Criteria {
            amenities: BTreeSet::from([Amenity::Wifi, Amenity::Parking]),
            ..Criteria::default()
        };

        let found = query(&all, &criteria, SortKey::PriceLow);

        assert_eq!(ids(&found), ["b", "c"]);
    }

    #[test]
    fn filters_by_kind_and_furnishing() {
        let mut all = abc();
        all[0].kind = Kind::Studio;
        all[1].furnishing = Furnishing::Unfurnished;

        let criteria = Criteria {
            kinds: BTreeSet::from([Kind::Apartment]),
            ..Criteria::default()
        };
        assert_eq!(ids(&query(&all, &criteria, SortKey::PriceLow)), ["b", "c"]);

        let criteria = Criteria {
            furnishing: BTreeSet::from([Furnishing::Fully]),
            ..Criteria::default()
        };
        assert_eq!(ids(&query(&all, &criteria, SortKey::PriceLow)), ["a", "c"]);
    }

    #[test]
    fn filters_by_area_range() {
        let mut all = abc();
        all[0].area = Area::from(18);
        all[2].area = Area::from(180);
        let criteria = Criteria {
            area_min: Some(Area::from(20)),
            area_max: Some(Area::from(100)),
            ..Criteria::default()
        };

        let found = query(&all, &criteria, SortKey::default());

        assert_eq!(ids(&found), ["b"]);
    }

    #[test]
    fn matches_text_case_insensitively() {
        let all = abc();
        let with_text = |text: &str| Criteria {
            text: Some(text.to_owned()),
            ..Criteria::default()
        };

        let found = query(&all, &with_text("YUNUSABAD"), SortKey::default());
        assert_eq!(ids(&found), ["b"]);

        let found = query(&all, &with_text("sunny"), SortKey::PriceLow);
        assert_eq!(ids(&found), ["a", "b", "c"]);

        let found = query(&all, &with_text("   "), SortKey::PriceLow);
        assert_eq!(found.len(), 3);

        let found = query(&all, &with_text("penthouse"), SortKey::PriceLow);
        assert!(found.is_empty());
    }

    #[test]
    fn contradictory_criteria_yield_nothing() {
        let all = abc();
        let criteria = Criteria {
            price_min: Some(Decimal::from(20_000_000)),
            price_max: Some(Decimal::from(1_000_000)),
            ..Criteria::default()
        };

        assert!(query(&all, &criteria, SortKey::default()).is_empty());
    }

    #[test]
    fn sorts_by_every_key() {
        let mut all = abc();
        all[0].views = 10;
        all[1].views = 30;
        all[2].views = 20;
        all[0].area = Area::from(30);
        all[1].area = Area::from(90);
        all[2].area = Area::from(80);
        let any = Criteria::default();

        let price_low = query(&all, &any, SortKey::PriceLow);
        assert!(price_low
            .windows(2)
            .all(|w| w[0].price.amount <= w[1].price.amount));

        let price_high = query(&all, &any, SortKey::PriceHigh);
        assert!(price_high
            .windows(2)
            .all(|w| w[0].price.amount >= w[1].price.amount));

        assert_eq!(ids(&query(&all, &any, SortKey::AreaHigh)), ["b", "c", "a"]);
        assert_eq!(ids(&query(&all, &any, SortKey::AreaLow)), ["a", "c", "b"]);
        assert_eq!(ids(&query(&all, &any, SortKey::Popular)), ["b", "c", "a"]);
    }

    #[test]
    fn keeps_input_order_for_equal_keys() {
        let mut all = abc();
        for l in &mut all {
            l.price = Money::uzs(1_000_000);
        }

        let found = query(&all, &Criteria::default(), SortKey::PriceLow);

        assert_eq!(ids(&found), ["a", "b", "c"]);
    }

    #[test]
    fn is_idempotent_and_leaves_input_untouched() {
        let all = abc();
        let before = all.clone();
        let criteria = Criteria {
            rooms: BTreeSet::from([2]),
            ..Criteria::default()
        };

        let first = query(&all, &criteria, SortKey::PriceHigh);
        let second = query(&all, &criteria, SortKey::PriceHigh);

        assert_eq!(first, second);
        assert_eq!(all, before);
    }

    #[test]
    fn counts_active_filters() {
        assert_eq!(Criteria::default().active_count(), 0);
        assert!(Criteria::default().is_empty());

        let criteria = Criteria {
            districts: BTreeSet::from([District::Mirabad, District::Sergeli]),
            price_min: Some(Decimal::from(1)),
            price_max: Some(Decimal::from(2)),
            amenities: BTreeSet::from([Amenity::Wifi]),
            text: Some("  ".to_owned()),
            ..Criteria::default()
        };
        assert_eq!(criteria.active_count(), 4);
    }
}
