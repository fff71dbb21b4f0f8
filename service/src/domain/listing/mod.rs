//! [`Listing`] definitions.

pub mod search;

use std::{collections::BTreeSet, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;

use crate::domain::{landlord, District};

pub use self::search::{Criteria, SortKey};

/// Property listed for rent.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// URL-friendly [`Slug`] of this [`Listing`].
    pub slug: Slug,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Description`] of this [`Listing`].
    pub description: Description,

    /// [`Kind`] of the listed property.
    pub kind: Kind,

    /// Availability [`Status`] of this [`Listing`].
    pub status: Status,

    /// Street [`Address`] of the listed property.
    pub address: Address,

    /// [`District`] the listed property is located in.
    pub district: District,

    /// Geographical [`Coordinates`] of the listed property.
    pub coordinates: Coordinates,

    /// Notable places near the listed property.
    pub nearby_places: Vec<NearbyPlace>,

    /// Monthly rent price.
    pub price: Money,

    /// Monthly rent price per square meter of [`Area`].
    pub price_per_sqm: Money,

    /// [`Area`] of the listed property.
    pub area: Area,

    /// Number of [`Rooms`] in the listed property.
    pub rooms: Rooms,

    /// Number of bedrooms in the listed property.
    pub bedrooms: u8,

    /// Number of bathrooms in the listed property.
    pub bathrooms: u8,

    /// [`Floor`] the listed property is located on.
    pub floor: Floor,

    /// Total number of floors in the building.
    pub num_floors: NumFloors,

    /// [`Amenity`] tags of the listed property.
    pub amenities: BTreeSet<Amenity>,

    /// [`Furnishing`] level of the listed property.
    pub furnishing: Furnishing,

    /// [`Renovation`] type of the listed property.
    pub renovation: Renovation,

    /// ID of the [`Landlord`] owning the listed property.
    ///
    /// [`Landlord`]: crate::domain::Landlord
    pub landlord_id: landlord::Id,

    /// Number of times this [`Listing`] was viewed.
    pub views: Views,

    /// Number of users who added this [`Listing`] to their favorites.
    pub favorites: u32,

    /// Indicator whether this [`Listing`] was verified by the marketplace.
    pub is_verified: bool,

    /// Indicator whether this [`Listing`] is promoted on the front page.
    pub is_featured: bool,

    /// [`Date`] since the listed property may be moved in.
    pub available_from: Date,

    /// Minimum rent duration.
    pub minimum_stay: Months,

    /// [`DateTime`] when this [`Listing`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Listing`] was updated last time.
    pub updated_at: ModificationDateTime,
}

impl Listing {
    /// Indicates whether this [`Listing`] has the provided [`Amenity`].
    #[must_use]
    pub fn has(&self, amenity: Amenity) -> bool {
        self.amenities.contains(&amenity)
    }

    /// Indicates whether this [`Listing`] can be booked right now.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == Status::Available
    }
}

/// ID of a [`Listing`].
#[derive(
    AsRef, Clone, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[as_ref(forward)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `id` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        !id.is_empty()
            && id.len() <= 64
            && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `listing::Id`")
    }
}

/// URL-friendly slug of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Slug(String);

impl Slug {
    /// Creates a new [`Slug`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `slug` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Creates a new [`Slug`] if the given `slug` is valid.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Option<Self> {
        let slug = slug.into();
        Self::check(&slug).then_some(Self(slug))
    }

    /// Checks whether the given `slug` is a valid [`Slug`].
    fn check(slug: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Slug`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex")
        });

        let slug = slug.as_ref();
        slug.len() <= 128 && REGEX.is_match(slug)
    }
}

impl FromStr for Slug {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Slug`")
    }
}

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 256
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Free-form description of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Description`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        text.trim() == text && text.len() <= 4096
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Street address of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address && !address.is_empty() && address.len() <= 512
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// Geographical coordinates in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,

    /// Longitude.
    pub lng: f64,
}

/// Notable place near a [`Listing`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NearbyPlace {
    /// Name of this [`NearbyPlace`].
    pub name: String,

    /// [`PlaceKind`] of this [`NearbyPlace`].
    pub kind: PlaceKind,

    /// Walking distance in meters.
    pub distance: u32,
}

/// Area of a [`Listing`] in square meters.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Area(u32);

/// Number of rooms in a [`Listing`].
pub type Rooms = u8;

/// Floor of a [`Listing`].
pub type Floor = u16;

/// Number of floors in a building.
pub type NumFloors = u16;

/// Number of views of a [`Listing`].
pub type Views = u32;

/// Duration in whole months.
pub type Months = u8;

define_kind! {
    #[doc = "Kind of a [`Listing`]."]
    enum Kind {
        #[doc = "An apartment in a building."]
        #[label = "Apartment"]
        Apartment = 1,

        #[doc = "A whole house."]
        #[label = "House"]
        House = 2,

        #[doc = "A single-room apartment with a kitchen area."]
        #[label = "Studio"]
        Studio = 3,

        #[doc = "A room in a shared apartment."]
        #[label = "Room"]
        Room = 4,
    }
}

define_kind! {
    #[doc = "Availability status of a [`Listing`]."]
    enum Status {
        #[doc = "May be booked."]
        #[label = "Available"]
        Available = 1,

        #[doc = "Already booked by another tenant."]
        #[label = "Booked"]
        Booked = 2,

        #[doc = "Temporarily withdrawn by the landlord."]
        #[label = "Unavailable"]
        Unavailable = 3,
    }
}

define_kind! {
    #[doc = "Amenity tag of a [`Listing`]."]
    enum Amenity {
        #[doc = "Wireless internet."]
        #[label = "Wi-Fi"]
        Wifi = 1,

        #[doc = "Air conditioning."]
        #[label = "Air Conditioning"]
        Ac = 2,

        #[doc = "Heating."]
        #[label = "Heating"]
        Heating = 3,

        #[doc = "Washing machine."]
        #[label = "Washing Machine"]
        WashingMachine = 4,

        #[doc = "Dishwasher."]
        #[label = "Dishwasher"]
        Dishwasher = 5,

        #[doc = "TV set."]
        #[label = "TV"]
        Tv = 6,

        #[doc = "Balcony."]
        #[label = "Balcony"]
        Balcony = 7,

        #[doc = "Parking place."]
        #[label = "Parking"]
        Parking = 8,

        #[doc = "Elevator in the building."]
        #[label = "Elevator"]
        Elevator = 9,

        #[doc = "Round-the-clock security."]
        #[label = "24/7 Security"]
        Security = 10,

        #[doc = "Gym in the building."]
        #[label = "Gym"]
        Gym = 11,

        #[doc = "Swimming pool."]
        #[label = "Pool"]
        Pool = 12,

        #[doc = "Pets are allowed."]
        #[label = "Pet Friendly"]
        PetFriendly = 13,

        #[doc = "Furniture is provided."]
        #[label = "Furnished"]
        Furnished = 14,

        #[doc = "Kitchen."]
        #[label = "Kitchen"]
        Kitchen = 15,

        #[doc = "Refrigerator."]
        #[label = "Refrigerator"]
        Refrigerator = 16,
    }
}

define_kind! {
    #[doc = "Furnishing level of a [`Listing`]."]
    enum Furnishing {
        #[doc = "No furniture."]
        #[label = "Unfurnished"]
        Unfurnished = 1,

        #[doc = "Basic furniture only."]
        #[label = "Partially furnished"]
        Partially = 2,

        #[doc = "Ready to move in."]
        #[label = "Fully furnished"]
        Fully = 3,
    }
}

define_kind! {
    #[doc = "Renovation type of a [`Listing`]."]
    enum Renovation {
        #[doc = "Cosmetic repairs."]
        #[label = "Cosmetic"]
        Cosmetic = 1,

        #[doc = "European-standard renovation."]
        #[label = "Euro"]
        Euro = 2,

        #[doc = "Designer renovation."]
        #[label = "Designer"]
        Designer = 3,

        #[doc = "Needs repair."]
        #[label = "Needs repair"]
        NeedsRepair = 4,
    }
}

define_kind! {
    #[doc = "Kind of a [`NearbyPlace`]."]
    enum PlaceKind {
        #[doc = "Metro station."]
        #[label = "Metro"]
        Metro = 1,

        #[doc = "University campus."]
        #[label = "University"]
        University = 2,

        #[doc = "Park or square."]
        #[label = "Park"]
        Park = 3,

        #[doc = "Shopping mall or bazaar."]
        #[label = "Mall"]
        Mall = 4,

        #[doc = "Hospital."]
        #[label = "Hospital"]
        Hospital = 5,

        #[doc = "School."]
        #[label = "School"]
        School = 6,
    }
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;

/// [`DateTime`] when a [`Listing`] was modified last time.
pub type ModificationDateTime = DateTimeOf<(Listing, unit::Modification)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Amenity, Area, Id, Slug, Title};

    #[test]
    fn validates_id() {
        assert!(Id::new("p1").is_some());
        assert!(Id::new("").is_none());
        assert!(Id::new("p 1").is_none());
        assert!(Id::from_str("p1/../x").is_err());
    }

    #[test]
    fn validates_slug() {
        assert!(Slug::new("modern-studio-near-it-park").is_some());
        assert!(Slug::new("Modern-Studio").is_none());
        assert!(Slug::new("double--dash").is_none());
        assert!(Slug::new("-leading").is_none());
    }

    #[test]
    fn validates_title() {
        assert!(Title::new("Budget Room in Almazar District").is_some());
        assert!(Title::new(" padded ").is_none());
        assert!(Title::new("").is_none());
    }

    #[test]
    fn parses_amenity_tags() {
        assert_eq!(
            Amenity::from_str("washing-machine"),
            Ok(Amenity::WashingMachine),
        );
        assert_eq!(Amenity::from_str("pet-friendly"), Ok(Amenity::PetFriendly));
        assert_eq!(Amenity::Ac.to_string(), "ac");
        assert_eq!(Amenity::Security.label(), "24/7 Security");
    }

    #[test]
    fn parses_area() {
        assert_eq!(Area::from_str("85"), Ok(Area::from(85)));
        assert_eq!(Area::from(42).to_string(), "42");
        assert!(Area::from_str("-3").is_err());
        assert!(Area::from_str("big").is_err());
    }
}
