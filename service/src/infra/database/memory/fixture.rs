//! Static catalog data served by the [`Memory`] database.

#[cfg(doc)]
use super::Memory;

use common::{Date, DateTime, Money, Percent};
use rust_decimal::Decimal;

use crate::domain::{
    district,
    listing::{
        self, Amenity, Coordinates, Furnishing, Kind, NearbyPlace, PlaceKind,
        Renovation, Status,
    },
    District, Landlord, Listing,
};

/// Seed of a single [`Listing`].
struct Seed {
    id: &'static str,
    title: &'static str,
    slug: &'static str,
    description: &'static str,
    kind: Kind,
    address: &'static str,
    district: District,
    coordinates: (f64, f64),
    nearby: &'static [(&'static str, PlaceKind, u32)],
    price: i64,
    price_per_sqm: i64,
    area: u32,
    rooms: u8,
    bedrooms: u8,
    bathrooms: u8,
    floor: (u16, u16),
    amenities: &'static [Amenity],
    furnishing: Furnishing,
    renovation: Renovation,
    landlord: &'static str,
    views: u32,
    favorites: u32,
    is_verified: bool,
    is_featured: bool,
    available_from: &'static str,
    minimum_stay: u8,
    created_at: &'static str,
    updated_at: &'static str,
}

impl From<Seed> for Listing {
    fn from(s: Seed) -> Self {
        Self {
            id: listing::Id::new(s.id).expect("valid `listing::Id`"),
            slug: listing::Slug::new(s.slug).expect("valid `listing::Slug`"),
            title: listing::Title::new(s.title)
                .expect("valid `listing::Title`"),
            description: listing::Description::new(s.description)
                .expect("valid `listing::Description`"),
            kind: s.kind,
            status: Status::Available,
            address: listing::Address::new(s.address)
                .expect("valid `listing::Address`"),
            district: s.district,
            coordinates: Coordinates {
                lat: s.coordinates.0,
                lng: s.coordinates.1,
            },
            nearby_places: s
                .nearby
                .iter()
                .map(|&(name, kind, distance)| NearbyPlace {
                    name: name.to_owned(),
                    kind,
                    distance,
                })
                .collect(),
            price: Money::uzs(s.price),
            price_per_sqm: Money::uzs(s.price_per_sqm),
            area: s.area.into(),
            rooms: s.rooms,
            bedrooms: s.bedrooms,
            bathrooms: s.bathrooms,
            floor: s.floor.0,
            num_floors: s.floor.1,
            amenities: s.amenities.iter().copied().collect(),
            furnishing: s.furnishing,
            renovation: s.renovation,
            landlord_id: s.landlord.parse().expect("valid `landlord::Id`"),
            views: s.views,
            favorites: s.favorites,
            is_verified: s.is_verified,
            is_featured: s.is_featured,
            available_from: date(s.available_from),
            minimum_stay: s.minimum_stay,
            created_at: datetime(s.created_at).coerce(),
            updated_at: datetime(s.updated_at).coerce(),
        }
    }
}

fn date(s: &str) -> Date {
    Date::from_iso8601(s).expect("valid ISO 8601 date")
}

fn datetime(s: &str) -> DateTime {
    DateTime::from_rfc3339(s).expect("valid RFC 3339 date and time")
}

/// Returns all the [`Listing`]s of the catalog.
#[expect(clippy::too_many_lines, reason = "static data")]
#[must_use]
pub fn listings() -> Vec<Listing> {
    use Amenity as A;
    use PlaceKind as P;

    [
        Seed {
            id: "p1",
            title: "Modern Studio near IT Park",
            slug: "modern-studio-near-it-park",
            description: "Beautifully designed studio apartment with \
                panoramic city views. Perfect for young professionals working \
                at IT Park or nearby tech companies. Features smart home \
                integration, high-speed fiber internet, and a fully equipped \
                kitchen. The building has 24/7 security, underground parking, \
                and a rooftop terrace.",
            kind: Kind::Studio,
            address: "Mirzo Ulugbek district, Buyuk Ipak Yoli St, 105",
            district: District::MirzoUlugbek,
            coordinates: (41.3385, 69.3346),
            nearby: &[
                ("IT Park", P::Mall, 500),
                ("Mirzo Ulugbek Metro", P::Metro, 800),
                ("INHA University", P::University, 1200),
            ],
            price: 5_500_000,
            price_per_sqm: 137_500,
            area: 40,
            rooms: 1,
            bedrooms: 0,
            bathrooms: 1,
            floor: (12, 16),
            amenities: &[
                A::Wifi,
                A::Ac,
                A::Heating,
                A::Tv,
                A::Elevator,
                A::Security,
                A::Parking,
                A::Kitchen,
                A::Refrigerator,
            ],
            furnishing: Furnishing::Fully,
            renovation: Renovation::Euro,
            landlord: "l1",
            views: 342,
            favorites: 28,
            is_verified: true,
            is_featured: true,
            available_from: "2026-02-01",
            minimum_stay: 6,
            created_at: "2026-01-10T10:00:00Z",
            updated_at: "2026-01-15T14:30:00Z",
        },
        Seed {
            id: "p2",
            title: "Spacious 3-Room Apartment in Yunusabad",
            slug: "spacious-3-room-apartment-yunusabad",
            description: "Elegant 3-room apartment in the prestigious \
                Yunusabad district. Recently renovated with premium materials \
                and designer furniture. Large windows provide excellent \
                natural light. Perfect for families or professionals who \
                appreciate quality and comfort. Walking distance to schools, \
                parks, and shopping centers.",
            kind: Kind::Apartment,
            address: "Yunusabad district, Amir Temur Shoh Kochasi, 45",
            district: District::Yunusabad,
            coordinates: (41.3553, 69.2868),
            nearby: &[
                ("Minor Metro", P::Metro, 600),
                ("Magic City Park", P::Park, 400),
                ("Tashkent State University", P::University, 2000),
            ],
            price: 12_000_000,
            price_per_sqm: 133_333,
            area: 90,
            rooms: 3,
            bedrooms: 2,
            bathrooms: 1,
            floor: (7, 12),
            amenities: &[
                A::Wifi,
                A::Ac,
                A::Heating,
                A::WashingMachine,
                A::Tv,
                A::Balcony,
                A::Elevator,
                A::Security,
                A::Kitchen,
                A::Refrigerator,
            ],
            furnishing: Furnishing::Fully,
            renovation: Renovation::Designer,
            landlord: "l2",
            views: 567,
            favorites: 45,
            is_verified: true,
            is_featured: true,
            available_from: "2026-01-20",
            minimum_stay: 12,
            created_at: "2026-01-05T08:00:00Z",
            updated_at: "2026-01-14T16:45:00Z",
        },
        Seed {
            id: "p3",
            title: "Cozy Room near Westminster University",
            slug: "cozy-room-near-westminster",
            description: "Comfortable private room in a shared apartment, \
                ideal for students. Located just 10 minutes walk from \
                Westminster International University. Shared kitchen and \
                bathroom with one other tenant. Includes all utilities, \
                high-speed internet, and access to common areas.",
            kind: Kind::Room,
            address: "Sergeli district, Quruvchi Kochasi, 22",
            district: District::Sergeli,
            coordinates: (41.2256, 69.2189),
            nearby: &[
                ("Westminster University", P::University, 800),
                ("Sergeli Bazaar", P::Mall, 500),
            ],
            price: 2_500_000,
            price_per_sqm: 138_889,
            area: 18,
            rooms: 1,
            bedrooms: 1,
            bathrooms: 1,
            floor: (3, 5),
            amenities: &[A::Wifi, A::Heating, A::Kitchen, A::Refrigerator],
            furnishing: Furnishing::Fully,
            renovation: Renovation::Cosmetic,
            landlord: "l3",
            views: 234,
            favorites: 19,
            is_verified: true,
            is_featured: false,
            available_from: "2026-01-25",
            minimum_stay: 3,
            created_at: "2026-01-12T11:00:00Z",
            updated_at: "2026-01-15T09:20:00Z",
        },
        Seed {
            id: "p4",
            title: "Premium 2-Room in Mirabad Center",
            slug: "premium-2-room-mirabad-center",
            description: "Luxurious 2-room apartment in the heart of \
                Mirabad, the most prestigious district of Tashkent. Features \
                floor-to-ceiling windows, premium appliances, marble \
                bathroom, and smart home system. Building amenities include \
                concierge, gym, and rooftop lounge with stunning views of the \
                city.",
            kind: Kind::Apartment,
            address: "Mirabad district, Shota Rustaveli Kochasi, 88",
            district: District::Mirabad,
            coordinates: (41.3047, 69.2478),
            nearby: &[
                ("Kosmonavtlar Metro", P::Metro, 300),
                ("Tashkent City Mall", P::Mall, 700),
                ("Central Park", P::Park, 500),
            ],
            price: 18_000_000,
            price_per_sqm: 225_000,
            area: 80,
            rooms: 2,
            bedrooms: 1,
            bathrooms: 2,
            floor: (18, 25),
            amenities: &[
                A::Wifi,
                A::Ac,
                A::Heating,
                A::WashingMachine,
                A::Dishwasher,
                A::Tv,
                A::Balcony,
                A::Parking,
                A::Elevator,
                A::Security,
                A::Gym,
                A::Kitchen,
                A::Refrigerator,
            ],
            furnishing: Furnishing::Fully,
            renovation: Renovation::Designer,
            landlord: "l1",
            views: 892,
            favorites: 78,
            is_verified: true,
            is_featured: true,
            available_from: "2026-02-15",
            minimum_stay: 12,
            created_at: "2026-01-01T09:00:00Z",
            updated_at: "2026-01-16T11:00:00Z",
        },
        Seed {
            id: "p5",
            title: "Affordable Studio in Chilanzar",
            slug: "affordable-studio-chilanzar",
            description: "Clean and well-maintained studio apartment in the \
                popular Chilanzar district. Perfect for students and young \
                professionals on a budget. Recently repainted with new \
                flooring. Includes basic furniture, air conditioning, and \
                internet. Great public transport connections.",
            kind: Kind::Studio,
            address: "Chilanzar district, 5-mavze, Block 12",
            district: District::Chilanzar,
            coordinates: (41.2856, 69.2145),
            nearby: &[
                ("Chilanzar Metro", P::Metro, 400),
                ("Chilanzar Park", P::Park, 600),
                ("Turin Polytechnic", P::University, 1500),
            ],
            price: 3_500_000,
            price_per_sqm: 116_667,
            area: 30,
            rooms: 1,
            bedrooms: 0,
            bathrooms: 1,
            floor: (4, 9),
            amenities: &[
                A::Wifi,
                A::Ac,
                A::Tv,
                A::Elevator,
                A::Kitchen,
                A::Refrigerator,
            ],
            furnishing: Furnishing::Partially,
            renovation: Renovation::Cosmetic,
            landlord: "l4",
            views: 456,
            favorites: 32,
            is_verified: false,
            is_featured: false,
            available_from: "2026-01-18",
            minimum_stay: 6,
            created_at: "2026-01-08T14:00:00Z",
            updated_at: "2026-01-15T10:30:00Z",
        },
        Seed {
            id: "p6",
            title: "Family House with Garden in Yakkasaray",
            slug: "family-house-garden-yakkasaray",
            description: "Beautiful 4-room private house with a landscaped \
                garden in quiet Yakkasaray neighborhood. Traditional Uzbek \
                architecture meets modern comfort. Features include a \
                courtyard with fruit trees, separate guest room, modern \
                kitchen, and covered parking for 2 cars. Ideal for families \
                seeking peace and privacy.",
            kind: Kind::House,
            address: "Yakkasaray district, Bobur Kochasi, 156",
            district: District::Yakkasaray,
            coordinates: (41.2945, 69.2689),
            nearby: &[
                ("Yakkasaray School #45", P::School, 300),
                ("National Library", P::Park, 800),
                ("Bodomzor Metro", P::Metro, 1000),
            ],
            price: 25_000_000,
            price_per_sqm: 138_889,
            area: 180,
            rooms: 4,
            bedrooms: 3,
            bathrooms: 2,
            floor: (1, 2),
            amenities: &[
                A::Wifi,
                A::Ac,
                A::Heating,
                A::WashingMachine,
                A::Dishwasher,
                A::Tv,
                A::Parking,
                A::Security,
                A::PetFriendly,
                A::Kitchen,
                A::Refrigerator,
            ],
            furnishing: Furnishing::Fully,
            renovation: Renovation::Euro,
            landlord: "l5",
            views: 678,
            favorites: 56,
            is_verified: true,
            is_featured: true,
            available_from: "2026-03-01",
            minimum_stay: 12,
            created_at: "2025-12-20T12:00:00Z",
            updated_at: "2026-01-14T08:00:00Z",
        },
        Seed {
            id: "p7",
            title: "Modern 2-Room near Amir Temur Square",
            slug: "modern-2-room-amir-temur-square",
            description: "Contemporary apartment with stunning views of Amir \
                Temur Square and the historic Hotel Uzbekistan. Walking \
                distance to major attractions, restaurants, and business \
                centers. Features minimalist Scandinavian design, smart TV, \
                and high-speed internet. Perfect for business travelers and \
                expats.",
            kind: Kind::Apartment,
            address: "Shayhontohur district, Amir Temur Xiyoboni, 12",
            district: District::Shayhontohur,
            coordinates: (41.3111, 69.2797),
            nearby: &[
                ("Amir Temur Square", P::Park, 100),
                ("Amir Temur Hiyoboni Metro", P::Metro, 200),
                ("National Museum", P::Mall, 400),
            ],
            price: 15_000_000,
            price_per_sqm: 214_286,
            area: 70,
            rooms: 2,
            bedrooms: 1,
            bathrooms: 1,
            floor: (10, 14),
            amenities: &[
                A::Wifi,
                A::Ac,
                A::Heating,
                A::WashingMachine,
                A::Tv,
                A::Balcony,
                A::Elevator,
                A::Security,
                A::Kitchen,
                A::Refrigerator,
            ],
            furnishing: Furnishing::Fully,
            renovation: Renovation::Designer,
            landlord: "l2",
            views: 445,
            favorites: 38,
            is_verified: true,
            is_featured: false,
            available_from: "2026-02-01",
            minimum_stay: 6,
            created_at: "2026-01-09T15:00:00Z",
            updated_at: "2026-01-16T09:00:00Z",
        },
        Seed {
            id: "p8",
            title: "Budget Room in Almazar District",
            slug: "budget-room-almazar",
            description: "Economical private room in a quiet residential area \
                of Almazar. Suitable for students or budget-conscious \
                tenants. Room includes a bed, wardrobe, and desk. Shared \
                bathroom and kitchen with friendly roommates. Utilities \
                included in rent.",
            kind: Kind::Room,
            address: "Almazar district, Qoratosh Kochasi, 78",
            district: District::Almazar,
            coordinates: (41.3289, 69.2234),
            nearby: &[
                ("Almazar Bazaar", P::Mall, 600),
                ("Almazar Park", P::Park, 400),
            ],
            price: 1_800_000,
            price_per_sqm: 128_571,
            area: 14,
            rooms: 1,
            bedrooms: 1,
            bathrooms: 1,
            floor: (2, 4),
            amenities: &[A::Wifi, A::Heating, A::Kitchen],
            furnishing: Furnishing::Partially,
            renovation: Renovation::Cosmetic,
            landlord: "l4",
            views: 189,
            favorites: 12,
            is_verified: false,
            is_featured: false,
            available_from: "2026-01-20",
            minimum_stay: 3,
            created_at: "2026-01-13T09:00:00Z",
            updated_at: "2026-01-15T11:00:00Z",
        },
    ]
    .into_iter()
    .map(Listing::from)
    .collect()
}

/// Returns all the [`Landlord`]s of the catalog.
#[must_use]
pub fn landlords() -> Vec<Landlord> {
    // (id, name, verified, response rate, response time, member since,
    //  listings, rating x10, reviews)
    [
        ("l1", "Aziza Karimova", true, 98, "within 1 hour", "2023-03-15", 5, 49, 47),
        ("l2", "Rustam Aliyev", true, 95, "within 2 hours", "2022-11-20", 12, 48, 89),
        ("l3", "Dilnoza Rahimova", true, 100, "within 30 minutes", "2024-01-10", 3, 50, 12),
        ("l4", "Bekzod Tursunov", false, 85, "within 1 day", "2024-06-05", 2, 45, 8),
        ("l5", "Nodira Usmanova", true, 92, "within 3 hours", "2023-08-22", 8, 47, 34),
    ]
    .into_iter()
    .map(
        |(id, name, is_verified, rate, time, since, total, rating, reviews)| {
            Landlord {
                id: id.parse().expect("valid `landlord::Id`"),
                name: name.parse().expect("valid `landlord::Name`"),
                is_verified,
                response_rate: Percent::whole(rate),
                response_time: time.to_owned(),
                member_since: date(since),
                total_listings: total,
                rating: Decimal::new(rating, 1),
                review_count: reviews,
            }
        },
    )
    .collect()
}

/// Returns overviews of the [`District`]s present in the catalog.
#[must_use]
pub fn districts() -> Vec<district::Info> {
    [
        (
            District::Mirabad,
            "Premium district with luxury apartments and business centers",
            18_000_000,
            245,
            (41.3047, 69.2478),
            ["Business Center", "High-End Shopping", "International Schools"],
        ),
        (
            District::Yunusabad,
            "Popular residential area with parks and modern amenities",
            12_000_000,
            312,
            (41.3553, 69.2868),
            ["Universities", "Parks", "Shopping Centers"],
        ),
        (
            District::Chilanzar,
            "Largest residential district with excellent metro access",
            6_500_000,
            534,
            (41.2856, 69.2145),
            ["Metro Access", "Affordable", "Local Markets"],
        ),
        (
            District::Sergeli,
            "Growing district with university campuses and new developments",
            4_500_000,
            189,
            (41.2256, 69.2189),
            ["Westminster University", "New Developments", "Budget-Friendly"],
        ),
        (
            District::Yakkasaray,
            "Historic district with traditional houses and cultural sites",
            14_000_000,
            156,
            (41.2945, 69.2689),
            ["Historic Sites", "Family Homes", "Green Spaces"],
        ),
        (
            District::Shayhontohur,
            "Central district near Amir Temur Square and major landmarks",
            15_000_000,
            178,
            (41.3111, 69.2797),
            ["City Center", "Landmarks", "Business District"],
        ),
        (
            District::Almazar,
            "Traditional neighborhood with local bazaars and community feel",
            5_000_000,
            223,
            (41.3289, 69.2234),
            ["Local Bazaars", "Traditional", "Community"],
        ),
        (
            District::MirzoUlugbek,
            "Tech hub with IT Park and modern office buildings",
            8_500_000,
            267,
            (41.3385, 69.3346),
            ["IT Park", "Tech Companies", "INHA University"],
        ),
    ]
    .into_iter()
    .map(|(id, description, price, count, (lat, lng), highlights)| {
        district::Info {
            id,
            description: description.to_owned(),
            average_price: Money::uzs(price),
            property_count: count,
            coordinates: Coordinates { lat, lng },
            highlights: highlights.map(ToOwned::to_owned).into(),
        }
    })
    .collect()
}

#[cfg(test)]
mod spec {
    use std::collections::HashSet;

    use super::{districts, landlords, listings};

    #[test]
    fn builds_consistent_catalog() {
        let listings = listings();
        let landlords = landlords();

        assert_eq!(listings.len(), 8);
        assert_eq!(
            listings.iter().map(|l| &l.id).collect::<HashSet<_>>().len(),
            listings.len(),
        );
        for l in &listings {
            assert!(
                landlords.iter().any(|ll| ll.id == l.landlord_id),
                "unknown landlord of `{}`",
                l.id,
            );
        }
        assert_eq!(districts().len(), 8);
    }
}
