//! Mapping between search page URLs and search [`Criteria`].
//!
//! A search page URL looks like
//! `/search?district=chilanzar,sergeli&price_max=5000000&rooms=2&sort=price-low`.
//! Multi-valued parameters accept both repeated keys and comma-separated
//! lists. Unknown parameters and unparsable values are skipped with a
//! warning, so a malformed URL still opens a usable search page.

use std::{collections::BTreeSet, str::FromStr};

use itertools::Itertools as _;
use rust_decimal::Decimal;
use service::domain::listing::{Area, Criteria, SortKey};
use tracing as log;
use url::form_urlencoded;

/// Upper bound of a price range the search page treats as "no limit".
const PRICE_MAX_UNBOUNDED: i64 = 999_999_999;

/// Path of the search page.
pub const SEARCH_PATH: &str = "/search";

/// Parses the provided search page URL (or just its query string) into
/// [`Criteria`] and a [`SortKey`].
#[must_use]
pub fn parse(url: &str) -> (Criteria, SortKey) {
    let mut criteria = Criteria::default();
    let mut sort = SortKey::default();

    for (key, value) in form_urlencoded::parse(query_of(url).as_bytes()) {
        let value = value.trim();
        match key.as_ref() {
            "district" | "districts" => {
                extend(&mut criteria.districts, &key, value);
            }
            "type" | "types" => extend(&mut criteria.kinds, &key, value),
            "amenities" | "amenity" => {
                extend(&mut criteria.amenities, &key, value);
            }
            "furnished" | "furnishing" => {
                extend(&mut criteria.furnishing, &key, value);
            }
            "rooms" => extend(
                &mut criteria.rooms,
                &key,
                // `4+` is how the search page labels the last threshold.
                &value.replace('+', ""),
            ),
            "price_min" | "priceMin" => {
                criteria.price_min = single::<Decimal>(&key, value)
                    .filter(|p| *p > Decimal::ZERO);
            }
            "price_max" | "priceMax" => {
                criteria.price_max = single::<Decimal>(&key, value)
                    .filter(|p| *p < Decimal::from(PRICE_MAX_UNBOUNDED));
            }
            "area_min" | "areaMin" => {
                criteria.area_min = single::<Area>(&key, value);
            }
            "area_max" | "areaMax" => {
                criteria.area_max = single::<Area>(&key, value);
            }
            "q" | "query" => {
                criteria.text =
                    Some(value.to_owned()).filter(|q| !q.is_empty());
            }
            "sort" => {
                sort = single::<SortKey>(&key, value).unwrap_or_default();
            }
            _ => log::warn!("skipping unknown search parameter `{key}`"),
        }
    }

    (criteria, sort)
}

/// Renders the provided [`Criteria`] and [`SortKey`] as a search page URL.
///
/// The result is understood by [`parse()`], and the default [`SortKey`] is
/// omitted.
#[must_use]
pub fn to_url(criteria: &Criteria, sort: SortKey) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if let Some(text) = &criteria.text {
        _ = query.append_pair("q", text);
    }
    append_list(&mut query, "district", &criteria.districts);
    if let Some(min) = criteria.price_min {
        _ = query.append_pair("price_min", &min.to_string());
    }
    if let Some(max) = criteria.price_max {
        _ = query.append_pair("price_max", &max.to_string());
    }
    if let Some(min) = criteria.area_min {
        _ = query.append_pair("area_min", &min.to_string());
    }
    if let Some(max) = criteria.area_max {
        _ = query.append_pair("area_max", &max.to_string());
    }
    append_list(&mut query, "rooms", &criteria.rooms);
    append_list(&mut query, "type", &criteria.kinds);
    append_list(&mut query, "amenities", &criteria.amenities);
    append_list(&mut query, "furnished", &criteria.furnishing);
    if sort != SortKey::default() {
        _ = query.append_pair("sort", &sort.to_string());
    }

    let query = query.finish();
    if query.is_empty() {
        SEARCH_PATH.to_owned()
    } else {
        format!("{SEARCH_PATH}?{query}")
    }
}

/// Extracts the query string from the provided URL.
///
/// A `#fragment` is never a part of the query string. A string without `?`
/// is considered to be a query string itself, unless it looks like a path.
fn query_of(url: &str) -> &str {
    let url = url.split_once('#').map_or(url, |(u, _)| u);
    match url.split_once('?') {
        Some((_, query)) => query,
        None if url.starts_with('/') || url.contains("://") => "",
        None => url,
    }
}

/// Parses a single-valued parameter, warning if it's malformed.
fn single<T: FromStr>(key: &str, value: &str) -> Option<T> {
    if value.is_empty() {
        return None;
    }
    value
        .parse()
        .map_err(|_| {
            log::warn!("skipping malformed `{key}` search parameter `{value}`");
        })
        .ok()
}

/// Extends the provided set with the comma-separated values of a
/// multi-valued parameter, skipping the malformed ones.
fn extend<T: FromStr + Ord>(set: &mut BTreeSet<T>, key: &str, value: &str) {
    set.extend(
        value
            .split(',')
            .map(str::trim)
            .filter_map(|v| single::<T>(key, v)),
    );
}

/// Appends a comma-separated multi-valued parameter, if it's not empty.
fn append_list<T: ToString>(
    query: &mut form_urlencoded::Serializer<'_, String>,
    key: &str,
    values: &BTreeSet<T>,
) {
    if !values.is_empty() {
        let joined = values.iter().map(T::to_string).join(",");
        _ = query.append_pair(key, &joined);
    }
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use rust_decimal::Decimal;
    use service::domain::{
        listing::{Amenity, Area, Criteria, Furnishing, Kind, SortKey},
        District,
    };

    use super::{parse, to_url};

    #[test]
    fn parses_full_url() {
        let (criteria, sort) = parse(
            "https://uyjoy.uz/search?district=chilanzar&district=sergeli\
             &price_min=1000000&price_max=5000000&rooms=1,2\
             &type=studio&amenities=wifi,ac&furnished=fully\
             &area_min=20&area_max=60&q=metro&sort=price-low",
        );

        assert_eq!(
            criteria,
            Criteria {
                text: Some("metro".to_owned()),
                districts: [District::Chilanzar, District::Sergeli].into(),
                price_min: Some(Decimal::from(1_000_000)),
                price_max: Some(Decimal::from(5_000_000)),
                area_min: Some(Area::from(20)),
                area_max: Some(Area::from(60)),
                rooms: [1, 2].into(),
                kinds: [Kind::Studio].into(),
                amenities: [Amenity::Wifi, Amenity::Ac].into(),
                furnishing: [Furnishing::Fully].into(),
            },
        );
        assert_eq!(sort, SortKey::PriceLow);
    }

    #[test]
    fn parses_bare_query_and_path() {
        let (criteria, sort) = parse("district=mirzo-ulugbek&rooms=4%2B");

        assert_eq!(criteria.districts, BTreeSet::from([District::MirzoUlugbek]));
        assert_eq!(criteria.rooms, BTreeSet::from([4]));
        assert_eq!(sort, SortKey::Newest);

        assert_eq!(parse("/search"), (Criteria::default(), SortKey::Newest));
        assert_eq!(parse(""), (Criteria::default(), SortKey::Newest));
    }

    #[test]
    fn ignores_fragment() {
        let (criteria, _) = parse("https://uyjoy.uz/search#?district=mirabad");
        assert!(criteria.is_empty());

        let (criteria, sort) =
            parse("/search?district=mirabad#results?sort=popular");
        assert_eq!(criteria.districts, BTreeSet::from([District::Mirabad]));
        assert_eq!(sort, SortKey::Newest);
    }

    #[test]
    fn ignores_garbage() {
        let (criteria, sort) = parse(
            "/search?district=atlantis,yunusabad&rooms=many&price_min=cheap\
             &sort=random&color=blue&q=%20%20",
        );

        assert_eq!(
            criteria,
            Criteria {
                districts: [District::Yunusabad].into(),
                ..Criteria::default()
            },
        );
        assert_eq!(sort, SortKey::Newest);
    }

    #[test]
    fn treats_slider_extremes_as_unbounded() {
        let (criteria, _) = parse("/search?price_min=0&price_max=999999999");

        assert!(criteria.is_empty());
    }

    #[test]
    fn renders_url_parsed_back() {
        let criteria = Criteria {
            text: Some("park view".to_owned()),
            districts: [District::Mirabad, District::Yakkasaray].into(),
            price_max: Some(Decimal::from(20_000_000)),
            rooms: [2, 3].into(),
            amenities: [Amenity::PetFriendly].into(),
            ..Criteria::default()
        };

        let url = to_url(&criteria, SortKey::AreaHigh);

        assert_eq!(
            url,
            "/search?q=park+view&district=mirabad%2Cyakkasaray\
             &price_max=20000000&rooms=2%2C3&amenities=pet-friendly\
             &sort=area-high",
        );
        assert_eq!(parse(&url), (criteria, SortKey::AreaHigh));
        assert_eq!(to_url(&Criteria::default(), SortKey::Newest), "/search");
    }
}
