//! [`District`] definitions.

use common::{define_kind, Money};

use crate::domain::listing::Coordinates;

define_kind! {
    #[doc = "Administrative district of Tashkent."]
    enum District {
        #[doc = "Mirabad district."]
        #[label = "Mirabad"]
        Mirabad = 1,

        #[doc = "Yunusabad district."]
        #[label = "Yunusabad"]
        Yunusabad = 2,

        #[doc = "Chilanzar district."]
        #[label = "Chilanzar"]
        Chilanzar = 3,

        #[doc = "Sergeli district."]
        #[label = "Sergeli"]
        Sergeli = 4,

        #[doc = "Yakkasaray district."]
        #[label = "Yakkasaray"]
        Yakkasaray = 5,

        #[doc = "Shaykhontohur district."]
        #[label = "Shaykhontohur"]
        Shayhontohur = 6,

        #[doc = "Almazar district."]
        #[label = "Almazar"]
        Almazar = 7,

        #[doc = "Bektemir district."]
        #[label = "Bektemir"]
        Bektemir = 8,

        #[doc = "Mirzo Ulugbek district."]
        #[label = "Mirzo Ulugbek"]
        MirzoUlugbek = 9,

        #[doc = "Olmazor district."]
        #[label = "Olmazor"]
        Olmazor = 10,

        #[doc = "Uchtepa district."]
        #[label = "Uchtepa"]
        Uchtepa = 11,
    }
}

/// Overview of a [`District`] shown on the districts page.
#[derive(Clone, Debug, PartialEq)]
pub struct Info {
    /// [`District`] this [`Info`] is about.
    pub id: District,

    /// Short description of the [`District`].
    pub description: String,

    /// Average monthly rent price in the [`District`].
    pub average_price: Money,

    /// Number of properties in the [`District`] on the market.
    pub property_count: u32,

    /// Geographical center of the [`District`].
    pub coordinates: Coordinates,

    /// Things the [`District`] is known for.
    pub highlights: Vec<String>,
}

impl Info {
    /// Returns a human-readable name of the [`District`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.id.label()
    }
}

/// Returns at most `limit` [`Info`]s with the largest property count,
/// leaving the provided ones untouched.
#[must_use]
pub fn most_popular<'i>(
    infos: impl IntoIterator<Item = &'i Info>,
    limit: usize,
) -> Vec<Info> {
    let mut infos = infos.into_iter().cloned().collect::<Vec<_>>();
    infos.sort_by(|a, b| b.property_count.cmp(&a.property_count));
    infos.truncate(limit);
    infos
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Money;

    use crate::domain::listing::Coordinates;

    use super::{most_popular, District, Info};

    fn info(id: District, property_count: u32) -> Info {
        Info {
            id,
            description: String::new(),
            average_price: Money::uzs(1),
            property_count,
            coordinates: Coordinates { lat: 0.0, lng: 0.0 },
            highlights: vec![],
        }
    }

    #[test]
    fn parses_url_form() {
        assert_eq!(
            District::from_str("mirzo-ulugbek"),
            Ok(District::MirzoUlugbek),
        );
        assert_eq!(
            District::from_str("shayhontohur"),
            Ok(District::Shayhontohur),
        );
        assert_eq!(District::Shayhontohur.label(), "Shaykhontohur");
        assert_eq!(District::ALL.len(), 11);
    }

    #[test]
    fn selects_most_popular_without_mutation() {
        let infos = vec![
            info(District::Mirabad, 245),
            info(District::Chilanzar, 534),
            info(District::Sergeli, 189),
            info(District::Yunusabad, 312),
        ];

        let popular = most_popular(&infos, 2);

        assert_eq!(
            popular.iter().map(|i| i.id).collect::<Vec<_>>(),
            [District::Chilanzar, District::Yunusabad],
        );
        assert_eq!(infos[0].id, District::Mirabad);
    }
}
