//! [`Query`] collection related to [`District`]s.

use common::operations::{self, By, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::Config;
use crate::{
    domain::{district, District},
    infra::{database, Database},
    Query, Service,
};

use super::DatabaseQuery;

/// Queries overviews of all the [`District`]s.
pub type All = DatabaseQuery<By<Vec<district::Info>, operations::All>>;

/// Queries an overview of a single [`District`].
pub type ById = DatabaseQuery<By<Option<district::Info>, District>>;

/// [`Query`] of the [`District`]s with the most properties on the market,
/// limited by the [`Config::popular_districts_limit`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Popular;

impl<Db> Query<Popular> for Service<Db>
where
    Db: Database<
        Select<By<Vec<district::Info>, operations::All>>,
        Ok = Vec<district::Info>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<district::Info>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Popular) -> Result<Self::Ok, Self::Err> {
        let all = self
            .database()
            .execute(Select(By::new(operations::All)))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(district::most_popular(
            &all,
            self.config().popular_districts_limit,
        ))
    }
}

#[cfg(test)]
mod spec {
    use common::operations;

    use crate::{
        domain::District, infra::Memory, Config, Query as _, Service,
    };

    use super::{All, ById, Popular};

    #[tokio::test]
    async fn queries_popular_districts() {
        let svc = Service::new(Config::default(), Memory::with_fixture());

        let popular = svc.execute(Popular).await.unwrap();
        let all = svc.execute(All::by(operations::All)).await.unwrap();

        assert_eq!(
            popular.iter().map(|d| d.id).collect::<Vec<_>>(),
            [
                District::Chilanzar,
                District::Yunusabad,
                District::MirzoUlugbek,
                District::Mirabad,
            ],
        );
        assert_eq!(all.first().map(|d| d.id), Some(District::Mirabad));
    }

    #[tokio::test]
    async fn queries_district_by_id() {
        let svc = Service::new(Config::default(), Memory::with_fixture());

        let found = svc.execute(ById::by(District::Sergeli)).await.unwrap();
        let missing = svc.execute(ById::by(District::Uchtepa)).await.unwrap();

        assert_eq!(found.map(|d| d.property_count), Some(189));
        assert!(missing.is_none());
    }
}
