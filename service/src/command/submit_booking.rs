//! [`Command`] for submitting a booking [`Request`].

use common::{
    operations::{By, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        booking::{self, Breakdown, Confirmation, Reference, Request},
        listing, Listing,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for submitting a booking [`Request`] of a [`Listing`].
///
/// Nothing is stored: the [`Confirmation`] is only returned to the tenant.
#[derive(Clone, Debug)]
pub struct SubmitBooking(pub Request);

impl<Db> Command<SubmitBooking> for Service<Db>
where
    Db: Database<
        Select<By<Option<Listing>, listing::Id>>,
        Ok = Option<Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Confirmation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        SubmitBooking(request): SubmitBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let listing = self
            .database()
            .execute(Select(By::<Option<Listing>, _>::new(
                request.listing_id.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::ListingNotExists(request.listing_id.clone()))
            .map_err(tracerr::wrap!())?;

        if !listing.is_available() {
            return Err(tracerr::new!(E::ListingNotAvailable(listing.id)));
        }
        if request.move_in < listing.available_from {
            return Err(tracerr::new!(E::InvalidRequest(
                booking::InputError::NotAvailableYet(listing.available_from),
            )));
        }
        if !request.term.allows(listing.minimum_stay) {
            return Err(tracerr::new!(E::InvalidRequest(
                booking::InputError::TooShort(listing.minimum_stay),
            )));
        }

        let now = DateTime::now();
        Ok(Confirmation {
            id: booking::Id::new(),
            reference: Reference::generate(
                &self.config().booking_reference_prefix,
                now,
            ),
            breakdown: Breakdown::new(listing.price, self.config().service_fee),
            request,
            created_at: now.coerce(),
        })
    }
}

/// Error of [`SubmitBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Request`] doesn't satisfy the [`Listing`] conditions.
    #[display("Invalid booking request: {_0}")]
    InvalidRequest(booking::InputError),

    /// [`Listing`] cannot be booked at the moment.
    #[display("`Listing(id: {_0})` is not available for booking")]
    ListingNotAvailable(#[error(not(source))] listing::Id),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),
}

#[cfg(test)]
mod spec {
    use common::{Date, Money};

    use crate::{
        domain::{
            booking::{
                Email, PaymentMethod, Phone, Request, Tenant, TenantName, Term,
            },
            listing::{self, Status},
        },
        infra::{memory::fixture, Memory},
        Command as _, Config, Service,
    };

    use super::{ExecutionError, SubmitBooking};

    fn request(id: &str, move_in: &str, term: Term) -> Request {
        Request {
            listing_id: listing::Id::new(id).unwrap(),
            move_in: Date::from_iso8601(move_in).unwrap(),
            term,
            message: Some("Can I move in earlier?".to_owned()),
            tenant: Tenant {
                name: TenantName::new("Malika Yusupova").unwrap(),
                email: Email::new("malika@example.uz").unwrap(),
                phone: Phone::new("+998 90 123 45 67").unwrap(),
            },
            payment: PaymentMethod::Click,
        }
    }

    #[tokio::test]
    async fn confirms_booking_with_breakdown() {
        let svc = Service::new(Config::default(), Memory::with_fixture());

        let confirmation = svc
            .execute(SubmitBooking(request("p1", "2026-02-03", Term::Year)))
            .await
            .unwrap();

        assert_eq!(confirmation.breakdown.price, Money::uzs(5_500_000));
        assert_eq!(confirmation.breakdown.service_fee, Money::uzs(825_000));
        assert_eq!(confirmation.breakdown.total, Money::uzs(6_325_000));
        let reference = confirmation.reference.to_string();
        assert!(reference.starts_with("UJ-"), "{reference}");
        assert_eq!(reference.len(), "UJ-".len() + 8);
        assert_eq!(confirmation.request.payment, PaymentMethod::Click);
    }

    #[tokio::test]
    async fn uses_configured_prefix() {
        let svc = Service::new(
            Config {
                booking_reference_prefix: "TS".to_owned(),
                ..Config::default()
            },
            Memory::with_fixture(),
        );

        let confirmation = svc
            .execute(SubmitBooking(request("p8", "2026-01-20", Term::HalfYear)))
            .await
            .unwrap();

        assert!(confirmation.reference.to_string().starts_with("TS-"));
        assert_eq!(confirmation.breakdown.service_fee, Money::uzs(270_000));
    }

    #[tokio::test]
    async fn rejects_unknown_listing() {
        let svc = Service::new(Config::default(), Memory::with_fixture());

        let err = svc
            .execute(SubmitBooking(request("p42", "2026-03-01", Term::Year)))
            .await
            .unwrap_err();

        let err: &ExecutionError = err.as_ref();
        assert!(matches!(err, ExecutionError::ListingNotExists(_)));
    }

    #[tokio::test]
    async fn rejects_unavailable_listing() {
        let mut listings = fixture::listings();
        listings[1].status = Status::Booked;
        let svc = Service::new(
            Config::default(),
            Memory::new(listings, fixture::landlords(), fixture::districts()),
        );

        let err = svc
            .execute(SubmitBooking(request("p2", "2026-02-01", Term::Year)))
            .await
            .unwrap_err();

        let err: &ExecutionError = err.as_ref();
        assert!(matches!(err, ExecutionError::ListingNotAvailable(_)));
    }

    #[tokio::test]
    async fn rejects_request_breaking_listing_conditions() {
        let svc = Service::new(Config::default(), Memory::with_fixture());

        // `p2` requires at least 12 months.
        let short = svc
            .execute(SubmitBooking(request("p2", "2026-02-01", Term::HalfYear)))
            .await;
        // `p6` is available from 2026-03-01.
        let early = svc
            .execute(SubmitBooking(request("p6", "2026-02-01", Term::Year)))
            .await;

        assert!(short.is_err());
        let err = early.unwrap_err();
        let err: &ExecutionError = err.as_ref();
        assert!(matches!(err, ExecutionError::InvalidRequest(_)));
    }
}
