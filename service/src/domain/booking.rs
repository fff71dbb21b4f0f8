//! Booking definitions.
//!
//! A booking is collected by a three-step [`Wizard`]: schedule, contact
//! details and payment. Each step refuses to advance until its required
//! fields are filled, and the final step produces a [`Request`] to be
//! submitted.

use std::{fmt, str::FromStr, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf, Money, Percent};
use derive_more::{AsRef, Display, Error, From, Into};
use regex::Regex;
use uuid::Uuid;

use crate::domain::{
    listing::{self, Months},
    Listing,
};

/// Booking of a [`Listing`] confirmed to a tenant.
#[derive(Clone, Debug, PartialEq)]
pub struct Confirmation {
    /// ID of this [`Confirmation`].
    pub id: Id,

    /// Human-readable [`Reference`] of this [`Confirmation`].
    pub reference: Reference,

    /// [`Request`] this [`Confirmation`] was created from.
    pub request: Request,

    /// Price [`Breakdown`] of this [`Confirmation`].
    pub breakdown: Breakdown,

    /// [`DateTime`] when this [`Confirmation`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Confirmation`].
#[derive(Clone, Copy, Debug, Display, Eq, From, Hash, Into, PartialEq)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable reference of a [`Confirmation`], like `UJ-39200000`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Reference(String);

impl Reference {
    /// Number of trailing timestamp digits in a [`Reference`].
    const DIGITS: usize = 8;

    /// Generates a new [`Reference`] from the provided `prefix` and the
    /// millisecond timestamp of the provided [`DateTime`].
    #[must_use]
    pub fn generate<Of: ?Sized>(prefix: &str, at: DateTimeOf<Of>) -> Self {
        let millis = at.unix_timestamp_millis().unsigned_abs().to_string();
        let tail = &millis[millis.len().saturating_sub(Self::DIGITS)..];
        Self(format!("{prefix}-{tail:0>width$}", width = Self::DIGITS))
    }
}

/// Monthly price, service fee and their total for a [`Listing`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Breakdown {
    /// Monthly rent price.
    pub price: Money,

    /// Marketplace service fee.
    pub service_fee: Money,

    /// Amount due on the first payment.
    pub total: Money,
}

impl Breakdown {
    /// Calculates a [`Breakdown`] of the provided monthly `price` with the
    /// provided service `fee` rate.
    #[must_use]
    pub fn new(price: Money, fee: Percent) -> Self {
        let service_fee = price.percent(fee);
        Self {
            price,
            service_fee,
            total: Money {
                amount: price.amount + service_fee.amount,
                currency: price.currency,
            },
        }
    }
}

define_kind! {
    #[doc = "Rent term offered by the booking form."]
    enum Term {
        #[doc = "Six months."]
        #[label = "6 months"]
        HalfYear = 6,

        #[doc = "Twelve months."]
        #[label = "12 months"]
        Year = 12,

        #[doc = "Twenty four months."]
        #[label = "24 months"]
        TwoYears = 24,
    }
}

impl Term {
    /// Returns the number of months in this [`Term`].
    #[must_use]
    pub const fn months(self) -> Months {
        self.u8()
    }

    /// Indicates whether this [`Term`] satisfies the provided minimum stay.
    #[must_use]
    pub const fn allows(self, minimum_stay: Months) -> bool {
        self.months() >= minimum_stay
    }
}

define_kind! {
    #[doc = "Payment method chosen for a [`Confirmation`]."]
    enum PaymentMethod {
        #[doc = "Payme wallet."]
        #[label = "Payme"]
        Payme = 1,

        #[doc = "Click mobile banking."]
        #[label = "Click"]
        Click = 2,

        #[doc = "Direct Uzcard or Humo card payment."]
        #[label = "Uzcard/Humo"]
        Uzcard = 3,

        #[doc = "International Visa or Mastercard card."]
        #[label = "Visa/Mastercard"]
        Visa = 4,
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Payme
    }
}

/// Full name of a tenant.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct TenantName(String);

impl TenantName {
    /// Creates a new [`TenantName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`TenantName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 100
    }
}

impl FromStr for TenantName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `TenantName`")
    }
}

/// Email address of a tenant.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Uzbek phone number of a tenant, like `+998 90 123 45 67`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                r"^(\+?998[-\s]?)?\d{2}[-\s]?\d{3}[-\s]?\d{2}[-\s]?\d{2}$",
            )
            .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Contact details of a tenant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tenant {
    /// [`TenantName`] of this [`Tenant`].
    pub name: TenantName,

    /// [`Email`] of this [`Tenant`].
    pub email: Email,

    /// [`Phone`] of this [`Tenant`].
    pub phone: Phone,
}

/// Booking request collected by a [`Wizard`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    /// ID of the [`Listing`] to book.
    pub listing_id: listing::Id,

    /// [`Date`] the [`Tenant`] wants to move in.
    pub move_in: Date,

    /// Rent [`Term`].
    pub term: Term,

    /// Optional message to the landlord.
    pub message: Option<String>,

    /// [`Tenant`] contact details.
    pub tenant: Tenant,

    /// Chosen [`PaymentMethod`].
    pub payment: PaymentMethod,
}

/// Step of a [`Wizard`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Step {
    /// Move-in date, [`Term`] and message.
    #[display("1. Booking details")]
    Schedule,

    /// [`Tenant`] contact details.
    #[display("2. Your information")]
    Contact,

    /// [`PaymentMethod`] and the price [`Breakdown`].
    #[display("3. Payment")]
    Payment,

    /// [`Confirmation`] is submitted.
    #[display("Booking request sent")]
    Complete,
}

/// Field of a [`Wizard`] required to advance.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Field {
    /// Move-in [`Date`].
    #[display("move-in date")]
    MoveIn,

    /// Rent [`Term`].
    #[display("term")]
    Term,

    /// [`TenantName`].
    #[display("full name")]
    Name,

    /// Tenant [`Email`].
    #[display("email")]
    Email,

    /// Tenant [`Phone`].
    #[display("phone")]
    Phone,
}

/// Three-step booking form of a single [`Listing`].
#[derive(Clone, Debug)]
pub struct Wizard {
    /// ID of the [`Listing`] being booked.
    listing_id: listing::Id,

    /// Earliest [`Date`] the [`Listing`] may be moved in.
    available_from: Date,

    /// Minimum stay required by the [`Listing`].
    minimum_stay: Months,

    /// Current [`Step`].
    step: Step,

    /// Chosen move-in [`Date`].
    move_in: Option<Date>,

    /// Chosen [`Term`].
    term: Option<Term>,

    /// Optional message to the landlord.
    pub message: Option<String>,

    /// Entered [`TenantName`].
    pub name: Option<TenantName>,

    /// Entered [`Email`].
    pub email: Option<Email>,

    /// Entered [`Phone`].
    pub phone: Option<Phone>,

    /// Chosen [`PaymentMethod`].
    pub payment: PaymentMethod,

    /// [`Confirmation`] [`Reference`] once [`Step::Complete`] is reached.
    reference: Option<Reference>,
}

impl Wizard {
    /// Starts a new [`Wizard`] for the provided [`Listing`].
    ///
    /// A one-year [`Term`] is preselected if the [`Listing`] allows it.
    #[must_use]
    pub fn new(listing: &Listing) -> Self {
        let term = Some(Term::Year)
            .filter(|t| t.allows(listing.minimum_stay))
            .or_else(|| {
                Term::ALL
                    .iter()
                    .copied()
                    .find(|t| t.allows(listing.minimum_stay))
            });
        Self {
            listing_id: listing.id.clone(),
            available_from: listing.available_from,
            minimum_stay: listing.minimum_stay,
            step: Step::Schedule,
            move_in: None,
            term,
            message: None,
            name: None,
            email: None,
            phone: None,
            payment: PaymentMethod::default(),
            reference: None,
        }
    }

    /// Returns the ID of the [`Listing`] being booked.
    #[must_use]
    pub fn listing_id(&self) -> &listing::Id {
        &self.listing_id
    }

    /// Returns the current [`Step`].
    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    /// Returns the chosen move-in [`Date`], if any.
    #[must_use]
    pub fn move_in(&self) -> Option<Date> {
        self.move_in
    }

    /// Returns the chosen [`Term`], if any.
    #[must_use]
    pub fn term(&self) -> Option<Term> {
        self.term
    }

    /// Returns the [`Reference`] of the submitted [`Confirmation`], if any.
    #[must_use]
    pub fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    /// Chooses the move-in [`Date`].
    ///
    /// # Errors
    ///
    /// If the [`Listing`] is not available at the provided [`Date`] yet.
    pub fn set_move_in(&mut self, date: Date) -> Result<(), InputError> {
        if date < self.available_from {
            return Err(InputError::NotAvailableYet(self.available_from));
        }
        self.move_in = Some(date);
        Ok(())
    }

    /// Chooses the rent [`Term`].
    ///
    /// # Errors
    ///
    /// If the [`Term`] is shorter than the minimum stay of the [`Listing`].
    pub fn set_term(&mut self, term: Term) -> Result<(), InputError> {
        if !term.allows(self.minimum_stay) {
            return Err(InputError::TooShort(self.minimum_stay));
        }
        self.term = Some(term);
        Ok(())
    }

    /// Returns the [`Field`]s still missing on the current [`Step`].
    #[must_use]
    pub fn missing(&self) -> Vec<Field> {
        let required: &[(Field, bool)] = match self.step {
            Step::Schedule => &[
                (Field::MoveIn, self.move_in.is_some()),
                (Field::Term, self.term.is_some()),
            ],
            Step::Contact => &[
                (Field::Name, self.name.is_some()),
                (Field::Email, self.email.is_some()),
                (Field::Phone, self.phone.is_some()),
            ],
            Step::Payment | Step::Complete => &[],
        };
        required
            .iter()
            .filter_map(|&(field, present)| (!present).then_some(field))
            .collect()
    }

    /// Moves to the next [`Step`] if the current one is filled.
    ///
    /// # Errors
    ///
    /// - If required [`Field`]s of the current [`Step`] are missing.
    /// - If the current [`Step`] is [`Step::Payment`], which is left only by
    ///   submitting a [`Request`], or [`Step::Complete`].
    pub fn advance(&mut self) -> Result<Step, TransitionError> {
        let next = match self.step {
            Step::Schedule => Step::Contact,
            Step::Contact => Step::Payment,
            Step::Payment | Step::Complete => {
                return Err(TransitionError::NoNextStep(self.step));
            }
        };

        let missing = self.missing();
        if !missing.is_empty() {
            return Err(TransitionError::Incomplete(Missing(missing)));
        }

        self.step = next;
        Ok(next)
    }

    /// Moves to the previous [`Step`], staying on the first one.
    ///
    /// A [`Step::Complete`] [`Wizard`] stays complete.
    pub fn back(&mut self) -> Step {
        self.step = match self.step {
            Step::Schedule | Step::Contact => Step::Schedule,
            Step::Payment => Step::Contact,
            Step::Complete => Step::Complete,
        };
        self.step
    }

    /// Builds a [`Request`] from the filled [`Wizard`].
    ///
    /// # Errors
    ///
    /// If the [`Wizard`] is not on the [`Step::Payment`].
    pub fn request(&self) -> Result<Request, TransitionError> {
        let (
            Step::Payment,
            Some(move_in),
            Some(term),
            Some(name),
            Some(email),
            Some(phone),
        ) = (
            self.step,
            self.move_in,
            self.term,
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
        )
        else {
            return Err(TransitionError::NotReady(self.step));
        };

        Ok(Request {
            listing_id: self.listing_id.clone(),
            move_in,
            term,
            message: self.message.clone().filter(|m| !m.trim().is_empty()),
            tenant: Tenant { name, email, phone },
            payment: self.payment,
        })
    }

    /// Marks this [`Wizard`] as complete with the received [`Confirmation`].
    ///
    /// # Errors
    ///
    /// If the [`Wizard`] is not on the [`Step::Payment`], or the
    /// [`Confirmation`] was made for another [`Listing`].
    pub fn complete(
        &mut self,
        confirmation: &Confirmation,
    ) -> Result<(), TransitionError> {
        if self.step != Step::Payment
            || confirmation.request.listing_id != self.listing_id
        {
            return Err(TransitionError::NotReady(self.step));
        }
        self.reference = Some(confirmation.reference.clone());
        self.step = Step::Complete;
        Ok(())
    }
}

/// Error of filling a [`Wizard`] [`Field`].
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum InputError {
    /// Move-in [`Date`] is before the [`Listing`] becomes available.
    #[display("`Listing` is available from {_0}")]
    NotAvailableYet(#[error(not(source))] Date),

    /// [`Term`] is shorter than the minimum stay.
    #[display("Minimum stay is {_0} months")]
    TooShort(#[error(not(source))] Months),
}

/// Error of a [`Wizard`] [`Step`] transition.
#[derive(Clone, Debug, Display, Error)]
pub enum TransitionError {
    /// Required [`Field`]s are missing.
    #[display("Missing required fields: {_0}")]
    Incomplete(#[error(not(source))] Missing),

    /// There is no next [`Step`] to advance to.
    #[display("Cannot advance from `{_0}`")]
    NoNextStep(#[error(not(source))] Step),

    /// [`Request`] cannot be built on the current [`Step`].
    #[display("Booking is not ready to be submitted on `{_0}`")]
    NotReady(#[error(not(source))] Step),
}

/// List of missing [`Field`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Missing(pub Vec<Field>);

impl Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use itertools::Itertools as _;

        write!(f, "{}", self.0.iter().format(", "))
    }
}

/// [`DateTime`] when a [`Confirmation`] was created.
pub type CreationDateTime = DateTimeOf<(Confirmation, unit::Creation)>;
