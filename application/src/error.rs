//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{
    command::{add_favorite, submit_booking},
    domain::booking,
    infra::database,
};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// [`Error`] shown to a user of the application.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Creates a new [`Error`] with the provided [`Code`] and message.
    #[must_use]
    pub fn new(code: Code, msg: &impl ToString) -> Self {
        Self {
            code,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError + fmt::Display> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().as_error();
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for add_favorite::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use add_favorite::ExecutionError as E;

        match self {
            E::Db(e) => e.try_as_error(),
            E::ListingNotExists(_) => {
                Some(Error::new("LISTING_NOT_EXISTS", self))
            }
        }
    }
}

impl AsError for submit_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use submit_booking::ExecutionError as E;

        match self {
            E::Db(e) => e.try_as_error(),
            E::InvalidRequest(e) => e.try_as_error(),
            E::ListingNotAvailable(_) => {
                Some(Error::new("LISTING_NOT_AVAILABLE", self))
            }
            E::ListingNotExists(_) => {
                Some(Error::new("LISTING_NOT_EXISTS", self))
            }
        }
    }
}

impl AsError for booking::InputError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new("INVALID_INPUT", self))
    }
}

impl AsError for booking::TransitionError {
    fn try_as_error(&self) -> Option<Error> {
        use booking::TransitionError as E;

        let code = match self {
            E::Incomplete(_) => "INCOMPLETE_STEP",
            E::NoNextStep(_) | E::NotReady(_) => "WRONG_STEP",
        };
        Some(Error::new(code, self))
    }
}

#[cfg(test)]
mod spec {
    use service::{
        command::add_favorite,
        domain::{booking, listing},
    };

    use super::{AsError as _, Error};

    define_error! {
        enum TestError {
            #[code = "TEST"]
            #[message = "Test failure"]
            Failure,
        }
    }

    #[test]
    fn converts_defined_error() {
        let err = Error::from(TestError::Failure);

        assert_eq!(err.code, "TEST");
        assert_eq!(err.to_string(), "[TEST]: Test failure");
    }

    #[test]
    fn converts_domain_errors() {
        let missing = booking::TransitionError::Incomplete(booking::Missing(
            vec![booking::Field::Email, booking::Field::Phone],
        ));
        let err = missing.as_error();

        assert_eq!(err.code, "INCOMPLETE_STEP");
        assert_eq!(err.message, "Missing required fields: email, phone");

        let unknown = add_favorite::ExecutionError::ListingNotExists(
            listing::Id::new("p9").unwrap(),
        );
        assert_eq!(unknown.as_error().code, "LISTING_NOT_EXISTS");
    }
}
