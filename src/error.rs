use derive_more::Display;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Display)]
pub struct UnknownError(BoxedError);

impl std::error::Error for UnknownError {}

impl UnknownError {
    pub fn new(err: BoxedError) -> Self {
        Self(err)
    }
}

impl From<BoxedError> for UnknownError {
    fn from(err: BoxedError) -> Self {
        Self::new(err)
    }
}

impl From<sqlx::error::Error> for UnknownError {
    fn from(err: sqlx::error::Error) -> Self {
        Self::new(err.into())
    }
}

pub mod code {
    use serde::Serialize;

    /// Application level outcome carried by every response envelope.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct Code {
        pub code: u16,
        pub message: &'static str,
    }

    impl Code {
        pub const SUCCESS: Code = Code {
            code: 200,
            message: "Success.",
        };
        pub const BAD_REQUEST_ERROR: Code = Code {
            code: 400,
            message: "Bad request.",
        };
        pub const NOT_FOUND_ERROR: Code = Code {
            code: 404,
            message: "Not found.",
        };
        pub const ACCESS_DENIED_ERROR: Code = Code {
            code: 403,
            message: "Access denied.",
        };
        pub const INTERNAL_ERROR: Code = Code {
            code: 500,
            message: "Internal error.",
        };
        pub const ENTITY_NOT_FOUND_ERROR: Code = Code {
            code: 1000,
            message: "Entity not found.",
        };
        pub const USE_CASE_PORT_VALIDATION_ERROR: Code = Code {
            code: 1002,
            message: "Use-case port validation error.",
        };
        pub const ENTITY_ALREADY_EXISTS_ERROR: Code = Code {
            code: 1004,
            message: "Entity already exists.",
        };
    }
}

pub mod app {
    use derive_more::Display;
    use salvo::{Piece, Response};

    use super::{
        code::Code,
        http::BadRequest,
        persistence::PersistenceError,
        resource::{ConflictError, NotFoundError, ValidationError},
        security::ForbiddenError,
        UnknownError,
    };
    use crate::{domain::datatype::password::PasswordHashError, infra::response::Envelope};

    #[derive(Debug, Display)]
    pub enum ApplicationError {
        BadRequest(BadRequest),
        Forbidden(ForbiddenError),
        Validation(ValidationError),
        Conflict(ConflictError),
        NotFound(NotFoundError),
        Persistence(PersistenceError),
        Unknown(UnknownError),
    }

    impl std::error::Error for ApplicationError {}

    impl ApplicationError {
        pub fn code(&self) -> Code {
            match self {
                ApplicationError::BadRequest(_) => Code::BAD_REQUEST_ERROR,
                ApplicationError::Forbidden(_) => Code::ACCESS_DENIED_ERROR,
                ApplicationError::Validation(_) => Code::USE_CASE_PORT_VALIDATION_ERROR,
                ApplicationError::Conflict(_) => Code::ENTITY_ALREADY_EXISTS_ERROR,
                ApplicationError::NotFound(_) => Code::ENTITY_NOT_FOUND_ERROR,
                ApplicationError::Persistence(_) | ApplicationError::Unknown(_) => {
                    Code::INTERNAL_ERROR
                }
            }
        }

        /// Envelope message, overridden by errors that carry their own.
        pub fn message(&self) -> &'static str {
            match self {
                ApplicationError::Conflict(err) => err.message,
                ApplicationError::NotFound(err) => err.message,
                _ => self.code().message,
            }
        }
    }

    impl From<BadRequest> for ApplicationError {
        fn from(err: BadRequest) -> Self {
            Self::BadRequest(err)
        }
    }

    impl From<ForbiddenError> for ApplicationError {
        fn from(err: ForbiddenError) -> Self {
            Self::Forbidden(err)
        }
    }

    impl From<ValidationError> for ApplicationError {
        fn from(err: ValidationError) -> Self {
            Self::Validation(err)
        }
    }

    impl From<ConflictError> for ApplicationError {
        fn from(err: ConflictError) -> Self {
            Self::Conflict(err)
        }
    }

    impl From<NotFoundError> for ApplicationError {
        fn from(err: NotFoundError) -> Self {
            Self::NotFound(err)
        }
    }

    impl From<PersistenceError> for ApplicationError {
        fn from(err: PersistenceError) -> Self {
            Self::Persistence(err)
        }
    }

    impl From<PasswordHashError> for ApplicationError {
        fn from(err: PasswordHashError) -> Self {
            Self::Unknown(UnknownError::new(Box::new(err)))
        }
    }

    impl Piece for ApplicationError {
        fn render(self, res: &mut Response) {
            let code = self.code();
            let message = self.message();
            match self {
                ApplicationError::Validation(err) => {
                    res.render(Envelope::error(code, message, Some(err)));
                }
                ApplicationError::Persistence(err) => {
                    tracing::error!("persistence failure: {err}");
                    res.render(Envelope::<()>::error(code, message, None));
                }
                ApplicationError::Unknown(err) => {
                    tracing::error!("unexpected failure: {err}");
                    res.render(Envelope::<()>::error(code, message, None));
                }
                _ => res.render(Envelope::<()>::error(code, message, None)),
            }
        }
    }
}

pub mod service {
    use derive_more::Display;

    use crate::error::UnknownError;

    #[derive(Debug, Display)]
    pub enum DispatchError {
        #[display(fmt = "Dispatched operation timed out in {_0:?}")]
        Timeout(Option<std::time::Duration>),
        #[display(fmt = "IO error dispatching {_0}")]
        IO(std::io::Error),
        #[display(fmt = "Unknown dispatch error {_0}")]
        Unknown(UnknownError),
    }

    impl std::error::Error for DispatchError {}
}

pub mod persistence {
    use std::io;

    use derive_more::Display;

    use super::{service::DispatchError, UnknownError};

    pub type SqlState = String;

    /// SQLSTATE of a unique constraint violation.
    pub const UNIQUE_VIOLATION: &str = "23505";

    #[derive(Debug, Display)]
    pub enum PersistenceError {
        #[display(fmt = "database persistence error: SQLSTATE {_0:?}")]
        Database(Option<SqlState>),
        #[display(fmt = "persistence layer connection error: {_0}")]
        Connection(DispatchError),
        #[display(fmt = "PersistenceError data not found")]
        NotFound,
        #[display(fmt = "PersistenceError decoding data")]
        DecodeData,
        #[display(fmt = "PersistenceError data migration")]
        DataMigration,
        #[display(fmt = "unknown persistence error: {_0}")]
        Unknown(UnknownError),
    }

    impl std::error::Error for PersistenceError {}

    impl PersistenceError {
        pub fn unique_violation() -> Self {
            Self::Database(Some(UNIQUE_VIOLATION.into()))
        }

        pub fn is_unique_violation(&self) -> bool {
            matches!(self, Self::Database(Some(state)) if state == UNIQUE_VIOLATION)
        }
    }

    type SqlxError = sqlx::error::Error;

    impl From<SqlxError> for PersistenceError {
        fn from(err: SqlxError) -> Self {
            match err {
                SqlxError::Configuration(_) => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::InvalidInput.into()))
                }
                SqlxError::Database(db) => Self::Database(db.code().map(|code| code.into())),
                SqlxError::Io(io) => Self::Connection(DispatchError::IO(io)),
                SqlxError::Tls(_) => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::ConnectionRefused.into()))
                }
                SqlxError::Protocol(msg) => Self::Connection(DispatchError::IO(io::Error::new(
                    io::ErrorKind::InvalidData,
                    msg,
                ))),
                SqlxError::RowNotFound => Self::NotFound,
                SqlxError::TypeNotFound { .. } => Self::DecodeData,
                SqlxError::ColumnIndexOutOfBounds { .. } => Self::DecodeData,
                SqlxError::ColumnNotFound(_) => Self::NotFound,
                SqlxError::ColumnDecode { .. } => Self::DecodeData,
                SqlxError::Decode(_) => Self::DecodeData,
                SqlxError::PoolTimedOut => Self::Connection(DispatchError::Timeout(None)),
                SqlxError::PoolClosed => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::NotConnected.into()))
                }
                SqlxError::WorkerCrashed => {
                    tracing::error!("sqlx background worker crashed");
                    Self::Connection(DispatchError::Unknown(UnknownError::new(err.into())))
                }
                SqlxError::Migrate(_) => Self::DataMigration,
                _ => PersistenceError::Unknown(err.into()),
            }
        }
    }
}

pub mod resource {
    use derive_more::{Display, Error};
    use serde::Serialize;

    use crate::base::ResourceID;

    #[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ValidationErrorKind {
        /// A required property is missing or null.
        #[display(fmt = "required")]
        Required,
        /// The input value doesn't match the required type.
        #[display(fmt = "invalid_type")]
        InvalidType,
        /// The input is not a hyphenated UUID.
        #[display(fmt = "uuid")]
        Uuid,
        /// The input is not an email address.
        #[display(fmt = "email")]
        Email,
        /// The input value doesn't match any of specified options.
        #[display(fmt = "unknown_variant")]
        UnknownVariant,
    }

    impl std::error::Error for ValidationErrorKind {}

    /// A failed rule, not yet bound to a property.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Violation {
        pub kind: ValidationErrorKind,
        /// Human readable constraint, e.g. `must be a UUID`.
        pub constraint: String,
    }

    impl Violation {
        pub fn new(kind: ValidationErrorKind, constraint: impl Into<String>) -> Self {
            Self {
                kind,
                constraint: constraint.into(),
            }
        }

        pub fn required() -> Self {
            Self::new(
                ValidationErrorKind::Required,
                "should not be null or undefined",
            )
        }
    }

    #[derive(Debug, Error, Clone, PartialEq, Eq, Hash, Serialize)]
    pub struct ValidationError {
        /// Name of the validated resource
        pub context: &'static str,
        /// Invalid resource fields, in declaration order
        pub errors: Vec<ValidationFieldError>,
    }

    impl ValidationError {
        /// Collects the failures of a resource's fields.
        ///
        /// `fields` yields one entry per declared field, `None` for the valid ones.
        pub fn from_fields<R, I>(fields: I) -> Self
        where
            R: ResourceID,
            I: IntoIterator<Item = Option<ValidationFieldError>>,
        {
            Self {
                context: R::resource_id(),
                errors: fields.into_iter().flatten().collect(),
            }
        }

        pub fn properties(&self) -> Vec<&'static str> {
            self.errors.iter().map(|err| err.property).collect()
        }
    }

    impl std::fmt::Display for ValidationError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_fmt(format_args!(
                "Invalid resource {}, fields {:?}",
                self.context,
                self.properties()
            ))
        }
    }

    #[derive(Debug, Display, Error, Clone, PartialEq, Eq, Hash, Serialize)]
    #[display(fmt = "{property}: {kind}")]
    pub struct ValidationFieldError {
        /// Invalid property name
        pub property: &'static str,
        /// Failed rule
        pub kind: ValidationErrorKind,
        pub message: String,
    }

    impl ValidationFieldError {
        pub fn new(property: &'static str, violation: Violation) -> Self {
            Self {
                property,
                kind: violation.kind,
                message: format!("{property} {}", violation.constraint),
            }
        }
    }

    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    #[display(fmt = "Conflicting resource {resource_type}: {message}")]
    pub struct ConflictError {
        /// Name of the resource
        pub resource_type: &'static str,
        pub message: &'static str,
    }

    impl ConflictError {
        pub fn from_resource<R: ResourceID>(message: &'static str) -> Self {
            Self {
                resource_type: R::resource_id(),
                message,
            }
        }
    }

    impl std::error::Error for ConflictError {}

    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    #[display(fmt = "Resource {resource_type} not found: {message}")]
    pub struct NotFoundError {
        pub resource_type: &'static str,
        pub message: &'static str,
    }

    impl NotFoundError {
        pub fn from_resource<R: ResourceID>(message: &'static str) -> Self {
            Self {
                resource_type: R::resource_id(),
                message,
            }
        }
    }

    impl std::error::Error for NotFoundError {}
}

pub mod security {
    use derive_more::Display;
    use serde::Serialize;

    #[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum ForbiddenError {
        /// Access denied.
        ///
        /// The executor is known, however does not have access to the requested resource.
        #[display(fmt = "access_denied")]
        AccessDenied,
    }

    impl std::error::Error for ForbiddenError {}
}

pub mod http {
    use derive_more::{Display, Error};
    use salvo::http::ParseError;
    use serde::Serialize;

    #[derive(Debug, Display, Clone, Copy, Error, PartialEq, Eq, Serialize)]
    pub enum BadRequest {
        InvalidContent,
    }

    impl From<ParseError> for BadRequest {
        fn from(_: ParseError) -> Self {
            BadRequest::InvalidContent
        }
    }
}
