// errors.rs
use thiserror::Error;

/// Failures of the persisted key-value store.
///
/// Only opening or reloading a handle surfaces these; inside operations
/// they are recovered into a warning or a log line.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database Error: {0}")]
    Db(String),

    #[error("Serialization Error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Db(e.to_string())
    }
}

/// Account directory failures. Callers branch on these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Email already exists.")]
    DuplicateEmail,
    #[error("Phone number already exists.")]
    DuplicatePhone,
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("User not logged in")]
    NotAuthenticated,
    #[error("Current password is incorrect.")]
    IncorrectCurrentPassword,
    #[error("Invalid password: {0}")]
    InvalidPassword(String),
    #[error("Administrator accounts cannot be created by signup")]
    AdminSignupNotAllowed,
}

/// Property catalog failures.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Must be logged in to list a property")]
    NotAuthenticated,
    #[error("Discount must be between 0 and 100 (got {0})")]
    InvalidDiscount(f64),
    #[error("Price must be greater than 0 (got {0})")]
    InvalidPrice(f64),
    #[error("Area in sqft must be a finite, non-negative number (got {0})")]
    InvalidSqft(f64),
    #[error("You can only upload a maximum of {max} images (got {got})")]
    TooManyImages { got: usize, max: usize },
    #[error("Property not found: {0}")]
    PropertyNotFound(String),
}

/// Interest/lead pipeline and commission failures.
///
/// These are the "raising" contract: operations propagate them with `?`
/// up to whatever boundary renders them.
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("Must be logged in")]
    NotAuthenticated,
    #[error("Not authorized to update this lead")]
    NotAuthorized,
    #[error("Interest not found: {0}")]
    InterestNotFound(String),
    #[error("Property not found: {0}")]
    PropertyNotFound(String),
    #[error("Lead not found: {0}")]
    LeadNotFound(String),
    #[error("Commission claim not found: {0}")]
    ClaimNotFound(String),
    #[error("You have already expressed interest in this property")]
    DuplicateInterest,
    #[error("Interest already approved: {0}")]
    InterestAlreadyApproved(String),
    #[error("Deal value must be greater than 0")]
    InvalidDealValue,
    #[error("Lead already closed: {0}")]
    LeadAlreadyClosed(String),
    #[error("Commission rate must be a finite, non-negative number (got {0})")]
    InvalidCommissionRate(f64),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type PipelineResult<T> = Result<T, PipelineError>;
