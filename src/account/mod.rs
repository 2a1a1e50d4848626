pub mod crypto;
pub mod error;
pub mod models;
pub mod repo;
pub mod service;
pub mod validate;

pub use error::AuthError;
pub use service::{AccountService, SignInOutcome, VerifiedSession};
