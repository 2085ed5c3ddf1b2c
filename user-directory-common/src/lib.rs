//! User Directory Common Types
//!
//! Wire types returned by the user directory HTTP API.

pub mod envelope;
pub mod user;

pub use envelope::ErrorEnvelope;
pub use user::UserRecord;
