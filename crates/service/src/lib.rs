//! Service layer for the marketplace backend.
//! - `user`: repository seam over `models` plus find-or-create and profile use cases.
//! - `auth`: OTP and Google identity providers, JWT issuance, signup orchestration.
//! - Errors are per layer; handlers translate them to HTTP.

pub mod errors;
pub mod user;
pub mod auth;
#[cfg(test)]
pub mod test_support;
