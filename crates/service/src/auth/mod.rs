//! Auth module: OTP and Google sign-in, JWT issuance and verification.
//!
//! Providers sit behind traits so the signup flow can run against in-memory
//! mocks in tests.

pub mod domain;
pub mod errors;
pub mod otp;
pub mod oauth;
pub mod token;
pub mod service;

pub use service::AuthService;
pub use token::{Claims, TokenSigner, TokenType};
