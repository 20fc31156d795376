//! User module: domain, repository seam and use cases.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::UserService;
