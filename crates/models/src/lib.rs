//! sea-orm entities for the marketplace schema plus model-level validation
//! and write helpers.

pub mod errors;
pub mod db;
pub mod user;
pub mod profile;
pub mod address;
pub mod category;
pub mod job;
pub mod favorite;
pub mod request;
pub mod rating;
pub mod banner;
pub mod verification;

#[cfg(test)]
mod tests;
