//! # Ridepool Models
//!
//! Domain models and DTOs for the Ridepool API.
//!
//! - [`accounts`]: the [`Account`] entity, its status, and admin DTOs
//! - [`auth`]: registration, login, refresh and logout DTOs
//! - [`rules`]: field rules used by the request schemas

pub mod accounts;
pub mod auth;
pub mod rules;

pub use accounts::{Account, AccountFilter, AccountProfile, AccountStatus, NewAccount};
