//! Feature modules. Each has a `controller` (HTTP handlers), a `router`, and
//! where there is business logic, a `service`.

pub mod accounts;
pub mod areas;
pub mod auth;
