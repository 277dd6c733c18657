use axum::{Router, routing::get};
use ridepool_core::Role;

use super::controller::{bookings, preferences, reviews, vehicle};
use crate::middleware::role::protect;
use crate::state::AppState;

pub const BOOKINGS_ROLES: [Role; 3] = [Role::User, Role::Employee, Role::Admin];
pub const VEHICLE_ROLES: [Role; 2] = [Role::User, Role::Admin];
pub const REVIEWS_ROLES: [Role; 2] = [Role::Employee, Role::Admin];
pub const PREFERENCES_ROLES: [Role; 2] = [Role::User, Role::Admin];

pub fn init_areas_router(state: &AppState) -> Router<AppState> {
    let bookings_routes = protect(
        Router::new().route("/bookings", get(bookings)),
        state,
        &BOOKINGS_ROLES,
    );
    let vehicle_routes = protect(
        Router::new()
            .route("/vehicle", get(vehicle))
            .route("/vehicle/{*rest}", get(vehicle)),
        state,
        &VEHICLE_ROLES,
    );
    let reviews_routes = protect(
        Router::new().route("/reviews", get(reviews)),
        state,
        &REVIEWS_ROLES,
    );
    let preferences_routes = protect(
        Router::new()
            .route("/preferences", get(preferences))
            .route("/preferences/{*rest}", get(preferences)),
        state,
        &PREFERENCES_ROLES,
    );

    Router::new()
        .merge(bookings_routes)
        .merge(vehicle_routes)
        .merge(reviews_routes)
        .merge(preferences_routes)
}
