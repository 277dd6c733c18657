use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{login, logout, me, refresh, register_user, session};
use crate::middleware::auth::{optional_auth, require_auth};
use crate::state::AppState;

pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/user/register", post(register_user))
        .route("/login", post(login))
        .route("/refresh", post(refresh));

    let authenticated = Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let anonymous_ok = Router::new()
        .route("/session", get(session))
        .route_layer(middleware::from_fn_with_state(state.clone(), optional_auth));

    public.merge(authenticated).merge(anonymous_ok)
}
