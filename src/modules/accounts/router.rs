use axum::{
    Router,
    routing::{get, patch, post},
};

use super::controller::{create_employee, list_accounts, update_account_status};
use crate::state::AppState;

/// Administration routes. Mounted behind the admin role gate.
pub fn init_accounts_router() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/{id}/status", patch(update_account_status))
        .route("/employees", post(create_employee))
}
