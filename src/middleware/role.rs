//! Role-based authorization.
//!
//! A [`RoleGate`] holds the allow-list of one group of routes. It reads the
//! identity attached by the authentication middleware, so it must be layered
//! inside it; [`protect`] applies both in the right order.
//!
//! ```rust,ignore
//! use crate::middleware::role::protect;
//! use ridepool_core::Role;
//!
//! let reviews = protect(
//!     Router::new().route("/reviews", get(reviews)),
//!     &state,
//!     &[Role::Employee, Role::Admin],
//! );
//! ```

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};
use ridepool_auth::Identity;
use ridepool_core::{AppError, Role};
use tracing::debug;

use crate::middleware::auth::{AuthUser, require_auth};
use crate::state::AppState;

/// Allow-list of roles for a group of routes.
#[derive(Debug, Clone)]
pub struct RoleGate {
    allowed: Arc<[Role]>,
}

/// Builds the gate for `allowed`.
pub fn authorize(allowed: &[Role]) -> RoleGate {
    RoleGate {
        allowed: allowed.into(),
    }
}

impl RoleGate {
    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }

    /// Checks the role of `identity`, or [`Role::User`] when there is none.
    pub fn check(&self, identity: Option<&Identity>) -> Result<(), AppError> {
        let role = identity.map(|identity| identity.role).unwrap_or_default();
        if self.allows(role) {
            Ok(())
        } else {
            debug!(role = %role, "Role not in allow-list");
            Err(AppError::forbidden(
                "Access denied. Insufficient role for this resource.",
            ))
        }
    }
}

/// Middleware enforcing a [`RoleGate`]. The handler does not run on failure.
pub async fn role_gate(
    State(gate): State<RoleGate>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate.check(req.extensions().get::<Identity>())?;
    Ok(next.run(req).await)
}

/// Requires a valid access token whose role is in `roles` on every route of
/// `router`.
pub fn protect<S>(router: Router<S>, state: &AppState, roles: &[Role]) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // Layers added last run first: authentication, then the gate.
    router
        .route_layer(middleware::from_fn_with_state(authorize(roles), role_gate))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

/// In-handler check for a single role.
pub fn check_role(auth_user: &AuthUser, required: Role) -> Result<(), AppError> {
    check_any_role(auth_user, &[required])
}

/// In-handler check against several roles.
pub fn check_any_role(auth_user: &AuthUser, roles: &[Role]) -> Result<(), AppError> {
    authorize(roles).check(Some(&auth_user.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridepool_core::ErrorKind;
    use uuid::Uuid;

    fn identity(role: Role) -> Identity {
        Identity::new(Uuid::new_v4(), role)
    }

    #[test]
    fn test_gate_allows_listed_roles_only() {
        let gate = authorize(&[Role::Employee, Role::Admin]);
        assert!(gate.check(Some(&identity(Role::Admin))).is_ok());
        assert!(gate.check(Some(&identity(Role::Employee))).is_ok());

        let err = gate.check(Some(&identity(Role::User))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_missing_identity_is_treated_as_user() {
        assert!(authorize(&[Role::User]).check(None).is_ok());
        assert!(authorize(&[Role::Admin]).check(None).is_err());
    }

    #[test]
    fn test_check_helpers() {
        let user = AuthUser(identity(Role::User));
        assert!(check_role(&user, Role::User).is_ok());
        assert!(check_role(&user, Role::Admin).is_err());
        assert!(check_any_role(&user, &[Role::Employee, Role::User]).is_ok());
        assert!(check_any_role(&user, &[]).is_err());
    }
}
