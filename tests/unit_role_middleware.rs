use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Router, middleware};
use ridepool::middleware::auth::AuthUser;
use ridepool::middleware::role::{authorize, check_any_role, check_role, role_gate};
use ridepool_auth::Identity;
use ridepool_core::{ErrorKind, Role};
use tower::ServiceExt;
use uuid::Uuid;

fn create_test_auth_user(role: Role) -> AuthUser {
    AuthUser(Identity::new(Uuid::new_v4(), role))
}

#[test]
fn test_check_role_exact_match() {
    for role in Role::ALL {
        assert!(check_role(&create_test_auth_user(role), role).is_ok());
    }
}

#[test]
fn test_check_role_is_not_hierarchical() {
    let admin = create_test_auth_user(Role::Admin);
    assert!(check_role(&admin, Role::User).is_err());
    assert!(check_role(&admin, Role::Employee).is_err());

    let err = check_role(&create_test_auth_user(Role::User), Role::Admin).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert_eq!(err.message(), "Access denied. Insufficient role for this resource.");
}

#[test]
fn test_check_any_role() {
    let employee = create_test_auth_user(Role::Employee);
    assert!(check_any_role(&employee, &[Role::Employee, Role::Admin]).is_ok());
    assert!(check_any_role(&employee, &[Role::User, Role::Admin]).is_err());
    assert!(check_any_role(&employee, &[]).is_err());
}

#[test]
fn test_gate_reports_allow_list() {
    let gate = authorize(&[Role::User, Role::Admin]);
    assert_eq!(gate.allowed(), &[Role::User, Role::Admin]);
    assert!(gate.allows(Role::Admin));
    assert!(!gate.allows(Role::Employee));
}

fn counting_router(allowed: &[Role], hits: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route(
            "/area",
            get(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    "entered"
                }
            }),
        )
        .route_layer(middleware::from_fn_with_state(authorize(allowed), role_gate))
}

async fn call(router: Router) -> StatusCode {
    let request = Request::builder().uri("/area").body(Body::empty()).unwrap();
    router.oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_gate_without_identity_treats_caller_as_user() {
    let hits = Arc::new(AtomicUsize::new(0));

    let status = call(counting_router(&[Role::User], hits.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let status = call(counting_router(&[Role::Employee, Role::Admin], hits.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
