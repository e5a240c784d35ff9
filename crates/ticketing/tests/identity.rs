mod common;

use common::{Harness, admin};
use shared::errors::ServiceError;
use ticketing::{
    domain::requests::user::{LoginRequest, RegisterRequest, UpdateRolesRequest},
    model::Role,
};

fn register_request(email: &str, password: &str, confirm: &str) -> RegisterRequest {
    RegisterRequest {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: email.into(),
        password: password.into(),
        confirm_password: confirm.into(),
        phone: None,
        request_organizer_access: false,
    }
}

fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn register_login_and_resolve() {
    let h = Harness::new();
    let user = h
        .di
        .identity
        .register(&register_request("ada@example.com", "secret123", "secret123"))
        .await
        .unwrap()
        .data;
    assert_eq!(user.roles, vec![Role::Attendee]);

    let token = h
        .di
        .identity
        .login(&login("ada@example.com", "secret123"))
        .await
        .unwrap()
        .data;
    assert_eq!(token.token_type, "Bearer");

    let actor = h
        .di
        .identity
        .resolve_actor(&token.access_token)
        .await
        .unwrap();
    assert_eq!(actor.user_id, user.id);
    assert!(!actor.is_admin());

    let profile = h.di.identity.get_profile(&actor).await.unwrap().data;
    assert_eq!(profile.email, "ada@example.com");
}

#[tokio::test]
async fn registration_rules() {
    let h = Harness::new();
    let err = h
        .di
        .identity
        .register(&register_request("ada@example.com", "secret123", "other"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    h.register("ada@example.com").await;
    let err = h
        .di
        .identity
        .register(&register_request("ada@example.com", "secret123", "secret123"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn bad_credentials_are_indistinguishable() {
    let h = Harness::new();
    h.register("ada@example.com").await;

    for req in [
        login("ada@example.com", "wrong"),
        login("nobody@example.com", "password123"),
    ] {
        let err = h.di.identity.login(&req).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    let err = h.di.identity.resolve_actor("not-a-token").await.unwrap_err();
    assert!(matches!(err, ServiceError::Jwt(_)));
}

#[tokio::test]
async fn only_admins_change_roles() {
    let h = Harness::new();
    let user = h.register("ada@example.com").await;

    let req = UpdateRolesRequest {
        roles: vec![Role::Attendee, Role::Organizer],
    };
    let err = h
        .di
        .identity
        .update_roles(&user, user.user_id, &req)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));

    let updated = h
        .di
        .identity
        .update_roles(&admin(999), user.user_id, &req)
        .await
        .unwrap()
        .data;
    assert_eq!(updated.roles, vec![Role::Attendee, Role::Organizer]);

    let err = h
        .di
        .identity
        .update_roles(&admin(999), user.user_id, &UpdateRolesRequest { roles: vec![] })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn organizer_access_can_be_requested_at_signup() {
    let h = Harness::new();
    let mut req = register_request("org@example.com", "secret123", "secret123");
    req.request_organizer_access = true;

    let user = h.di.identity.register(&req).await.unwrap().data;
    assert_eq!(user.roles, vec![Role::Attendee, Role::Organizer]);
}
