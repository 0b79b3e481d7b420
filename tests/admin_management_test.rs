//! Admin account rules: last-superadmin protection, password changes and
//! credential verification.

mod common;

use pretty_assertions::assert_eq;

use agro_catalog::error::ApiError;
use agro_catalog::services::admins::{
    AdminService, ChangePasswordRequest, CreateAdminRequest, UpdateAdminRequest,
};

fn service(state: &agro_catalog::AppState) -> AdminService {
    AdminService::new(state.db.clone(), state.audit.clone())
}

#[tokio::test]
async fn seeded_superadmin_can_log_in() {
    let (state, _storage) = common::test_state().await;
    let admin = service(&state)
        .verify("superadmin", "admin123")
        .await
        .expect("verify")
        .expect("seeded credentials accepted");
    assert!(admin.is_superadmin);

    let rejected = service(&state)
        .verify("superadmin", "wrong-password")
        .await
        .expect("verify");
    assert!(rejected.is_none());
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    let (state, _storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;

    let err = service(&state)
        .create(
            &actor,
            CreateAdminRequest {
                name: "Short".to_string(),
                username: "short".to_string(),
                password: "abc".to_string(),
                is_superadmin: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn last_superadmin_cannot_delete_itself() {
    let (state, _storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;

    let err = service(&state).remove(&actor, actor.id).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
}

#[tokio::test]
async fn last_superadmin_cannot_demote_itself() {
    let (state, _storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;

    let err = service(&state)
        .update(
            &actor,
            actor.id,
            UpdateAdminRequest {
                is_superadmin: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
}

#[tokio::test]
async fn self_delete_allowed_with_a_second_superadmin() {
    let (state, _storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;

    service(&state)
        .create(
            &actor,
            CreateAdminRequest {
                name: "Backup".to_string(),
                username: "backup".to_string(),
                password: "backup-pass-1".to_string(),
                is_superadmin: Some(true),
            },
        )
        .await
        .expect("create second superadmin");

    let removed = service(&state)
        .remove(&actor, actor.id)
        .await
        .expect("self delete with a second superadmin present");
    assert_eq!(removed.username, "superadmin");
}

#[tokio::test]
async fn self_password_change_requires_correct_old_password() {
    let (state, _storage) = common::test_state().await;
    let actor = common::plain_admin(&state, "editor", "first-password").await;

    // Missing old password.
    let err = service(&state)
        .change_password(
            &actor,
            ChangePasswordRequest {
                old_password: None,
                new_password: "next-password".to_string(),
                admin_id: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    // Wrong old password; the stored hash must be untouched.
    let err = service(&state)
        .change_password(
            &actor,
            ChangePasswordRequest {
                old_password: Some("not-the-password".to_string()),
                new_password: "next-password".to_string(),
                admin_id: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
    assert!(
        service(&state)
            .verify("editor", "first-password")
            .await
            .expect("verify")
            .is_some()
    );

    // Correct old password goes through.
    service(&state)
        .change_password(
            &actor,
            ChangePasswordRequest {
                old_password: Some("first-password".to_string()),
                new_password: "next-password".to_string(),
                admin_id: None,
            },
        )
        .await
        .expect("self change");
    assert!(
        service(&state)
            .verify("editor", "next-password")
            .await
            .expect("verify")
            .is_some()
    );
}

#[tokio::test]
async fn superadmin_resets_another_admins_password_without_old_one() {
    let (state, _storage) = common::test_state().await;
    let superadmin = common::seeded_superadmin(&state).await;
    let target = common::plain_admin(&state, "editor", "first-password").await;

    service(&state)
        .change_password(
            &superadmin,
            ChangePasswordRequest {
                old_password: None,
                new_password: "reset-password".to_string(),
                admin_id: Some(target.id),
            },
        )
        .await
        .expect("superadmin reset");

    assert!(
        service(&state)
            .verify("editor", "reset-password")
            .await
            .expect("verify")
            .is_some()
    );
}

#[tokio::test]
async fn plain_admin_reset_request_falls_back_to_self_rules() {
    let (state, _storage) = common::test_state().await;
    let superadmin = common::seeded_superadmin(&state).await;
    let actor = common::plain_admin(&state, "editor", "first-password").await;

    // adminId from a non-superadmin is ignored, so the old password is
    // still required for the actor's own account.
    let err = service(&state)
        .change_password(
            &actor,
            ChangePasswordRequest {
                old_password: None,
                new_password: "hijack-password".to_string(),
                admin_id: Some(superadmin.id),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
}
