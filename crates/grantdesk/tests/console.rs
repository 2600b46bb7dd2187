//! Console workflows over the in-memory backend.

use std::time::Duration;

use grantdesk::{
    ActionType, Console, ConsoleConfig, ConsoleError, CredentialError, Credentials, KeyState,
    PermissionCatalogEntry, PermissionId, PermsError, RoleId, RoleSelection, SaveOutcome,
    UpdateSubject, UserId,
};
use grantdesk_testkit::{ids, KeyReply, MemoryBackend, TestKey};

fn console(backend: MemoryBackend) -> Console<MemoryBackend> {
    Console::new(backend, ConsoleConfig::default())
}

fn goal_backend() -> MemoryBackend {
    let backend = MemoryBackend::new();
    backend.set_catalog(vec![
        PermissionCatalogEntry::new(10, "View Goals").with_code("GOALS_VIEW"),
        PermissionCatalogEntry::new(20, "Create Goals").with_code("GOALS_CREATE"),
        PermissionCatalogEntry::new(30, "View Pillers").with_code("PILLERS_VIEW"),
        PermissionCatalogEntry::new(40, "View Meeting").with_code("MEETING_VIEW"),
    ]);
    backend
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_catalog_loaded_once() {
    let console = console(goal_backend());

    console.catalog().await.unwrap();
    console.catalog().await.unwrap();
    assert_eq!(console.backend().catalog_fetches(), 1);

    console.load_catalog().await.unwrap();
    assert_eq!(console.backend().catalog_fetches(), 2);
}

#[tokio::test]
async fn test_empty_catalog_is_not_no_changes() {
    let console = console(MemoryBackend::new());
    let role = RoleId::from(1);

    let err = console
        .save_role_permissions(&role, &ids(&[10]), &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Permission(PermsError::CatalogUnavailable)
    ));
    assert!(console.backend().updates().is_empty());
}

#[tokio::test]
async fn test_empty_catalog_is_fetched_again() {
    let console = console(MemoryBackend::new());

    let err = console.catalog().await.unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Permission(PermsError::CatalogUnavailable)
    ));

    console
        .backend()
        .set_catalog(vec![PermissionCatalogEntry::new(10, "View Goals")]);
    let catalog = console.catalog().await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(console.backend().catalog_fetches(), 2);

    console.catalog().await.unwrap();
    assert_eq!(console.backend().catalog_fetches(), 2);
}

// ─────────────────────────────────────────────────────────────────────────────
// Roles
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_role_edit_roundtrip() {
    let backend = goal_backend();
    let role = RoleId::from(4);
    backend.set_role_permissions(role.clone(), ids(&[10, 20]));
    let console = console(backend);

    let mut snapshot = console.load_role_grants(&role).await.unwrap();
    assert!(snapshot.working.is_granted("Goal Management", ActionType::View));
    assert!(snapshot.working.is_granted("Goal Management", ActionType::Create));

    snapshot.working.set("Goal Management", ActionType::View, false);
    snapshot.working.set("Pillar Management", ActionType::View, true);

    let outcome = console
        .save_role_permissions(&role, &snapshot.original, &snapshot.working)
        .await
        .unwrap();

    let SaveOutcome::Submitted(update) = outcome else {
        panic!("expected a submitted update");
    };
    assert_eq!(update.subject, UpdateSubject::Role { role_id: role.clone() });
    assert_eq!(update.added, Some(vec![30.into()]));
    assert_eq!(update.deleted, Some(vec![10.into()]));
    assert_eq!(console.backend().role_permissions(&role), ids(&[20, 30]));
}

#[tokio::test]
async fn test_unchanged_role_is_not_submitted() {
    let backend = goal_backend();
    let role = RoleId::from(4);
    backend.set_role_permissions(role.clone(), ids(&[10]));
    let console = console(backend);

    let snapshot = console.load_role_grants(&role).await.unwrap();
    let outcome = console
        .save_role_permissions(&role, &snapshot.original, &snapshot.working)
        .await
        .unwrap();

    assert_eq!(outcome, SaveOutcome::Unchanged);
    assert!(console.backend().updates().is_empty());
}

#[tokio::test]
async fn test_empty_role_update_submitted_when_configured() {
    let backend = goal_backend();
    let role = RoleId::from(4);
    let config = ConsoleConfig {
        skip_empty_updates: false,
        ..ConsoleConfig::default()
    };
    let console = Console::new(backend, config);

    let outcome = console
        .save_role_permissions(&role, &ids(&[]), &Default::default())
        .await
        .unwrap();
    assert!(matches!(outcome, SaveOutcome::Submitted(update) if update.is_empty()));
}

#[tokio::test]
async fn test_rejected_update_surfaces_messages() {
    let backend = goal_backend();
    backend.reject_updates(&["Role not found"]);
    let console = console(backend);

    let mut working = grantdesk::GrantSet::new();
    working.grant("Goal Management", ActionType::View);

    let err = console
        .save_role_permissions(&RoleId::from(99), &ids(&[]), &working)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Permission(PermsError::UpdateRejected(ref messages)) if messages == &["Role not found"]
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_user_same_role_diff() {
    let backend = goal_backend();
    let user = UserId::from("u-1");
    let role = RoleId::from(2);
    backend.set_user_permissions(user.clone(), role.clone(), ids(&[10, 20]));
    let console = console(backend);

    let selection = RoleSelection::unchanged(role.clone());
    let mut snapshot = console.load_user_grants(&user, &selection).await.unwrap();
    snapshot.working.set("Goal Management", ActionType::Create, false);
    snapshot.working.set("Meeting Management", ActionType::View, true);

    let outcome = console
        .save_user_permissions(&user, &selection, &snapshot.original, &snapshot.working)
        .await
        .unwrap();
    let SaveOutcome::Submitted(update) = outcome else {
        panic!("expected a submitted update");
    };
    assert_eq!(update.added, Some(vec![40.into()]));
    assert_eq!(update.deleted, Some(vec![20.into()]));
    assert_eq!(console.backend().user_permissions(&user, &role), ids(&[10, 40]));
}

#[tokio::test]
async fn test_user_role_change_replaces_wholesale() {
    let backend = goal_backend();
    let user = UserId::from("u-1");
    let old_role = RoleId::from(2);
    let new_role = RoleId::from(3);
    backend.set_user_permissions(user.clone(), old_role.clone(), ids(&[10, 20]));
    backend.set_role_permissions(new_role.clone(), ids(&[10, 30]));
    let console = console(backend);

    let selection = RoleSelection::new(Some(old_role), new_role.clone());
    let snapshot = console.load_user_grants(&user, &selection).await.unwrap();

    // The editor starts from the new role's defaults.
    assert!(snapshot.working.is_granted("Pillar Management", ActionType::View));
    assert_eq!(snapshot.original, ids(&[10, 20]));

    let outcome = console
        .save_user_permissions(&user, &selection, &snapshot.original, &snapshot.working)
        .await
        .unwrap();
    let SaveOutcome::Submitted(update) = outcome else {
        panic!("expected a submitted update");
    };
    assert_eq!(update.subject.role_id(), &new_role);
    assert_eq!(update.added, Some(vec![10.into(), 30.into()]));
    assert_eq!(update.deleted, Some(vec![10.into(), 20.into()]));
}

#[tokio::test]
async fn test_role_change_alone_is_submitted() {
    let backend = goal_backend();
    let user = UserId::from("u-1");
    let console = console(backend);

    let selection = RoleSelection::new(Some(RoleId::from(2)), RoleId::from(3));
    let outcome = console
        .save_user_permissions(&user, &selection, &ids(&[]), &Default::default())
        .await
        .unwrap();
    assert!(matches!(outcome, SaveOutcome::Submitted(_)));
    assert_eq!(console.backend().updates().len(), 1);
}

#[tokio::test]
async fn test_user_without_grants_starts_from_role_defaults() {
    let backend = goal_backend();
    let user = UserId::from("u-2");
    let role = RoleId::from(2);
    backend.set_role_permissions(role.clone(), ids(&[40]));
    let console = console(backend);

    let snapshot = console
        .load_user_grants(&user, &RoleSelection::unchanged(role))
        .await
        .unwrap();
    assert!(snapshot.original.is_empty());
    assert!(snapshot.working.is_granted("Meeting Management", ActionType::View));
}

#[tokio::test]
async fn test_create_user() {
    let console = console(goal_backend());
    let user = UserId::from("g-1");
    let role = RoleId::from(1);

    let mut working = grantdesk::GrantSet::new();
    working.grant("Goal Management", ActionType::View);
    working.grant("Meeting Management", ActionType::View);
    console.create_user(&user, &role, &working).await.unwrap();

    let created = console.backend().created_users();
    assert_eq!(created.len(), 1);
    assert_eq!(
        created[0].permission_ids,
        vec![PermissionId::from(10), PermissionId::from(40)]
    );
    assert_eq!(created[0].system_id, 2);
}

#[tokio::test]
async fn test_create_user_requires_permissions() {
    let console = console(goal_backend());
    let err = console
        .create_user(&UserId::from("g-1"), &RoleId::from(1), &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Permission(PermsError::NoPermissionsSelected)
    ));
    assert!(console.backend().created_users().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Credentials
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login() {
    let backend = MemoryBackend::new();
    backend.add_account("ada", "hunter2");
    let console = console(backend);

    let session = console
        .login(&Credentials::new("ada", "hunter2"))
        .await
        .unwrap();
    assert_eq!(session.user_id, UserId::from("ada"));

    let logins = console.backend().logins();
    assert_eq!(TestKey::decrypt(&logins[0].password).as_deref(), Some("hunter2"));

    let err = console
        .login(&Credentials::new("ada", "wrong"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Credential(CredentialError::LoginRejected(_))
    ));
    assert_eq!(console.backend().key_fetches(), 1);
}

#[tokio::test]
async fn test_concurrent_encryption_fetches_key_once() {
    let backend = MemoryBackend::new();
    backend.set_key_delay(Duration::from_millis(50));
    let console = console(backend);

    let (a, b, c) = tokio::join!(
        console.encrypt_password("one"),
        console.encrypt_password("two"),
        console.encrypt_password("three"),
    );
    assert_eq!(TestKey::decrypt(&a.unwrap()).as_deref(), Some("one"));
    assert_eq!(TestKey::decrypt(&b.unwrap()).as_deref(), Some("two"));
    assert_eq!(TestKey::decrypt(&c.unwrap()).as_deref(), Some("three"));
    assert_eq!(console.backend().key_fetches(), 1);
    assert_eq!(console.public_key_state().await, KeyState::Cached);
}

#[tokio::test]
async fn test_key_failure_then_retry() {
    let backend = MemoryBackend::new();
    backend.queue_key_replies([KeyReply::Fail("connection reset".into()), KeyReply::Missing]);
    let console = console(backend);

    for _ in 0..2 {
        let err = console.encrypt_password("pw").await.unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::Credential(CredentialError::KeyUnavailable(_))
        ));
        assert_eq!(console.public_key_state().await, KeyState::Empty);
    }

    console.encrypt_password("pw").await.unwrap();
    assert_eq!(console.backend().key_fetches(), 3);
}

#[tokio::test]
async fn test_empty_password_does_not_fetch() {
    let console = console(MemoryBackend::new());
    let err = console.encrypt_password("").await.unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Credential(CredentialError::EmptyInput("password"))
    ));
    assert_eq!(console.backend().key_fetches(), 0);
}

#[tokio::test]
async fn test_invalidate_public_key() {
    let console = console(MemoryBackend::new());
    console.encrypt_password("pw").await.unwrap();
    console.invalidate_public_key().await;
    assert_eq!(console.public_key_state().await, KeyState::Empty);

    console.encrypt_password("pw").await.unwrap();
    assert_eq!(console.backend().key_fetches(), 2);
}
