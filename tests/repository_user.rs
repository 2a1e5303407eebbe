//! PostgreSQL repository tests. Run with `DATABASE_URL` pointing at a
//! disposable server: `cargo test -- --ignored`.

use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use users_api::domain::entities::{NewUser, Role, UserChanges};
use users_api::domain::repositories::UserRepository;
use users_api::error::AppError;
use users_api::infrastructure::persistence::PgUserRepository;

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Grace Hopper".to_string(),
        email: email.to_string(),
        password_hash: "$2b$04$hash".to_string(),
        birth_at: NaiveDate::from_ymd_opt(1906, 12, 9),
        role: Role::User,
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let created = repo.create(new_user("grace@example.com")).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.role, Role::User);

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "grace@example.com");

    let by_email = repo
        .find_by_email("GRACE@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, created.id);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_email_is_conflict(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create(new_user("dup@example.com")).await.unwrap();
    let result = repo.create(new_user("dup@example.com")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_is_ordered_by_id(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let first = repo.create(new_user("a@example.com")).await.unwrap();
    let second = repo.create(new_user("b@example.com")).await.unwrap();

    let users = repo.list().await.unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();

    assert_eq!(ids, vec![first.id, second.id]);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_applies_only_supplied_columns(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create(new_user("grace@example.com")).await.unwrap();

    let updated = repo
        .update(
            user.id,
            UserChanges {
                name: Some("Rear Admiral Hopper".to_string()),
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Rear Admiral Hopper");
    assert_eq!(updated.role, Role::Admin);
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.birth_at, user.birth_at);
    assert!(updated.updated_at >= user.updated_at);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_can_clear_birth_date(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create(new_user("grace@example.com")).await.unwrap();

    let updated = repo
        .update(
            user.id,
            UserChanges {
                birth_at: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.birth_at, None);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_missing_user_is_not_found(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let result = repo
        .update(
            4242,
            UserChanges {
                name: Some("Nobody".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_and_count_admins(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let mut admin = new_user("root@example.com");
    admin.role = Role::Admin;
    let admin = repo.create(admin).await.unwrap();
    repo.create(new_user("grace@example.com")).await.unwrap();

    assert_eq!(repo.count_admins().await.unwrap(), 1);

    assert!(repo.delete(admin.id).await.unwrap());
    assert!(!repo.delete(admin.id).await.unwrap());
    assert_eq!(repo.count_admins().await.unwrap(), 0);
}
