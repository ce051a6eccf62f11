mod common;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use common::TestDb;
use user_service::repositories::user::PostgresUserRepository;
use user_service::user::errors::UserError;
use user_service::user::models::EmailAddress;
use user_service::user::models::NewUser;
use user_service::user::models::Page;
use user_service::user::models::UpdateUserCommand;
use user_service::user::models::UserId;
use user_service::user::ports::UserRepository;

fn new_user(email: &str, created_at: DateTime<Utc>) -> NewUser {
    NewUser {
        id: UserId::new(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        first_name: "Alice".to_string(),
        last_name: "Liddell".to_string(),
        created_at,
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_and_read_back() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    let created = repository
        .create(new_user("alice@example.com", Utc::now()))
        .await
        .expect("Failed to create user");
    assert!(!created.is_admin);
    assert!(!created.is_approved);

    let email = EmailAddress::new("alice@example.com".to_string()).unwrap();
    assert!(repository.exists(&email).await.unwrap());

    let credential = repository
        .find_credential("alice@example.com")
        .await
        .unwrap()
        .expect("Credential not found");
    assert_eq!(credential.email, "alice@example.com");
    assert!(credential.password_hash.starts_with("$argon2id$"));

    let found = repository
        .find_by_id(&created.id)
        .await
        .unwrap()
        .expect("User not found");
    assert_eq!(found.id, created.id);
    assert_eq!(found.first_name, "Alice");

    assert!(repository.find_credential("bob@example.com").await.unwrap().is_none());
    assert!(repository.find_by_id(&UserId::new()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_duplicate_email() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    repository
        .create(new_user("alice@example.com", Utc::now()))
        .await
        .unwrap();

    let result = repository
        .create(new_user("alice@example.com", Utc::now()))
        .await;
    assert!(matches!(result, Err(UserError::DuplicateUser(_))));
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_concurrent_creates_of_same_email() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    let (first, second) = tokio::join!(
        repository.create(new_user("alice@example.com", Utc::now())),
        repository.create(new_user("alice@example.com", Utc::now())),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(UserError::DuplicateUser(_))))
            .count(),
        1
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_update_and_delete_missing_user() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());
    let missing = UserId::new();

    let command = UpdateUserCommand {
        first_name: "Alicia".to_string(),
        last_name: "Liddell".to_string(),
    };
    let update = repository.update(&missing, command).await;
    assert!(matches!(update, Err(UserError::NotFound(_))));

    let delete = repository.delete(&missing).await;
    assert!(matches!(delete, Err(UserError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_update_then_delete() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    let created = repository
        .create(new_user("alice@example.com", Utc::now()))
        .await
        .unwrap();

    let command = UpdateUserCommand {
        first_name: "Alicia".to_string(),
        last_name: "Pleasance".to_string(),
    };
    let updated = repository.update(&created.id, command).await.unwrap();
    assert_eq!(updated.first_name, "Alicia");
    assert_eq!(updated.last_name, "Pleasance");
    assert_eq!(updated.email, created.email);

    repository.delete(&created.id).await.unwrap();
    assert!(repository.find_by_id(&created.id).await.unwrap().is_none());
    assert!(matches!(
        repository.delete(&created.id).await,
        Err(UserError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_list_pages_newest_first() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());
    let start = Utc::now() - Duration::hours(1);

    for (i, email) in ["oldest@example.com", "middle@example.com", "newest@example.com"]
        .into_iter()
        .enumerate()
    {
        repository
            .create(new_user(email, start + Duration::minutes(i as i64)))
            .await
            .unwrap();
    }

    let first = repository.list(Page::new(Some(2), None)).await.unwrap();
    let emails: Vec<&str> = first.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["newest@example.com", "middle@example.com"]);

    let second = repository.list(Page::new(Some(2), Some(2))).await.unwrap();
    let emails: Vec<&str> = second.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["oldest@example.com"]);

    assert!(repository
        .list(Page::new(Some(2), Some(3)))
        .await
        .unwrap()
        .is_empty());
}
