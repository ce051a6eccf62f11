use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::user::errors::UserError;
use crate::user::models::EmailAddress;
use crate::user::models::NewUser;
use crate::user::models::Page;
use crate::user::models::Registration;
use crate::user::models::UpdateUserCommand;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;
use crate::user::requests::RegisterRequest;
use crate::validation::Validator;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
    validator: Validator,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `validator` - Rule engine applied to signup requests
    pub fn new(repository: Arc<UR>, validator: Validator) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
            validator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, request: RegisterRequest) -> Result<Registration, UserError> {
        let report = self.validator.validate(&request);
        if !report.is_valid() {
            return Ok(Registration::Rejected(report));
        }

        let email = EmailAddress::new(request.email)?;

        if self.repository.exists(&email).await? {
            return Err(UserError::DuplicateUser(email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&request.password)?;

        let user = self
            .repository
            .create(NewUser {
                id: UserId::new(),
                email,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!("Registered user {}", user.id);

        Ok(Registration::Created(user))
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, UserError> {
        self.repository.list(page).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        self.repository.update(id, command).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use mockall::mock;

    use super::*;
    use crate::user::models::StoredCredential;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn exists(&self, email: &EmailAddress) -> Result<bool, UserError>;
            async fn find_credential(&self, email: &str) -> Result<Option<StoredCredential>, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn list(&self, page: Page) -> Result<Vec<User>, UserError>;
            async fn update(&self, id: &UserId, command: UpdateUserCommand) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    /// Log sink shared between a test and its subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn alice_request() -> RegisterRequest {
        RegisterRequest {
            email: "alice@example.com".to_string(),
            password: "wonderland".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
        }
    }

    fn alice(id: UserId) -> User {
        User {
            id,
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            is_admin: false,
            is_approved: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_exists().times(1).returning(|_| Ok(false));
        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "alice@example.com"
                    && user.first_name == "Alice"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user.to_user()));

        let service = UserService::new(Arc::new(repository), Validator::default());

        let result = service.register(alice_request()).await;

        match result.unwrap() {
            Registration::Created(user) => {
                assert_eq!(user.email.as_str(), "alice@example.com");
                assert_eq!(user.last_name, "Liddell");
                assert!(!user.is_admin);
            }
            Registration::Rejected(report) => panic!("unexpected rejection: {}", report),
        }
    }

    #[tokio::test]
    async fn test_register_never_stores_plaintext() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_exists().returning(|_| Ok(false));
        repository
            .expect_create()
            .withf(|user| !user.password_hash.contains("wonderland"))
            .times(1)
            .returning(|user| Ok(user.to_user()));

        let service = UserService::new(Arc::new(repository), Validator::default());

        assert!(service.register(alice_request()).await.is_ok());
    }

    #[tokio::test]
    async fn test_register_rejected_touches_no_storage() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_exists().times(0);
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), Validator::default());

        let request = RegisterRequest {
            password: "short".to_string(),
            ..alice_request()
        };

        match service.register(request).await.unwrap() {
            Registration::Rejected(report) => {
                assert_eq!(report.len(), 1);
                assert_eq!(report.errors()[0].field, "password");
                assert_eq!(report.errors()[0].message, "password is not strong enough");
            }
            Registration::Created(_) => panic!("short password must be rejected"),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_exists()
            .withf(|email| email.as_str() == "alice@example.com")
            .times(1)
            .returning(|_| Ok(true));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), Validator::default());

        let result = service.register(alice_request()).await;
        assert!(matches!(result, Err(UserError::DuplicateUser(_))));
    }

    #[tokio::test]
    async fn test_register_lost_race_is_duplicate() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_exists().returning(|_| Ok(false));
        repository
            .expect_create()
            .returning(|user| Err(UserError::DuplicateUser(user.email.to_string())));

        let service = UserService::new(Arc::new(repository), Validator::default());

        let result = service.register(alice_request()).await;
        assert!(matches!(result, Err(UserError::DuplicateUser(_))));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let returned_user = alice(user_id);
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = UserService::new(Arc::new(repository), Validator::default());

        let user = service.get_user(&user_id).await.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.first_name, "Alice");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), Validator::default());

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users_passes_page() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_list()
            .withf(|page| page.limit == 10 && page.offset == 0)
            .times(1)
            .returning(|_| Ok(vec![alice(UserId::new())]));

        let service = UserService::new(Arc::new(repository), Validator::default());

        let users = service.list_users(Page::new(Some(50), None)).await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_update()
            .times(1)
            .returning(|id, _| Err(UserError::NotFound(id.to_string())));

        let service = UserService::new(Arc::new(repository), Validator::default());

        let command = UpdateUserCommand {
            first_name: "Alicia".to_string(),
            last_name: "Liddell".to_string(),
        };
        let result = service.update_user(&UserId::new(), command).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        repository
            .expect_delete()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository), Validator::default());

        assert!(service.delete_user(&user_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_leaves_logging_to_caller() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut repository = MockTestUserRepository::new();
        repository.expect_exists().returning(|_| Ok(false));
        repository
            .expect_create()
            .returning(|user| Ok(user.to_user()));
        repository.expect_delete().times(1).returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository), Validator::default());

        service.register(alice_request()).await.unwrap();
        assert!(logs.contents().contains("Registered user"));

        let user_id = UserId::new();
        service.delete_user(&user_id).await.unwrap();
        assert!(!logs.contents().contains(&user_id.to_string()));
        assert!(!logs.contents().contains("Deleted user"));
    }
}
