use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::FullName;
use crate::domain::user::models::Pagination;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPage;
use crate::user::errors::EmailError;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Minimum length of the part of an email before the `@`.
const MIN_EMAIL_LOCAL_PART: usize = 3;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    async fn find_existing(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    /// Argon2 is slow on purpose; run it on the blocking pool.
    async fn hash_password(&self, password: Password) -> Result<String, UserError> {
        let hasher = self.password_hasher;
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn set_active(&self, id: &UserId, active: bool) -> Result<User, UserError> {
        let mut user = self.find_existing(id).await?;

        match (user.is_active, active) {
            (true, true) => return Err(UserError::AlreadyActive),
            (false, false) => return Err(UserError::AlreadyInactive),
            _ => {}
        }

        user.is_active = active;
        user.updated_at = Utc::now();

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, is_active = active, "User activation changed");

        Ok(updated_user)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        if command.email.local_part().chars().count() < MIN_EMAIL_LOCAL_PART {
            return Err(EmailError::LocalPartTooShort {
                min: MIN_EMAIL_LOCAL_PART,
            }
            .into());
        }

        let name = command
            .name
            .unwrap_or_else(|| FullName::from_parts(&command.first_name, &command.last_name))
            .into_inner();

        let password_hash = self.hash_password(command.password).await?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            user_name: command.user_name,
            name,
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            phone: command.phone,
            password_hash,
            is_active: true,
            is_admin: false,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.find_existing(id).await
    }

    async fn list_users(&self, pagination: Pagination) -> Result<UserPage, UserError> {
        let items = self.repository.list(pagination).await?;
        let total = self.repository.count().await?;

        Ok(UserPage {
            total,
            items,
            pagination,
        })
    }

    async fn list_active_users(&self, pagination: Pagination) -> Result<Vec<User>, UserError> {
        self.repository.list_active(pagination).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self.find_existing(id).await?;

        if let Some(new_email) = command.email {
            if let Some(owner) = self.repository.find_by_email(new_email.as_str()).await? {
                if owner.id != user.id {
                    return Err(UserError::EmailAlreadyExists(
                        new_email.as_str().to_string(),
                    ));
                }
            }
            user.email = new_email;
        }

        if let Some(new_user_name) = command.user_name {
            user.user_name = new_user_name;
        }

        if let Some(new_name) = command.name {
            user.name = new_name.into_inner();
        }

        if let Some(new_first_name) = command.first_name {
            user.first_name = new_first_name;
        }

        if let Some(new_last_name) = command.last_name {
            user.last_name = new_last_name;
        }

        if let Some(new_phone) = command.phone {
            user.phone = Some(new_phone);
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(new_password).await?;
        }

        if let Some(is_active) = command.is_active {
            user.is_active = is_active;
        }

        user.updated_at = Utc::now();

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        let user = self.find_existing(id).await?;

        if user.is_admin && user.is_active {
            return Err(UserError::CannotDeleteActiveAdmin);
        }

        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }

    async fn activate_user(&self, id: &UserId) -> Result<User, UserError> {
        self.set_active(id, true).await
    }

    async fn deactivate_user(&self, id: &UserId) -> Result<User, UserError> {
        self.set_active(id, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::PersonName;
    use crate::domain::user::models::Username;
    use crate::user::ports::mocks::test_user;
    use crate::user::ports::mocks::MockTestUserRepository;

    fn create_command(email: &str) -> CreateUserCommand {
        CreateUserCommand {
            user_name: Username::new("johndoe".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            first_name: PersonName::new("John".to_string()).unwrap(),
            last_name: PersonName::new("Doe".to_string()).unwrap(),
            name: None,
            phone: None,
            password: Password::new("SecurePass123!".to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .withf(|user| {
                user.user_name.as_str() == "johndoe"
                    && user.email.as_str() == "john@example.com"
                    && user.name == "John Doe"
                    && user.is_active
                    && !user.is_admin
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let user = service
            .create_user(create_command("john@example.com"))
            .await
            .expect("User should be created");

        assert_eq!(user.name, "John Doe");
        assert!(auth::PasswordHasher::new().verify("SecurePass123!", &user.password_hash));
    }

    #[tokio::test]
    async fn test_create_user_keeps_explicit_name() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| user.name == "Johnny D")
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let mut command = create_command("john@example.com");
        command.name = Some(FullName::new("Johnny D".to_string()).unwrap());

        assert!(service.create_user(command).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(test_user(email, "$argon2id$hash"))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service.create_user(create_command("john@example.com")).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_user_short_email_local_part() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service.create_user(create_command("jo@example.com")).await;
        assert!(matches!(
            result,
            Err(UserError::InvalidEmail(EmailError::LocalPartTooShort {
                min: 3
            }))
        ));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users_includes_total() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_list()
            .withf(|p| p.skip == 10 && p.limit == 5)
            .times(1)
            .returning(|_| Ok(vec![test_user("john@example.com", "$argon2id$hash")]));
        repository.expect_count().times(1).returning(|| Ok(11));

        let service = UserService::new(Arc::new(repository));

        let page = service
            .list_users(Pagination::new(10, 5).unwrap())
            .await
            .unwrap();

        assert_eq!(page.total, 11);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.skip, 10);
    }

    #[tokio::test]
    async fn test_update_user_rejects_email_of_other_user() {
        let mut repository = MockTestUserRepository::new();

        let existing = test_user("john@example.com", "$argon2id$hash");
        let user_id = existing.id;
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_find_by_email()
            .returning(|email| Ok(Some(test_user(email, "$argon2id$other"))));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            email: Some(EmailAddress::new("taken@example.com".to_string()).unwrap()),
            ..Default::default()
        };

        let result = service.update_user(&user_id, command).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_user_success() {
        let mut repository = MockTestUserRepository::new();

        let existing = test_user("john@example.com", "$argon2id$old_hash");
        let user_id = existing.id;
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(|user| {
                user.first_name.as_str() == "Jane"
                    && user.phone.as_ref().map(|p| p.as_str()) == Some("+79991234568")
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "$argon2id$old_hash"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            first_name: Some(PersonName::new("Jane".to_string()).unwrap()),
            phone: Some(
                crate::domain::user::models::PhoneNumber::new("+79991234568".to_string())
                    .unwrap(),
            ),
            password: Some(Password::new("NewPassword1".to_string()).unwrap()),
            ..Default::default()
        };

        let updated = service.update_user(&user_id, command).await.unwrap();
        assert_eq!(updated.first_name.as_str(), "Jane");
        assert_eq!(updated.email.as_str(), "john@example.com");
    }

    #[tokio::test]
    async fn test_delete_active_admin_is_refused() {
        let mut repository = MockTestUserRepository::new();

        let mut admin = test_user("admin@example.com", "$argon2id$hash");
        admin.is_admin = true;
        let admin_id = admin.id;
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(admin.clone())));
        repository.expect_delete().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service.delete_user(&admin_id).await;
        assert!(matches!(result, Err(UserError::CannotDeleteActiveAdmin)));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user = test_user("john@example.com", "$argon2id$hash");
        let user_id = user.id;
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_delete()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository));

        assert!(service.delete_user(&user_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_activate_already_active_user() {
        let mut repository = MockTestUserRepository::new();

        let user = test_user("john@example.com", "$argon2id$hash");
        let user_id = user.id;
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service.activate_user(&user_id).await;
        assert!(matches!(result, Err(UserError::AlreadyActive)));
    }

    #[tokio::test]
    async fn test_deactivate_user() {
        let mut repository = MockTestUserRepository::new();

        let user = test_user("john@example.com", "$argon2id$hash");
        let user_id = user.id;
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_update()
            .withf(|user| !user.is_active)
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let user = service.deactivate_user(&user_id).await.unwrap();
        assert!(!user.is_active);

        let mut repository = MockTestUserRepository::new();
        let mut inactive = test_user("john@example.com", "$argon2id$hash");
        inactive.is_active = false;
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(inactive.clone())));

        let service = UserService::new(Arc::new(repository));
        let result = service.deactivate_user(&user_id).await;
        assert!(matches!(result, Err(UserError::AlreadyInactive)));
    }
}
