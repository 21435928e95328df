use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Pagination;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, user_name, name, first_name, last_name, email, phone, \
     password_hash, is_active, is_admin, created_at, updated_at";

/// Row of the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRecord {
    id: Uuid,
    user_name: String,
    name: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    password_hash: String,
    is_active: bool,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRecord {
    fn into_user(self) -> Result<User, UserError> {
        Ok(User {
            id: UserId(self.id),
            user_name: Username::new(self.user_name)?,
            name: self.name,
            first_name: PersonName::new(self.first_name)?,
            last_name: PersonName::new(self.last_name)?,
            email: EmailAddress::new(self.email)?,
            phone: self.phone.map(PhoneNumber::new).transpose()?,
            password_hash: self.password_hash,
            is_active: self.is_active,
            is_admin: self.is_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select_where(column: &str) -> String {
        format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column)
    }
}

/// Map a unique violation onto the conflicting field.
fn map_write_error(e: sqlx::Error, user: &User) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some("users_user_name_key") => {
                    return UserError::UsernameAlreadyExists(user.user_name.as_str().to_string())
                }
                Some("users_email_key") => {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string())
                }
                Some("users_phone_key") => {
                    return UserError::PhoneAlreadyExists(
                        user.phone
                            .as_ref()
                            .map(|p| p.as_str().to_string())
                            .unwrap_or_default(),
                    )
                }
                _ => {}
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, user_name, name, first_name, last_name, email, phone,
                password_hash, is_active, is_admin, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id.0)
        .bind(user.user_name.as_str())
        .bind(&user.name)
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.email.as_str())
        .bind(user.phone.as_ref().map(|p| p.as_str()))
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.is_admin)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let query = Self::select_where("id");
        let record = sqlx::query_as::<_, UserRecord>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        record.map(UserRecord::into_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let query = Self::select_where("email");
        let record = sqlx::query_as::<_, UserRecord>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        record.map(UserRecord::into_user).transpose()
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<User>, UserError> {
        let query = format!(
            "SELECT {} FROM users ORDER BY created_at ASC OFFSET $1 LIMIT $2",
            USER_COLUMNS
        );
        let records = sqlx::query_as::<_, UserRecord>(&query)
            .bind(pagination.skip)
            .bind(pagination.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        records.into_iter().map(UserRecord::into_user).collect()
    }

    async fn list_active(&self, pagination: Pagination) -> Result<Vec<User>, UserError> {
        let query = format!(
            "SELECT {} FROM users WHERE is_active = TRUE \
             ORDER BY created_at ASC OFFSET $1 LIMIT $2",
            USER_COLUMNS
        );
        let records = sqlx::query_as::<_, UserRecord>(&query)
            .bind(pagination.skip)
            .bind(pagination.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        records.into_iter().map(UserRecord::into_user).collect()
    }

    async fn count(&self) -> Result<i64, UserError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(total)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET user_name = $2, name = $3, first_name = $4, last_name = $5,
                email = $6, phone = $7, password_hash = $8, is_active = $9,
                is_admin = $10, updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.user_name.as_str())
        .bind(&user.name)
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.email.as_str())
        .bind(user.phone.as_ref().map(|p| p.as_str()))
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.is_admin)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
