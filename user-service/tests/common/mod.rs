#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenSettings;
use chrono::Utc;
use reqwest::header::COOKIE;
use reqwest::header::SET_COOKIE;
use tokio::sync::RwLock;
use user_service::domain::auth::AuthService;
use user_service::domain::auth::IdentityGate;
use user_service::domain::user::models::EmailAddress;
use user_service::domain::user::models::Pagination;
use user_service::domain::user::models::PersonName;
use user_service::domain::user::models::User;
use user_service::domain::user::models::UserId;
use user_service::domain::user::models::Username;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::cookies::CookieSettings;
use user_service::inbound::http::router::create_router;
use user_service::inbound::http::router::AppState;
use user_service::inbound::http::router::HttpSettings;
use user_service::user::errors::UserError;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// User store kept in memory, enforcing the same unique keys as the
/// `users` table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    fn conflict(existing: &[User], user: &User) -> Option<UserError> {
        let others = existing.iter().filter(|u| u.id != user.id);
        for other in others {
            if other.email == user.email {
                return Some(UserError::EmailAlreadyExists(
                    user.email.as_str().to_string(),
                ));
            }
            if other.user_name == user.user_name {
                return Some(UserError::UsernameAlreadyExists(
                    user.user_name.as_str().to_string(),
                ));
            }
            if other.phone.is_some() && other.phone == user.phone {
                return Some(UserError::PhoneAlreadyExists(
                    user.phone
                        .as_ref()
                        .map(|p| p.as_str().to_string())
                        .unwrap_or_default(),
                ));
            }
        }
        None
    }

    fn window(users: impl Iterator<Item = User>, pagination: Pagination) -> Vec<User> {
        users
            .skip(pagination.skip as usize)
            .take(pagination.limit as usize)
            .collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if let Some(err) = Self::conflict(&users, &user) {
            return Err(err);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<User>, UserError> {
        let users = self.users.read().await;
        Ok(Self::window(users.iter().cloned(), pagination))
    }

    async fn list_active(&self, pagination: Pagination) -> Result<Vec<User>, UserError> {
        let users = self.users.read().await;
        Ok(Self::window(
            users.iter().filter(|u| u.is_active).cloned(),
            pagination,
        ))
    }

    async fn count(&self) -> Result<i64, UserError> {
        Ok(self.users.read().await.len() as i64)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if let Some(err) = Self::conflict(&users, &user) {
            return Err(err);
        }
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != *id);
        if users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub api_client: reqwest::Client,
    pub token_settings: TokenSettings,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_settings = TokenSettings::new(TEST_SECRET);
        let authenticator = Arc::new(Authenticator::new(&token_settings));
        let repository = Arc::new(InMemoryUserRepository::default());

        let state = AppState {
            user_service: Arc::new(UserService::new(Arc::clone(&repository))),
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&repository),
                Arc::clone(&authenticator),
            )),
            identity_gate: Arc::new(IdentityGate::new(
                Arc::clone(&repository),
                Arc::clone(&authenticator),
            )),
            cookie_settings: CookieSettings::default(),
        };

        let router = create_router(state, &HttpSettings::default());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
            token_settings,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request carrying an access token cookie
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header(COOKIE, format!("access_token={}", token))
    }

    /// Helper to make POST request carrying an access token cookie
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path)
            .header(COOKIE, format!("access_token={}", token))
    }

    /// Helper to make PATCH request carrying an access token cookie
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .header(COOKIE, format!("access_token={}", token))
    }

    /// Helper to make DELETE request carrying an access token cookie
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .header(COOKIE, format!("access_token={}", token))
    }

    /// Store a user directly, bypassing registration rules.
    pub async fn seed_user(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
        is_active: bool,
        is_admin: bool,
    ) -> User {
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            user_name: Username::new(user_name.to_string()).unwrap(),
            name: "Test User".to_string(),
            first_name: PersonName::new("Test".to_string()).unwrap(),
            last_name: PersonName::new("User".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            phone: None,
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            is_active,
            is_admin,
            created_at: now,
            updated_at: now,
        };

        self.repository
            .create(user)
            .await
            .expect("Failed to seed user")
    }

    /// Log in and return the access token from the response cookies.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/v1/auth/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        set_cookies(&response)
            .remove("access_token")
            .expect("Missing access_token cookie")
            .value
    }
}

/// One `Set-Cookie` header split into value and attributes.
#[derive(Debug, Clone)]
pub struct SetCookie {
    pub value: String,
    pub attributes: Vec<String>,
}

impl SetCookie {
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes
            .iter()
            .any(|a| a.eq_ignore_ascii_case(attribute))
    }
}

/// `Set-Cookie` headers of a response, keyed by cookie name.
pub fn set_cookies(response: &reqwest::Response) -> HashMap<String, SetCookie> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .filter_map(|header| {
            let mut parts = header.split(';').map(str::trim);
            let (name, value) = parts.next()?.split_once('=')?;
            Some((
                name.to_string(),
                SetCookie {
                    value: value.to_string(),
                    attributes: parts.map(str::to_string).collect(),
                },
            ))
        })
        .collect()
}
