use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Attributes shared by both token cookies.
#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    /// Send the `Secure` attribute. Only disable for plain-HTTP development.
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self { secure: true }
    }
}

impl CookieSettings {
    fn token_cookie(
        &self,
        name: &'static str,
        value: String,
        max_age: time::Duration,
    ) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(max_age)
            .build()
    }

    /// Add both token cookies, each living as long as its token.
    pub fn set_tokens(&self, jar: CookieJar, tokens: &auth::TokenPair) -> CookieJar {
        jar.add(self.token_cookie(
            ACCESS_TOKEN_COOKIE,
            tokens.access_token.clone(),
            to_max_age(tokens.access_ttl),
        ))
        .add(self.token_cookie(
            REFRESH_TOKEN_COOKIE,
            tokens.refresh_token.clone(),
            to_max_age(tokens.refresh_ttl),
        ))
    }

    /// Overwrite both token cookies with empty, already-expired ones.
    pub fn clear_tokens(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.token_cookie(ACCESS_TOKEN_COOKIE, String::new(), time::Duration::ZERO))
            .add(self.token_cookie(REFRESH_TOKEN_COOKIE, String::new(), time::Duration::ZERO))
    }
}

fn to_max_age(ttl: chrono::Duration) -> time::Duration {
    time::Duration::seconds(ttl.num_seconds().max(0))
}

/// Value of a non-empty cookie.
pub fn token_from(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
