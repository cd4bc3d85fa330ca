use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use chrono::Duration;

pub const AUTH_COOKIE: &str = "Authorization";
const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub domain: String,
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            domain: "localhost".to_string(),
            secure: false,
        }
    }
}

/// `Set-Cookie` value carrying the bearer token.
pub fn auth_cookie(settings: &CookieSettings, token: &str, max_age: Duration) -> String {
    let mut parts = vec![
        format!("{AUTH_COOKIE}={token}"),
        format!("Max-Age={}", max_age.num_seconds()),
        "Path=/".to_string(),
        format!("Domain={}", settings.domain),
        "HttpOnly".to_string(),
        "SameSite=Lax".to_string(),
    ];
    if settings.secure {
        parts.push("Secure".to_string());
    }
    parts.join("; ")
}

/// Finds the bearer token, preferring the `Authorization` cookie over the
/// `Authorization: Bearer` header.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(AUTH_COOKIE) {
        let value = cookie.value();
        let value = value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    let header = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, header};

    use super::*;

    #[test]
    fn cookie_carries_expected_attributes() {
        let settings = CookieSettings {
            domain: "shop.example.com".into(),
            secure: true,
        };
        let cookie = auth_cookie(&settings, "abc.def.ghi", Duration::days(30));
        assert!(cookie.starts_with("Authorization=abc.def.ghi;"));
        assert!(cookie.contains("Max-Age=2592000"));
        assert!(cookie.contains("Domain=shop.example.com"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.ends_with("Secure"));
    }

    #[test]
    fn token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; Authorization=cookie-token"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("header-token"));
    }

    #[test]
    fn cookie_wins_over_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("Authorization=from-cookie"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn other_schemes_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert!(extract_token(&headers).is_none());
        assert!(extract_token(&HeaderMap::new()).is_none());
    }
}
