use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;

pub struct AppConfig {
    pub database_url: String,
    pub redis_url: String,
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    pub resend_api_key: SecretString,
    /// Sender address for owner notifications, e.g. "Evolance <hello@evolance.app>".
    pub email_from: String,
    /// Fixed recipient of every new-signup notification.
    pub owner_email: String,
    pub product_name: String,
    /// Bearer token for listing and clearing the waitlist. Admin endpoints are
    /// open when unset.
    pub admin_token: Option<SecretString>,
    pub rate_limit_window_secs: u64,
    pub rate_limit_per_ip: u64,
    /// Whether to trust X-Forwarded-For headers. Only enable behind a reverse proxy.
    pub trust_proxy: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url: String = get_env("DATABASE_URL");
        let redis_url: String = get_env_default("REDIS_URL", "redis://127.0.0.1:6379".to_string());
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let resend_api_key = SecretString::from(get_env::<String>("RESEND_API_KEY"));
        let email_from: String = get_env("EMAIL_FROM");
        let owner_email: String = get_env("OWNER_EMAIL");
        let product_name: String = get_env_default("PRODUCT_NAME", "Evolance".to_string());

        let admin_token: Option<SecretString> = std::env::var("ADMIN_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from);

        let rate_limit_window_secs: u64 = get_env_default("RATE_LIMIT_WINDOW_SECS", 60);
        let rate_limit_per_ip: u64 = get_env_default("RATE_LIMIT_PER_IP", 30);
        // Default to false - must explicitly enable when behind a trusted proxy
        let trust_proxy: bool = get_env_default("TRUST_PROXY", false);

        Self {
            database_url,
            redis_url,
            bind_addr,
            cors_origin,
            resend_api_key,
            email_from,
            owner_email,
            product_name,
            admin_token,
            rate_limit_window_secs,
            rate_limit_per_ip,
            trust_proxy,
        }
    }
}
