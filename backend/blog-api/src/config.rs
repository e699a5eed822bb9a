/// Configuration management for the blog API
///
/// This module handles loading and managing configuration from environment
/// variables (with `.env` support for local development).
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Hosted store (Supabase/PostgREST) configuration
    pub supabase: SupabaseConfig,
    /// Outbound email configuration
    pub email: EmailConfig,
    /// Admin credentials for the /admin subtree
    pub admin: AdminConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or "*"
    pub allowed_origins: String,
}

/// Hosted store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. https://xyz.supabase.co
    pub url: String,
    /// Anon API key sent with every store request
    pub key: String,
}

/// Outbound email configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Resend API key; sending is disabled when absent
    pub resend_api_key: Option<String>,
    /// Default from-address
    pub from_email: String,
    /// Public website URL used in email templates and headers
    pub website_url: String,
}

/// Admin credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env if present; real environments set variables directly.
        dotenvy::dotenv().ok();

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let supabase_url = std::env::var("SUPABASE_URL").unwrap_or_default();
        let supabase_key = std::env::var("SUPABASE_ANON_KEY").unwrap_or_default();
        if supabase_url.is_empty() || supabase_key.is_empty() {
            return Err("SUPABASE_URL and SUPABASE_ANON_KEY are required".to_string());
        }

        let admin = AdminConfig {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "password".to_string()),
        };
        if app_env.eq_ignore_ascii_case("production") && admin.password == "password" {
            return Err("ADMIN_PASSWORD must be set to a non-default value in production".to_string());
        }

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string()),
            },
            supabase: SupabaseConfig {
                url: supabase_url,
                key: supabase_key,
            },
            email: EmailConfig {
                resend_api_key: std::env::var("RESEND_API_KEY")
                    .ok()
                    .filter(|key| !key.is_empty()),
                from_email: std::env::var("FROM_EMAIL")
                    .unwrap_or_else(|_| "hello@betadomot.blog".to_string()),
                website_url: std::env::var("WEBSITE_URL")
                    .unwrap_or_else(|_| "https://betadomot.blog".to_string()),
            },
            admin,
        })
    }
}
