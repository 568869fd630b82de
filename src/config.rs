use std::env;
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEV_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub ai_model: String,
    pub lemon_squeezy_api_key: SecretString,
    pub lemon_squeezy_api_base: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "learnsmart-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            ai_model: env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            lemon_squeezy_api_key: SecretString::from(
                env::var("LEMON_SQUEEZY_API_KEY").unwrap_or_default(),
            ),
            lemon_squeezy_api_base: env::var("LEMON_SQUEEZY_API_BASE")
                .unwrap_or_else(|_| "https://api.lemonsqueezy.com".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Refuses to run in production with development secrets or missing API keys.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEV_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the development default".to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}), at least 32 characters are required",
                jwt_secret.len()
            )));
        }

        if self.openai_api_key.expose_secret().is_empty() {
            return Err(AppError::InternalError("OPENAI_API_KEY is not set".to_string()));
        }

        if self.lemon_squeezy_api_key.expose_secret().is_empty() {
            return Err(AppError::InternalError(
                "LEMON_SQUEEZY_API_KEY is not set".to_string(),
            ));
        }

        Ok(())
    }

    /// Fixed configuration used by the test suites.
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "learnsmart-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            openai_api_key: SecretString::from("test-openai-key".to_string()),
            openai_api_base: "http://localhost:9999/v1".to_string(),
            ai_model: "test-model".to_string(),
            lemon_squeezy_api_key: SecretString::from("test-lemon-key".to_string()),
            lemon_squeezy_api_base: "http://localhost:9998".to_string(),
        }
    }
}
