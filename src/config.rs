use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

/// Route segments of the backend, appended to `backend_url`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Routes {
    pub quizzes: String,
    pub likes: String,
    pub completions: String,
    pub comments: String,
    pub users: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            quizzes: "quizzes".to_string(),
            likes: "likes".to_string(),
            completions: "completions".to_string(),
            comments: "comments".to_string(),
            users: "users".to_string(),
        }
    }
}

impl Routes {
    pub fn from_env() -> Self {
        let defaults = Routes::default();
        Self {
            quizzes: env::var("QUIZZ_ROUTE_QUIZZES").unwrap_or(defaults.quizzes),
            likes: env::var("QUIZZ_ROUTE_LIKES").unwrap_or(defaults.likes),
            completions: env::var("QUIZZ_ROUTE_COMPLETIONS").unwrap_or(defaults.completions),
            comments: env::var("QUIZZ_ROUTE_COMMENTS").unwrap_or(defaults.comments),
            users: env::var("QUIZZ_ROUTE_USERS").unwrap_or(defaults.users),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub backend_url: String,
    pub api_token: Option<SecretString>,
    pub request_timeout_secs: u64,
    pub channel_capacity: usize,
    pub routes: Routes,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            backend_url: env::var("QUIZZ_BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/".to_string()),
            api_token: env::var("QUIZZ_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty())
                .map(SecretString::from),
            request_timeout_secs: env::var("QUIZZ_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            channel_capacity: env::var("QUIZZ_CHANNEL_CAPACITY")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(16),
            routes: Routes::from_env(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Rejects settings the HTTP client or the broadcast channel cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        reqwest::Url::parse(&self.backend_url).map_err(|e| {
            AppError::ValidationError(format!(
                "QUIZZ_BACKEND_URL '{}' is not a valid URL: {}",
                self.backend_url, e
            ))
        })?;

        if self.request_timeout_secs == 0 {
            return Err(AppError::ValidationError(
                "QUIZZ_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        // tokio's broadcast channel panics on a zero capacity
        if self.channel_capacity == 0 {
            return Err(AppError::ValidationError(
                "QUIZZ_CHANNEL_CAPACITY must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            backend_url: "http://localhost:8080/api/".to_string(),
            api_token: Some(SecretString::from("test_token".to_string())),
            request_timeout_secs: 5,
            channel_capacity: 8,
            routes: Routes::default(),
        }
    }
}
