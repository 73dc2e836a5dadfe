//! HTTP client for the DishHub REST API
//!
//! Every list endpoint returns a JSON array that replaces the previous one
//! wholesale. The client never paginates or filters server-side; the month
//! filter on the users endpoint is passed through but not trusted.

use std::time::Duration;

use chrono::Utc;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::types::{
    CategoryRecord, DishhubError, LoginForm, LoginResponse, OverviewMetrics, Result, Session,
    SignUpForm, UserRecord,
};

/// Async client bound to one API base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("dishhub-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DishhubError::Fetch(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            config,
            token: None,
        })
    }

    /// Attach a bearer token to every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn fetch_overview(&self) -> Result<OverviewMetrics> {
        let url = self.config.endpoint_url(&self.config.endpoints.overview)?;
        self.get_json(url).await
    }

    pub async fn fetch_categories(&self) -> Result<Vec<CategoryRecord>> {
        let url = self.config.endpoint_url(&self.config.endpoints.categories)?;
        let records: Vec<CategoryRecord> = self.get_json(url).await?;
        info!(count = records.len(), "fetched category records");
        Ok(records)
    }

    /// Users created in `month` (1-12) according to the server; `None` for all
    pub async fn fetch_users(&self, month: Option<u32>) -> Result<Vec<UserRecord>> {
        let mut url = self.config.endpoint_url(&self.config.endpoints.users)?;
        if let Some(m) = month {
            url.query_pairs_mut().append_pair("month", &m.to_string());
        }
        let users: Vec<UserRecord> = self.get_json(url).await?;
        info!(count = users.len(), ?month, "fetched users");
        Ok(users)
    }

    /// Full, unfiltered registered-users list
    pub async fn fetch_registered_users(&self) -> Result<Vec<UserRecord>> {
        let url = self.config.endpoint_url(&self.config.endpoints.registered)?;
        let users: Vec<UserRecord> = self.get_json(url).await?;
        info!(count = users.len(), "fetched registered users");
        Ok(users)
    }

    pub async fn login(&self, form: &LoginForm) -> Result<Session> {
        let url = self.config.endpoint_url(&self.config.endpoints.login)?;
        let body = self.post_json(url, form).await?;
        let response: LoginResponse = if body.trim().is_empty() {
            LoginResponse::default()
        } else {
            serde_json::from_str(&body)
                .map_err(|e| DishhubError::Decode(format!("login response: {}", e)))?
        };

        Ok(Session {
            username: form.username.clone(),
            token: response.token,
            logged_in_at: Utc::now(),
        })
    }

    pub async fn register(&self, form: &SignUpForm) -> Result<()> {
        let url = self.config.endpoint_url(&self.config.endpoints.register)?;
        self.post_json(url, form).await?;
        Ok(())
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.request(self.http.get(url.clone())).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DishhubError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| DishhubError::Decode(format!("{}: {}", url.path(), e)))
    }

    /// POST a JSON body and return the response text.
    /// Client errors that carry a readable message become `Validation`.
    async fn post_json<B: Serialize>(&self, url: Url, body: &B) -> Result<String> {
        debug!(%url, "POST");
        let response = self
            .request(self.http.post(url.clone()).json(body))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if status.is_success() {
            return Ok(text);
        }

        if status.is_client_error() && status != StatusCode::NOT_FOUND {
            if let Some(message) = server_message(&text) {
                return Err(DishhubError::Validation(message));
            }
        }

        Err(DishhubError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

/// Pull a human-readable message out of an API error body.
///
/// Handles `{"detail": ".."}`, `{"error": ".."}`, `{"message": ".."}` and
/// field maps like `{"email": ["already taken"]}`.
pub fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let obj = value.as_object()?;

    for key in ["detail", "error", "message", "non_field_errors"] {
        match obj.get(key) {
            Some(serde_json::Value::String(s)) => return Some(s.clone()),
            Some(serde_json::Value::Array(items)) => {
                if let Some(s) = items.iter().find_map(|v| v.as_str()) {
                    return Some(s.to_string());
                }
            }
            _ => {}
        }
    }

    obj.iter().find_map(|(field, v)| {
        let msg = match v {
            serde_json::Value::String(s) => Some(s.as_str()),
            serde_json::Value::Array(items) => items.iter().find_map(|i| i.as_str()),
            _ => None,
        }?;
        Some(format!("{}: {}", field, msg))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_detail() {
        assert_eq!(
            server_message(r#"{"detail": "Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
    }

    #[test]
    fn test_server_message_field_errors() {
        assert_eq!(
            server_message(r#"{"email": ["user with this email already exists."]}"#).as_deref(),
            Some("email: user with this email already exists.")
        );
    }

    #[test]
    fn test_server_message_non_field_list() {
        assert_eq!(
            server_message(r#"{"non_field_errors": ["Unable to log in"]}"#).as_deref(),
            Some("Unable to log in")
        );
    }

    #[test]
    fn test_server_message_unreadable() {
        assert!(server_message("<html>502</html>").is_none());
        assert!(server_message("[]").is_none());
        assert!(server_message("{}").is_none());
    }

    #[test]
    fn test_client_builds_with_default_config() {
        let client = ApiClient::new(Config::default()).unwrap();
        assert!(client.token.is_none());
        let client = client.with_token(Some("abc".into()));
        assert_eq!(client.token.as_deref(), Some("abc"));
    }
}
