use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::client::{ApiError, Client};
use crate::types::auth::{
    LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse, RegisterRequest,
};
use crate::types::response::SuccessResponse;
use crate::types::user::User;

#[derive(Clone)]
pub struct AuthApi {
    client: Client,
}

impl AuthApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Registers a new client. Registration does not log the user in; the
    /// account stays pending until an admin approves it.
    pub async fn register(&self, data: &RegisterRequest) -> Result<User, ApiError> {
        self.client.post("/auth/register", Some(data)).await
    }

    /// Logs in and persists the returned bearer token in the session.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let resp: LoginResponse = self.client.post("/auth/login", Some(credentials)).await?;
        if !resp.token.is_empty() {
            self.client.session().set_token(Some(resp.token.clone()));
        }
        Ok(resp)
    }

    /// Invalidates the session remotely, then releases the local token no
    /// matter what the backend answered. The local session always ends.
    pub async fn logout(&self) -> Result<SuccessResponse, ApiError> {
        let result = self
            .client
            .post::<SuccessResponse, ()>("/auth/logout", None)
            .await;
        self.client.session().clear_token();
        result
    }

    /// Exchanges a refresh token for a fresh bearer token and persists it.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshTokenResponse, ApiError> {
        let req = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };
        let resp: RefreshTokenResponse = self.client.post("/auth/refresh", Some(&req)).await?;
        if !resp.token.is_empty() {
            self.client.session().set_token(Some(resp.token.clone()));
        }
        Ok(resp)
    }

    /// Authenticated means "a token is present"; the server corrects a stale
    /// belief with a 401 on the next call.
    pub fn is_authenticated(&self) -> bool {
        self.client.session().token().is_some()
    }

    pub fn current_user(&self) -> Option<LoginResponse> {
        self.client.session().user()
    }

    pub fn set_current_user(&self, user: &LoginResponse) {
        self.client.session().set_user(user);
    }

    pub fn clear_current_user(&self) {
        self.client.session().clear_user();
    }
}

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 -]{6,19}$").unwrap());

/// Pre-flight check for registration input. Failures carry the field map in
/// the same shape backend validation errors use; `status_code` is 0 because
/// nothing was sent.
pub fn validate_registration(data: &RegisterRequest) -> Result<(), ApiError> {
    let mut errors: HashMap<String, Vec<String>> = HashMap::new();

    if data.name.trim().is_empty() {
        errors.insert(String::from("name"), vec![String::from("name is required")]);
    }
    if !EMAIL_REGEX.is_match(&data.email) {
        errors.insert(
            String::from("email"),
            vec![String::from("email address is invalid")],
        );
    }
    if !PHONE_REGEX.is_match(&data.phone) {
        errors.insert(
            String::from("phone"),
            vec![String::from("phone number is invalid")],
        );
    }
    if data.password.len() < 8 {
        errors.insert(
            String::from("password"),
            vec![String::from("password must be at least 8 characters")],
        );
    }

    if errors.is_empty() {
        return Ok(());
    }
    Err(ApiError {
        message: String::from("Registration data is invalid"),
        status_code: 0,
        errors: Some(errors),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_registration() -> RegisterRequest {
        RegisterRequest {
            name: String::from("Agnes Mumo"),
            email: String::from("agnes@example.com"),
            phone: String::from("+254700111222"),
            password: String::from("s3cret-pass"),
        }
    }

    #[test]
    fn test_valid_registration() {
        validate_registration(&mock_registration()).unwrap();
    }

    #[test]
    fn test_invalid_email_and_phone() {
        let mut data = mock_registration();
        data.email = String::from("not-an-email");
        data.phone = String::from("abc");

        let err = validate_registration(&data).unwrap_err();
        assert_eq!(err.status_code, 0);
        let errors = err.errors.unwrap();
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("phone"));
        assert!(!errors.contains_key("name"));
    }

    #[test]
    fn test_short_password() {
        let mut data = mock_registration();
        data.password = String::from("short");

        let err = validate_registration(&data).unwrap_err();
        assert!(err.errors.unwrap().contains_key("password"));
    }
}
