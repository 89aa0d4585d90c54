pub mod admin;
pub mod auth;
pub mod get;
pub mod notify;
pub mod report;
pub mod tx;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use mfm::api::Api;
use mfm::config::ConfigArgs;
use mfm::types::auth::LoginResponse;

#[async_trait]
pub trait RunCommand {
    async fn run(&self) -> Result<()>;
}

/// Loads the client config and wires up the API handles. The unauthorized
/// hook tells the user where to log back in instead of navigating anywhere.
pub fn build_api(config: &ConfigArgs) -> Result<Api> {
    let cfg = config.load("client")?;
    let client = cfg
        .client_builder()
        .with_unauthorized_hook(|login_path| {
            eprintln!("Session expired, please login again (screen: {login_path})");
        })
        .build()
        .context("build client")?;
    Ok(Api::new(client))
}

/// The cached session snapshot, required. Commands that act on "my" data
/// resolve the user id from here.
pub fn require_user(api: &Api) -> Result<LoginResponse> {
    match api.auth.current_user() {
        Some(user) => Ok(user),
        None => bail!("not logged in, please run 'mfmctl login' first"),
    }
}

/// Parses a wire enum value ("PENDING", "DEPOSIT", ...) through its serde
/// representation.
pub fn parse_enum<T: DeserializeOwned>(name: &str, value: &str) -> Result<T> {
    match serde_json::from_value(Value::String(value.to_string())) {
        Ok(parsed) => Ok(parsed),
        Err(_) => bail!("invalid {name} '{value}'"),
    }
}
