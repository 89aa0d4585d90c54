use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use log::warn;

use mfm::api::auth::validate_registration;
use mfm::config::ConfigArgs;
use mfm::session::AuthSession;
use mfm::types::auth::{LoginRequest, RegisterRequest};

use super::{build_api, RunCommand};

/// Login to the platform and persist the session
#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for LoginArgs {
    async fn run(&self) -> Result<()> {
        let api = build_api(&self.config)?;
        let mut session = AuthSession::new(api.auth.clone());
        session.init();

        let credentials = LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        };
        let resp = session.login(&credentials).await?;
        println!("Logged in as {} ({})", resp.name, resp.role);
        Ok(())
    }
}

/// End the session, locally and remotely
#[derive(Args)]
pub struct LogoutArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for LogoutArgs {
    async fn run(&self) -> Result<()> {
        let api = build_api(&self.config)?;
        let mut session = AuthSession::new(api.auth.clone());
        session.init();

        match session.logout().await {
            Ok(()) => println!("Logged out"),
            Err(err) => {
                // The local session is already gone at this point.
                warn!("Remote logout failed: {err}");
                println!("Local session cleared");
            }
        }
        Ok(())
    }
}

/// Register a new client account (pending admin approval)
#[derive(Args)]
pub struct RegisterArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Phone number
    #[arg(long)]
    pub phone: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for RegisterArgs {
    async fn run(&self) -> Result<()> {
        let data = RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password: self.password.clone(),
        };

        if let Err(err) = validate_registration(&data) {
            if let Some(errors) = &err.errors {
                for (field, messages) in errors {
                    for message in messages {
                        eprintln!("{field}: {message}");
                    }
                }
            }
            anyhow::bail!("{}", err);
        }

        let api = build_api(&self.config)?;
        let user = api.auth.register(&data).await?;
        println!(
            "Registration submitted for {} (id {}), awaiting approval",
            user.name, user.user_id
        );
        Ok(())
    }
}

/// Show the current session
#[derive(Args)]
pub struct WhoamiArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for WhoamiArgs {
    async fn run(&self) -> Result<()> {
        let api = build_api(&self.config)?;
        let mut session = AuthSession::new(api.auth.clone());
        session.init();

        match session.user() {
            Some(user) => {
                println!("{} (id {})", user.name, user.user_id);
                println!("Role: {}", user.role);
                println!("Status: {}", user.status);
            }
            None => println!("Not logged in"),
        }
        Ok(())
    }
}
