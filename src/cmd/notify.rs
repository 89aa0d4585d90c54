use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, Subcommand};

use mfm::config::ConfigArgs;

use super::{build_api, require_user, RunCommand};

/// Manage notifications
#[derive(Args)]
pub struct NotifyCommand {
    #[command(subcommand)]
    pub action: NotifyAction,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Subcommand)]
pub enum NotifyAction {
    /// Mark every unread notification as read
    ReadAll {
        /// User id; defaults to the logged-in user
        #[arg(short, long)]
        user: Option<u64>,
    },
    /// Show the unread notification count
    Count {
        /// User id; defaults to the logged-in user
        #[arg(short, long)]
        user: Option<u64>,
    },
    /// Delete every read notification
    Prune {
        /// User id; defaults to the logged-in user
        #[arg(short, long)]
        user: Option<u64>,
    },
    /// Send a custom notification to a user (admin only)
    Send {
        /// Recipient user id
        #[arg(short, long)]
        user: u64,

        /// Message body
        message: String,
    },
}

#[async_trait]
impl RunCommand for NotifyCommand {
    async fn run(&self) -> Result<()> {
        let api = build_api(&self.config)?;
        let resolve = |user: &Option<u64>| -> Result<u64> {
            match user {
                Some(id) => Ok(*id),
                None => Ok(require_user(&api)?.user_id),
            }
        };

        match &self.action {
            NotifyAction::ReadAll { user } => {
                let user_id = resolve(user)?;
                api.notifications.mark_all_read(user_id).await?;
                println!("All notifications marked as read");
            }
            NotifyAction::Count { user } => {
                let user_id = resolve(user)?;
                let count = api.notifications.unread_count(user_id).await?;
                println!("{count} unread");
            }
            NotifyAction::Prune { user } => {
                let user_id = resolve(user)?;
                api.notifications.delete_all_read(user_id).await?;
                println!("Read notifications deleted");
            }
            NotifyAction::Send { user, message } => {
                let notification = api.notifications.send_custom(*user, message).await?;
                println!("Notification {} sent", notification.notification_id);
            }
        }

        Ok(())
    }
}
