use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, Subcommand};

use mfm::config::ConfigArgs;
use mfm::types::loan::ApproveLoanRequest;

use super::{build_api, RunCommand};

/// Administer user accounts
#[derive(Args)]
pub struct UserCommand {
    #[command(subcommand)]
    pub action: UserAction,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Approve a pending registration
    Approve {
        user_id: u64,
    },
    /// Reject a pending registration
    Reject {
        user_id: u64,

        /// Reason shown to the applicant
        #[arg(short, long)]
        reason: String,
    },
    /// Suspend an active user
    Suspend {
        user_id: u64,

        #[arg(short, long)]
        reason: String,
    },
    /// Reactivate a suspended user
    Unsuspend {
        user_id: u64,
    },
    /// Soft-delete a user
    Delete {
        user_id: u64,
    },
}

#[async_trait]
impl RunCommand for UserCommand {
    async fn run(&self) -> Result<()> {
        let api = build_api(&self.config)?;

        let resp = match &self.action {
            UserAction::Approve { user_id } => api.users.approve(*user_id).await?,
            UserAction::Reject { user_id, reason } => api.users.reject(*user_id, reason).await?,
            UserAction::Suspend { user_id, reason } => api.users.suspend(*user_id, reason).await?,
            UserAction::Unsuspend { user_id } => api.users.unsuspend(*user_id).await?,
            UserAction::Delete { user_id } => api.users.delete(*user_id).await?,
        };

        println!("{}", resp.message);
        Ok(())
    }
}

/// Administer loans
#[derive(Args)]
pub struct LoanCommand {
    #[command(subcommand)]
    pub action: LoanAction,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Subcommand)]
pub enum LoanAction {
    /// Approve a pending loan request
    Approve {
        loan_id: u64,

        /// Approved principal
        #[arg(short, long)]
        amount: f64,

        /// Notes recorded with the approval
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Reject a pending loan request
    Reject {
        loan_id: u64,

        #[arg(short, long)]
        reason: String,
    },
    /// Pay an approved loan out to an account
    Disburse {
        loan_id: u64,

        /// Destination account id
        #[arg(short, long)]
        account: u64,
    },
    /// Close a fully repaid loan
    Close {
        loan_id: u64,
    },
}

#[async_trait]
impl RunCommand for LoanCommand {
    async fn run(&self) -> Result<()> {
        let api = build_api(&self.config)?;

        let resp = match &self.action {
            LoanAction::Approve {
                loan_id,
                amount,
                notes,
            } => {
                let req = ApproveLoanRequest {
                    approved_amount: *amount,
                    approval_notes: notes.clone(),
                };
                api.loans.approve(*loan_id, &req).await?
            }
            LoanAction::Reject { loan_id, reason } => api.loans.reject(*loan_id, reason).await?,
            LoanAction::Disburse { loan_id, account } => {
                api.loans.disburse(*loan_id, *account).await?
            }
            LoanAction::Close { loan_id } => api.loans.close(*loan_id).await?,
        };

        println!("{}", resp.message);
        Ok(())
    }
}
