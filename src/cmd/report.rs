use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, Subcommand};

use mfm::config::ConfigArgs;
use mfm::display::{display_list, pretty_json, DisplayStyle};
use mfm::types::report::StatementQuery;

use super::{build_api, require_user, RunCommand};

/// Statements, dashboards and statistics
#[derive(Args)]
pub struct ReportCommand {
    #[command(subcommand)]
    pub action: ReportAction,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// User dashboard summary
    Dashboard {
        /// User id; defaults to the logged-in user
        #[arg(short, long)]
        user: Option<u64>,
    },
    /// Admin dashboard summary
    Admin,
    /// Platform-wide statistics (admin only)
    Stats,
    /// Recent platform activity (admin only)
    Activity {
        #[arg(short, long, default_value_t = 20)]
        limit: u64,
    },
    /// Account statement
    Statement {
        /// Account id
        #[arg(short, long)]
        account: u64,

        /// Start of the statement period (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,

        /// End of the statement period (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Loan statement
    LoanStatement {
        /// Loan id
        #[arg(short, long)]
        loan: u64,
    },
}

#[async_trait]
impl RunCommand for ReportCommand {
    async fn run(&self) -> Result<()> {
        let api = build_api(&self.config)?;

        match &self.action {
            ReportAction::Dashboard { user } => {
                let user_id = match user {
                    Some(id) => *id,
                    None => require_user(&api)?.user_id,
                };
                let dashboard = api.reports.user_dashboard(user_id).await?;
                pretty_json(dashboard)?;
            }
            ReportAction::Admin => {
                let dashboard = api.reports.admin_dashboard().await?;
                pretty_json(dashboard)?;
            }
            ReportAction::Stats => {
                let stats = api.reports.admin_statistics().await?;
                pretty_json(stats)?;
            }
            ReportAction::Activity { limit } => {
                let activity = api.reports.recent_activity(*limit).await?;
                display_list(activity, DisplayStyle::Table)?;
            }
            ReportAction::Statement {
                account,
                start_date,
                end_date,
            } => {
                let params = StatementQuery {
                    start_date: start_date.clone(),
                    end_date: end_date.clone(),
                };
                let statement = api.reports.account_statement(*account, Some(&params)).await?;

                println!(
                    "Account {} ({}), period {}",
                    statement.account_id, statement.account_type, statement.statement_period
                );
                println!(
                    "Opening {:.2}, closing {:.2}, deposits {:.2}, withdrawals {:.2}",
                    statement.opening_balance,
                    statement.closing_balance,
                    statement.total_deposits,
                    statement.total_withdrawals
                );
                display_list(statement.transactions, DisplayStyle::Table)?;
            }
            ReportAction::LoanStatement { loan } => {
                let statement = api.reports.loan_statement(*loan, None).await?;
                pretty_json(statement)?;
            }
        }

        Ok(())
    }
}
