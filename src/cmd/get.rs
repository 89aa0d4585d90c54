use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, Subcommand};

use mfm::config::ConfigArgs;
use mfm::display::{display_list, DisplayStyle};
use mfm::types::account::AccountQuery;
use mfm::types::loan::LoanQuery;
use mfm::types::notification::NotificationQuery;
use mfm::types::repayment::RepaymentQuery;
use mfm::types::transaction::TransactionQuery;
use mfm::types::user::UserQuery;

use super::{build_api, parse_enum, require_user, RunCommand};

/// List platform resources
#[derive(Args)]
pub struct GetArgs {
    #[command(subcommand)]
    pub resource: GetResource,

    /// Output style
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub output: DisplayStyle,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Subcommand)]
pub enum GetResource {
    /// List users (admin only)
    Users(UsersArgs),
    /// List a user's accounts
    Accounts(AccountsArgs),
    /// List an account's transactions
    Transactions(TransactionsArgs),
    /// List loans
    Loans(LoansArgs),
    /// List a loan's repayments
    Repayments(RepaymentsArgs),
    /// List a user's notifications
    Notifications(NotificationsArgs),
}

#[derive(Args)]
pub struct UsersArgs {
    #[arg(long)]
    pub page: Option<u64>,

    #[arg(long)]
    pub limit: Option<u64>,

    /// Filter by status (PENDING, ACTIVE, SUSPENDED)
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by role (client, admin)
    #[arg(long)]
    pub role: Option<String>,

    /// Search by name or email
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct AccountsArgs {
    /// Owner user id; defaults to the logged-in user
    #[arg(short, long)]
    pub user: Option<u64>,

    /// Filter by status (ACTIVE, PENDING, SUSPENDED, CLOSED)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct TransactionsArgs {
    /// Account id
    #[arg(short, long)]
    pub account: u64,

    /// Filter by type (DEPOSIT, WITHDRAWAL, TRANSFER, REPAYMENT)
    #[arg(long)]
    pub kind: Option<String>,

    /// Only transactions on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Only transactions on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    #[arg(long)]
    pub page: Option<u64>,

    #[arg(long)]
    pub limit: Option<u64>,
}

#[derive(Args)]
pub struct LoansArgs {
    /// Borrower user id; omit to list all loans (admin only)
    #[arg(short, long)]
    pub user: Option<u64>,

    /// Filter by status (PENDING, APPROVED, REJECTED, DISBURSED, REPAYING, COMPLETED)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct RepaymentsArgs {
    /// Loan id
    #[arg(short, long)]
    pub loan: u64,

    #[arg(long)]
    pub page: Option<u64>,

    #[arg(long)]
    pub limit: Option<u64>,

    /// Also print the total amount repaid (completed repayments only)
    #[arg(long)]
    pub total: bool,
}

#[derive(Args)]
pub struct NotificationsArgs {
    /// Recipient user id; defaults to the logged-in user
    #[arg(short, long)]
    pub user: Option<u64>,

    /// Filter by status (UNREAD, READ, ARCHIVED)
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by type
    #[arg(long)]
    pub kind: Option<String>,
}

#[async_trait]
impl RunCommand for GetArgs {
    async fn run(&self) -> Result<()> {
        let api = build_api(&self.config)?;

        match &self.resource {
            GetResource::Users(args) => {
                let params = UserQuery {
                    page: args.page,
                    limit: args.limit,
                    status: args.status.as_deref().map(|s| parse_enum("status", s)).transpose()?,
                    role: args.role.as_deref().map(|s| parse_enum("role", s)).transpose()?,
                    search: args.search.clone(),
                };
                let page = api.users.list(&params).await?;
                println!("Page {} (total {})", page.page, page.total);
                display_list(page.users, self.output)?;
            }
            GetResource::Accounts(args) => {
                let user_id = match args.user {
                    Some(id) => id,
                    None => require_user(&api)?.user_id,
                };
                let params = AccountQuery {
                    status: args.status.as_deref().map(|s| parse_enum("status", s)).transpose()?,
                };
                let accounts = api.accounts.user_accounts(user_id, Some(&params)).await?;
                display_list(accounts, self.output)?;
            }
            GetResource::Transactions(args) => {
                let params = TransactionQuery {
                    kind: args.kind.as_deref().map(|s| parse_enum("type", s)).transpose()?,
                    start_date: args.start_date.clone(),
                    end_date: args.end_date.clone(),
                    page: args.page,
                    limit: args.limit,
                };
                let transactions = api
                    .transactions
                    .account_transactions(args.account, Some(&params))
                    .await?;
                display_list(transactions, self.output)?;
            }
            GetResource::Loans(args) => {
                let params = LoanQuery {
                    status: args.status.as_deref().map(|s| parse_enum("status", s)).transpose()?,
                };
                let loans = match args.user {
                    Some(user_id) => api.loans.user_loans(user_id, Some(&params)).await?,
                    None => api.loans.all(Some(&params)).await?,
                };
                display_list(loans, self.output)?;
            }
            GetResource::Repayments(args) => {
                let params = RepaymentQuery {
                    page: args.page,
                    limit: args.limit,
                };
                let repayments = api
                    .repayments
                    .loan_repayments(args.loan, Some(&params))
                    .await?;
                display_list(repayments, self.output)?;

                if args.total {
                    let total = api.repayments.total_repaid(args.loan).await?;
                    println!("Total repaid: {total:.2}");
                }
            }
            GetResource::Notifications(args) => {
                let user_id = match args.user {
                    Some(id) => id,
                    None => require_user(&api)?.user_id,
                };
                let params = NotificationQuery {
                    status: args.status.as_deref().map(|s| parse_enum("status", s)).transpose()?,
                    kind: args.kind.as_deref().map(|s| parse_enum("type", s)).transpose()?,
                };
                let notifications = api
                    .notifications
                    .user_notifications(user_id, Some(&params))
                    .await?;
                display_list(notifications, self.output)?;
            }
        }

        Ok(())
    }
}
