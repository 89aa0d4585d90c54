use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use mfm::config::ConfigArgs;
use mfm::types::repayment::{CreateRepaymentRequest, RepaymentMethod};
use mfm::types::transaction::Transaction;

use super::{build_api, parse_enum, RunCommand};

fn print_transaction(tx: &Transaction) {
    println!(
        "{} of {:.2} on account {} ({}), id {}",
        tx.kind, tx.amount, tx.account_id, tx.status, tx.transaction_id
    );
}

/// Deposit into an account
#[derive(Args)]
pub struct DepositArgs {
    /// Account id
    #[arg(short, long)]
    pub account: u64,

    /// Amount to deposit
    #[arg(long)]
    pub amount: f64,

    /// Transaction description
    #[arg(short, long, default_value = "Deposit")]
    pub description: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for DepositArgs {
    async fn run(&self) -> Result<()> {
        let api = build_api(&self.config)?;
        let tx = api
            .transactions
            .deposit(self.account, self.amount, &self.description)
            .await?;
        print_transaction(&tx);
        Ok(())
    }
}

/// Withdraw from an account
#[derive(Args)]
pub struct WithdrawArgs {
    /// Account id
    #[arg(short, long)]
    pub account: u64,

    /// Amount to withdraw
    #[arg(long)]
    pub amount: f64,

    /// Transaction description
    #[arg(short, long, default_value = "Withdrawal")]
    pub description: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for WithdrawArgs {
    async fn run(&self) -> Result<()> {
        let api = build_api(&self.config)?;
        let tx = api
            .transactions
            .withdraw(self.account, self.amount, &self.description)
            .await?;
        print_transaction(&tx);
        Ok(())
    }
}

/// Transfer between accounts
#[derive(Args)]
pub struct TransferArgs {
    /// Source account id
    #[arg(short, long)]
    pub from: u64,

    /// Destination account id
    #[arg(short, long)]
    pub to: u64,

    /// Amount to transfer
    #[arg(long)]
    pub amount: f64,

    /// Transaction description
    #[arg(short, long, default_value = "Transfer")]
    pub description: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for TransferArgs {
    async fn run(&self) -> Result<()> {
        let api = build_api(&self.config)?;
        let tx = api
            .transactions
            .transfer(self.from, self.to, self.amount, &self.description)
            .await?;
        print_transaction(&tx);
        Ok(())
    }
}

/// Make a loan repayment
#[derive(Args)]
pub struct RepayArgs {
    /// Loan id
    #[arg(short, long)]
    pub loan: u64,

    /// Amount to repay
    #[arg(long)]
    pub amount: f64,

    /// Payment method (BANK_TRANSFER, MOBILE_MONEY, CASH, CARD)
    #[arg(short, long, default_value = "CASH")]
    pub method: String,

    /// Payment reference
    #[arg(short, long)]
    pub reference: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for RepayArgs {
    async fn run(&self) -> Result<()> {
        let method: RepaymentMethod = parse_enum("method", &self.method)?;
        let api = build_api(&self.config)?;

        let req = CreateRepaymentRequest {
            loan_id: self.loan,
            amount: self.amount,
            method,
            reference: self.reference.clone(),
        };
        let repayment = api.repayments.make(&req).await?;
        println!(
            "Repayment {} of {:.2} on loan {} ({})",
            repayment.repayment_id, repayment.amount, repayment.loan_id, repayment.status
        );
        if let Some(balance) = repayment.remaining_balance {
            println!("Remaining balance: {balance:.2}");
        }
        Ok(())
    }
}
