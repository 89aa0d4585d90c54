mod cmd;

use std::env;
use std::process;

use anyhow::Result;
use async_trait::async_trait;
use clap::error::ErrorKind as ArgsErrorKind;
use clap::{Parser, Subcommand};

use crate::cmd::RunCommand;

/// Terminal console for the mfm microfinance platform.
#[derive(Parser)]
#[command(author, about, version)]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Login(cmd::auth::LoginArgs),
    Logout(cmd::auth::LogoutArgs),
    Register(cmd::auth::RegisterArgs),
    Whoami(cmd::auth::WhoamiArgs),
    Get(cmd::get::GetArgs),
    User(cmd::admin::UserCommand),
    Loan(cmd::admin::LoanCommand),
    Deposit(cmd::tx::DepositArgs),
    Withdraw(cmd::tx::WithdrawArgs),
    Transfer(cmd::tx::TransferArgs),
    Repay(cmd::tx::RepayArgs),
    Notify(cmd::notify::NotifyCommand),
    Report(cmd::report::ReportCommand),
}

#[async_trait]
impl RunCommand for App {
    async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Login(args) => args.run().await,
            Commands::Logout(args) => args.run().await,
            Commands::Register(args) => args.run().await,
            Commands::Whoami(args) => args.run().await,
            Commands::Get(args) => args.run().await,
            Commands::User(args) => args.run().await,
            Commands::Loan(args) => args.run().await,
            Commands::Deposit(args) => args.run().await,
            Commands::Withdraw(args) => args.run().await,
            Commands::Transfer(args) => args.run().await,
            Commands::Repay(args) => args.run().await,
            Commands::Notify(args) => args.run().await,
            Commands::Report(args) => args.run().await,
        }
    }
}

async fn run_cmd() -> Result<()> {
    let level = env::var("MFM_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));
    mfm::logs::init(&level)?;

    let app = match App::try_parse() {
        Ok(app) => app,
        Err(err) => {
            err.use_stderr();
            err.print().expect("write help message to stderr");
            if matches!(
                err.kind(),
                ArgsErrorKind::DisplayHelp
                    | ArgsErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                    | ArgsErrorKind::DisplayVersion
            ) {
                return Ok(());
            }
            process::exit(3);
        }
    };

    app.run().await
}

#[tokio::main]
async fn main() {
    match run_cmd().await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Command error: {e:#}");
            process::exit(1);
        }
    }
}
