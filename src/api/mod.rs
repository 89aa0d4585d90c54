pub mod accounts;
pub mod auth;
pub mod loans;
pub mod notifications;
pub mod repayments;
pub mod reports;
pub mod transactions;
pub mod users;

use crate::client::Client;

use self::accounts::AccountApi;
use self::auth::AuthApi;
use self::loans::LoanApi;
use self::notifications::NotificationApi;
use self::repayments::RepaymentApi;
use self::reports::ReportApi;
use self::transactions::TransactionApi;
use self::users::UserApi;

/// One handle per backend resource, all sharing the same client (and thus
/// the same session).
#[derive(Clone)]
pub struct Api {
    pub auth: AuthApi,
    pub users: UserApi,
    pub accounts: AccountApi,
    pub transactions: TransactionApi,
    pub loans: LoanApi,
    pub repayments: RepaymentApi,
    pub notifications: NotificationApi,
    pub reports: ReportApi,
}

impl Api {
    pub fn new(client: Client) -> Self {
        Self {
            auth: AuthApi::new(client.clone()),
            users: UserApi::new(client.clone()),
            accounts: AccountApi::new(client.clone()),
            transactions: TransactionApi::new(client.clone()),
            loans: LoanApi::new(client.clone()),
            repayments: RepaymentApi::new(client.clone()),
            notifications: NotificationApi::new(client.clone()),
            reports: ReportApi::new(client),
        }
    }
}
