mod common;

use std::collections::HashSet;

use mfm::api::Api;
use mfm::client::session::Session;
use mfm::client::ClientBuilder;
use mfm::types::auth::LoginRequest;

use crate::common::StubServer;

fn build_api(server: &StubServer, session: Session) -> Api {
    let client = ClientBuilder::new(server.url())
        .with_session(session)
        .build()
        .unwrap();
    Api::new(client)
}

#[tokio::test]
async fn login_persists_the_returned_token() {
    let server = StubServer::start(|req| {
        assert_eq!(req.method, "POST");
        assert_eq!(req.target, "/auth/login");
        (
            200,
            String::from(
                r#"{"token":"tok-9","userId":3,"name":"Neema","role":"client","status":"ACTIVE"}"#,
            ),
        )
    })
    .await;

    let session = Session::in_memory();
    let api = build_api(&server, session.clone());

    let credentials = LoginRequest {
        email: String::from("neema@example.com"),
        password: String::from("pass-word-1"),
    };
    let resp = api.auth.login(&credentials).await.unwrap();
    assert_eq!(resp.user_id, 3);
    assert_eq!(session.token(), Some(String::from("tok-9")));

    let requests = server.requests();
    assert!(requests[0].body.contains("neema@example.com"));
}

#[tokio::test]
async fn logout_clears_the_token_even_when_the_remote_call_fails() {
    let server =
        StubServer::start(|_req| (500, String::from(r#"{"message":"logout exploded"}"#))).await;

    let session = Session::in_memory();
    session.set_token(Some(String::from("tok-live")));
    let api = build_api(&server, session.clone());

    let result = api.auth.logout().await;
    assert!(result.is_err());
    assert_eq!(session.token(), None);
}

#[tokio::test]
async fn total_repaid_sums_only_completed_repayments() {
    let server = StubServer::start(|req| {
        assert_eq!(req.target, "/repayments/loan/5");
        (
            200,
            String::from(
                r#"[
                    {"repaymentId":1,"loanId":5,"amount":1000.0,"timestamp":"2024-03-01T10:00:00Z","method":"CASH","reference":"r1","status":"COMPLETED"},
                    {"repaymentId":2,"loanId":5,"amount":500.0,"timestamp":"2024-04-01T10:00:00Z","method":"MOBILE_MONEY","reference":"r2","status":"PENDING"},
                    {"repaymentId":3,"loanId":5,"amount":2500.0,"timestamp":"2024-05-01T10:00:00Z","method":"BANK_TRANSFER","reference":"r3","status":"COMPLETED"},
                    {"repaymentId":4,"loanId":5,"amount":700.0,"timestamp":"2024-06-01T10:00:00Z","method":"CASH","reference":"r4","status":"FAILED"}
                ]"#,
            ),
        )
    })
    .await;

    let api = build_api(&server, Session::in_memory());
    let total = api.repayments.total_repaid(5).await.unwrap();
    assert_eq!(total, 3500.0);
}

#[tokio::test]
async fn mark_all_read_updates_each_unread_notification() {
    let server = StubServer::start(|req| {
        if req.method == "GET" {
            assert_eq!(req.target, "/notifications/user/9?status=UNREAD");
            return (
                200,
                String::from(
                    r#"[
                        {"notificationId":11,"userId":9,"type":"LOAN_APPROVED","message":"a","sentAt":"t","status":"UNREAD","relatedId":5},
                        {"notificationId":12,"userId":9,"type":"PAYMENT_RECEIVED","message":"b","sentAt":"t","status":"UNREAD","relatedId":null},
                        {"notificationId":13,"userId":9,"type":"CUSTOM","message":"c","sentAt":"t","status":"UNREAD","relatedId":null}
                    ]"#,
                ),
            );
        }
        (200, String::from(r#"{"message":"updated"}"#))
    })
    .await;

    let api = build_api(&server, Session::in_memory());
    api.notifications.mark_all_read(9).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 4);

    let puts: Vec<_> = requests.iter().filter(|r| r.method == "PUT").collect();
    assert_eq!(puts.len(), 3);

    // One update per unread notification, each flipping the status to READ.
    let targets: HashSet<_> = puts.iter().map(|r| r.target.as_str()).collect();
    let expected: HashSet<_> = ["/notifications/11", "/notifications/12", "/notifications/13"]
        .into_iter()
        .collect();
    assert_eq!(targets, expected);
    for put in puts {
        assert!(put.body.contains("READ"));
    }
}

#[tokio::test]
async fn unread_count_is_the_unread_list_length() {
    let server = StubServer::start(|req| {
        assert_eq!(req.target, "/notifications/user/2?status=UNREAD");
        (
            200,
            String::from(
                r#"[
                    {"notificationId":1,"userId":2,"type":"CUSTOM","message":"a","sentAt":"t","status":"UNREAD","relatedId":null},
                    {"notificationId":2,"userId":2,"type":"CUSTOM","message":"b","sentAt":"t","status":"UNREAD","relatedId":null}
                ]"#,
            ),
        )
    })
    .await;

    let api = build_api(&server, Session::in_memory());
    let count = api.notifications.unread_count(2).await.unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn account_balance_is_projected_from_the_account() {
    let server = StubServer::start(|req| {
        assert_eq!(req.target, "/accounts/7");
        (
            200,
            String::from(
                r#"{"accountId":7,"userId":3,"balance":1250.75,"accountType":"SAVINGS","status":"ACTIVE","createdAt":"2024-01-10T08:00:00Z","lastTransactionDate":null}"#,
            ),
        )
    })
    .await;

    let api = build_api(&server, Session::in_memory());
    let balance = api.accounts.balance(7).await.unwrap();
    assert_eq!(balance, 1250.75);
}

#[tokio::test]
async fn loan_filters_shape_the_query_string() {
    let server = StubServer::start(|_req| (200, String::from("[]"))).await;
    let api = build_api(&server, Session::in_memory());

    api.loans.pending().await.unwrap();
    api.loans.active(4).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].target, "/loans?status=PENDING");
    assert_eq!(requests[1].target, "/loans/user/4?status=REPAYING");
}
