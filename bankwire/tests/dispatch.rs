mod helpers;

use std::sync::Arc;

use bankwire::{
    AccountType, BankwireError, Capability, DeleteAccountRequest, GetAccountBalanceRequest,
    GetAccountsRequest, GetTransactionsRequest, ProviderId,
};
use bankwire_mock::MockProvider;
use helpers::{MockBehavior, facade, mocks};

#[tokio::test]
async fn calls_reach_only_the_selected_provider() {
    let mocks = mocks();
    let bw = facade(&mocks);

    let accounts = bw
        .get_accounts(ProviderId::Plaid, &GetAccountsRequest::plaid("access-mock", "ins_mock"))
        .await
        .unwrap();

    assert!(accounts.iter().all(|a| a.provider == ProviderId::Plaid));
    let hits: Vec<usize> = mocks.iter().map(|m| m.calls(Capability::Accounts)).collect();
    assert_eq!(hits, vec![0, 1, 0]);
}

#[tokio::test]
async fn every_operation_dispatches() {
    let mocks = mocks();
    let bw = facade(&mocks);
    let teller = &mocks[2];

    let txs = bw
        .get_transactions(
            ProviderId::Teller,
            &GetTransactionsRequest::new("teller-card", AccountType::Credit),
        )
        .await
        .unwrap();
    assert_eq!(txs.len(), 3);

    let balance = bw
        .get_account_balance(
            ProviderId::Teller,
            &GetAccountBalanceRequest {
                account_id: "teller-card".into(),
                access_token: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(balance.unwrap().currency, "USD");

    bw.delete_account(
        ProviderId::Teller,
        &DeleteAccountRequest {
            account_id: "teller-card".into(),
            access_token: None,
        },
    )
    .await
    .unwrap();

    let institutions = bw.institutions(ProviderId::Teller, "US").await.unwrap();
    assert_eq!(institutions[0].id, "chase");

    assert_eq!(teller.calls(Capability::Transactions), 1);
    assert_eq!(teller.calls(Capability::Balance), 1);
    assert_eq!(teller.deleted().await, vec!["teller-card"]);
    assert_eq!(teller.calls(Capability::Institutions), 1);
}

#[tokio::test]
async fn unregistered_provider_is_reported() {
    let gocardless = Arc::new(MockProvider::new(ProviderId::GoCardLess));
    let bw = facade(&[gocardless.clone()]);

    let err = bw
        .get_accounts(ProviderId::Teller, &GetAccountsRequest::teller("token_mock"))
        .await
        .unwrap_err();

    assert_eq!(err, BankwireError::not_registered("teller"));
    assert_eq!(gocardless.calls(Capability::Accounts), 0);
}

#[tokio::test]
async fn adapter_errors_propagate_unchanged() {
    let failure = BankwireError::upstream("gocardless", Some(401), "token expired")
        .with_capability(Capability::Transactions);
    let gocardless = Arc::new(
        MockProvider::new(ProviderId::GoCardLess)
            .transactions(MockBehavior::Fail(failure.clone())),
    );
    let bw = facade(&[gocardless]);

    let err = bw
        .get_transactions(
            ProviderId::GoCardLess,
            &GetTransactionsRequest::new("acc", AccountType::Depository),
        )
        .await
        .unwrap_err();

    assert_eq!(err, failure);
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn unsupported_directory_surfaces_as_unsupported() {
    let teller = Arc::new(MockProvider::new(ProviderId::Teller).institutions(None));
    let bw = facade(&[teller]);

    let err = bw.institutions(ProviderId::Teller, "US").await.unwrap_err();
    assert!(matches!(err, BankwireError::Unsupported { .. }));
}
