mod helpers;

use std::sync::Arc;

use bankwire_core::{
    AccountType, BankwireError, Decimal, DeleteAccountRequest, GetAccountBalanceRequest,
    GetAccountsRequest, Provider, ProviderId,
};
use bankwire_plaid::PlaidConnector;
use helpers::{StubApi, account};

fn api() -> Arc<StubApi> {
    Arc::new(StubApi {
        accounts: vec![
            account("acc_1", "depository", Some(110)),
            account("acc_2", "credit", None),
        ],
        ..StubApi::default()
    })
}

#[tokio::test]
async fn accounts_carry_the_item_institution() {
    let api = api();
    let plaid = PlaidConnector::from_adapter(api.clone());

    let accounts = plaid
        .get_accounts(&GetAccountsRequest::plaid("access-sandbox", "ins_109508"))
        .await
        .unwrap();

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].account_type, AccountType::Depository);
    assert_eq!(accounts[1].account_type, AccountType::Credit);
    for acc in &accounts {
        assert_eq!(acc.provider, ProviderId::Plaid);
        let inst = acc.institution.as_ref().unwrap();
        assert_eq!(inst.id, "ins_109508");
        assert_eq!(inst.logo, None);
    }
    assert_eq!(api.calls(), 2);
}

#[tokio::test]
async fn accounts_require_token_and_institution() {
    let api = api();
    let plaid = PlaidConnector::from_adapter(api.clone());

    for req in [
        GetAccountsRequest::plaid("access-sandbox", ""),
        GetAccountsRequest::plaid(" ", "ins_1"),
        GetAccountsRequest::teller("access-sandbox"),
    ] {
        let err = plaid.get_accounts(&req).await.unwrap_err();
        assert!(matches!(err, BankwireError::InvalidRequest { .. }));
    }
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn balance_reads_available_or_none() {
    let plaid = PlaidConnector::from_adapter(api());
    let req = |id: &str| GetAccountBalanceRequest {
        account_id: id.into(),
        access_token: Some("access-sandbox".into()),
    };

    let balance = plaid.get_account_balance(&req("acc_1")).await.unwrap().unwrap();
    assert_eq!(balance.amount, Decimal::from(110));
    assert_eq!(balance.currency, "USD");

    assert_eq!(plaid.get_account_balance(&req("acc_2")).await.unwrap(), None);
}

#[tokio::test]
async fn delete_removes_the_item() {
    let api = api();
    let plaid = PlaidConnector::from_adapter(api.clone());

    plaid
        .delete_account(&DeleteAccountRequest {
            account_id: "acc_1".into(),
            access_token: Some("access-sandbox".into()),
        })
        .await
        .unwrap();

    assert_eq!(*api.removed.lock().unwrap(), vec!["access-sandbox".to_string()]);
}

#[tokio::test]
async fn public_token_exchange_requires_a_token() {
    let api = api();
    let plaid = PlaidConnector::from_adapter(api.clone());

    let err = plaid.exchange_public_token(" ").await.unwrap_err();
    assert!(matches!(err, BankwireError::InvalidRequest { .. }));

    let resp = plaid.exchange_public_token("public-sandbox-1").await.unwrap();
    assert_eq!(resp.access_token, "access-for-public-sandbox-1");
}

#[tokio::test]
async fn health_follows_the_status_indicator() {
    for (indicator, healthy) in [
        (Some("none"), true),
        (Some("maintenance"), true),
        (Some("major"), false),
        (None, false),
    ] {
        let api = Arc::new(StubApi {
            indicator: indicator.map(str::to_string),
            ..StubApi::default()
        });
        let plaid = PlaidConnector::from_adapter(api);
        assert_eq!(plaid.get_health_check().await, healthy, "{indicator:?}");
    }
}
