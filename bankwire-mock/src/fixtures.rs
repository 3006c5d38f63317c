use bankwire_core::{
    Account, AccountType, Balance, Institution, NaiveDate, ProviderId, Transaction,
    TransactionMethod, TransactionStatus,
};
use rust_decimal::Decimal;

fn currency(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::GoCardLess => "EUR",
        ProviderId::Plaid | ProviderId::Teller => "USD",
    }
}

pub fn institution(provider: ProviderId) -> Institution {
    match provider {
        ProviderId::GoCardLess => Institution {
            id: "SANDBOXFINANCE_SFIN0000".to_string(),
            name: "Sandbox Finance".to_string(),
            logo: Some("https://cdn.example.com/sandbox.png".to_string()),
        },
        ProviderId::Plaid => Institution {
            id: "ins_109508".to_string(),
            name: "First Platypus Bank".to_string(),
            logo: None,
        },
        ProviderId::Teller => Institution {
            id: "chase".to_string(),
            name: "Chase".to_string(),
            logo: None,
        },
    }
}

pub fn accounts(provider: ProviderId) -> Vec<Account> {
    let enrollment = (provider == ProviderId::Teller).then(|| "enr_mock".to_string());
    [
        ("checking", "Everyday Checking", AccountType::Depository),
        ("card", "Rewards Card", AccountType::Credit),
    ]
    .into_iter()
    .map(|(suffix, name, account_type)| Account {
        id: format!("{provider}-{suffix}"),
        name: name.to_string(),
        currency: currency(provider).to_string(),
        provider,
        account_type,
        institution: Some(institution(provider)),
        enrollment_id: enrollment.clone(),
    })
    .collect()
}

fn tx(
    provider: ProviderId,
    id: &str,
    cents: i64,
    day: u32,
    status: TransactionStatus,
    name: &str,
    method: TransactionMethod,
) -> Transaction {
    let amount = Decimal::new(cents, 2);
    Transaction {
        amount,
        currency: currency(provider).to_string(),
        date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap_or_default(),
        internal_id: format!("{provider}_{id}"),
        status,
        balance: None,
        category: (cents > 0).then(|| "income".to_string()),
        method,
        name: name.to_string(),
        description: None,
        currency_rate: None,
        currency_source: None,
    }
}

pub fn transactions(provider: ProviderId) -> Vec<Transaction> {
    vec![
        tx(
            provider,
            "salary",
            250_000,
            25,
            TransactionStatus::Posted,
            "Acme Payroll",
            TransactionMethod::Deposit,
        ),
        tx(
            provider,
            "coffee",
            -450,
            26,
            TransactionStatus::Posted,
            "Blue Bottle",
            TransactionMethod::CardPurchase,
        ),
        tx(
            provider,
            "rent",
            -120_000,
            27,
            TransactionStatus::Pending,
            "Landlord",
            TransactionMethod::Transfer,
        ),
    ]
}

pub fn balance(provider: ProviderId) -> Balance {
    Balance {
        amount: Decimal::new(128_550, 2),
        currency: currency(provider).to_string(),
    }
}
