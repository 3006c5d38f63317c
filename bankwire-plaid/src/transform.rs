//! Mapping from Plaid payloads to canonical entities.

use bankwire_core::{
    Account, AccountType, Balance, BankwireError, Decimal, Institution, ProviderId, Transaction,
    TransactionMethod, TransactionStatus,
};

use crate::types::{PlaidAccount, PlaidInstitution, PlaidTransaction};

const PROVIDER: &str = "plaid";

fn currency(iso: Option<&str>, unofficial: Option<&str>, what: &str) -> Result<String, BankwireError> {
    iso.or(unofficial)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_ascii_uppercase)
        .ok_or_else(|| BankwireError::transform(PROVIDER, format!("{what} has no currency")))
}

fn account_type(kind: &str) -> AccountType {
    match kind {
        "depository" => AccountType::Depository,
        "credit" => AccountType::Credit,
        "loan" => AccountType::Loan,
        _ => AccountType::Other,
    }
}

/// Institution entity; an absent or empty logo stays `None`.
#[must_use]
pub fn transform_institution(inst: &PlaidInstitution) -> Institution {
    Institution {
        id: inst.institution_id.clone(),
        name: inst.name.clone(),
        logo: inst
            .logo
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string),
    }
}

/// Map an account of an item.
///
/// # Errors
/// Returns `Transform` when the account reports no currency.
pub fn transform_account(
    account: &PlaidAccount,
    institution: Option<&PlaidInstitution>,
) -> Result<Account, BankwireError> {
    let balances = &account.balances;
    Ok(Account {
        id: account.account_id.clone(),
        name: account.name.clone(),
        currency: currency(
            balances.iso_currency_code.as_deref(),
            balances.unofficial_currency_code.as_deref(),
            "account",
        )?,
        provider: ProviderId::Plaid,
        account_type: account_type(&account.account_type),
        institution: institution.map(transform_institution),
        enrollment_id: None,
    })
}

/// Available balance; `None` when Plaid reports none.
///
/// # Errors
/// Returns `Transform` when a balance is present without a currency.
pub fn transform_balance(account: &PlaidAccount) -> Result<Option<Balance>, BankwireError> {
    let balances = &account.balances;
    let Some(amount) = balances.available else {
        return Ok(None);
    };
    Ok(Some(Balance {
        amount,
        currency: currency(
            balances.iso_currency_code.as_deref(),
            balances.unofficial_currency_code.as_deref(),
            "balance",
        )?,
    }))
}

fn method(tx: &PlaidTransaction) -> TransactionMethod {
    match tx.transaction_code.as_deref() {
        Some("atm" | "cash" | "cashback") => TransactionMethod::CardAtm,
        Some("purchase") => TransactionMethod::CardPurchase,
        Some("transfer" | "standing order") => TransactionMethod::Transfer,
        Some("interest") => TransactionMethod::Interest,
        Some("bank charge") => TransactionMethod::Fee,
        Some("bill payment" | "direct debit") => TransactionMethod::Payment,
        Some("cheque") => TransactionMethod::Deposit,
        _ => match tx.payment_channel.as_deref() {
            Some("in store" | "online") => TransactionMethod::CardPurchase,
            _ => TransactionMethod::Other,
        },
    }
}

fn category(amount: Decimal, account_type: AccountType, tx: &PlaidTransaction) -> Option<String> {
    if amount > Decimal::ZERO {
        return Some(
            if account_type == AccountType::Credit {
                "credit_card_payment"
            } else {
                "income"
            }
            .to_string(),
        );
    }
    tx.personal_finance_category
        .as_ref()
        .map(|c| c.primary.to_ascii_lowercase())
}

/// Map one Plaid transaction.
///
/// Plaid reports outflows as positive amounts, so the sign is flipped.
///
/// # Errors
/// Returns `Transform` when the transaction reports no currency.
pub fn transform_transaction(
    tx: &PlaidTransaction,
    account_type: AccountType,
) -> Result<Transaction, BankwireError> {
    let amount = -tx.amount;
    let merchant = tx
        .merchant_name
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());
    let name = merchant.unwrap_or(&tx.name).to_string();
    let description = tx
        .original_description
        .as_deref()
        .or_else(|| merchant.map(|_| tx.name.as_str()))
        .map(str::trim)
        .filter(|d| !d.is_empty() && *d != name)
        .map(str::to_string);

    Ok(Transaction {
        amount,
        currency: currency(
            tx.iso_currency_code.as_deref(),
            tx.unofficial_currency_code.as_deref(),
            "transaction",
        )?,
        date: tx.date,
        internal_id: tx.transaction_id.clone(),
        status: if tx.pending {
            TransactionStatus::Pending
        } else {
            TransactionStatus::Posted
        },
        balance: None,
        category: category(amount, account_type, tx),
        method: method(tx),
        name,
        description,
        currency_rate: None,
        currency_source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tx(amount: f64, pending: bool) -> PlaidTransaction {
        serde_json::from_value(json!({
            "transaction_id": "tx_1",
            "account_id": "acc_1",
            "amount": amount,
            "iso_currency_code": "USD",
            "date": "2024-04-10",
            "name": "UBER 063015 SF**POOL**",
            "merchant_name": "Uber",
            "pending": pending,
            "payment_channel": "online",
            "transaction_code": null,
            "personal_finance_category": { "primary": "TRANSPORTATION", "detailed": "TRANSPORTATION_TAXIS_AND_RIDE_SHARES" }
        }))
        .unwrap()
    }

    #[test]
    fn outflow_reported_positive_becomes_negative() {
        let out = transform_transaction(&tx(42.5, false), AccountType::Depository).unwrap();
        assert_eq!(out.amount, Decimal::new(-425, 1));
        assert_eq!(out.status, TransactionStatus::Posted);
        assert_eq!(out.name, "Uber");
        assert_eq!(out.description.as_deref(), Some("UBER 063015 SF**POOL**"));
        assert_eq!(out.category.as_deref(), Some("transportation"));
        assert_eq!(out.method, TransactionMethod::CardPurchase);
        assert_eq!(out.internal_id, "tx_1");
    }

    #[test]
    fn inflow_reported_negative_becomes_positive() {
        let out = transform_transaction(&tx(-42.5, true), AccountType::Depository).unwrap();
        assert_eq!(out.amount, Decimal::new(425, 1));
        assert_eq!(out.status, TransactionStatus::Pending);
        assert_eq!(out.category.as_deref(), Some("income"));
    }

    #[test]
    fn inflow_on_credit_account_is_a_card_payment() {
        let out = transform_transaction(&tx(-100.0, false), AccountType::Credit).unwrap();
        assert_eq!(out.category.as_deref(), Some("credit_card_payment"));
    }

    #[test]
    fn missing_currency_is_a_transform_error() {
        let mut t = tx(1.0, false);
        t.iso_currency_code = None;
        let err = transform_transaction(&t, AccountType::Depository).unwrap_err();
        assert!(matches!(err, BankwireError::Transform { .. }));
        t.unofficial_currency_code = Some("btc".into());
        assert_eq!(
            transform_transaction(&t, AccountType::Depository).unwrap().currency,
            "BTC"
        );
    }

    #[test]
    fn institution_logo_absent_is_none() {
        let inst = PlaidInstitution {
            institution_id: "ins_1".into(),
            name: "First Platypus Bank".into(),
            logo: None,
            url: None,
            country_codes: vec!["US".into()],
        };
        assert_eq!(transform_institution(&inst).logo, None);
    }

    #[test]
    fn account_type_and_balance() {
        let acc: PlaidAccount = serde_json::from_value(json!({
            "account_id": "acc_1",
            "name": "Plaid Credit Card",
            "type": "credit",
            "subtype": "credit card",
            "balances": { "available": null, "current": 410, "iso_currency_code": "USD" }
        }))
        .unwrap();
        let out = transform_account(&acc, None).unwrap();
        assert_eq!(out.account_type, AccountType::Credit);
        assert_eq!(out.provider, ProviderId::Plaid);
        assert_eq!(out.institution, None);
        assert_eq!(transform_balance(&acc).unwrap(), None);
    }
}
