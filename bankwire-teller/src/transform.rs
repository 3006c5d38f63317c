//! Mapping from Teller payloads to canonical entities.

use bankwire_core::{
    Account, AccountType, Balance, Decimal, Institution, NaiveDate, ProviderId, Transaction,
    TransactionMethod, TransactionStatus,
};

use crate::types::{TellerAccount, TellerBalances, TellerTransaction};

/// Teller serves US institutions only and omits the currency on transactions.
pub const TRANSACTION_CURRENCY: &str = "USD";

fn account_type(kind: &str) -> AccountType {
    match kind {
        "depository" => AccountType::Depository,
        "credit" => AccountType::Credit,
        _ => AccountType::Other,
    }
}

/// Map an account; Teller publishes no logos.
#[must_use]
pub fn transform_account(account: &TellerAccount) -> Account {
    Account {
        id: account.id.clone(),
        name: account.name.clone(),
        currency: account.currency.to_ascii_uppercase(),
        provider: ProviderId::Teller,
        account_type: account_type(&account.account_type),
        institution: Some(Institution {
            id: account.institution.id.clone(),
            name: account.institution.name.clone(),
            logo: None,
        }),
        enrollment_id: Some(account.enrollment_id.clone()),
    }
}

/// Available balance in the account currency; `None` when not reported.
#[must_use]
pub fn transform_balance(account: &TellerAccount, balances: &TellerBalances) -> Option<Balance> {
    balances.available.map(|amount| Balance {
        amount,
        currency: account.currency.to_ascii_uppercase(),
    })
}

fn method(kind: Option<&str>) -> TransactionMethod {
    match kind {
        Some("card_payment") => TransactionMethod::CardPurchase,
        Some("atm") => TransactionMethod::CardAtm,
        Some("transfer") => TransactionMethod::Transfer,
        Some("ach") => TransactionMethod::Ach,
        Some("wire") => TransactionMethod::Wire,
        Some("deposit") => TransactionMethod::Deposit,
        Some("interest") => TransactionMethod::Interest,
        Some("fee") => TransactionMethod::Fee,
        Some("payment" | "bill_payment" | "digital_payment") => TransactionMethod::Payment,
        _ => TransactionMethod::Other,
    }
}

/// Map one Teller transaction.
///
/// Depository amounts are already signed with outflows negative; credit card
/// accounts report charges as positive, so their sign is flipped.
#[must_use]
pub fn transform_transaction(tx: &TellerTransaction, account_type: AccountType) -> Transaction {
    let amount = if account_type == AccountType::Credit {
        -tx.amount
    } else {
        tx.amount
    };
    let counterparty = tx
        .details
        .counterparty
        .as_ref()
        .and_then(|c| c.name.as_deref())
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let name = counterparty.unwrap_or(tx.description.trim()).to_string();
    let description = Some(tx.description.trim())
        .filter(|d| !d.is_empty() && *d != name)
        .map(str::to_string);
    let category = tx
        .details
        .category
        .clone()
        .or_else(|| (amount > Decimal::ZERO).then(|| "income".to_string()));

    Transaction {
        amount,
        currency: TRANSACTION_CURRENCY.to_string(),
        date: tx.date,
        internal_id: tx.id.clone(),
        status: if tx.status == "pending" {
            TransactionStatus::Pending
        } else {
            TransactionStatus::Posted
        },
        balance: tx.running_balance,
        category,
        method: method(tx.kind.as_deref()),
        name,
        description,
        currency_rate: None,
        currency_source: None,
    }
}

/// Keep transactions dated on or after `since`.
#[must_use]
pub fn since(txs: Vec<Transaction>, since: NaiveDate) -> Vec<Transaction> {
    txs.into_iter().filter(|t| t.date >= since).collect()
}
