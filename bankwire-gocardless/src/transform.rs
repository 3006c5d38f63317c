//! Mapping from GoCardless payloads to canonical entities.

use bankwire_core::{
    Account, AccountType, Balance, BankwireError, Decimal, Institution, NaiveDate, ProviderId,
    Transaction, TransactionMethod, TransactionStatus,
};
use sha2::{Digest, Sha256};

use crate::types::{AccountSnapshot, Bank, BalanceEntry, GcTransaction};

const PROVIDER: &str = "gocardless";

/// Balance type reported as the current available balance.
pub const AVAILABLE_BALANCE_TYPE: &str = "interimAvailable";

/// Institution entity for a directory entry.
#[must_use]
pub fn transform_institution(bank: &Bank) -> Institution {
    Institution {
        id: bank.id.clone(),
        name: bank.name.clone(),
        logo: non_empty(bank.logo.as_deref()),
    }
}

fn account_type(cash_account_type: Option<&str>) -> AccountType {
    match cash_account_type.map(str::to_ascii_uppercase).as_deref() {
        Some("CARD") => AccountType::Credit,
        Some("LOAN") => AccountType::Loan,
        _ => AccountType::Depository,
    }
}

/// Map an account snapshot, resolving the institution from the directory.
///
/// # Errors
/// Returns `Transform` when the bank does not report the account currency.
pub fn transform_account(
    snapshot: &AccountSnapshot,
    bank: Option<&Bank>,
) -> Result<Account, BankwireError> {
    let details = &snapshot.details;
    let currency = non_empty(details.currency.as_deref()).ok_or_else(|| {
        BankwireError::transform(
            PROVIDER,
            format!("account {} has no currency", snapshot.metadata.id),
        )
    })?;
    let name = non_empty(details.name.as_deref())
        .or_else(|| non_empty(details.product.as_deref()))
        .or_else(|| bank.map(|b| b.name.clone()))
        .unwrap_or_else(|| "Account".to_string());

    Ok(Account {
        id: snapshot.metadata.id.clone(),
        name,
        currency,
        provider: ProviderId::GoCardLess,
        account_type: account_type(details.cash_account_type.as_deref()),
        institution: bank.map(transform_institution),
        enrollment_id: None,
    })
}

/// Pick the `interimAvailable` balance; `None` when the bank reports none.
#[must_use]
pub fn transform_balance(balances: &[BalanceEntry]) -> Option<Balance> {
    balances
        .iter()
        .find(|b| b.balance_type == AVAILABLE_BALANCE_TYPE)
        .map(|b| Balance {
            amount: b.balance_amount.amount,
            currency: b.balance_amount.currency.clone(),
        })
}

fn method(code: Option<&str>) -> TransactionMethod {
    let Some(code) = code else {
        return TransactionMethod::Other;
    };
    let code = code.to_ascii_lowercase();
    if code.contains("atm") || code.contains("cash") {
        TransactionMethod::CardAtm
    } else if code.contains("card") || code.contains("pos") {
        TransactionMethod::CardPurchase
    } else if code.contains("interest") {
        TransactionMethod::Interest
    } else if code.contains("fee") || code.contains("charge") {
        TransactionMethod::Fee
    } else if code.contains("transfer") || code.contains("sepa") || code.contains("giro") {
        TransactionMethod::Transfer
    } else if code.contains("debit") || code.contains("payment") {
        TransactionMethod::Payment
    } else {
        TransactionMethod::Other
    }
}

fn remittance(tx: &GcTransaction) -> Option<String> {
    non_empty(tx.remittance_information_unstructured.as_deref())
        .or_else(|| {
            tx.remittance_information_unstructured_array
                .as_ref()
                .map(|lines| lines.join(" "))
                .and_then(|s| non_empty(Some(&s)))
        })
        .or_else(|| non_empty(tx.remittance_information_structured.as_deref()))
        .or_else(|| non_empty(tx.additional_information.as_deref()))
}

fn counterparty(tx: &GcTransaction) -> Option<String> {
    if tx.transaction_amount.amount.is_sign_negative() {
        non_empty(tx.creditor_name.as_deref())
    } else {
        non_empty(tx.debtor_name.as_deref())
    }
}

fn transaction_date(tx: &GcTransaction) -> Result<NaiveDate, BankwireError> {
    tx.booking_date.or(tx.value_date).ok_or_else(|| {
        BankwireError::transform(PROVIDER, "transaction has neither booking nor value date")
    })
}

/// Stable key for a row without any native id.
fn fallback_internal_id(
    account_id: &str,
    date: NaiveDate,
    amount: Decimal,
    currency: &str,
    description: Option<&str>,
) -> String {
    let date = date.to_string();
    let amount = amount.normalize().to_string();
    let mut hasher = Sha256::new();
    for part in [
        PROVIDER,
        account_id,
        date.as_str(),
        amount.as_str(),
        currency,
        description.unwrap_or_default(),
    ] {
        hasher.update(part.as_bytes());
        hasher.update([0x1f_u8]);
    }
    format!("{:x}", hasher.finalize())
}

/// Map one GoCardless transaction.
///
/// Amounts are already signed with outflows negative.
///
/// # Errors
/// Returns `Transform` when the row carries no usable date.
pub fn transform_transaction(
    account_id: &str,
    tx: &GcTransaction,
    status: TransactionStatus,
) -> Result<Transaction, BankwireError> {
    let date = transaction_date(tx)?;
    let amount = tx.transaction_amount.amount;
    let currency = tx.transaction_amount.currency.clone();
    let description = remittance(tx);
    let name = counterparty(tx)
        .or_else(|| description.clone())
        .unwrap_or_else(|| "No information".to_string());

    let internal_id = non_empty(tx.transaction_id.as_deref())
        .or_else(|| non_empty(tx.internal_transaction_id.as_deref()))
        .map_or_else(
            || fallback_internal_id(account_id, date, amount, &currency, description.as_deref()),
            |id| format!("{account_id}_{id}"),
        );

    let exchange = tx
        .currency_exchange
        .as_ref()
        .and_then(|x| x.first())
        .filter(|x| {
            x.exchange_rate.is_some_and(|r| !r.is_zero())
                && x.source_currency
                    .as_deref()
                    .is_some_and(|c| !c.eq_ignore_ascii_case(&currency))
        });

    Ok(Transaction {
        amount,
        currency,
        date,
        internal_id,
        status,
        balance: tx
            .balance_after_transaction
            .as_ref()
            .map(|b| b.balance_amount.amount),
        category: (amount > Decimal::ZERO).then(|| "income".to_string()),
        method: method(tx.proprietary_bank_transaction_code.as_deref()),
        name,
        description,
        currency_rate: exchange.and_then(|x| x.exchange_rate),
        currency_source: exchange.and_then(|x| x.source_currency.clone()),
    })
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
