use async_trait::async_trait;
use bankwire_core::BankwireError;
use bankwire_core::http::{send_empty_once, send_json, send_json_once};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::PlaidConfig;
use crate::types::{
    AccountsGetOptions, AccountsGetRequest, AccountsGetResponse, InstitutionByIdRequest,
    InstitutionByIdResponse, InstitutionOptions, InstitutionsGetRequest, InstitutionsGetResponse,
    LinkTokenCreateRequest, LinkTokenCreateResponse, PlaidAccount, PlaidInstitution,
    PublicTokenExchangeResponse, StatusResponse, TransactionsSyncRequest,
    TransactionsSyncResponse,
};

const PROVIDER: &str = "plaid";

/// Raw Plaid endpoints (so we can inject stubs in tests).
///
/// Each method is a single HTTP exchange; retries and pagination are applied
/// by the connector.
#[async_trait]
pub trait PlaidApi: Send + Sync {
    /// `accounts/get`, optionally restricted to some accounts.
    async fn accounts(
        &self,
        access_token: &str,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<PlaidAccount>, BankwireError> {
        let _ = (access_token, account_ids);
        Err(BankwireError::unsupported("accounts/get"))
    }

    /// `institutions/get_by_id`.
    async fn institution_by_id(
        &self,
        institution_id: &str,
        country_codes: &[String],
    ) -> Result<PlaidInstitution, BankwireError> {
        let _ = (institution_id, country_codes);
        Err(BankwireError::unsupported("institutions/get_by_id"))
    }

    /// One page of `institutions/get`.
    async fn institutions_page(
        &self,
        country_codes: &[String],
        offset: usize,
        count: usize,
    ) -> Result<Vec<PlaidInstitution>, BankwireError> {
        let _ = (country_codes, offset, count);
        Err(BankwireError::unsupported("institutions/get"))
    }

    /// One page of `transactions/sync`.
    async fn transactions_sync(
        &self,
        access_token: &str,
        cursor: Option<&str>,
        count: Option<u32>,
    ) -> Result<TransactionsSyncResponse, BankwireError> {
        let _ = (access_token, cursor, count);
        Err(BankwireError::unsupported("transactions/sync"))
    }

    /// `link/token/create`.
    async fn link_token_create(
        &self,
        req: &LinkTokenCreateRequest,
    ) -> Result<LinkTokenCreateResponse, BankwireError> {
        let _ = req;
        Err(BankwireError::unsupported("link/token/create"))
    }

    /// `item/public_token/exchange`.
    async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<PublicTokenExchangeResponse, BankwireError> {
        let _ = public_token;
        Err(BankwireError::unsupported("item/public_token/exchange"))
    }

    /// `item/remove`.
    async fn item_remove(&self, access_token: &str) -> Result<(), BankwireError> {
        let _ = access_token;
        Err(BankwireError::unsupported("item/remove"))
    }

    /// Public status page.
    async fn status(&self) -> Result<StatusResponse, BankwireError> {
        Err(BankwireError::unsupported("status"))
    }
}

/// Real adapter backed by a `reqwest::Client` carrying the client
/// credentials as default headers. The status page is polled with a second
/// client so the credentials never leave the API host.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    status_http: reqwest::Client,
    base_url: String,
    status_url: String,
}

fn header(name: &'static str, value: &str) -> Result<(HeaderName, HeaderValue), BankwireError> {
    let mut value = HeaderValue::from_str(value).map_err(|_| {
        BankwireError::invalid_request(PROVIDER, format!("{name} is not a valid header value"))
    })?;
    value.set_sensitive(true);
    Ok((HeaderName::from_static(name), value))
}

impl RealAdapter {
    /// Build an adapter with its own HTTP client.
    ///
    /// # Errors
    /// Returns an error if the credentials are not valid header values or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &PlaidConfig) -> Result<Self, BankwireError> {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            header("plaid-client-id", &config.client_id)?,
            header("plaid-secret", &config.secret)?,
        ] {
            headers.insert(name, value);
        }
        let http = reqwest::Client::builder()
            .timeout(config.http.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| BankwireError::invalid_request(PROVIDER, e.to_string()))?;
        let status_http = reqwest::Client::builder()
            .timeout(config.http.timeout)
            .build()
            .map_err(|e| BankwireError::invalid_request(PROVIDER, e.to_string()))?;
        Ok(Self {
            http,
            status_http,
            base_url: config.resolved_base_url().trim_end_matches('/').to_string(),
            status_url: config.status_url.clone(),
        })
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, BankwireError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{path}", self.base_url);
        send_json(PROVIDER, self.http.post(url).json(body)).await
    }
}

#[async_trait]
impl PlaidApi for RealAdapter {
    async fn accounts(
        &self,
        access_token: &str,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<PlaidAccount>, BankwireError> {
        let body = AccountsGetRequest {
            access_token,
            options: account_ids.map(|ids| AccountsGetOptions {
                account_ids: ids.to_vec(),
            }),
        };
        let resp: AccountsGetResponse = self.post("accounts/get", &body).await?;
        Ok(resp.accounts)
    }

    async fn institution_by_id(
        &self,
        institution_id: &str,
        country_codes: &[String],
    ) -> Result<PlaidInstitution, BankwireError> {
        let body = InstitutionByIdRequest {
            institution_id,
            country_codes,
            options: InstitutionOptions {
                include_optional_metadata: true,
            },
        };
        let resp: InstitutionByIdResponse = self.post("institutions/get_by_id", &body).await?;
        Ok(resp.institution)
    }

    async fn institutions_page(
        &self,
        country_codes: &[String],
        offset: usize,
        count: usize,
    ) -> Result<Vec<PlaidInstitution>, BankwireError> {
        let body = InstitutionsGetRequest {
            country_codes,
            count,
            offset,
            options: InstitutionOptions {
                include_optional_metadata: true,
            },
        };
        let resp: InstitutionsGetResponse = self.post("institutions/get", &body).await?;
        Ok(resp.institutions)
    }

    async fn transactions_sync(
        &self,
        access_token: &str,
        cursor: Option<&str>,
        count: Option<u32>,
    ) -> Result<TransactionsSyncResponse, BankwireError> {
        let body = TransactionsSyncRequest {
            access_token,
            cursor,
            count,
        };
        self.post("transactions/sync", &body).await
    }

    async fn link_token_create(
        &self,
        req: &LinkTokenCreateRequest,
    ) -> Result<LinkTokenCreateResponse, BankwireError> {
        self.post("link/token/create", req)
            .await
            .map_err(BankwireError::into_terminal)
    }

    async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<PublicTokenExchangeResponse, BankwireError> {
        self.post(
            "item/public_token/exchange",
            &json!({ "public_token": public_token }),
        )
        .await
        .map_err(BankwireError::into_terminal)
    }

    async fn item_remove(&self, access_token: &str) -> Result<(), BankwireError> {
        let url = format!("{}/item/remove", self.base_url);
        send_empty_once(
            PROVIDER,
            self.http
                .post(url)
                .json(&json!({ "access_token": access_token })),
        )
        .await
    }

    async fn status(&self) -> Result<StatusResponse, BankwireError> {
        send_json_once(PROVIDER, self.status_http.get(&self.status_url)).await
    }
}
