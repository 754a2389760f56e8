//! The reqwest-backed ticket source.
//!
//! This is the only module that talks HTTP. It builds authenticated requests
//! against the account's endpoints, retries transport-level failures with a
//! doubling backoff, classifies upstream error statuses, and hands decoded
//! bodies to the pagination and model layers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tokio::time::sleep;
use url::Url;

use crate::zendesk::account::{Account, Credentials, TicketId};
use crate::zendesk::error::SourceError;
use crate::zendesk::models::{ApiTicketEnvelope, ApiTicketPage, Ticket, TicketList};
use crate::zendesk::pagination;

use super::TicketSource;
use super::client::build_http_client;
use super::error_mapping::{classify_status, map_decode_error, map_transport_error};
use super::params::{DetailQuery, ListQuery, SourceOptions};

/// Sideload directive attached to every detail request.
const DETAIL_SIDELOAD_QUERY: &str = "include=users";

/// First retry delay; later attempts double it.
const RETRY_BACKOFF_BASE_MS: u64 = 100;

/// Ticket source backed by the upstream REST API.
pub struct ApiTicketSource {
    http: reqwest::Client,
    account: Account,
    credentials: Credentials,
    options: SourceOptions,
}

impl ApiTicketSource {
    /// Creates a source for `account`, authenticating with `credentials`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Configuration` when the HTTP client cannot be
    /// built.
    pub fn new(
        account: Account,
        credentials: Credentials,
        options: SourceOptions,
    ) -> Result<Self, SourceError> {
        let http = build_http_client(options.timeout)?;
        Ok(Self {
            http,
            account,
            credentials,
            options,
        })
    }

    /// Page size to report for this request: the caller's `per_page` when it
    /// parses as a positive integer, the configured default otherwise.
    fn effective_limit(&self, query: &ListQuery) -> u32 {
        query
            .per_page
            .as_deref()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(self.options.display_limit)
    }

    fn list_request(&self, query: &ListQuery) -> Result<reqwest::Request, SourceError> {
        let mut url = self.account.tickets_endpoint();
        let page = query.page.as_deref().unwrap_or("1");
        let per_page = query
            .per_page
            .clone()
            .unwrap_or_else(|| self.options.display_limit.to_string());
        url.set_query(Some(&format!("page={page}&per_page={per_page}")));
        self.build_get(url)
    }

    fn detail_request(&self, id: &TicketId) -> Result<reqwest::Request, SourceError> {
        let mut url = self.account.ticket_endpoint(id);
        url.set_query(Some(DETAIL_SIDELOAD_QUERY));
        self.build_get(url)
    }

    fn build_get(&self, url: Url) -> Result<reqwest::Request, SourceError> {
        self.http
            .get(url)
            .basic_auth(self.credentials.username(), Some(self.credentials.secret()))
            .header(header::ACCEPT, "application/json")
            .build()
            .map_err(|error| SourceError::InvalidUrl(error.to_string()))
    }

    /// Executes `request`, retrying transport-level failures.
    ///
    /// Only failures where no HTTP response arrived are retried; error
    /// statuses come back as responses for the caller to classify.
    async fn execute_with_retry(
        &self,
        operation: &str,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, SourceError> {
        let mut attempt: u32 = 0;
        loop {
            let Some(next_try) = request.try_clone() else {
                // these GETs never carry a streaming body, but a request
                // that cannot be replayed gets exactly one attempt
                return self
                    .http
                    .execute(request)
                    .await
                    .map_err(|error| map_transport_error(operation, &error));
            };
            match self.http.execute(next_try).await {
                Ok(response) => return Ok(response),
                Err(error) if attempt < self.options.retries => {
                    attempt += 1;
                    tracing::warn!(
                        "{operation} transport failure (attempt {attempt} of {max}): {error}",
                        max = self.options.retries
                    );
                    sleep(backoff_delay(attempt)).await;
                }
                Err(error) => return Err(map_transport_error(operation, &error)),
            }
        }
    }
}

/// Delay before retry number `attempt`, doubling from the base delay.
const fn backoff_delay(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1);
    // cap the shift so pathological retry counts cannot overflow
    let capped = if exponent > 6 { 6 } else { exponent };
    Duration::from_millis(RETRY_BACKOFF_BASE_MS << capped)
}

#[async_trait]
impl TicketSource for ApiTicketSource {
    async fn list_tickets(&self, query: &ListQuery) -> Result<TicketList, SourceError> {
        let request = self.list_request(query)?;
        let url = request.url().clone();
        tracing::debug!("fetching ticket list from {url}");

        let response = self.execute_with_retry("list tickets", request).await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            tracing::warn!("list tickets returned {status} for {url}");
            return Err(classify_status(status));
        }

        let page = response
            .json::<ApiTicketPage>()
            .await
            .map_err(|error| map_decode_error("list tickets", &error))?;

        let display_limit = self.effective_limit(query);
        let info = pagination::page_info(
            page.next_page.as_deref(),
            page.previous_page.as_deref(),
            query.page.as_deref(),
            page.count,
            display_limit,
        )?;

        Ok(TicketList {
            tickets: page.tickets.into_iter().map(Ticket::from).collect(),
            count: page.count,
            next_page: info.next_page,
            previous_page: info.previous_page,
            page_num: info.page_num,
            last_page_num: info.last_page_num,
            display_limit,
        })
    }

    async fn ticket(&self, id: &TicketId, query: &DetailQuery) -> Result<Ticket, SourceError> {
        let request = self.detail_request(id)?;
        let url = request.url().clone();
        tracing::debug!("fetching ticket {id} from {url}");

        let response = self.execute_with_retry("fetch ticket", request).await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            tracing::warn!("fetch ticket returned {status} for {url}");
            return Err(classify_status(status));
        }

        let envelope = response
            .json::<ApiTicketEnvelope>()
            .await
            .map_err(|error| map_decode_error("fetch ticket", &error))?;
        envelope.into_ticket(query.back_page.as_deref())
    }
}
