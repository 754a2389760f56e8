//! Ticket data sources.
//!
//! This module provides the trait-based seam between the HTML layer and the
//! upstream ticket service. Page tests mock [`TicketSource`] directly while
//! [`ApiTicketSource`] handles real HTTP requests.

mod api;
mod client;
mod error_mapping;
mod params;

pub use api::ApiTicketSource;
pub use params::{
    DEFAULT_DISPLAY_LIMIT, DEFAULT_UPSTREAM_RETRIES, DEFAULT_UPSTREAM_TIMEOUT_SECS, DetailQuery,
    ListQuery, MIN_DISPLAY_LIMIT, SourceOptions,
};

use async_trait::async_trait;

use crate::zendesk::account::TicketId;
use crate::zendesk::error::SourceError;
use crate::zendesk::models::{Ticket, TicketList};

/// Source that can load pages of tickets and individual tickets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Fetch one page of tickets with pagination resolved for display.
    async fn list_tickets(&self, query: &ListQuery) -> Result<TicketList, SourceError>;

    /// Fetch a single ticket with its requester name resolved.
    async fn ticket(&self, id: &TicketId, query: &DetailQuery) -> Result<Ticket, SourceError>;
}
