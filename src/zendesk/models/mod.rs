//! Data models for tickets and pages of tickets.
//!
//! Types prefixed with `Api` are internal deserialisation targets matching
//! the upstream's JSON shapes. They convert into the public domain types
//! that the HTML layer renders directly.

use serde::{Deserialize, Serialize};

use super::error::SourceError;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// One support ticket, flattened for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ticket {
    /// Ticket identifier.
    pub id: u64,
    /// Subject line, empty when the upstream omitted it.
    pub subject: String,
    /// Full description body.
    pub description: String,
    /// Workflow state (e.g. open, pending, solved).
    pub status: String,
    /// Priority label, empty when unset upstream.
    pub priority: String,
    /// Free-form tags attached to the ticket.
    pub tags: Vec<String>,
    /// Display name of the requester, resolved from the sideloaded user.
    pub requester_name: Option<String>,
    /// Relative list URL the detail view links back to.
    pub back_page: String,
}

/// One page of tickets with everything a paginated view needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketList {
    /// Tickets on this page, in upstream order.
    pub tickets: Vec<Ticket>,
    /// Total tickets in the account, across all pages.
    pub count: u64,
    /// Viewer-relative link to the next page, when one exists.
    pub next_page: Option<String>,
    /// Viewer-relative link to the previous page, when one exists.
    pub previous_page: Option<String>,
    /// Current 1-based page number, populated only on multi-page results.
    pub page_num: Option<u64>,
    /// Number of the final page for the current page size.
    pub last_page_num: u64,
    /// Page size used to compute `last_page_num`.
    pub display_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiTicket {
    pub(super) id: u64,
    #[serde(default)]
    pub(super) subject: Option<String>,
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) status: Option<String>,
    #[serde(default)]
    pub(super) priority: Option<String>,
    #[serde(default)]
    pub(super) tags: Vec<String>,
}

/// Upstream list response: tickets plus raw pagination links.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiTicketPage {
    #[serde(default)]
    pub(super) tickets: Vec<ApiTicket>,
    #[serde(default)]
    pub(super) count: u64,
    #[serde(default)]
    pub(super) next_page: Option<String>,
    #[serde(default)]
    pub(super) previous_page: Option<String>,
}

/// User record sideloaded next to a ticket via `include=users`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiSideloadedUser {
    #[serde(default)]
    pub(super) name: String,
}

/// Upstream detail response: the ticket plus its sideloaded users.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiTicketEnvelope {
    pub(super) ticket: ApiTicket,
    #[serde(default)]
    pub(super) users: Vec<ApiSideloadedUser>,
}

impl From<ApiTicket> for Ticket {
    fn from(value: ApiTicket) -> Self {
        Self {
            id: value.id,
            subject: value.subject.unwrap_or_default(),
            description: value.description.unwrap_or_default(),
            status: value.status.unwrap_or_default(),
            priority: value.priority.unwrap_or_default(),
            tags: value.tags,
            requester_name: None,
            back_page: String::new(),
        }
    }
}

/// Picks the requester's display name out of the sideloaded users.
///
/// The upstream returns the requester as the first sideloaded user for
/// detail requests carrying `include=users`; an empty array means the
/// sideload was dropped and the response cannot be rendered faithfully.
pub(super) fn resolve_requester_name(
    users: &[ApiSideloadedUser],
) -> Result<String, SourceError> {
    users
        .first()
        .map(|user| user.name.clone())
        .ok_or(SourceError::MissingSideload)
}

impl ApiTicketEnvelope {
    /// Flattens the envelope into a display-ready `Ticket`.
    pub(super) fn into_ticket(self, back_page: Option<&str>) -> Result<Ticket, SourceError> {
        let requester_name = resolve_requester_name(&self.users)?;
        let mut ticket = Ticket::from(self.ticket);
        ticket.requester_name = Some(requester_name);
        ticket.back_page = back_page.unwrap_or_default().to_owned();
        Ok(ticket)
    }
}
