//! Wicket library crate providing a server-rendered Zendesk ticket viewer.
//!
//! The library wraps a remote Zendesk-style ticket API behind the
//! [`zendesk::TicketSource`] trait, paginates listings on the caller's
//! behalf, and renders the results as HTML pages that can be served over
//! HTTP.

pub mod config;
pub mod server;
pub mod zendesk;

pub use config::WicketConfig;
pub use zendesk::{
    Account, ApiTicketSource, Credentials, ListQuery, SourceError, SourceOptions, Ticket, TicketId,
    TicketList, TicketSource,
};
