//! Data access for the upstream ticket service.
//!
//! Everything the viewer knows about the upstream lives here: account and
//! credential wrappers, the wire-to-domain models, pagination link
//! rewriting, and the [`TicketSource`] trait with its API-backed
//! implementation. The HTML layer consumes this module exclusively through
//! [`TicketSource`], so page rendering stays testable without a network.

pub mod account;
pub mod error;
pub mod models;
mod pagination;
pub mod source;

pub use account::{Account, AccountEmail, ApiToken, Credentials, Subdomain, TicketId};
pub use error::SourceError;
pub use models::{Ticket, TicketList};
pub use source::{ApiTicketSource, DetailQuery, ListQuery, SourceOptions, TicketSource};

#[cfg(test)]
pub use source::MockTicketSource;
