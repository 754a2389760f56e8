//! Test helpers for constructing `Ticket` and `TicketList` fixtures.
//!
//! These builders keep the page-rendering tests short and make the fixture
//! shapes consistent across test modules.
//!
//! # Examples
//!
//! ```
//! use wicket::zendesk::models::test_support::{single_page_list, ticket_with_id};
//!
//! let ticket = ticket_with_id(7);
//! assert_eq!(ticket.subject, "Ticket 7");
//!
//! let list = single_page_list(3);
//! assert_eq!(list.tickets.len(), 3);
//! assert!(list.page_num.is_none());
//! ```

use super::{Ticket, TicketList};

/// Default page size used by the fixtures.
const FIXTURE_DISPLAY_LIMIT: u32 = 25;

/// Constructs an open ticket with a derived subject and description.
///
/// All other fields keep their defaults.
#[must_use]
pub fn ticket_with_id(id: u64) -> Ticket {
    Ticket {
        id,
        subject: format!("Ticket {id}"),
        description: format!("Description of ticket {id}"),
        status: "open".to_owned(),
        ..Ticket::default()
    }
}

/// Builds a list whose tickets all fit on one page.
///
/// `page_num` stays `None`, matching what the data source produces when the
/// upstream returns no pagination links.
#[must_use]
pub fn single_page_list(count: u64) -> TicketList {
    TicketList {
        tickets: (1..=count).map(ticket_with_id).collect(),
        count,
        last_page_num: u64::from(count > 0),
        display_limit: FIXTURE_DISPLAY_LIMIT,
        ..TicketList::default()
    }
}

/// Builds one page out of a multi-page listing.
///
/// Next and previous links are populated the way the data source rewrites
/// them, and `page_num` carries the supplied page number.
#[must_use]
pub fn multi_page_list(page_num: u64, last_page_num: u64, count: u64) -> TicketList {
    let next_page = (page_num < last_page_num).then(|| {
        format!("/tickets?page={}&per_page={FIXTURE_DISPLAY_LIMIT}", page_num + 1)
    });
    let previous_page = (page_num > 1).then(|| {
        format!("/tickets?page={}&per_page={FIXTURE_DISPLAY_LIMIT}", page_num - 1)
    });
    TicketList {
        tickets: (1..=u64::from(FIXTURE_DISPLAY_LIMIT)).map(ticket_with_id).collect(),
        count,
        next_page,
        previous_page,
        page_num: Some(page_num),
        last_page_num,
        display_limit: FIXTURE_DISPLAY_LIMIT,
    }
}
