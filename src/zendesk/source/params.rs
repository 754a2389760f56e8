//! Caller-supplied query parameters and source tuning knobs.

use std::time::Duration;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_DISPLAY_LIMIT: u32 = 25;

/// Smallest page size the viewer accepts from configuration.
pub const MIN_DISPLAY_LIMIT: u32 = 2;

/// Seconds before an upstream request is abandoned.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

/// Transport-level retries after the initial attempt.
pub const DEFAULT_UPSTREAM_RETRIES: u32 = 2;

/// Query parameters accepted by a ticket listing request.
///
/// Values are carried exactly as the caller supplied them; the upstream is
/// the authority on what they mean. Empty values count as absent.
///
/// # Example
///
/// ```
/// use wicket::zendesk::ListQuery;
///
/// let query = ListQuery::from_pairs([("page", "2"), ("sort", "desc")]);
/// assert_eq!(query.page.as_deref(), Some("2"));
/// assert!(query.per_page.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Requested page, verbatim.
    pub page: Option<String>,
    /// Requested page size, verbatim.
    pub per_page: Option<String>,
}

impl ListQuery {
    /// Extracts the recognised parameters from query-string pairs.
    ///
    /// Unknown parameters are ignored and empty values are treated as
    /// absent.
    #[must_use]
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut query = Self::default();
        for (name, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match name {
                "page" => query.page = Some(value.to_owned()),
                "per_page" => query.per_page = Some(value.to_owned()),
                _ => {}
            }
        }
        query
    }
}

/// Query parameters accepted by a ticket detail request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailQuery {
    /// List URL the detail view should link back to.
    pub back_page: Option<String>,
}

impl DetailQuery {
    /// Extracts the back-link parameter from query-string pairs.
    ///
    /// The parameter name matches the `backPage` value the listing view
    /// embeds in its detail links.
    #[must_use]
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut query = Self::default();
        for (name, value) in pairs {
            if name == "backPage" && !value.is_empty() {
                query.back_page = Some(value.to_owned());
            }
        }
        query
    }
}

/// Tuning for the API-backed ticket source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// Page size used for requests and page-count arithmetic.
    pub display_limit: u32,
    /// Budget for one upstream request, connection setup included.
    pub timeout: Duration,
    /// Transport-level retries after the initial attempt.
    pub retries: u32,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            display_limit: DEFAULT_DISPLAY_LIMIT,
            timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            retries: DEFAULT_UPSTREAM_RETRIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_ignores_unknown_and_empty_parameters() {
        let query = ListQuery::from_pairs([
            ("page", "2"),
            ("per_page", ""),
            ("utm_source", "newsletter"),
        ]);
        assert_eq!(query.page.as_deref(), Some("2"));
        assert!(query.per_page.is_none());
    }

    #[test]
    fn list_query_keeps_values_verbatim() {
        let query = ListQuery::from_pairs([("page", "007"), ("per_page", "10")]);
        assert_eq!(query.page.as_deref(), Some("007"));
        assert_eq!(query.per_page.as_deref(), Some("10"));
    }

    #[test]
    fn detail_query_reads_the_back_page_parameter() {
        let query = DetailQuery::from_pairs([("backPage", "/tickets?page=3")]);
        assert_eq!(query.back_page.as_deref(), Some("/tickets?page=3"));
    }

    #[test]
    fn detail_query_treats_empty_back_page_as_absent() {
        let query = DetailQuery::from_pairs([("backPage", "")]);
        assert!(query.back_page.is_none());
    }
}
