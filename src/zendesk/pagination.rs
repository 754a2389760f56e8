//! Rewrites upstream pagination links and derives page numbers.
//!
//! The upstream reports pagination as absolute `next_page`/`previous_page`
//! URLs pointing at its own `.json` endpoints. The viewer serves the same
//! query parameters under its own relative paths, so each link is reduced to
//! its final path segment (with the `.json` suffix dropped) plus the query
//! string carried over byte for byte.

use url::Url;

use super::error::SourceError;

/// Pagination facts derived from one upstream list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PageInfo {
    /// Viewer-relative next link, when the upstream offered one.
    pub(super) next_page: Option<String>,
    /// Viewer-relative previous link, when the upstream offered one.
    pub(super) previous_page: Option<String>,
    /// 1-based page number, populated only when either link exists.
    pub(super) page_num: Option<u64>,
    /// Number of the final page for the given page size.
    pub(super) last_page_num: u64,
}

/// Derives the full pagination picture for a list response.
///
/// `requested_page` is the `page` value the caller asked for, if any; it is
/// only consulted when the upstream links prove the listing spans multiple
/// pages.
pub(super) fn page_info(
    next_page: Option<&str>,
    previous_page: Option<&str>,
    requested_page: Option<&str>,
    count: u64,
    display_limit: u32,
) -> Result<PageInfo, SourceError> {
    let next = rewrite_optional(next_page)?;
    let previous = rewrite_optional(previous_page)?;
    let page_num =
        (next.is_some() || previous.is_some()).then(|| parse_requested_page(requested_page));
    Ok(PageInfo {
        next_page: next,
        previous_page: previous,
        page_num,
        last_page_num: last_page_number(count, display_limit),
    })
}

/// Number of the final page: total count divided by page size, rounded up.
pub(super) fn last_page_number(count: u64, display_limit: u32) -> u64 {
    if display_limit == 0 {
        // a zero page size cannot paginate anything
        return 0;
    }
    count.div_ceil(u64::from(display_limit))
}

fn rewrite_optional(raw: Option<&str>) -> Result<Option<String>, SourceError> {
    raw.filter(|link| !link.is_empty())
        .map(rewrite_page_link)
        .transpose()
}

/// Rewrites one upstream pagination URL into a viewer-relative link.
///
/// The query string survives verbatim; only the location part is reduced to
/// `/{last path segment}` with a trailing `.json` stripped.
pub(super) fn rewrite_page_link(raw: &str) -> Result<String, SourceError> {
    let (location, query) = match raw.split_once('?') {
        Some((location, query)) => (location, Some(query)),
        None => (raw, None),
    };

    let path = if location.contains("://") {
        let parsed = Url::parse(location).map_err(|error| SourceError::Decode {
            message: format!("unparseable pagination link `{raw}`: {error}"),
        })?;
        parsed.path().to_owned()
    } else {
        location.to_owned()
    };

    // rsplit always yields at least one item
    let segment = path.rsplit('/').next().unwrap_or_default();
    let resource = segment.strip_suffix(".json").unwrap_or(segment);
    if resource.is_empty() {
        return Err(SourceError::Decode {
            message: format!("pagination link `{raw}` has no resource segment"),
        });
    }

    Ok(query.map_or_else(
        || format!("/{resource}"),
        |preserved| format!("/{resource}?{preserved}"),
    ))
}

fn parse_requested_page(requested: Option<&str>) -> u64 {
    requested
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn rewrite_keeps_the_query_byte_for_byte() {
        let rewritten =
            rewrite_page_link("https://acme.zendesk.com/api/v2/tickets.json?page=2&per_page=25")
                .expect("should rewrite link");
        assert_eq!(rewritten, "/tickets?page=2&per_page=25");
    }

    #[rstest]
    #[case("https://acme.zendesk.com/api/v2/tickets.json", "/tickets")]
    #[case("http://127.0.0.1:3999/deep/nested/tickets.json?page=9", "/tickets?page=9")]
    #[case("/api/v2/tickets.json?page=3", "/tickets?page=3")]
    #[case("https://acme.zendesk.com/api/v2/tickets?page=2", "/tickets?page=2")]
    fn rewrite_reduces_to_the_final_segment(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(
            rewrite_page_link(raw).expect("should rewrite link"),
            expected
        );
    }

    #[rstest]
    #[case("https://acme.zendesk.com/")]
    #[case("://broken?page=2")]
    fn rewrite_rejects_links_without_a_resource(#[case] raw: &str) {
        assert!(matches!(
            rewrite_page_link(raw),
            Err(SourceError::Decode { .. })
        ));
    }

    #[rstest]
    #[case(0, 25, 0)]
    #[case(1, 25, 1)]
    #[case(25, 25, 1)]
    #[case(26, 25, 2)]
    #[case(30, 25, 2)]
    #[case(50, 25, 2)]
    #[case(51, 25, 3)]
    #[case(30, 10, 3)]
    fn last_page_follows_ceiling_division(
        #[case] count: u64,
        #[case] display_limit: u32,
        #[case] expected: u64,
    ) {
        assert_eq!(last_page_number(count, display_limit), expected);
    }

    #[test]
    fn single_page_results_suppress_the_page_number() {
        let info = page_info(None, None, Some("1"), 25, 25).expect("should derive info");
        assert_eq!(info.page_num, None);
        assert_eq!(info.last_page_num, 1);
        assert!(info.next_page.is_none());
        assert!(info.previous_page.is_none());
    }

    #[test]
    fn multi_page_results_carry_the_requested_page() {
        let info = page_info(
            Some("https://acme.zendesk.com/api/v2/tickets.json?page=3&per_page=25"),
            Some("https://acme.zendesk.com/api/v2/tickets.json?page=1&per_page=25"),
            Some("2"),
            60,
            25,
        )
        .expect("should derive info");
        assert_eq!(info.page_num, Some(2));
        assert_eq!(info.last_page_num, 3);
        assert_eq!(info.next_page.as_deref(), Some("/tickets?page=3&per_page=25"));
        assert_eq!(
            info.previous_page.as_deref(),
            Some("/tickets?page=1&per_page=25")
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some("two"))]
    #[case(Some(""))]
    fn unparsable_requested_pages_fall_back_to_one(#[case] requested: Option<&str>) {
        let info = page_info(
            Some("/tickets.json?page=2&per_page=25"),
            None,
            requested,
            30,
            25,
        )
        .expect("should derive info");
        assert_eq!(info.page_num, Some(1));
    }

    #[test]
    fn empty_link_strings_count_as_absent() {
        let info = page_info(Some(""), Some(""), Some("1"), 10, 25).expect("should derive info");
        assert!(info.next_page.is_none());
        assert!(info.previous_page.is_none());
        assert_eq!(info.page_num, None);
    }
}
