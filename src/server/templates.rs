//! Embedded HTML templates and the engine that renders them.
//!
//! Templates are compiled into the binary with `include_str!` and rendered
//! through minijinja with its default HTML auto-escaping. Link targets pass
//! through the `local_link` filter, which lets only origin-relative paths
//! render verbatim. The engine is built once at startup so template syntax
//! errors surface before the server accepts traffic.

use minijinja::{Environment, Value, context};

use crate::zendesk::error::SourceError;
use crate::zendesk::models::{Ticket, TicketList};

/// Shared base layout.
const LAYOUT: &str = include_str!("../../templates/layout.html");
/// Paginated ticket listing.
const INDEX: &str = include_str!("../../templates/index.html");
/// Single-ticket detail view.
const DETAIL: &str = include_str!("../../templates/detail.html");
/// Error page shown for any failed fetch.
const ERROR: &str = include_str!("../../templates/error.html");

/// Renders the viewer's pages from embedded templates.
pub(super) struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Compiles the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Configuration` when any template fails to
    /// parse.
    pub(super) fn new() -> Result<Self, SourceError> {
        let mut env = Environment::new();

        // Auto-escaping would entity-encode the slashes in href values, so
        // link targets render through local_link instead.
        env.add_filter("local_link", local_link);

        for (name, source) in [
            ("layout.html", LAYOUT),
            ("index.html", INDEX),
            ("detail.html", DETAIL),
            ("error.html", ERROR),
        ] {
            env.add_template(name, source).map_err(|error| SourceError::Configuration {
                message: format!("invalid template syntax in {name}: {error}"),
            })?;
        }
        Ok(Self { env })
    }

    /// Renders the ticket listing page.
    pub(super) fn render_index(&self, list: &TicketList) -> Result<String, SourceError> {
        self.render("index.html", context! { list => list })
    }

    /// Renders the single-ticket detail page.
    pub(super) fn render_detail(&self, ticket: &Ticket) -> Result<String, SourceError> {
        self.render("detail.html", context! { ticket => ticket })
    }

    /// Renders the error page around a display message.
    pub(super) fn render_error(&self, message: &str) -> Result<String, SourceError> {
        self.render("error.html", context! { message => message })
    }

    fn render(&self, name: &str, ctx: Value) -> Result<String, SourceError> {
        let template = self.env.get_template(name).map_err(|error| SourceError::Configuration {
            message: format!("failed to retrieve template {name}: {error}"),
        })?;
        template.render(ctx).map_err(|error| SourceError::Configuration {
            message: format!("template rendering failed for {name}: {error}"),
        })
    }
}

/// Renders a link target verbatim, or the fallback when the target is not
/// origin-relative.
///
/// Validated targets are marked safe so auto-escaping leaves them alone.
/// The ampersand is the only markup character the target charset admits and
/// it is entity-encoded here. Anything else, schemes and protocol-relative
/// URLs included, collapses to the fallback.
fn local_link(value: Option<String>, fallback: String) -> Value {
    value.filter(|target| is_local_target(target)).map_or_else(
        || Value::from_safe_string(fallback),
        |target| Value::from_safe_string(target.replace('&', "&amp;")),
    )
}

/// An origin-relative path built from the URL charset the viewer emits.
fn is_local_target(target: &str) -> bool {
    let allowed = |c: char| {
        c.is_ascii_alphanumeric()
            || matches!(c, '/' | '?' | '=' | '&' | '%' | '.' | '_' | '~' | '+' | '-')
    };
    target.starts_with('/') && !target.starts_with("//") && target.chars().all(allowed)
}
