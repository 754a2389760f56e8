//! HTTP surface rendering ticket pages.
//!
//! A deliberately thin axum layer: handlers translate query strings into
//! source queries, call the [`TicketSource`], and render whichever template
//! the outcome calls for. Every failed fetch becomes the error page with
//! status 400; only a template failure produces a 500.

mod templates;

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use tokio::net::TcpListener;

use crate::zendesk::{DetailQuery, ListQuery, SourceError, TicketId, TicketSource};

use self::templates::TemplateEngine;

/// Shared state for all page handlers.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn TicketSource>,
    templates: Arc<TemplateEngine>,
}

impl AppState {
    /// Builds the handler state around a ticket source.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Configuration` when the embedded templates
    /// fail to compile.
    pub fn new(source: Arc<dyn TicketSource>) -> Result<Self, SourceError> {
        let engine = TemplateEngine::new()?;
        Ok(Self {
            source,
            templates: Arc::new(engine),
        })
    }
}

/// Builds the viewer's router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/tickets") }))
        .route("/tickets", get(index_page))
        .route("/tickets/{id}", get(detail_page))
        .with_state(state)
}

/// Serves the router on `listener` until the process stops.
///
/// # Errors
///
/// Returns the underlying I/O error when the server loop fails.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app).await
}

async fn index_page(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let query = ListQuery::from_pairs(
        params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    );
    match state.source.list_tickets(&query).await {
        Ok(list) => html_page(state.templates.render_index(&list)),
        Err(error) => error_page(&state, &error),
    }
}

async fn detail_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let ticket_id = match TicketId::new(&id) {
        Ok(ticket_id) => ticket_id,
        Err(error) => return error_page(&state, &error),
    };
    let query = DetailQuery::from_pairs(
        params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    );
    match state.source.ticket(&ticket_id, &query).await {
        Ok(ticket) => html_page(state.templates.render_detail(&ticket)),
        Err(error) => error_page(&state, &error),
    }
}

/// Wraps rendered HTML, degrading to a bare 500 if rendering failed.
fn html_page(rendered: Result<String, SourceError>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(error) => {
            tracing::error!("template rendering failed: {error}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Renders any fetch failure as the error page with status 400.
fn error_page(state: &AppState, error: &SourceError) -> Response {
    tracing::warn!("rendering error page: {error}");
    match state.templates.render_error(&error.to_string()) {
        Ok(html) => (StatusCode::BAD_REQUEST, Html(html)).into_response(),
        Err(render_error) => {
            tracing::error!("template rendering failed: {render_error}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::{AppState, router};
    use crate::zendesk::models::test_support::{single_page_list, ticket_with_id};
    use crate::zendesk::{MockTicketSource, SourceError};

    fn app_with(source: MockTicketSource) -> axum::Router {
        let state = AppState::new(Arc::new(source)).expect("state should build");
        router(state)
    }

    async fn get_page(app: axum::Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(String::new())
                    .expect("request should build"),
            )
            .await
            .expect("handler should respond");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should collect")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn index_renders_the_ticket_table() {
        let mut source = MockTicketSource::new();
        source
            .expect_list_tickets()
            .returning(|_| Ok(single_page_list(3)));

        let (status, body) = get_page(app_with(source), "/tickets").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Ticket 2"), "should list tickets: {body}");
    }

    #[tokio::test]
    async fn index_forwards_query_parameters_to_the_source() {
        let mut source = MockTicketSource::new();
        source
            .expect_list_tickets()
            .withf(|query| {
                query.page.as_deref() == Some("2") && query.per_page.as_deref() == Some("10")
            })
            .returning(|_| Ok(single_page_list(1)));

        let (status, _body) = get_page(app_with(source), "/tickets?page=2&per_page=10").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn index_renders_fetch_failures_as_a_400_page() {
        let mut source = MockTicketSource::new();
        source
            .expect_list_tickets()
            .returning(|_| Err(SourceError::Unauthorized));

        let (status, body) = get_page(app_with(source), "/tickets").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body.contains("unauthorized access: check your credentials"),
            "error page should carry the message: {body}"
        );
        assert!(
            body.contains("alert alert-warning"),
            "error page should use the warning alert: {body}"
        );
    }

    #[tokio::test]
    async fn detail_passes_id_and_back_page_to_the_source() {
        let mut source = MockTicketSource::new();
        source
            .expect_ticket()
            .withf(|id, query| {
                id.as_str() == "35" && query.back_page.as_deref() == Some("/tickets?page=2")
            })
            .returning(|_, _| {
                let mut ticket = ticket_with_id(35);
                ticket.requester_name = Some("Ada".to_owned());
                ticket.back_page = "/tickets?page=2".to_owned();
                Ok(ticket)
            });

        let (status, body) = get_page(
            app_with(source),
            "/tickets/35?backPage=%2Ftickets%3Fpage%3D2",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Ada"), "should show the requester: {body}");
        assert!(
            body.contains("href=\"/tickets?page=2\">Go Back To List"),
            "should link back to the list: {body}"
        );
    }

    #[tokio::test]
    async fn detail_rejects_malformed_ids_without_calling_upstream() {
        // no expectation mounted: a source call would panic the test
        let source = MockTicketSource::new();

        let (status, body) = get_page(app_with(source), "/tickets/not-a-number").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body.contains("ticket id must be a positive integer"),
            "should explain the rejection: {body}"
        );
    }

    #[tokio::test]
    async fn root_redirects_to_the_ticket_listing() {
        let source = MockTicketSource::new();
        let app = app_with(source);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .body(String::new())
                    .expect("request should build"),
            )
            .await
            .expect("handler should respond");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get("location")
            .expect("should set location")
            .to_str()
            .expect("location should be ASCII");
        assert_eq!(location, "/tickets");
    }
}
