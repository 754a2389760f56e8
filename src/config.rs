//! Viewer configuration loaded from CLI, environment, and files.
//!
//! A single struct gathers every tunable the viewer accepts, merged from
//! command-line arguments, environment variables, and configuration files
//! through ortho-config's layering.
//!
//! # Precedence
//!
//! Values are merged with the following precedence (lowest to highest):
//!
//! 1. **Defaults** – built-in viewer defaults
//! 2. **Configuration file** – `.wicket.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `WICKET_SUBDOMAIN`, `WICKET_TOKEN`, etc.
//! 4. **Command-line arguments** – `--subdomain`/`-s`, `--token`/`-t`, etc.
//!
//! # Configuration File
//!
//! Drop a `.wicket.toml` into the current directory, your home directory,
//! or the XDG config directory:
//!
//! ```toml
//! subdomain = "acme"
//! email = "agent@example.com"
//! token = "zd_example"
//! listen_addr = "127.0.0.1:5000"
//! display_limit = 25
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::zendesk::account::{Account, AccountEmail, ApiToken, Credentials, Subdomain};
use crate::zendesk::error::SourceError;
use crate::zendesk::source::{
    DEFAULT_DISPLAY_LIMIT, DEFAULT_UPSTREAM_RETRIES, DEFAULT_UPSTREAM_TIMEOUT_SECS,
    MIN_DISPLAY_LIMIT, SourceOptions,
};

/// Address the viewer binds when `listen_addr` is not configured.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

/// Viewer configuration merged from CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `WICKET_SUBDOMAIN` or `--subdomain`: Account subdomain of the upstream
/// - `WICKET_API_BASE_URL` or `--api-base-url`: Explicit API base, overriding
///   subdomain derivation
/// - `WICKET_EMAIL` or `--email`: Account email for authentication
/// - `WICKET_TOKEN` or `--token`: API token for authentication
/// - `WICKET_LISTEN_ADDR` or `--listen-addr`: Address the HTTP server binds
/// - `WICKET_DISPLAY_LIMIT` or `--display-limit`: Tickets per page
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use wicket::WicketConfig;
///
/// let config = WicketConfig::load().expect("failed to load configuration");
/// let account = config.account().expect("account required");
/// let credentials = config.credentials().expect("credentials required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "WICKET",
    discovery(
        dotfile_name = ".wicket.toml",
        config_file_name = "wicket.toml",
        app_name = "wicket"
    )
)]
pub struct WicketConfig {
    /// Account subdomain of the hosted ticket service.
    ///
    /// Can be provided via:
    /// - CLI: `--subdomain <NAME>` or `-s <NAME>`
    /// - Environment: `WICKET_SUBDOMAIN`
    /// - Config file: `subdomain = "..."`
    #[ortho_config(cli_short = 's')]
    pub subdomain: Option<String>,

    /// Explicit API base URL, overriding subdomain derivation.
    ///
    /// Useful for self-hosted upstreams or a local stand-in server.
    ///
    /// Can be provided via:
    /// - CLI: `--api-base-url <URL>`
    /// - Environment: `WICKET_API_BASE_URL`
    /// - Config file: `api_base_url = "..."`
    pub api_base_url: Option<String>,

    /// Account email used for API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--email <EMAIL>` or `-e <EMAIL>`
    /// - Environment: `WICKET_EMAIL`
    /// - Config file: `email = "..."`
    #[ortho_config(cli_short = 'e')]
    pub email: Option<String>,

    /// API token presented alongside the email.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `WICKET_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Address and port the HTTP server binds.
    ///
    /// Can be provided via:
    /// - CLI: `--listen-addr <ADDR>` or `-l <ADDR>`
    /// - Environment: `WICKET_LISTEN_ADDR`
    /// - Config file: `listen_addr = "..."`
    #[ortho_config(cli_short = 'l')]
    pub listen_addr: Option<String>,

    /// Tickets shown per page; also the `per_page` sent upstream.
    ///
    /// Can be provided via:
    /// - CLI: `--display-limit <N>`
    /// - Environment: `WICKET_DISPLAY_LIMIT`
    /// - Config file: `display_limit = 25`
    pub display_limit: Option<u32>,

    /// Seconds before an upstream request is abandoned.
    ///
    /// Can be provided via:
    /// - CLI: `--upstream-timeout-secs <N>`
    /// - Environment: `WICKET_UPSTREAM_TIMEOUT_SECS`
    /// - Config file: `upstream_timeout_secs = 5`
    pub upstream_timeout_secs: Option<u64>,

    /// Transport-level retries after the initial attempt.
    ///
    /// Can be provided via:
    /// - CLI: `--upstream-retries <N>`
    /// - Environment: `WICKET_UPSTREAM_RETRIES`
    /// - Config file: `upstream_retries = 2`
    pub upstream_retries: Option<u32>,
}

impl WicketConfig {
    /// Resolves the upstream account from the explicit base URL or the
    /// subdomain, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Configuration`] when neither is configured and
    /// [`SourceError::InvalidUrl`] when the configured value is unusable.
    pub fn account(&self) -> Result<Account, SourceError> {
        if let Some(base) = self.api_base_url.as_deref() {
            return Account::from_base_url(base);
        }
        let subdomain = self
            .subdomain
            .as_deref()
            .ok_or_else(|| SourceError::Configuration {
                message: "upstream subdomain is required (use --subdomain or -s)".to_owned(),
            })?;
        Account::from_subdomain(&Subdomain::new(subdomain)?)
    }

    /// Pairs the configured email and token into credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Configuration`] when either half is missing or
    /// blank.
    pub fn credentials(&self) -> Result<Credentials, SourceError> {
        let email = self
            .email
            .as_deref()
            .ok_or_else(|| SourceError::Configuration {
                message: "account email is required (use --email or -e)".to_owned(),
            })?;
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| SourceError::Configuration {
                message: "API token is required (use --token or -t)".to_owned(),
            })?;
        Ok(Credentials::new(
            AccountEmail::new(email)?,
            ApiToken::new(token)?,
        ))
    }

    /// Builds the ticket source tuning, applying defaults and validation.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Configuration`] when `display_limit` is below
    /// the minimum or `upstream_timeout_secs` is zero.
    pub fn source_options(&self) -> Result<SourceOptions, SourceError> {
        let display_limit = self.display_limit.unwrap_or(DEFAULT_DISPLAY_LIMIT);
        if display_limit < MIN_DISPLAY_LIMIT {
            return Err(SourceError::Configuration {
                message: format!(
                    "display_limit must be at least {MIN_DISPLAY_LIMIT}, got {display_limit}"
                ),
            });
        }
        let timeout_secs = self
            .upstream_timeout_secs
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(SourceError::Configuration {
                message: "upstream_timeout_secs must be at least 1".to_owned(),
            });
        }
        Ok(SourceOptions {
            display_limit,
            timeout: Duration::from_secs(timeout_secs),
            retries: self.upstream_retries.unwrap_or(DEFAULT_UPSTREAM_RETRIES),
        })
    }

    /// Address the HTTP server should bind, defaulting to
    /// [`DEFAULT_LISTEN_ADDR`].
    #[must_use]
    pub fn resolve_listen_addr(&self) -> &str {
        self.listen_addr.as_deref().unwrap_or(DEFAULT_LISTEN_ADDR)
    }
}
