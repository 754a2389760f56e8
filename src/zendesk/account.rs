//! Identity wrappers for the upstream account, credentials, and ticket ids.

use std::fmt;

use url::Url;

use super::error::SourceError;

/// Hostname of the hosted ticket service that subdomains hang off.
const SERVICE_DOMAIN: &str = "zendesk.com";

/// Path prefix of the upstream REST API.
const API_PREFIX: &str = "api/v2";

/// Account subdomain wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subdomain(String);

impl Subdomain {
    /// Validates that the subdomain is non-empty and hostname-safe.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Configuration` when the value is blank or
    /// contains characters that cannot appear in a hostname label.
    pub fn new(value: &str) -> Result<Self, SourceError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SourceError::Configuration {
                message: "subdomain must not be empty".to_owned(),
            });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(SourceError::Configuration {
                message: format!("subdomain `{trimmed}` is not a valid hostname label"),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the subdomain value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Account email wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEmail(String);

impl AccountEmail {
    /// Validates that the email is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Configuration` when the supplied string is blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, SourceError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SourceError::Configuration {
                message: "account email must not be empty".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the email value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// API token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Configuration` when the supplied string is blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, SourceError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SourceError::Configuration {
                message: "API token must not be empty".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Email and token pair presented to the upstream as basic auth.
///
/// The upstream's token scheme expects the basic-auth username to be the
/// account email with a literal `/token` suffix and the password to be the
/// API token itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: AccountEmail,
    token: ApiToken,
}

impl Credentials {
    /// Pairs an account email with its API token.
    #[must_use]
    pub const fn new(email: AccountEmail, token: ApiToken) -> Self {
        Self { email, token }
    }

    /// Basic-auth username in the upstream's `email/token` form.
    pub(crate) fn username(&self) -> String {
        format!("{}/token", self.email.as_str())
    }

    /// Basic-auth password.
    pub(crate) const fn secret(&self) -> &str {
        self.token.as_str()
    }
}

/// Identifier of a single ticket, restricted to positive decimal integers.
///
/// Ids arrive as path segments from untrusted callers, so the wrapper
/// validates the shape before the value is interpolated into an upstream
/// URL.
///
/// # Example
///
/// ```
/// use wicket::zendesk::TicketId;
///
/// let id = TicketId::new("35").expect("should accept a decimal id");
/// assert_eq!(id.as_str(), "35");
/// assert!(TicketId::new("35; DROP").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketId(String);

impl TicketId {
    /// Validates that the id is one or more ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidTicketId` when the value is empty or
    /// contains anything other than decimal digits.
    pub fn new(value: &str) -> Result<Self, SourceError> {
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(SourceError::InvalidTicketId);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the id value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream account with its derived API base URL.
///
/// # Example
///
/// ```
/// use wicket::zendesk::{Account, Subdomain};
///
/// let subdomain = Subdomain::new("acme").expect("should accept subdomain");
/// let account = Account::from_subdomain(&subdomain).expect("should derive base");
/// assert_eq!(account.api_base().as_str(), "https://acme.zendesk.com/api/v2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    api_base: Url,
}

impl Account {
    /// Derives the API base URL for a hosted account subdomain.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidUrl` when the derived URL fails to parse.
    pub fn from_subdomain(subdomain: &Subdomain) -> Result<Self, SourceError> {
        let api_base = Url::parse(&format!(
            "https://{}.{SERVICE_DOMAIN}/{API_PREFIX}",
            subdomain.as_str()
        ))
        .map_err(|error| SourceError::InvalidUrl(error.to_string()))?;
        Ok(Self { api_base })
    }

    /// Uses an explicit API base URL, bypassing subdomain derivation.
    ///
    /// Intended for self-hosted upstreams and for pointing the viewer at a
    /// stand-in server during development.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidUrl` when the value is not an absolute
    /// `http` or `https` URL.
    pub fn from_base_url(value: &str) -> Result<Self, SourceError> {
        let api_base =
            Url::parse(value.trim()).map_err(|error| SourceError::InvalidUrl(error.to_string()))?;
        if !matches!(api_base.scheme(), "http" | "https") {
            return Err(SourceError::InvalidUrl(format!(
                "API base URL must use http or https, got `{}`",
                api_base.scheme()
            )));
        }
        if api_base.host_str().is_none() {
            return Err(SourceError::InvalidUrl(
                "API base URL must include a host".to_owned(),
            ));
        }
        Ok(Self { api_base })
    }

    /// API base URL all endpoints are resolved against.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Endpoint listing the account's tickets, trailing slash included.
    pub(crate) fn tickets_endpoint(&self) -> Url {
        let mut url = self.api_base.clone();
        let prefix = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{prefix}/tickets/"));
        url
    }

    /// Endpoint describing one ticket.
    pub(crate) fn ticket_endpoint(&self, id: &TicketId) -> Url {
        let mut url = self.api_base.clone();
        let prefix = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{prefix}/tickets/{id}"));
        url
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("acme")]
    #[case(" acme ")]
    #[case("acme-support")]
    fn subdomain_accepts_hostname_labels(#[case] input: &str) {
        let subdomain = Subdomain::new(input).expect("should accept label");
        assert_eq!(subdomain.as_str(), input.trim());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("acme.evil.example")]
    #[case("acme/path")]
    fn subdomain_rejects_unsafe_values(#[case] input: &str) {
        assert!(matches!(
            Subdomain::new(input),
            Err(SourceError::Configuration { .. })
        ));
    }

    #[test]
    fn subdomain_derives_hosted_api_base() {
        let subdomain = Subdomain::new("acme").expect("should accept subdomain");
        let account = Account::from_subdomain(&subdomain).expect("should derive base");
        assert_eq!(account.api_base().as_str(), "https://acme.zendesk.com/api/v2");
    }

    #[test]
    fn explicit_base_url_overrides_derivation() {
        let account =
            Account::from_base_url("http://127.0.0.1:3999").expect("should accept override");
        assert_eq!(
            account.tickets_endpoint().as_str(),
            "http://127.0.0.1:3999/tickets/"
        );
    }

    #[rstest]
    #[case("ftp://example.com")]
    #[case("not a url")]
    #[case("data:text/plain,hello")]
    fn base_url_rejects_non_http_schemes(#[case] input: &str) {
        assert!(matches!(
            Account::from_base_url(input),
            Err(SourceError::InvalidUrl(_))
        ));
    }

    #[test]
    fn endpoints_preserve_the_api_prefix() {
        let subdomain = Subdomain::new("acme").expect("should accept subdomain");
        let account = Account::from_subdomain(&subdomain).expect("should derive base");
        let id = TicketId::new("35").expect("should accept id");
        assert_eq!(
            account.tickets_endpoint().as_str(),
            "https://acme.zendesk.com/api/v2/tickets/"
        );
        assert_eq!(
            account.ticket_endpoint(&id).as_str(),
            "https://acme.zendesk.com/api/v2/tickets/35"
        );
    }

    #[rstest]
    #[case("1")]
    #[case("35")]
    #[case("007")]
    fn ticket_id_accepts_decimal_digits(#[case] input: &str) {
        let id = TicketId::new(input).expect("should accept digits");
        assert_eq!(id.as_str(), input);
    }

    #[rstest]
    #[case("")]
    #[case("-1")]
    #[case("35a")]
    #[case("one")]
    #[case("1 OR 1")]
    fn ticket_id_rejects_non_digits(#[case] input: &str) {
        assert!(matches!(
            TicketId::new(input),
            Err(SourceError::InvalidTicketId)
        ));
    }

    #[test]
    fn credentials_build_the_token_username() {
        let email = AccountEmail::new("agent@example.com").expect("should accept email");
        let token = ApiToken::new("s3cr3t").expect("should accept token");
        let credentials = Credentials::new(email, token);
        assert_eq!(credentials.username(), "agent@example.com/token");
        assert_eq!(credentials.secret(), "s3cr3t");
    }

    #[rstest]
    #[case("", "token")]
    #[case("agent@example.com", "")]
    #[case("  ", "s3cr3t")]
    fn credentials_require_both_parts(#[case] email: &str, #[case] token: &str) {
        let outcome = AccountEmail::new(email)
            .and_then(|validated_email| ApiToken::new(token).map(|t| (validated_email, t)));
        assert!(matches!(
            outcome,
            Err(SourceError::Configuration { .. })
        ));
    }
}
