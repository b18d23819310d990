//! Endpoint configuration for the GrDF hosts.

use reqwest::header::{HeaderMap, HeaderValue, CONNECTION, HOST};
use url::Url;

use crate::error::GrdfError;
use gazpar_fetch::FetchError;

/// Default customer portal base URL.
const PORTAL_BASE: &str = "https://monespace.grdf.fr";

/// Default identity provider base URL.
const AUTH_BASE: &str = "https://connexion.grdf.fr";

/// Default legacy login host base URL.
const LOGIN_BASE: &str = "https://login.monespace.grdf.fr";

/// Identify endpoint path on the identity provider.
const IDENTIFY_PATH: &str = "/idp/idx/identify";

/// Challenge-answer endpoint path on the identity provider.
const CHALLENGE_PATH: &str = "/idp/idx/challenge/answer";

/// Delivery-point listing path on the portal API.
const ACCOUNTS_PATH: &str = "/api/e-conso/pce";

/// Consumption query path on the portal API.
const CONSUMPTION_PATH: &str = "/api/e-conso/pce/consommation/informatives";

/// Legacy auth path on the login host.
const LEGACY_AUTH_PATH: &str = "/sofit-account-api/api/v1/auth";

/// Base URLs of the three GrDF hosts a login flow touches.
///
/// Defaults target the production portal. Overriding the bases lets a test
/// suite stand a local server in for the portal; nothing else about the
/// request shapes changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Customer portal (entry page, accounts, consumption API).
    pub portal_base: String,
    /// Identity provider (identify/challenge steps).
    pub auth_base: String,
    /// Legacy login host (sofit auth endpoint).
    pub login_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            portal_base: PORTAL_BASE.to_owned(),
            auth_base: AUTH_BASE.to_owned(),
            login_base: LOGIN_BASE.to_owned(),
        }
    }
}

impl Endpoints {
    /// Points all three hosts at one base URL.
    pub fn single_host(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            portal_base: base.clone(),
            auth_base: base.clone(),
            login_base: base,
        }
    }

    /// Entry page URL.
    pub(crate) fn entry_page_url(&self) -> String {
        format!("{}/", self.portal_base)
    }

    /// Identify endpoint URL.
    pub(crate) fn identify_url(&self) -> String {
        format!("{}{IDENTIFY_PATH}", self.auth_base)
    }

    /// Challenge-answer endpoint URL.
    pub(crate) fn challenge_url(&self) -> String {
        format!("{}{CHALLENGE_PATH}", self.auth_base)
    }

    /// Delivery-point listing URL.
    pub(crate) fn accounts_url(&self) -> String {
        format!("{}{ACCOUNTS_PATH}", self.portal_base)
    }

    /// Consumption query URL.
    pub(crate) fn consumption_url(&self) -> String {
        format!("{}{CONSUMPTION_PATH}", self.portal_base)
    }

    /// Legacy auth URL.
    pub(crate) fn legacy_auth_url(&self) -> String {
        format!("{}{LEGACY_AUTH_PATH}", self.login_base)
    }

    /// Headers targeting the portal host for the data-API phase.
    ///
    /// The portal's gateway routes on explicit `Host`/`Connection` headers
    /// once the session cookies are in play.
    pub(crate) fn portal_headers(&self) -> Result<HeaderMap, GrdfError> {
        let host = Url::parse(&self.portal_base)
            .map_err(FetchError::InvalidUrl)?
            .host_str()
            .ok_or_else(|| {
                FetchError::InvalidHeader(format!("no host in {}", self.portal_base))
            })?
            .to_owned();

        let mut headers = HeaderMap::new();
        headers.insert(
            HOST,
            HeaderValue::from_str(&host)
                .map_err(|e| FetchError::InvalidHeader(e.to_string()))?,
        );
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.entry_page_url(),
            "https://monespace.grdf.fr/"
        );
        assert_eq!(
            endpoints.identify_url(),
            "https://connexion.grdf.fr/idp/idx/identify"
        );
        assert_eq!(
            endpoints.challenge_url(),
            "https://connexion.grdf.fr/idp/idx/challenge/answer"
        );
        assert_eq!(
            endpoints.accounts_url(),
            "https://monespace.grdf.fr/api/e-conso/pce"
        );
        assert_eq!(
            endpoints.consumption_url(),
            "https://monespace.grdf.fr/api/e-conso/pce/consommation/informatives"
        );
        assert_eq!(
            endpoints.legacy_auth_url(),
            "https://login.monespace.grdf.fr/sofit-account-api/api/v1/auth"
        );
    }

    #[test]
    fn test_single_host() {
        let endpoints = Endpoints::single_host("http://127.0.0.1:9999");
        assert_eq!(
            endpoints.identify_url(),
            "http://127.0.0.1:9999/idp/idx/identify"
        );
        assert_eq!(
            endpoints.accounts_url(),
            "http://127.0.0.1:9999/api/e-conso/pce"
        );
    }

    #[test]
    fn test_portal_headers_carry_host() {
        let headers = Endpoints::default().portal_headers().unwrap();
        assert_eq!(headers.get("host").unwrap(), "monespace.grdf.fr");
        assert_eq!(headers.get("connection").unwrap(), "keep-alive");
    }
}
