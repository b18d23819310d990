//! Legacy profile-based login.
//!
//! Deprecated alternate to the Okta handshake: a single form POST against
//! the sofit account API, kept for accounts that have not been migrated
//! to the identity provider. Selected with
//! [`LoginFlow::LegacySofit`](crate::LoginFlow::LegacySofit); new code
//! should rely on the default Okta flow.

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use gazpar_core::Credentials;
use gazpar_fetch::HttpClient;

use crate::endpoints::Endpoints;
use crate::error::{GrdfError, HandshakeError};
use crate::handshake;

// ============================================================================
// Constants
// ============================================================================

/// Client application identifier the portal expects.
const CAPP: &str = "meg";

/// OAuth authorize URL the auth endpoint redirects through on success.
const GOTO: &str = "https://sofa-connexion.grdf.fr:443/openam/oauth2/externeGrdf/authorize\
    ?response_type=code&scope=openid%20profile%20email%20infotravaux%20%2Fv1%2Faccreditation\
    %20%2Fv1%2Faccreditations%20%2Fdigiconso%2Fv1%20%2Fdigiconso%2Fv1%2Fconsommations%20new_meg\
    &client_id=prod_espaceclient&state=0&redirect_uri=https%3A%2F%2Fmonespace.grdf.fr%2F_codexch\
    &by_pass_okta=1&capp=meg";

/// The `state` value that signals an accepted login.
const STATE_SUCCESS: &str = "SUCCESS";

// ============================================================================
// Wire Types
// ============================================================================

/// Form body of the sofit auth endpoint.
#[derive(Debug, Serialize)]
struct SofitAuthRequest<'a> {
    email: &'a str,
    password: &'a str,
    capp: &'a str,
    goto: &'a str,
}

/// Response of the sofit auth endpoint.
#[derive(Debug, Deserialize)]
struct SofitAuthResponse {
    state: String,
}

// ============================================================================
// Login
// ============================================================================

/// Runs the legacy login and returns the first delivery-point id.
#[instrument(skip_all)]
pub(crate) async fn run(
    http: &HttpClient,
    endpoints: &Endpoints,
    credentials: &Credentials,
) -> Result<String, GrdfError> {
    let mut headers = HeaderMap::new();
    headers.insert("domain", HeaderValue::from_static("grdf.fr"));

    let response = http
        .post_form(
            &endpoints.legacy_auth_url(),
            &SofitAuthRequest {
                email: credentials.username(),
                password: credentials.secret(),
                capp: CAPP,
                goto: GOTO,
            },
            headers,
        )
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(HandshakeError::LegacyAuth { status }.into());
    }

    let auth: SofitAuthResponse = response.json().await?;
    if auth.state != STATE_SUCCESS {
        warn!(state = %auth.state, "Legacy auth rejected");
        return Err(HandshakeError::LegacyRejected { state: auth.state }.into());
    }
    debug!("Legacy auth accepted");

    // The first API call after auth only answers with the cookie-setting
    // redirect chain; its body is discarded and the checked lookup follows.
    let _ = http
        .get_with(&endpoints.accounts_url(), &[], endpoints.portal_headers()?)
        .await?;

    handshake::lookup_first_pce(http, endpoints).await
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_request_wire_shape() {
        let body = serde_json::to_value(SofitAuthRequest {
            email: "user@example.com",
            password: "pw",
            capp: CAPP,
            goto: GOTO,
        })
        .unwrap();
        assert_eq!(body["email"], "user@example.com");
        assert_eq!(body["capp"], "meg");
        // The goto target carries the okta bypass that keeps this flow on
        // the old identity stack.
        assert!(body["goto"].as_str().unwrap().contains("by_pass_okta=1"));
    }

    #[test]
    fn test_auth_response_states() {
        let ok: SofitAuthResponse =
            serde_json::from_str(r#"{"state": "SUCCESS", "displayName": "J. Doe"}"#).unwrap();
        assert_eq!(ok.state, STATE_SUCCESS);

        let rejected: SofitAuthResponse =
            serde_json::from_str(r#"{"state": "FAILED_AUTH"}"#).unwrap();
        assert_ne!(rejected.state, STATE_SUCCESS);
    }
}
