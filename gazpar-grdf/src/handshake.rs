//! The four-step identity handshake.
//!
//! Converts credentials into an authenticated session by walking the
//! portal's Okta IDX flow the way a browser would:
//!
//! 1. **Initialize** - GET the entry page, scrape the state token
//! 2. **Identify** - POST the token and the account email
//! 3. **Challenge** - POST the password against the returned state handle
//! 4. **Finalize** - follow the success redirect, then look up the
//!    delivery point
//!
//! Stages are strictly ordered and non-retryable here; retry policy
//! belongs to the caller. Every step mutates the shared cookie jar, and
//! later data queries depend on exactly that.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use gazpar_core::Credentials;
use gazpar_fetch::HttpClient;

use crate::endpoints::Endpoints;
use crate::error::{GrdfError, HandshakeError};
use crate::okta;

// ============================================================================
// Wire Types
// ============================================================================

/// Body of the identify step.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifyRequest<'a> {
    state_handle: &'a str,
    identifier: &'a str,
}

/// Response of the identify step. Only the chained handle matters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentifyResponse {
    state_handle: Option<String>,
}

/// Body of the challenge-answer step.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChallengeRequest<'a> {
    credentials: Passcode<'a>,
    state_handle: &'a str,
}

/// The credential envelope of the challenge-answer step.
#[derive(Debug, Serialize)]
struct Passcode<'a> {
    passcode: &'a str,
}

/// Response of the challenge-answer step.
#[derive(Debug, Deserialize)]
struct ChallengeResponse {
    success: Option<SuccessRedirect>,
}

/// The redirect target that finalizes the session.
#[derive(Debug, Deserialize)]
struct SuccessRedirect {
    href: String,
}

/// One entry of the delivery-point listing.
#[derive(Debug, Deserialize)]
struct DeliveryPoint {
    pce: String,
}

// ============================================================================
// Handshake
// ============================================================================

/// Runs the full handshake and returns the first delivery-point id.
///
/// On any stage failure the session stays unauthenticated; cookies
/// accumulated up to that point are harmless leftovers the next attempt
/// overwrites.
#[instrument(skip_all)]
pub(crate) async fn run(
    http: &HttpClient,
    endpoints: &Endpoints,
    credentials: &Credentials,
) -> Result<String, GrdfError> {
    // Initialize: the entry page embeds the state token.
    let response = http.get(&endpoints.entry_page_url()).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(HandshakeError::EntryPage { status }.into());
    }
    let page = response.text().await?;
    let state_token = okta::extract_state_token(&page)?;
    debug!("Initialize step complete");

    // Identify: submit the account email against the state token.
    let response = http
        .post_json(
            &endpoints.identify_url(),
            &IdentifyRequest {
                state_handle: &state_token,
                identifier: credentials.username(),
            },
        )
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(HandshakeError::Identify { status }.into());
    }
    let identify: IdentifyResponse = response.json().await?;
    let state_handle = identify
        .state_handle
        .ok_or(HandshakeError::MissingStateHandle)?;
    debug!("Identify step complete");

    // Challenge: answer with the password.
    let response = http
        .post_json(
            &endpoints.challenge_url(),
            &ChallengeRequest {
                credentials: Passcode {
                    passcode: credentials.secret(),
                },
                state_handle: &state_handle,
            },
        )
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(HandshakeError::Challenge { status }.into());
    }
    let challenge: ChallengeResponse = response.json().await?;
    let redirect = challenge
        .success
        .map(|s| s.href)
        .ok_or(HandshakeError::MissingRedirect)?;
    debug!("Challenge step complete");

    // Finalize: following the redirect drops the session cookies into the
    // jar; the status of the landing page itself is irrelevant.
    http.get(&redirect).await?;
    debug!("Session cookies established");

    lookup_first_pce(http, endpoints).await
}

/// Fetches the delivery-point listing and returns the first id.
pub(crate) async fn lookup_first_pce(
    http: &HttpClient,
    endpoints: &Endpoints,
) -> Result<String, GrdfError> {
    let headers = endpoints.portal_headers()?;
    let response = http
        .get_with(&endpoints.accounts_url(), &[], headers)
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(HandshakeError::AccountLookup { status }.into());
    }

    let points: Vec<DeliveryPoint> = response.json().await?;
    let pce = points
        .into_iter()
        .next()
        .map(|p| p.pce)
        .ok_or(HandshakeError::NoAccounts)?;
    debug!("Delivery point resolved");
    Ok(pce)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_request_wire_shape() {
        let body = serde_json::to_value(IdentifyRequest {
            state_handle: "tok",
            identifier: "user@example.com",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"stateHandle": "tok", "identifier": "user@example.com"})
        );
    }

    #[test]
    fn test_challenge_request_wire_shape() {
        let body = serde_json::to_value(ChallengeRequest {
            credentials: Passcode { passcode: "pw" },
            state_handle: "handle",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"credentials": {"passcode": "pw"}, "stateHandle": "handle"})
        );
    }

    #[test]
    fn test_identify_response_with_handle() {
        let parsed: IdentifyResponse = serde_json::from_str(
            r#"{"version": "1.0.0", "stateHandle": "02.handle", "expiresAt": "2024-01-01T00:10:00Z"}"#,
        )
        .unwrap();
        assert_eq!(parsed.state_handle.as_deref(), Some("02.handle"));
    }

    #[test]
    fn test_identify_response_without_handle() {
        let parsed: IdentifyResponse =
            serde_json::from_str(r#"{"messages": {"type": "array"}}"#).unwrap();
        assert!(parsed.state_handle.is_none());
    }

    #[test]
    fn test_challenge_response_with_redirect() {
        let parsed: ChallengeResponse = serde_json::from_str(
            r#"{"success": {"name": "success-redirect", "href": "https://example/login/token/redirect?stateToken=x"}}"#,
        )
        .unwrap();
        assert_eq!(
            parsed.success.unwrap().href,
            "https://example/login/token/redirect?stateToken=x"
        );
    }

    #[test]
    fn test_challenge_response_without_redirect() {
        let parsed: ChallengeResponse =
            serde_json::from_str(r#"{"stateHandle": "02.handle"}"#).unwrap();
        assert!(parsed.success.is_none());
    }

    #[test]
    fn test_delivery_point_listing() {
        let points: Vec<DeliveryPoint> = serde_json::from_str(
            r#"[{"pce": "PCE1", "alias": "Maison", "codePostal": "75011"}, {"pce": "PCE2"}]"#,
        )
        .unwrap();
        assert_eq!(points[0].pce, "PCE1");
        assert_eq!(points.len(), 2);
    }
}
