//! The GrDF portal client.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use gazpar_core::{
    ConsumptionProvider, ConsumptionRecord, Credentials, DateRange, YearOverYear,
};
use gazpar_fetch::{HttpClient, RetryPolicy};

use crate::endpoints::Endpoints;
use crate::error::GrdfError;
use crate::handshake;
use crate::legacy;
use crate::session::Session;

// ============================================================================
// Constants
// ============================================================================

/// Pause between the two queries of a year-over-year comparison.
///
/// A throttle, not a protocol requirement; the portal rate-limits
/// back-to-back data queries.
const DEFAULT_COURTESY_DELAY: Duration = Duration::from_secs(5);

/// Cap on consecutive session re-establishments within one query.
///
/// The portal answering 401/403 right after a successful handshake means
/// re-authenticating is not going to help; give up instead of looping.
const MAX_SESSION_REFRESHES: u32 = 3;

/// JSON key holding the record list inside a consumption response.
const RECORDS_KEY: &str = "releves";

// ============================================================================
// Login Flow Selection
// ============================================================================

/// Which login flow a client runs when it needs a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginFlow {
    /// The Okta identity-provider handshake. The portal's current flow.
    #[default]
    Okta,
    /// Deprecated: the profile-based sofit login kept for accounts not
    /// yet migrated to the identity provider.
    LegacySofit,
}

// ============================================================================
// Client
// ============================================================================

/// A client for one GrDF account.
///
/// Owns its HTTP transport (and with it the cookie jar), its session
/// state, and the credentials it authenticates with. All operations are
/// sequential; a client wanting parallel queries runs separate instances.
///
/// # Example
///
/// ```ignore
/// let mut client = GrdfClient::new(Credentials::new(email, password))?;
/// let records = client
///     .fetch_consumption(DateRange::last_days(8))
///     .await?;
/// ```
#[derive(Debug)]
pub struct GrdfClient {
    credentials: Credentials,
    http: HttpClient,
    endpoints: Endpoints,
    session: Session,
    login_flow: LoginFlow,
    retry: RetryPolicy,
    courtesy_delay: Duration,
}

impl GrdfClient {
    /// Creates a client for the given credentials against the production
    /// portal.
    ///
    /// # Errors
    ///
    /// Returns [`GrdfError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn new(credentials: Credentials) -> Result<Self, GrdfError> {
        Ok(Self {
            credentials,
            http: HttpClient::new()?,
            endpoints: Endpoints::default(),
            session: Session::default(),
            login_flow: LoginFlow::default(),
            retry: RetryPolicy::default(),
            courtesy_delay: DEFAULT_COURTESY_DELAY,
        })
    }

    /// Selects the login flow. Defaults to [`LoginFlow::Okta`].
    pub fn with_login_flow(mut self, flow: LoginFlow) -> Self {
        self.login_flow = flow;
        self
    }

    /// Overrides the portal endpoints.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the retry policy for rate-limited queries.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the pause between the two year-over-year queries.
    pub fn with_courtesy_delay(mut self, delay: Duration) -> Self {
        self.courtesy_delay = delay;
        self
    }

    /// Returns the cached delivery-point id, if a handshake has run.
    pub fn pce(&self) -> Option<&str> {
        self.session.pce()
    }

    /// Establishes the session if there is none.
    ///
    /// A no-op when already authenticated; otherwise runs the configured
    /// login flow once and caches the delivery-point id.
    ///
    /// # Errors
    ///
    /// Propagates the flow's [`HandshakeError`](crate::HandshakeError) or
    /// [`ExtractionError`](crate::ExtractionError) unchanged.
    #[instrument(skip(self))]
    pub async fn ensure_authenticated(&mut self) -> Result<(), GrdfError> {
        self.authenticated_pce().await.map(|_| ())
    }

    /// Drops the session flag; the next operation re-runs the login flow.
    pub fn invalidate(&mut self) {
        self.session.invalidate();
    }

    /// Like [`ensure_authenticated`](Self::ensure_authenticated) but hands
    /// back the delivery-point id, so callers never query without one.
    async fn authenticated_pce(&mut self) -> Result<String, GrdfError> {
        if self.session.is_authenticated() {
            if let Some(pce) = self.session.pce() {
                return Ok(pce.to_owned());
            }
        }

        let pce = match self.login_flow {
            LoginFlow::Okta => {
                handshake::run(&self.http, &self.endpoints, &self.credentials).await?
            }
            LoginFlow::LegacySofit => {
                legacy::run(&self.http, &self.endpoints, &self.credentials).await?
            }
        };
        self.session.establish(pce.clone());
        debug!("Session established");
        Ok(pce)
    }

    /// Fetches consumption records for a date range.
    ///
    /// Classifies the portal's answer: 401/403 mean the session expired
    /// and trigger a transparent re-login and retry; 429 backs off
    /// linearly within the configured retry budget; anything else
    /// non-success fails immediately.
    ///
    /// # Errors
    ///
    /// [`GrdfError::RateLimitExceeded`] when the 429 budget runs out,
    /// [`GrdfError::SessionRefreshLoop`] when the portal keeps rejecting
    /// fresh sessions, [`GrdfError::UnexpectedStatus`] for unclassified
    /// statuses, plus any login-flow error.
    #[instrument(skip(self), fields(start = %range.start, end = %range.end))]
    pub async fn fetch_consumption(
        &mut self,
        range: DateRange,
    ) -> Result<Vec<ConsumptionRecord>, GrdfError> {
        let mut pce = self.authenticated_pce().await?;
        let mut rate_attempt: u32 = 0;
        let mut refreshes: u32 = 0;

        loop {
            let start = range.start.to_string();
            let end = range.end.to_string();
            let query = [
                ("dateDebut", start.as_str()),
                ("dateFin", end.as_str()),
                ("pceList[]", pce.as_str()),
            ];
            let response = self
                .http
                .get_with(
                    &self.endpoints.consumption_url(),
                    &query,
                    self.endpoints.portal_headers()?,
                )
                .await?;
            let status = response.status();

            if status.is_success() {
                let body: Value = response.json().await?;
                return shape_records(&body, &pce);
            }

            match status.as_u16() {
                401 | 403 => {
                    // Session expiry: re-login and replay the query. This
                    // path does not consume the 429 retry budget.
                    if refreshes >= MAX_SESSION_REFRESHES {
                        return Err(GrdfError::SessionRefreshLoop { refreshes });
                    }
                    refreshes += 1;
                    warn!(%status, refreshes, "Session rejected, re-authenticating");
                    self.invalidate();
                    pce = self.authenticated_pce().await?;
                }
                429 => {
                    if !self.retry.has_attempts_after(rate_attempt) {
                        return Err(GrdfError::RateLimitExceeded {
                            attempts: rate_attempt + 1,
                        });
                    }
                    let delay = self.retry.delay_for_attempt(rate_attempt);
                    warn!(delay_ms = delay.as_millis() as u64, "Rate limited, backing off");
                    tokio::time::sleep(delay).await;
                    rate_attempt += 1;
                }
                _ => return Err(GrdfError::UnexpectedStatus(status)),
            }
        }
    }

    /// Fetches the last `window_days` days alongside the same window one
    /// year earlier.
    ///
    /// Issues exactly two data queries, separated by the courtesy delay.
    ///
    /// # Errors
    ///
    /// Propagates whatever [`fetch_consumption`](Self::fetch_consumption)
    /// raises for either window.
    #[instrument(skip(self))]
    pub async fn fetch_year_over_year(
        &mut self,
        window_days: u64,
    ) -> Result<YearOverYear, GrdfError> {
        let current_range = DateRange::last_days(window_days);
        let current = self.fetch_consumption(current_range).await?;

        tokio::time::sleep(self.courtesy_delay).await;

        let previous = self
            .fetch_consumption(current_range.shifted_back(365))
            .await?;

        Ok(YearOverYear { current, previous })
    }
}

impl ConsumptionProvider for GrdfClient {
    type Error = GrdfError;

    async fn fetch_consumption(
        &mut self,
        range: DateRange,
    ) -> Result<Vec<ConsumptionRecord>, GrdfError> {
        GrdfClient::fetch_consumption(self, range).await
    }

    async fn fetch_year_over_year(
        &mut self,
        window_days: u64,
    ) -> Result<YearOverYear, GrdfError> {
        GrdfClient::fetch_year_over_year(self, window_days).await
    }
}

// ============================================================================
// Response Shaping
// ============================================================================

/// Pulls the record list keyed by the delivery point out of a consumption
/// response.
///
/// A response without the account key or the record list means "no data
/// for this range" and yields an empty list, never an error.
fn shape_records(body: &Value, pce: &str) -> Result<Vec<ConsumptionRecord>, GrdfError> {
    match body.get(pce).and_then(|account| account.get(RECORDS_KEY)) {
        Some(records) => Ok(serde_json::from_value(records.clone())?),
        None => Ok(Vec::new()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_records() {
        let body = json!({
            "PCE1": {
                "idPce": "PCE1",
                "releves": [
                    {"journeeGaziere": "2024-01-01", "energieConsomme": 12.5},
                    {"journeeGaziere": "2024-01-02", "energieConsomme": 9.0}
                ]
            }
        });
        let records = shape_records(&body, "PCE1").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].gas_day.to_string(), "2024-01-01");
        assert!((records[0].energy_kwh - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shape_records_missing_account_key() {
        let body = json!({"OTHER": {"releves": []}});
        assert!(shape_records(&body, "PCE1").unwrap().is_empty());
    }

    #[test]
    fn test_shape_records_missing_record_list() {
        let body = json!({"PCE1": {"idPce": "PCE1"}});
        assert!(shape_records(&body, "PCE1").unwrap().is_empty());
    }

    #[test]
    fn test_shape_records_malformed_entry_is_an_error() {
        let body = json!({"PCE1": {"releves": [{"journeeGaziere": "not-a-date"}]}});
        assert!(matches!(
            shape_records(&body, "PCE1"),
            Err(GrdfError::Json(_))
        ));
    }

    #[test]
    fn test_login_flow_default_is_okta() {
        assert_eq!(LoginFlow::default(), LoginFlow::Okta);
    }
}
