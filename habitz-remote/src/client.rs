//! Backend client — single-attempt calls against the hosted backend.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use habitz_core::config::RemoteConfig;
use habitz_core::types::{CompletionEvent, UserId};

use crate::error::RemoteError;
use crate::types::{AwardBreakdown, LedgerRow, WriteReceipt};

/// Where ledger and RPC traffic goes.
#[derive(Debug, Clone)]
pub enum BackendProvider {
    /// The hosted backend (production and staging).
    Hosted {
        /// Base URL, without a trailing slash.
        base_url: String,
        /// API key sent as both `apikey` and bearer token. Empty means
        /// unauthenticated (local development stacks).
        api_key: String,
    },
    /// No backend — every call returns [`RemoteError::Unavailable`].
    None,
}

/// The HTTP client for all progression traffic.
///
/// Performs exactly one attempt per call; retry and fallback policy live in
/// the award engine.
pub struct BackendClient {
    provider: BackendProvider,
    http: Client,
    timeout_ms: u64,
}

impl BackendClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(provider: BackendProvider, timeout_ms: u64) -> Self {
        Self {
            provider,
            http: Client::new(),
            timeout_ms,
        }
    }

    /// Build a client from the `[remote]` configuration section.
    #[must_use]
    pub fn from_config(config: &RemoteConfig) -> Self {
        Self::new(
            BackendProvider::Hosted {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key: config.api_key.clone(),
            },
            config.request_timeout_ms,
        )
    }

    /// Create a client with no backend (all calls fail).
    #[must_use]
    pub fn none() -> Self {
        Self {
            provider: BackendProvider::None,
            http: Client::new(),
            timeout_ms: 0,
        }
    }

    /// Check whether a backend is configured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self.provider, BackendProvider::None)
    }

    fn hosted(&self) -> Result<(&str, &str), RemoteError> {
        match &self.provider {
            BackendProvider::Hosted { base_url, api_key } => Ok((base_url, api_key)),
            BackendProvider::None => Err(RemoteError::Unavailable(
                "No backend provider configured".into(),
            )),
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder, api_key: &str) -> reqwest::RequestBuilder {
        let builder = builder.timeout(Duration::from_millis(self.timeout_ms));
        if api_key.is_empty() {
            builder
        } else {
            builder
                .header("apikey", api_key)
                .header("Authorization", format!("Bearer {api_key}"))
        }
    }

    // ------------------------------------------------------------------
    // XP resolution RPC
    // ------------------------------------------------------------------

    /// Ask the backend to compute the XP grant for a completion.
    ///
    /// The RPC is a pure computation over already-stored completion facts
    /// (streak length, completions today, habits due today), so calling it
    /// again for the same inputs has no side effects.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] on transport failure, a non-success status,
    /// or an unparseable body. A response missing the XP amount parses
    /// successfully — the caller inspects [`AwardBreakdown::xp`].
    pub async fn resolve_award(
        &self,
        user: &UserId,
        event: &CompletionEvent,
    ) -> Result<AwardBreakdown, RemoteError> {
        let (base_url, api_key) = self.hosted()?;
        let url = format!("{base_url}/rpc/resolve_completion_xp");
        let body = json!({
            "user_id": user,
            "habit_id": event.habit,
            "completed_on": event.completed_on,
        });

        debug!(%user, habit = %event.habit, "Resolving completion XP");
        let resp = self
            .request(self.http.post(&url), api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            warn!(%status, "XP resolution RPC returned error");
            return Err(RemoteError::RequestFailed(format!("HTTP {status}: {text}")));
        }

        resp.json::<AwardBreakdown>()
            .await
            .map_err(|e| RemoteError::ParseError(e.to_string()))
    }

    // ------------------------------------------------------------------
    // XP ledger
    // ------------------------------------------------------------------

    /// Read the user's current ledger row.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::LedgerMissing`] when the user has no row, or a
    /// transport/parse error otherwise.
    pub async fn read_ledger(&self, user: &UserId) -> Result<LedgerRow, RemoteError> {
        let (base_url, api_key) = self.hosted()?;
        let url = format!(
            "{base_url}/rest/v1/xp_ledger?user_id=eq.{user}&select=total_xp,current_level"
        );

        let resp = self.request(self.http.get(&url), api_key).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(RemoteError::RequestFailed(format!("HTTP {status}")));
        }

        let rows: Vec<LedgerRow> = resp
            .json()
            .await
            .map_err(|e| RemoteError::ParseError(e.to_string()))?;

        rows.first()
            .copied()
            .ok_or_else(|| RemoteError::LedgerMissing(user.to_string()))
    }

    /// Write a new ledger total, conditioned on the total the caller last
    /// read.
    ///
    /// The filter `total_xp=eq.{expected}` makes the update a compare-and-swap:
    /// if another writer moved the total first, no row matches and this
    /// returns [`RemoteError::Conflict`]. On success the backend derives the
    /// new `current_level` (row trigger) and returns the updated row.
    ///
    /// # Errors
    ///
    /// [`RemoteError::Conflict`] when the precondition no longer holds; a
    /// transport/parse error otherwise.
    pub async fn write_ledger(
        &self,
        user: &UserId,
        new_total: u64,
        expected_total: u64,
    ) -> Result<WriteReceipt, RemoteError> {
        let (base_url, api_key) = self.hosted()?;
        let url = format!(
            "{base_url}/rest/v1/xp_ledger?user_id=eq.{user}&total_xp=eq.{expected_total}"
        );
        let body = json!({ "total_xp": new_total });

        debug!(%user, new_total, expected_total, "Writing ledger total");
        let resp = self
            .request(self.http.patch(&url), api_key)
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            warn!(%status, "Ledger write returned error");
            return Err(RemoteError::RequestFailed(format!("HTTP {status}: {text}")));
        }

        let rows: Vec<WriteReceipt> = resp
            .json()
            .await
            .map_err(|e| RemoteError::ParseError(e.to_string()))?;

        rows.first().copied().ok_or(RemoteError::Conflict {
            expected: expected_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use habitz_core::types::HabitId;

    fn event() -> CompletionEvent {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        CompletionEvent::new(HabitId::new(), date)
    }

    #[tokio::test]
    async fn none_provider_fails_resolution() {
        let client = BackendClient::none();
        let err = client
            .resolve_award(&UserId::new(), &event())
            .await
            .expect_err("should fail");
        assert!(matches!(err, RemoteError::Unavailable(_)));
    }

    #[tokio::test]
    async fn none_provider_fails_ledger_traffic() {
        let client = BackendClient::none();
        let user = UserId::new();
        assert!(client.read_ledger(&user).await.is_err());
        assert!(client.write_ledger(&user, 10, 0).await.is_err());
    }

    #[test]
    fn from_config_strips_trailing_slash() {
        let config = RemoteConfig {
            base_url: "https://api.example.com/".to_string(),
            api_key: "key".to_string(),
            request_timeout_ms: 1000,
        };
        let client = BackendClient::from_config(&config);
        match &client.provider {
            BackendProvider::Hosted { base_url, .. } => {
                assert_eq!(base_url, "https://api.example.com");
            }
            BackendProvider::None => panic!("expected hosted provider"),
        }
    }
}
