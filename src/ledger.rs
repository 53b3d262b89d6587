//! Ledger gateway
//!
//! Outbound client for the external finance service. Every call is a
//! single best-effort attempt: failures are logged by the dispatching
//! task and never alter round progression. Money correctness is the
//! ledger's responsibility; the engine's is fair game progression.

use async_trait::async_trait;
use serde_json::json;

/// Ledger call failures. Observed only for logging.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("ledger rejected {endpoint} with status {status}")]
    Rejected {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },
}

/// Outbound settlement boundary. One attempt per event, no retries,
/// no feedback into round state.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Charge a participant's entry fees for a round.
    async fn charge_entry(
        &self,
        player_id: &str,
        amount: u64,
        round_id: i64,
    ) -> Result<(), LedgerError>;

    /// Credit the round's prize to the winner.
    async fn credit_win(
        &self,
        player_id: &str,
        amount: u64,
        round_id: i64,
    ) -> Result<(), LedgerError>;

    /// Mirror a confirmed participation to the finance service.
    async fn sync_participation(
        &self,
        player_id: &str,
        name: &str,
        card_ids: &[u32],
        round_id: i64,
    ) -> Result<(), LedgerError>;
}

/// HTTP implementation posting to the finance service's game endpoints.
///
/// No request timeout is configured: a slow ledger must not fail fast
/// into retries, and isolation from the round clock comes from running
/// each call as a detached task.
pub struct HttpLedgerGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLedgerGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(
        &self,
        endpoint: &'static str,
        body: serde_json::Value,
    ) -> Result<(), LedgerError> {
        let response = self
            .client
            .post(self.endpoint(endpoint))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Rejected { endpoint, status });
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerGateway {
    async fn charge_entry(
        &self,
        player_id: &str,
        amount: u64,
        round_id: i64,
    ) -> Result<(), LedgerError> {
        self.post(
            "/api/game/entry",
            json!({ "playerId": player_id, "amount": amount, "roundId": round_id }),
        )
        .await
    }

    async fn credit_win(
        &self,
        player_id: &str,
        amount: u64,
        round_id: i64,
    ) -> Result<(), LedgerError> {
        self.post(
            "/api/game/win",
            json!({ "playerId": player_id, "amount": amount, "roundId": round_id }),
        )
        .await
    }

    async fn sync_participation(
        &self,
        player_id: &str,
        name: &str,
        card_ids: &[u32],
        round_id: i64,
    ) -> Result<(), LedgerError> {
        self.post(
            "/api/game/participate",
            json!({
                "playerId": player_id,
                "username": name,
                "cardIds": card_ids,
                "roundId": round_id,
            }),
        )
        .await
    }
}
