//! API wire models
//!
//! Request and response shapes for the polling clients. Field names are
//! camelCase on the wire; timestamps are epoch milliseconds.

use crate::game::round::{Phase, Round, Winner};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Full round snapshot returned to polling clients.
///
/// `server_time` lets a client estimate its clock offset from the
/// round-trip time and render phase countdowns that agree with the
/// server. The round's undrawn sequence is deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub round_id: i64,
    pub phase: Phase,
    pub next_phase_time: i64,
    pub phase_start_time: i64,
    pub participants: Vec<ParticipantView>,
    pub called_numbers: Vec<u8>,
    pub winner: Option<WinnerView>,
    pub server_time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub player_id: String,
    pub name: String,
    pub card_ids: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerView {
    pub player_id: String,
    pub name: String,
    pub card_id: u32,
}

impl From<&Winner> for WinnerView {
    fn from(winner: &Winner) -> Self {
        Self {
            player_id: winner.player_id.clone(),
            name: winner.name.clone(),
            card_id: winner.card_id,
        }
    }
}

impl RoundSnapshot {
    /// Build the client-facing snapshot of a round at `server_time`.
    pub fn from_round(round: &Round, server_time: i64) -> Self {
        Self {
            round_id: round.round_id,
            phase: round.phase,
            next_phase_time: round.phase_deadline,
            phase_start_time: round.phase_started_at,
            participants: round
                .participants
                .iter()
                .map(|p| ParticipantView {
                    player_id: p.player_id.clone(),
                    name: p.name.clone(),
                    card_ids: p.card_ids.clone(),
                })
                .collect(),
            called_numbers: round.drawn_numbers.clone(),
            winner: round.winner.as_ref().map(WinnerView::from),
            server_time,
        }
    }
}

/// Join request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub player_id: String,
    pub name: String,
    pub card_ids: Vec<u32>,
}

/// Join acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinResponse {
    pub ok: bool,
}

/// One card from the public catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub card_id: u32,
    /// 25 cells, column-major.
    pub numbers: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::round::Participant;

    #[test]
    fn snapshot_uses_camel_case_wire_names() {
        let mut round = Round::new(1_700_000_000_000, 45_000);
        round.participants.push(Participant {
            player_id: "p1".into(),
            name: "One".into(),
            card_ids: vec![7, 250],
        });

        let snapshot = RoundSnapshot::from_round(&round, 1_700_000_001_000);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["roundId"], 1_700_000_000i64);
        assert_eq!(json["phase"], "SELECTION");
        assert_eq!(json["nextPhaseTime"], 1_700_000_045_000i64);
        assert_eq!(json["phaseStartTime"], 1_700_000_000_000i64);
        assert_eq!(json["serverTime"], 1_700_000_001_000i64);
        assert_eq!(json["participants"][0]["playerId"], "p1");
        assert_eq!(json["participants"][0]["cardIds"][1], 250);
        assert!(json["winner"].is_null());
        // The draw order must never leak to clients.
        assert!(json.get("drawSequence").is_none());
        assert!(json.get("sequence").is_none());
    }

    #[test]
    fn winner_serializes_when_present() {
        let mut round = Round::new(0, 45_000);
        round.winner = Some(Winner {
            player_id: "p1".into(),
            name: "One".into(),
            card_id: 7,
        });

        let json = serde_json::to_value(RoundSnapshot::from_round(&round, 0)).unwrap();
        assert_eq!(json["winner"]["playerId"], "p1");
        assert_eq!(json["winner"]["cardId"], 7);
    }

    #[test]
    fn join_request_parses_camel_case() {
        let request: JoinRequest = serde_json::from_str(
            r#"{"playerId":"p1","name":"One","cardIds":[7,250]}"#,
        )
        .unwrap();
        assert_eq!(request.player_id, "p1");
        assert_eq!(request.card_ids, vec![7, 250]);
    }

    #[test]
    fn join_request_accepts_empty_card_list() {
        let request: JoinRequest =
            serde_json::from_str(r#"{"playerId":"p1","name":"One","cardIds":[]}"#).unwrap();
        assert!(request.card_ids.is_empty());
    }
}
