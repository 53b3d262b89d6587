//! Round state
//!
//! A round is the unit of play: one shared phase timeline, one draw
//! sequence, one participant list, at most one winner. Rounds are never
//! persisted or resurrected; a new round simply replaces the old one.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest drawable ball number.
pub const MAX_BALL: u8 = 75;

/// Phase of the shared round timeline. Exactly one is active at a time
/// and the machine cycles forever.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Players pick cards and join.
    Selection,
    /// Numbers are drawn on a fixed cadence.
    Playing,
    /// A winner is on display before the next round starts.
    Winner,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Selection => write!(f, "SELECTION"),
            Phase::Playing => write!(f, "PLAYING"),
            Phase::Winner => write!(f, "WINNER"),
        }
    }
}

/// A player's participation in the current round: identity plus the
/// 1..=2 cards they hold. Players holding no cards are not listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub player_id: String,
    pub name: String,
    pub card_ids: Vec<u32>,
}

/// The round's winner, recorded at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Winner {
    pub player_id: String,
    pub name: String,
    pub card_id: u32,
}

/// Full state of the active round. Mutated only under the engine's
/// single-writer lock.
#[derive(Debug, Clone)]
pub struct Round {
    /// Epoch seconds at creation. Strictly increasing across rounds.
    pub round_id: i64,
    pub phase: Phase,
    /// Epoch milliseconds when the current phase began.
    pub phase_started_at: i64,
    /// Epoch milliseconds when the current phase expires.
    pub phase_deadline: i64,
    /// Join-ordered participant list. Re-joining moves a player to the
    /// end of the order.
    pub participants: Vec<Participant>,
    /// Fixed permutation of 1..=75, freshly randomized per round.
    /// Never exposed to clients.
    pub draw_sequence: Vec<u8>,
    /// Numbers drawn so far, always a prefix of `draw_sequence`.
    pub drawn_numbers: Vec<u8>,
    pub winner: Option<Winner>,
}

impl Round {
    /// Start a fresh round in SELECTION at `now_ms`, with a newly
    /// shuffled draw sequence. The shuffle is intentionally not seeded:
    /// draw order must differ between rounds, unlike card layouts.
    pub fn new(now_ms: i64, selection_window_ms: i64) -> Self {
        let mut sequence: Vec<u8> = (1..=MAX_BALL).collect();
        sequence.shuffle(&mut rand::thread_rng());

        Self {
            round_id: now_ms / 1000,
            phase: Phase::Selection,
            phase_started_at: now_ms,
            phase_deadline: now_ms + selection_window_ms,
            participants: Vec::new(),
            draw_sequence: sequence,
            drawn_numbers: Vec::new(),
            winner: None,
        }
    }

    /// Next undrawn number, if the sequence is not exhausted.
    pub fn next_undrawn(&self) -> Option<u8> {
        self.draw_sequence.get(self.drawn_numbers.len()).copied()
    }

    /// Total entry pool for the round at the given per-card fee.
    pub fn entry_pool(&self, entry_fee: u64) -> u64 {
        self.participants
            .iter()
            .map(|p| p.card_ids.len() as u64 * entry_fee)
            .sum()
    }
}
