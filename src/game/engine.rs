//! Round engine
//!
//! Drives the shared round through its phases on a fixed tick against
//! absolute wall-clock deadlines, so a stalled process catches up
//! instead of drifting. All round mutation happens under one write
//! lock (the tick path and the join path are never interleaved), and
//! settlement runs as detached tasks that the tick never awaits.

use crate::config::GameConfig;
use crate::game::bingo::has_bingo;
use crate::game::round::{Participant, Phase, Round, Winner};
use crate::ledger::LedgerClient;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::interval;
use tracing::{debug, info, warn};

/// Upper bound on cards held by one player in one round.
pub const MAX_CARDS_PER_PLAYER: usize = 2;

/// Join rejections. Surfaced synchronously to the caller; round state
/// is never touched on the error path.
#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    #[error("selection phase closed (current phase: {phase})")]
    SelectionClosed { phase: Phase },

    #[error("a player may hold at most 2 cards, got {count}")]
    TooManyCards { count: usize },
}

/// Ledger work produced by a phase transition. Collected under the
/// round lock, dispatched after it is released.
enum Settlement {
    ChargeEntry {
        player_id: String,
        amount: u64,
        round_id: i64,
    },
    CreditWin {
        player_id: String,
        amount: u64,
        round_id: i64,
    },
}

/// Owns the round and orchestrates phase transitions, win detection,
/// and settlement dispatch.
pub struct RoundEngine {
    round: RwLock<Round>,
    ledger: Arc<dyn LedgerClient>,
    config: GameConfig,
    running: AtomicBool,
}

impl RoundEngine {
    /// Create an engine with a fresh round starting now.
    pub fn new(config: GameConfig, ledger: Arc<dyn LedgerClient>) -> Self {
        let now_ms = Utc::now().timestamp_millis();
        let round = Round::new(now_ms, config.selection_window_ms());
        info!("✨ Round #{} ready", round.round_id);
        Self {
            round: RwLock::new(round),
            ledger,
            config,
            running: AtomicBool::new(false),
        }
    }

    /// Run the tick loop until [`stop`](Self::stop) is called. One tick
    /// evaluates at most one phase transition.
    pub async fn run(self: Arc<Self>) {
        self.running.store(true, Ordering::SeqCst);
        info!(
            "🚀 Round engine started (tick {}ms, selection {}s, ball {}ms, winner {}s)",
            self.config.tick_interval_ms,
            self.config.selection_secs,
            self.config.ball_interval_ms,
            self.config.winner_secs,
        );

        let mut tick = interval(self.config.tick_interval());
        loop {
            tick.tick().await;
            if !self.running.load(Ordering::SeqCst) {
                break;
            }
            self.tick(Utc::now().timestamp_millis()).await;
        }
        info!("🛑 Round engine stopped");
    }

    /// Stop the tick loop after the current tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Evaluate one tick at the given wall-clock instant. Never fails:
    /// settlement problems are confined to their detached tasks and a
    /// transition always completes once its deadline has passed.
    pub async fn tick(&self, now_ms: i64) {
        let settlements = {
            let mut round = self.round.write().await;
            self.advance(&mut round, now_ms)
        };
        self.dispatch(settlements);
    }

    /// Join the current round, replacing any prior participation for
    /// the player. An empty card list makes the player a spectator.
    /// Only valid during SELECTION.
    pub async fn join(
        &self,
        player_id: &str,
        name: &str,
        card_ids: Vec<u32>,
    ) -> Result<(), JoinError> {
        if card_ids.len() > MAX_CARDS_PER_PLAYER {
            return Err(JoinError::TooManyCards {
                count: card_ids.len(),
            });
        }

        let round_id = {
            let mut round = self.round.write().await;
            if round.phase != Phase::Selection {
                return Err(JoinError::SelectionClosed { phase: round.phase });
            }

            round.participants.retain(|p| p.player_id != player_id);
            if card_ids.is_empty() {
                debug!("player {} left round #{}", player_id, round.round_id);
                return Ok(());
            }
            round.participants.push(Participant {
                player_id: player_id.to_string(),
                name: name.to_string(),
                card_ids: card_ids.clone(),
            });
            debug!(
                "player {} joined round #{} with {} card(s)",
                player_id,
                round.round_id,
                card_ids.len()
            );
            round.round_id
        };

        // Best-effort mirror to the finance service; the join itself
        // already succeeded.
        let ledger = Arc::clone(&self.ledger);
        let (pid, pname) = (player_id.to_string(), name.to_string());
        tokio::spawn(async move {
            if let Err(e) = ledger
                .sync_participation(&pid, &pname, &card_ids, round_id)
                .await
            {
                warn!("⚠️  Participation sync failed for {}: {}", pid, e);
            }
        });
        Ok(())
    }

    /// Consistent snapshot of the current round.
    pub async fn current_round(&self) -> Round {
        self.round.read().await.clone()
    }

    /// Evaluate one phase transition against `now_ms`, returning the
    /// settlement work it produced.
    fn advance(&self, round: &mut Round, now_ms: i64) -> Vec<Settlement> {
        if now_ms < round.phase_deadline {
            return Vec::new();
        }

        match round.phase {
            Phase::Selection => self.close_selection(round, now_ms),
            Phase::Playing => self.draw_ball(round, now_ms),
            Phase::Winner => {
                self.reset_round(round, now_ms);
                Vec::new()
            }
        }
    }

    /// SELECTION -> PLAYING: freeze the participant list and charge
    /// entries. The deadline is left at `now` so the next tick draws
    /// immediately.
    fn close_selection(&self, round: &mut Round, now_ms: i64) -> Vec<Settlement> {
        round.phase = Phase::Playing;
        round.phase_started_at = now_ms;
        round.phase_deadline = now_ms;

        if round.participants.is_empty() {
            info!("🎯 Round #{} playing with no participants", round.round_id);
            return Vec::new();
        }

        info!(
            "📡 Processing entry fees for {} player(s) in round #{}",
            round.participants.len(),
            round.round_id
        );
        round
            .participants
            .iter()
            .map(|p| Settlement::ChargeEntry {
                player_id: p.player_id.clone(),
                amount: p.card_ids.len() as u64 * self.config.entry_fee,
                round_id: round.round_id,
            })
            .collect()
    }

    /// One PLAYING step: draw the next number and scan for a winner.
    /// Participants are scanned in join order and cards in submitted
    /// order; the first bingo found wins the round.
    fn draw_ball(&self, round: &mut Round, now_ms: i64) -> Vec<Settlement> {
        let Some(number) = round.next_undrawn() else {
            // Every ball drawn with no winner: start over.
            info!("♻️  Round #{} exhausted all balls", round.round_id);
            self.reset_round(round, now_ms);
            return Vec::new();
        };

        round.drawn_numbers.push(number);
        debug!(
            "ball {} drawn ({}/{}) in round #{}",
            number,
            round.drawn_numbers.len(),
            round.draw_sequence.len(),
            round.round_id
        );

        let drawn: HashSet<u8> = round.drawn_numbers.iter().copied().collect();
        let winner = round.participants.iter().find_map(|p| {
            p.card_ids
                .iter()
                .copied()
                .find(|&card_id| has_bingo(card_id, &drawn))
                .map(|card_id| Winner {
                    player_id: p.player_id.clone(),
                    name: p.name.clone(),
                    card_id,
                })
        });

        let Some(winner) = winner else {
            round.phase_deadline = now_ms + self.config.ball_interval_ms as i64;
            return Vec::new();
        };

        info!(
            "🏆 {} wins round #{} on card {} after {} balls",
            winner.player_id,
            round.round_id,
            winner.card_id,
            round.drawn_numbers.len()
        );
        round.winner = Some(winner.clone());
        round.phase = Phase::Winner;
        round.phase_deadline = now_ms + self.config.winner_window_ms();

        let prize = self
            .config
            .prize_from_pool(round.entry_pool(self.config.entry_fee));
        if prize == 0 {
            return Vec::new();
        }
        vec![Settlement::CreditWin {
            player_id: winner.player_id,
            amount: prize,
            round_id: round.round_id,
        }]
    }

    /// Replace the round with a fresh one starting now.
    fn reset_round(&self, round: &mut Round, now_ms: i64) {
        *round = Round::new(now_ms, self.config.selection_window_ms());
        info!("✨ Round #{} ready", round.round_id);
    }

    /// Fire settlement calls as detached tasks. Outcomes are logged and
    /// nothing else: the round has already moved on.
    fn dispatch(&self, settlements: Vec<Settlement>) {
        for settlement in settlements {
            let ledger = Arc::clone(&self.ledger);
            tokio::spawn(async move {
                match settlement {
                    Settlement::ChargeEntry {
                        player_id,
                        amount,
                        round_id,
                    } => {
                        if let Err(e) = ledger.charge_entry(&player_id, amount, round_id).await {
                            warn!("⚠️  Entry charge failed for {}: {}", player_id, e);
                        }
                    }
                    Settlement::CreditWin {
                        player_id,
                        amount,
                        round_id,
                    } => {
                        if let Err(e) = ledger.credit_win(&player_id, amount, round_id).await {
                            warn!("⚠️  Win credit failed for {}: {}", player_id, e);
                        }
                    }
                }
            });
        }
    }
}
