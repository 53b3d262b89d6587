//! Full round-cycle test against the public engine API: selection,
//! entry charging, drawing, win detection, prize credit, and the reset
//! into the next round, all under a simulated clock.

use async_trait::async_trait;
use starbingo::config::GameConfig;
use starbingo::game::engine::RoundEngine;
use starbingo::ledger::{LedgerClient, LedgerError};
use starbingo::Phase;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every settlement call instead of reaching a finance service.
#[derive(Default)]
struct RecordingLedger {
    charges: Mutex<Vec<(String, u64, i64)>>,
    credits: Mutex<Vec<(String, u64, i64)>>,
    participations: Mutex<Vec<(String, Vec<u32>, i64)>>,
}

#[async_trait]
impl LedgerClient for RecordingLedger {
    async fn charge_entry(
        &self,
        player_id: &str,
        amount: u64,
        round_id: i64,
    ) -> Result<(), LedgerError> {
        self.charges
            .lock()
            .unwrap()
            .push((player_id.to_string(), amount, round_id));
        Ok(())
    }

    async fn credit_win(
        &self,
        player_id: &str,
        amount: u64,
        round_id: i64,
    ) -> Result<(), LedgerError> {
        self.credits
            .lock()
            .unwrap()
            .push((player_id.to_string(), amount, round_id));
        Ok(())
    }

    async fn sync_participation(
        &self,
        player_id: &str,
        _name: &str,
        card_ids: &[u32],
        round_id: i64,
    ) -> Result<(), LedgerError> {
        self.participations
            .lock()
            .unwrap()
            .push((player_id.to_string(), card_ids.to_vec(), round_id));
        Ok(())
    }
}

#[tokio::test]
async fn full_round_cycle_with_winner() {
    let ledger = Arc::new(RecordingLedger::default());
    let engine = Arc::new(RoundEngine::new(GameConfig::default(), ledger.clone()));

    // === PHASE 1: Selection ===
    let round = engine.current_round().await;
    assert_eq!(round.phase, Phase::Selection);
    let first_round_id = round.round_id;

    engine.join("p1", "Player One", vec![7, 250]).await.unwrap();
    engine.join("p2", "Player Two", vec![42]).await.unwrap();
    // p2 reconsiders and spectates this round.
    engine.join("p2", "Player Two", vec![]).await.unwrap();

    let round = engine.current_round().await;
    assert_eq!(round.participants.len(), 1);
    assert_eq!(round.participants[0].player_id, "p1");

    // === PHASE 2: Selection closes, entries are charged ===
    let selection_deadline = round.phase_deadline;
    engine.tick(selection_deadline).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let round = engine.current_round().await;
    assert_eq!(round.phase, Phase::Playing);

    let charges = ledger.charges.lock().unwrap().clone();
    assert_eq!(charges, vec![("p1".to_string(), 20, first_round_id)]);

    // Joining mid-game is a policy error and leaves the round alone.
    assert!(engine.join("p3", "Late", vec![1]).await.is_err());
    assert_eq!(engine.current_round().await.participants.len(), 1);

    // === PHASE 3: Balls are drawn until p1 completes a pattern ===
    // p1 holds two cards, and every ball is eventually drawn, so a win
    // must arrive before the sequence runs out.
    let mut now = selection_deadline;
    for _ in 0..=75 {
        engine.tick(now).await;
        let round = engine.current_round().await;
        assert_eq!(
            round.drawn_numbers,
            round.draw_sequence[..round.drawn_numbers.len()].to_vec(),
            "drawn numbers must stay a prefix of the sequence"
        );
        if round.phase != Phase::Playing {
            break;
        }
        now = round.phase_deadline;
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    let round = engine.current_round().await;
    assert_eq!(round.phase, Phase::Winner);
    let winner = round.winner.clone().expect("winner recorded");
    assert_eq!(winner.player_id, "p1");
    assert!([7, 250].contains(&winner.card_id));

    // Prize is the pool minus the house cut: floor(20 * 0.8).
    let credits = ledger.credits.lock().unwrap().clone();
    assert_eq!(credits, vec![("p1".to_string(), 16, first_round_id)]);

    // === PHASE 4: Winner window expires, a fresh round begins ===
    engine.tick(round.phase_deadline + 60_000).await;

    let fresh = engine.current_round().await;
    assert_eq!(fresh.phase, Phase::Selection);
    assert_ne!(fresh.round_id, first_round_id);
    assert!(fresh.participants.is_empty());
    assert!(fresh.drawn_numbers.is_empty());
    assert!(fresh.winner.is_none());

    // The new round accepts joins again.
    engine.join("p2", "Player Two", vec![42]).await.unwrap();
    assert_eq!(engine.current_round().await.participants.len(), 1);
}

#[tokio::test]
async fn participation_is_mirrored_to_the_ledger() {
    let ledger = Arc::new(RecordingLedger::default());
    let engine = Arc::new(RoundEngine::new(GameConfig::default(), ledger.clone()));

    engine.join("p1", "Player One", vec![7]).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let round_id = engine.current_round().await.round_id;
    let participations = ledger.participations.lock().unwrap().clone();
    assert_eq!(participations, vec![("p1".to_string(), vec![7], round_id)]);
}

#[tokio::test]
async fn draw_sequences_differ_between_rounds() {
    // Draw order is freshly randomized per round; two rounds sharing
    // the same 75-ball order would defeat that. (A collision is
    // possible in principle but has probability 1/75!.)
    let ledger = Arc::new(RecordingLedger::default());
    let engine = Arc::new(RoundEngine::new(GameConfig::default(), ledger));

    let first = engine.current_round().await;
    engine.tick(first.phase_deadline).await;

    // Exhaust the empty round to force a reset.
    let mut now = first.phase_deadline;
    for _ in 0..76 {
        engine.tick(now).await;
        now = engine.current_round().await.phase_deadline + 1;
    }

    let second = engine.current_round().await;
    assert_ne!(second.round_id, first.round_id);
    assert_ne!(second.draw_sequence, first.draw_sequence);
}
