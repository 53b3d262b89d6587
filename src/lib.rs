//! Star Bingo - continuously repeating multi-round Bingo engine
//!
//! Advances a shared round through timed phases, derives card contents
//! deterministically from card identifiers, draws numbers, detects
//! winners, and settles entry fees and prizes against an external
//! finance service. Clients poll the HTTP surface; settlement is
//! best-effort and never blocks the round clock.

pub mod api;
pub mod config;
pub mod game;
pub mod ledger;

pub use api::ApiServer;
pub use config::StarBingoConfig;
pub use game::engine::RoundEngine;
pub use game::round::{Participant, Phase, Round, Winner};
pub use ledger::{HttpLedgerGateway, LedgerClient};
