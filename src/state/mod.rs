pub mod kv;
pub mod migrate;
pub mod store;

pub use kv::{FileKv, MemoryKv};
pub use store::StateStore;

use chrono::{DateTime, Utc};

use crate::domain::{
    Alert, EscalationTicket, Goal, Invite, LedgerEntry, Payout, Player, PlayerFiatDeposit,
    Statement, WalletSummary, War,
};
use crate::seed;

/// Storage keys of the collections mirrored to the key-value store.
pub const PLAYERS_KEY: &str = "clazino_players_v1";
pub const PAYOUTS_KEY: &str = "clazino_payouts_v2";
pub const ESCALATIONS_KEY: &str = "clazino_payout_escalations_v1";
pub const INVITES_KEY: &str = "clazino_agent_invitations";

/// Every collection the backend serves.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub wallet: WalletSummary,
    pub ledger: Vec<LedgerEntry>,
    pub players: Vec<Player>,
    pub invites: Vec<Invite>,
    pub payouts: Vec<Payout>,
    pub escalation_tickets: Vec<EscalationTicket>,
    pub player_deposits: Vec<PlayerFiatDeposit>,
    pub statements: Vec<Statement>,
    pub goals: Vec<Goal>,
    pub wars: Vec<War>,
    pub alerts: Vec<Alert>,
}

impl AppState {
    pub fn seed(now: DateTime<Utc>) -> Self {
        Self::seed_with_players(seed::players(seed::DEFAULT_PLAYER_COUNT, now), now)
    }

    /// Payouts and deposits reference players, so they are derived from the given list.
    pub fn seed_with_players(players: Vec<Player>, now: DateTime<Utc>) -> Self {
        Self {
            wallet: seed::wallet(),
            ledger: seed::ledger(now),
            invites: seed::invites(now),
            payouts: seed::payouts(&players, now),
            escalation_tickets: Vec::new(),
            player_deposits: seed::player_deposits(&players, now),
            statements: seed::statements(now),
            goals: seed::goals(),
            wars: seed::wars(now),
            alerts: seed::alerts(),
            players,
        }
    }
}
