use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{Error, KeyValueStore};
use crate::seed;
use crate::state::migrate::{self, StoredInvites};
use crate::state::{
    AppState, ESCALATIONS_KEY, INVITES_KEY, PAYOUTS_KEY, PLAYERS_KEY,
};

/// Owns the backend state and mirrors players, payouts, escalation tickets and
/// invites to a key-value store.
///
/// Storage failures never reach callers: a document that cannot be read falls
/// back to seed data and a write that fails is logged and dropped.
#[derive(Debug)]
pub struct StateStore<K: KeyValueStore> {
    state: AppState,
    kv: K,
}

impl<K: KeyValueStore> StateStore<K> {
    pub fn open(kv: K, now: DateTime<Utc>) -> Self {
        let players = load(&kv, PLAYERS_KEY, migrate::players)
            .unwrap_or_else(|| seed::players(seed::DEFAULT_PLAYER_COUNT, now));
        let mut state = AppState::seed_with_players(players, now);

        let stored_payouts = load(&kv, PAYOUTS_KEY, migrate::payouts);
        let seeded_payouts = stored_payouts.is_none();
        if let Some(payouts) = stored_payouts {
            state.payouts = payouts;
        }
        if let Some(tickets) = load(&kv, ESCALATIONS_KEY, migrate::escalations) {
            state.escalation_tickets = tickets;
        }
        let stored_invites = load(&kv, INVITES_KEY, migrate::invites);
        let legacy_invites = matches!(stored_invites, Some(StoredInvites::Named(_)));
        if let Some(stored) = stored_invites {
            state.invites = stored.merge(std::mem::take(&mut state.invites));
        }

        let mut store = Self { state, kv };
        if seeded_payouts {
            persist(&mut store.kv, PAYOUTS_KEY, &store.state.payouts);
        }
        if legacy_invites {
            persist(&mut store.kv, INVITES_KEY, &store.state.invites);
        }
        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Runs `f` against a draft of the state and commits the draft only if `f`
    /// succeeds, so multi-field updates land together or not at all. Mirrored
    /// collections that changed are written back after the commit.
    pub fn transact<T>(
        &mut self,
        f: impl FnOnce(&mut AppState) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut draft = self.state.clone();
        let out = f(&mut draft)?;

        let players_changed = draft.players != self.state.players;
        let payouts_changed = draft.payouts != self.state.payouts;
        let tickets_changed = draft.escalation_tickets != self.state.escalation_tickets;
        let invites_changed = draft.invites != self.state.invites;
        self.state = draft;

        if players_changed {
            persist(&mut self.kv, PLAYERS_KEY, &self.state.players);
        }
        if payouts_changed {
            persist(&mut self.kv, PAYOUTS_KEY, &self.state.payouts);
        }
        if tickets_changed {
            persist(&mut self.kv, ESCALATIONS_KEY, &self.state.escalation_tickets);
        }
        if invites_changed {
            persist(&mut self.kv, INVITES_KEY, &self.state.invites);
        }
        Ok(out)
    }

    /// Replaces everything with fresh seed data and overwrites the mirrored documents.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.state = AppState::seed(now);
        persist(&mut self.kv, PLAYERS_KEY, &self.state.players);
        persist(&mut self.kv, PAYOUTS_KEY, &self.state.payouts);
        persist(&mut self.kv, ESCALATIONS_KEY, &self.state.escalation_tickets);
        persist(&mut self.kv, INVITES_KEY, &self.state.invites);
    }
}

fn persist<K: KeyValueStore, T: Serialize>(kv: &mut K, key: &str, items: &[T]) {
    let written = migrate::encode(items).and_then(|doc| kv.set(key, &doc));
    match written {
        Ok(()) => debug!(key, count = items.len(), "persisted collection"),
        Err(e) => warn!(key, error = %e, "failed to persist collection"),
    }
}

fn load<K: KeyValueStore, D>(
    kv: &K,
    key: &str,
    decode: fn(&str) -> Result<D, Error>,
) -> Option<D> {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "failed to read collection, using seed");
            return None;
        }
    };
    match decode(&raw) {
        Ok(decoded) => {
            debug!(key, "loaded collection");
            Some(decoded)
        }
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable collection, using seed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlayerStatus;
    use crate::state::MemoryKv;

    #[derive(Debug, Default)]
    struct BrokenKv;

    impl KeyValueStore for BrokenKv {
        fn get(&self, _key: &str) -> Result<Option<String>, Error> {
            Err(Error::Storage("disk unplugged".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), Error> {
            Err(Error::Storage("disk unplugged".to_string()))
        }
    }

    #[test]
    fn failed_transaction_leaves_state_untouched() {
        let mut store = StateStore::open(MemoryKv::new(), Utc::now());
        let before = store.state().clone();

        let result: Result<(), Error> = store.transact(|state| {
            state.wallet.available = Default::default();
            state.players.clear();
            Err(Error::Validation("nope".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn committed_changes_survive_reopen() {
        let now = Utc::now();
        let mut store = StateStore::open(MemoryKv::new(), now);
        store
            .transact(|state| {
                state.players[0].status = PlayerStatus::Restricted;
                Ok(())
            })
            .unwrap();

        let reopened = StateStore::open(store.kv.clone(), now);
        assert_eq!(reopened.state().players[0].status, PlayerStatus::Restricted);
    }

    #[test]
    fn seeded_payouts_are_written_on_open() {
        let store = StateStore::open(MemoryKv::new(), Utc::now());
        assert!(store.kv.get(PAYOUTS_KEY).unwrap().is_some());
        assert!(store.kv.get(PLAYERS_KEY).unwrap().is_none());
    }

    #[test]
    fn corrupt_documents_fall_back_to_seed() {
        let mut kv = MemoryKv::new();
        kv.set(PLAYERS_KEY, "{{{").unwrap();
        kv.set(PAYOUTS_KEY, r#"{"version": 1}"#).unwrap();

        let store = StateStore::open(kv, Utc::now());
        assert_eq!(store.state().players.len(), seed::DEFAULT_PLAYER_COUNT);
        assert_eq!(store.state().payouts.len(), 11);
    }

    #[test]
    fn storage_failures_are_swallowed() {
        let mut store = StateStore::open(BrokenKv, Utc::now());
        let renamed = store.transact(|state| {
            state.players[0].name = "Renamed".to_string();
            Ok(state.players[0].name.clone())
        });
        assert_eq!(renamed.unwrap(), "Renamed");
        assert_eq!(store.state().players[0].name, "Renamed");
    }

    #[test]
    fn legacy_invitations_join_seeded_plain_invites() {
        let mut kv = MemoryKv::new();
        kv.set(
            INVITES_KEY,
            r#"[{"id":"inv_01","firstName":"Ali","lastName":"Khan",
                "contacts":[{"method":"EMAIL","value":"ali@example.com"}],
                "status":"PENDING","invitationCode":"INV-8K3D-2P9Q-M4N7",
                "createdAt":"2026-01-10T10:00:00Z","expiresAt":"2026-01-17T10:00:00Z"}]"#,
        )
        .unwrap();

        let store = StateStore::open(kv, Utc::now());
        let invites = &store.state().invites;
        let plain = invites.iter().filter(|i| i.invitee.is_none()).count();
        let named: Vec<_> = invites.iter().filter(|i| i.invitee.is_some()).collect();
        assert_eq!(plain, 14);
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].id, "invitation_01");
        assert!(invites.iter().any(|i| i.id == "inv_01" && i.invitee.is_none()));

        let reopened = StateStore::open(store.kv.clone(), Utc::now());
        assert_eq!(reopened.state().invites, store.state().invites);
    }
}
