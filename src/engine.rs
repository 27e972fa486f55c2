use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as Days, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{
    AgentApi, Alert, CreateInvitationPayload, CreateInvitePayload, DepositPayload, Error,
    EscalatePayload, EscalationTicket, Goal, Invitation, InvitationStatus, Invite, InviteStatus,
    KeyValueStore, LedgerEntry, LedgerKind, Payout, Player, PlayerAction, PlayerActionPayload,
    PlayerFiatDeposit, Statement, WalletSummary, War, WithdrawalPayload, WithdrawalResult,
};
use crate::ids;
use crate::state::{AppState, StateStore};

pub const DEFAULT_INVITE_EXPIRY_DAYS: i64 = 7;

/// Recorded as the actor on payout decisions.
pub const AGENT_ACTOR: &str = "agent_mock";

/// In-process implementation of [`AgentApi`] backed by a [`StateStore`].
///
/// Every call waits `latency` first, then runs as one unit of work on the
/// store. Two concurrent writers to the same entity are applied in the order
/// they reach the lock.
#[derive(Debug)]
pub struct MockEngine<K: KeyValueStore> {
    store: Mutex<StateStore<K>>,
    latency: Duration,
}

impl<K> MockEngine<K>
where
    K: KeyValueStore + Send,
{
    pub fn new(store: StateStore<K>, latency: Duration) -> Self {
        Self {
            store: Mutex::new(store),
            latency,
        }
    }

    async fn settle(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    async fn read<T>(&self, f: impl FnOnce(&AppState) -> T + Send) -> T {
        self.settle().await;
        let store = self.store.lock().await;
        f(store.state())
    }

    async fn write<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut AppState) -> Result<T, Error> + Send,
    ) -> Result<T, Error> {
        self.settle().await;
        let mut store = self.store.lock().await;
        let result = store.transact(f);
        if let Err(e) = &result {
            debug!(operation, error = %e, "operation rejected");
        }
        result
    }
}

fn find_payout<'a>(state: &'a mut AppState, id: &str) -> Result<&'a mut Payout, Error> {
    state
        .payouts
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| Error::not_found("Payout"))
}

fn fresh_id(taken: impl Fn(&str) -> bool, make: impl Fn() -> String) -> String {
    loop {
        let id = make();
        if !taken(&id) {
            return id;
        }
    }
}

/// `TKT-<unix millis>`, with a random suffix when that stamp is already taken.
fn ticket_id(tickets: &[EscalationTicket], now: DateTime<Utc>) -> String {
    let taken = |id: &str| tickets.iter().any(|t| t.id == id);
    let stamp = format!("TKT-{}", now.timestamp_millis());
    if taken(&stamp) {
        fresh_id(taken, || ids::prefixed(&stamp, 4))
    } else {
        stamp
    }
}

fn withdrawal_description(to_address: &str, note: Option<&str>) -> String {
    let short: String = to_address.chars().take(8).collect();
    match note.map(str::trim).filter(|n| !n.is_empty()) {
        Some(note) => format!("Agent Withdrawal to {short}… – {note}"),
        None => format!("Agent Withdrawal to {short}…"),
    }
}

#[async_trait]
impl<K> AgentApi for MockEngine<K>
where
    K: KeyValueStore + Send + 'static,
{
    async fn get_wallet_summary(&self) -> Result<WalletSummary, Error> {
        Ok(self.read(|s| s.wallet.clone()).await)
    }

    async fn credit_agent_deposit(&self, payload: DepositPayload) -> Result<WalletSummary, Error> {
        let wallet = self
            .write("credit_agent_deposit", |state| {
                state.wallet.credit(payload.amount)?;
                Ok(state.wallet.clone())
            })
            .await?;
        info!(amount = %payload.amount, available = %wallet.available, "agent deposit credited");
        Ok(wallet)
    }

    async fn request_withdrawal(&self, payload: WithdrawalPayload) -> Result<WithdrawalResult, Error> {
        let result = self
            .write("request_withdrawal", |state| {
                state.wallet.debit(payload.amount)?;
                let reference = ids::prefixed("wd", 8);
                let entry = LedgerEntry {
                    id: ids::prefixed("led", 6),
                    at: Utc::now(),
                    kind: LedgerKind::AgentWithdrawal,
                    description: withdrawal_description(&payload.to_address, payload.note.as_deref()),
                    amount: -payload.amount,
                    // stamped from the wallet, not replayed through the ledger
                    balance_after: Some(state.wallet.available),
                    ref_id: reference.clone(),
                };
                debug!(entry = %entry, "ledger entry appended");
                state.ledger.insert(0, entry);
                Ok(WithdrawalResult {
                    withdrawal_id: reference.clone(),
                    reference,
                    status: "Submitted".to_string(),
                })
            })
            .await?;
        info!(reference = %result.reference, amount = %payload.amount, "withdrawal submitted");
        Ok(result)
    }

    async fn get_ledger(&self) -> Result<Vec<LedgerEntry>, Error> {
        Ok(self.read(|s| s.ledger.clone()).await)
    }

    async fn get_players(&self) -> Result<Vec<Player>, Error> {
        Ok(self.read(|s| s.players.clone()).await)
    }

    async fn get_player(&self, id: &str) -> Result<Option<Player>, Error> {
        Ok(self
            .read(|s| s.players.iter().find(|p| p.id == id).cloned())
            .await)
    }

    async fn update_player_status(
        &self,
        id: &str,
        action: PlayerAction,
        payload: PlayerActionPayload,
    ) -> Result<Player, Error> {
        let player = self
            .write("update_player_status", |state| {
                let player = state
                    .players
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| Error::not_found("Player"))?;
                player.apply(action, &payload);
                Ok(player.clone())
            })
            .await?;
        info!(player = id, status = ?player.status, by = %payload.acted_by, "player status changed");
        Ok(player)
    }

    async fn get_invites(&self) -> Result<Vec<Invite>, Error> {
        Ok(self.read(|s| s.invites.clone()).await)
    }

    async fn create_invite(&self, payload: CreateInvitePayload) -> Result<Invite, Error> {
        let expiry_days = payload.expiry_days.unwrap_or(DEFAULT_INVITE_EXPIRY_DAYS);
        if expiry_days <= 0 {
            return Err(Error::Validation(
                "Expiry must be at least one day".to_string(),
            ));
        }
        let invite = self
            .write("create_invite", |state| {
                let now = Utc::now();
                let invite = Invite {
                    id: fresh_id(
                        |id| state.invites.iter().any(|i| i.id == id),
                        || ids::prefixed("inv", 4),
                    ),
                    label: payload.label,
                    channel: payload.channel,
                    status: InviteStatus::Pending,
                    created_at: now,
                    expires_at: now + Days::days(expiry_days),
                    accepted_by_player_id: None,
                    link: ids::invite_link(),
                    invitee: None,
                };
                state.invites.insert(0, invite.clone());
                Ok(invite)
            })
            .await?;
        info!(invite = %invite.id, channel = ?invite.channel, "invite created");
        Ok(invite)
    }

    async fn resend_invite(&self, id: &str) -> Result<Invite, Error> {
        self.write("resend_invite", |state| {
            let invite = state
                .invites
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| Error::not_found("Invite"))?;
            invite.status = InviteStatus::Pending;
            invite.link = ids::invite_link();
            Ok(invite.clone())
        })
        .await
    }

    async fn get_invitations(&self) -> Result<Vec<Invitation>, Error> {
        Ok(self
            .read(|s| s.invites.iter().filter_map(Invitation::from_invite).collect())
            .await)
    }

    async fn create_invitation(&self, payload: CreateInvitationPayload) -> Result<Invitation, Error> {
        let first_name = payload.first_name.trim().to_string();
        let last_name = payload.last_name.trim().to_string();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(Error::Validation(
                "First and last name are required".to_string(),
            ));
        }
        if payload.contacts.is_empty() {
            return Err(Error::Validation(
                "At least one contact method is required".to_string(),
            ));
        }
        let contacts = payload
            .contacts
            .into_iter()
            .map(|mut c| {
                c.value = c.value.trim().to_string();
                c
            })
            .collect();
        let invitation_code = payload
            .invitation_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(ids::invitation_code);

        let invitation = self
            .write("create_invitation", |state| {
                let now = Utc::now();
                let invitation = Invitation {
                    id: fresh_id(
                        |id| state.invites.iter().any(|i| i.id == id),
                        || ids::prefixed("invitation", 8),
                    ),
                    first_name,
                    last_name,
                    contacts,
                    status: InvitationStatus::Pending,
                    invitation_code,
                    created_at: now,
                    expires_at: now + Days::days(DEFAULT_INVITE_EXPIRY_DAYS),
                };
                state
                    .invites
                    .insert(0, invitation.clone().into_invite(ids::invite_link()));
                Ok(invitation)
            })
            .await?;
        info!(invitation = %invitation.id, "invitation created");
        Ok(invitation)
    }

    async fn get_payouts(&self) -> Result<Vec<Payout>, Error> {
        Ok(self.read(|s| s.payouts.clone()).await)
    }

    async fn approve_payout(&self, id: &str) -> Result<Payout, Error> {
        let payout = self
            .write("approve_payout", |state| {
                let payout = find_payout(state, id)?;
                payout.approve(Utc::now(), ids::tx_hash())?;
                Ok(payout.clone())
            })
            .await?;
        info!(payout = id, amount = %payout.amount, "payout approved");
        Ok(payout)
    }

    async fn decline_payout(&self, id: &str, reason: &str) -> Result<Payout, Error> {
        let payout = self
            .write("decline_payout", |state| {
                let payout = find_payout(state, id)?;
                payout.decline(Utc::now(), reason, AGENT_ACTOR)?;
                Ok(payout.clone())
            })
            .await?;
        info!(payout = id, reason, "payout declined");
        Ok(payout)
    }

    async fn escalate_payout(&self, id: &str, payload: EscalatePayload) -> Result<Payout, Error> {
        let payout = self
            .write("escalate_payout", |state| {
                let now = Utc::now();
                let ticket = EscalationTicket {
                    id: ticket_id(&state.escalation_tickets, now),
                    payout_id: id.to_string(),
                    notes: payload.notes,
                    category: payload.category,
                    created_at: now,
                };
                let payout = find_payout(state, id)?;
                payout.escalate(now, &ticket)?;
                let payout = payout.clone();
                state.escalation_tickets.push(ticket);
                Ok(payout)
            })
            .await?;
        info!(payout = id, "payout escalated to support");
        Ok(payout)
    }

    async fn get_escalation_tickets(&self) -> Result<Vec<EscalationTicket>, Error> {
        Ok(self.read(|s| s.escalation_tickets.clone()).await)
    }

    async fn get_player_deposits_summary(&self) -> Result<Vec<PlayerFiatDeposit>, Error> {
        Ok(self.read(|s| s.player_deposits.clone()).await)
    }

    async fn get_statements(&self) -> Result<Vec<Statement>, Error> {
        Ok(self.read(|s| s.statements.clone()).await)
    }

    async fn get_statement(&self, id: &str) -> Result<Option<Statement>, Error> {
        Ok(self
            .read(|s| s.statements.iter().find(|st| st.id == id).cloned())
            .await)
    }

    async fn get_goals(&self) -> Result<Vec<Goal>, Error> {
        Ok(self.read(|s| s.goals.clone()).await)
    }

    async fn get_wars(&self) -> Result<Vec<War>, Error> {
        Ok(self.read(|s| s.wars.clone()).await)
    }

    async fn register_war(&self, id: &str) -> Result<War, Error> {
        self.write("register_war", |state| {
            let war = state
                .wars
                .iter_mut()
                .find(|w| w.id == id)
                .ok_or_else(|| Error::not_found("War"))?;
            if war.registered {
                debug!(war = id, "already registered");
                return Ok(war.clone());
            }

            state.wallet.lock(war.entry_fee)?;
            war.registered = true;
            let entry = LedgerEntry {
                id: ids::prefixed("led", 6),
                at: Utc::now(),
                kind: LedgerKind::WarEntryLock,
                description: format!("War Entry Lock – {}", war.name),
                amount: -war.entry_fee,
                balance_after: Some(state.wallet.available),
                ref_id: war.id.clone(),
            };
            debug!(entry = %entry, "ledger entry appended");
            state.ledger.insert(0, entry);
            info!(war = id, fee = %war.entry_fee, "registered for war");
            Ok(war.clone())
        })
        .await
    }

    async fn get_alerts(&self) -> Result<Vec<Alert>, Error> {
        Ok(self.read(|s| s.alerts.clone()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::cents;
    use crate::domain::{Contact, ContactMethod, InviteChannel, PayoutStatus, PlayerStatus};
    use crate::state::MemoryKv;

    fn engine() -> MockEngine<MemoryKv> {
        MockEngine::new(StateStore::open(MemoryKv::new(), Utc::now()), Duration::ZERO)
    }

    fn audit(reason: &str) -> PlayerActionPayload {
        PlayerActionPayload {
            reason: reason.to_string(),
            acted_by: "agent_42".to_string(),
            acted_at: "2026-02-01T12:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn player_actions_set_target_status_and_audit() {
        let engine = engine();
        let cases = [
            (PlayerAction::Suspend, PlayerStatus::Suspended),
            (PlayerAction::Reactivate, PlayerStatus::Active),
            (PlayerAction::Restrict, PlayerStatus::Restricted),
            (PlayerAction::Unrestrict, PlayerStatus::Active),
        ];
        for player in engine.get_players().await.unwrap().iter().take(8) {
            for (action, expected) in cases {
                let reason = format!("{action:?} {}", player.id);
                let updated = engine
                    .update_player_status(&player.id, action, audit(&reason))
                    .await
                    .unwrap();
                assert_eq!(updated.status, expected);
                assert_eq!(updated.last_status_change_reason.as_deref(), Some(reason.as_str()));
                assert_eq!(updated.last_status_changed_by.as_deref(), Some("agent_42"));
                assert_eq!(
                    updated.last_status_changed_at.as_deref(),
                    Some("2026-02-01T12:00:00Z")
                );
            }
        }
    }

    #[tokio::test]
    async fn named_player_helpers_delegate() {
        let engine = engine();
        let player = engine.suspend_player("pl_1000", audit("chargeback")).await.unwrap();
        assert_eq!(player.status, PlayerStatus::Suspended);
        let player = engine.restrict_player("pl_1000", audit("limits")).await.unwrap();
        assert_eq!(player.status, PlayerStatus::Restricted);
        let stored = engine.get_player("pl_1000").await.unwrap().unwrap();
        assert_eq!(stored.last_status_change_reason.as_deref(), Some("limits"));
    }

    #[tokio::test]
    async fn unknown_player_is_not_found() {
        let err = engine()
            .reactivate_player("pl_missing", audit("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(ref m) if m == "Player not found"));
    }

    #[tokio::test]
    async fn approving_pending_payout() {
        let engine = engine();
        let payout = engine.approve_payout("po_2001").await.unwrap();
        assert_eq!(payout.status, PayoutStatus::Approved);
        assert_eq!(payout.amount, cents(12_550));
        assert!(payout.tx_hash.as_deref().is_some_and(|h| !h.is_empty()));
        assert_eq!(payout.timeline.last().map(|t| t.status.as_str()), Some("Approved"));
    }

    #[tokio::test]
    async fn declining_keeps_reason() {
        let engine = engine();
        let payout = engine.decline_payout("po_2002", "KYC mismatch").await.unwrap();
        assert_eq!(payout.status, PayoutStatus::Declined);
        assert_eq!(payout.decline_message.as_deref(), Some("KYC mismatch"));
        assert_eq!(payout.acted_by.as_deref(), Some(AGENT_ACTOR));
    }

    #[tokio::test]
    async fn escalating_opens_a_ticket() {
        let engine = engine();
        let payload = EscalatePayload {
            notes: "Destination flagged".to_string(),
            category: Some("AML".to_string()),
        };
        let payout = engine.escalate_payout("po_2003", payload).await.unwrap();
        assert_eq!(payout.status, PayoutStatus::Escalate);

        let tickets = engine.get_escalation_tickets().await.unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].payout_id, "po_2003");
        let note = payout.timeline.last().and_then(|t| t.note.clone()).unwrap();
        assert_eq!(note, format!("Support ticket {}: Destination flagged", tickets[0].id));
    }

    #[tokio::test]
    async fn back_to_back_escalations_get_distinct_tickets() {
        let engine = engine();
        for id in ["po_2001", "po_2002", "po_2003"] {
            let payload = EscalatePayload {
                notes: format!("check {id}"),
                category: None,
            };
            engine.escalate_payout(id, payload).await.unwrap();
        }

        let tickets = engine.get_escalation_tickets().await.unwrap();
        let mut ids: Vec<&str> = tickets.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);

        let payouts = engine.get_payouts().await.unwrap();
        for ticket in &tickets {
            let payout = payouts.iter().find(|p| p.id == ticket.payout_id).unwrap();
            let note = payout.timeline.last().and_then(|t| t.note.as_deref()).unwrap();
            assert_eq!(note, format!("Support ticket {}: check {}", ticket.id, payout.id));
        }
    }

    #[test]
    fn ticket_ids_step_around_a_taken_stamp() {
        let now = Utc::now();
        let first = ticket_id(&[], now);
        assert_eq!(first, format!("TKT-{}", now.timestamp_millis()));

        let taken = vec![EscalationTicket {
            id: first.clone(),
            payout_id: "po_2001".to_string(),
            notes: String::new(),
            category: None,
            created_at: now,
        }];
        let second = ticket_id(&taken, now);
        assert_ne!(second, first);
        assert!(second.starts_with(&format!("{first}_")));
    }

    #[tokio::test]
    async fn decided_payouts_reject_every_action() {
        let engine = engine();
        let decided: Vec<Payout> = engine
            .get_payouts()
            .await
            .unwrap()
            .into_iter()
            .filter(|p| p.status != PayoutStatus::Pending)
            .collect();
        assert_eq!(decided.len(), 8);

        for payout in &decided {
            let results = [
                engine.approve_payout(&payout.id).await,
                engine.decline_payout(&payout.id, "late").await,
                engine
                    .escalate_payout(
                        &payout.id,
                        EscalatePayload {
                            notes: "late".to_string(),
                            category: None,
                        },
                    )
                    .await,
            ];
            for result in results {
                assert!(matches!(result, Err(Error::InvalidTransition(_))));
            }
        }

        let after = engine.get_payouts().await.unwrap();
        for payout in &decided {
            let now = after.iter().find(|p| p.id == payout.id).unwrap();
            assert_eq!(now.timeline, payout.timeline);
            assert_eq!(now.status, payout.status);
        }
        assert!(engine.get_escalation_tickets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_decision_on_same_payout_fails() {
        let engine = engine();
        engine.approve_payout("po_2001").await.unwrap();
        let err = engine.decline_payout("po_2001", "changed mind").await.unwrap_err();
        assert_eq!(err.to_string(), "Payout cannot be declined");
        assert!(matches!(
            engine.approve_payout("po_9999").await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn war_registration_locks_fee_once() {
        let engine = engine();
        let wallet = engine.get_wallet_summary().await.unwrap();
        assert_eq!(wallet.available, cents(1_245_025));
        assert_eq!(wallet.locked, cents(98_000));

        let war = engine.register_war("war_13").await.unwrap();
        assert!(war.registered);
        let again = engine.register_war("war_13").await.unwrap();
        assert_eq!(again, war);

        let wallet = engine.get_wallet_summary().await.unwrap();
        assert_eq!(wallet.available, cents(1_241_525));
        assert_eq!(wallet.locked, cents(101_500));
        assert_eq!(wallet.total, cents(1_343_025));

        let ledger = engine.get_ledger().await.unwrap();
        assert_eq!(ledger[0].kind, LedgerKind::WarEntryLock);
        assert_eq!(ledger[0].amount, cents(-3_500));
        assert_eq!(ledger[0].ref_id, "war_13");
        assert_eq!(ledger[0].balance_after, Some(cents(1_241_525)));
        assert_eq!(ledger[1].kind, LedgerKind::PlayerDepositConversion);
    }

    #[tokio::test]
    async fn war_registration_is_all_or_nothing() {
        let engine = engine();
        engine
            .request_withdrawal(WithdrawalPayload {
                to_address: "TXk4bQ9wB3nZ".to_string(),
                amount: cents(1_243_025),
                note: None,
                agent_id: None,
                network: None,
            })
            .await
            .unwrap();
        let ledger_len = engine.get_ledger().await.unwrap().len();

        let err = engine.register_war("war_14").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let war = engine
            .get_wars()
            .await
            .unwrap()
            .into_iter()
            .find(|w| w.id == "war_14")
            .unwrap();
        assert!(!war.registered);
        assert_eq!(engine.get_ledger().await.unwrap().len(), ledger_len);
        assert_eq!(engine.get_wallet_summary().await.unwrap().available, cents(2_000));
    }

    #[tokio::test]
    async fn unknown_war_is_not_found() {
        assert!(matches!(
            engine().register_war("war_99").await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn withdrawal_validates_and_records() {
        let engine = engine();
        let payload = |amount| WithdrawalPayload {
            to_address: "TXk4bQ9wB3nZ".to_string(),
            amount,
            note: Some("  weekly sweep ".to_string()),
            agent_id: None,
            network: None,
        };

        assert!(matches!(
            engine.request_withdrawal(payload(Default::default())).await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            engine.request_withdrawal(payload(cents(2_000_000))).await,
            Err(Error::Validation(ref m)) if m == "Insufficient available balance"
        ));

        let result = engine.request_withdrawal(payload(cents(45_025))).await.unwrap();
        assert_eq!(result.status, "Submitted");
        assert!(result.reference.starts_with("wd_"));

        let wallet = engine.get_wallet_summary().await.unwrap();
        assert_eq!(wallet.available, cents(1_200_000));
        assert_eq!(wallet.total, cents(1_298_000));

        let head = &engine.get_ledger().await.unwrap()[0];
        assert_eq!(head.kind, LedgerKind::AgentWithdrawal);
        assert_eq!(head.description, "Agent Withdrawal to TXk4bQ9w… – weekly sweep");
        assert_eq!(head.balance_after, Some(cents(1_200_000)));
        assert_eq!(head.ref_id, result.reference);
    }

    #[tokio::test]
    async fn deposit_credit_grows_total() {
        let engine = engine();
        let wallet = engine
            .credit_agent_deposit(DepositPayload { amount: cents(50_000) })
            .await
            .unwrap();
        assert_eq!(wallet.available, cents(1_295_025));
        assert_eq!(wallet.total, cents(1_393_025));
        assert!(engine
            .credit_agent_deposit(DepositPayload { amount: cents(-1) })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn invites_are_prepended_and_resent() {
        let engine = engine();
        let invite = engine
            .create_invite(CreateInvitePayload {
                channel: InviteChannel::Telegram,
                label: Some("Spring push".to_string()),
                expiry_days: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(invite.status, InviteStatus::Pending);
        assert_eq!(invite.expires_at - invite.created_at, Days::days(3));
        assert_eq!(engine.get_invites().await.unwrap()[0], invite);

        let failed = engine
            .get_invites()
            .await
            .unwrap()
            .into_iter()
            .find(|i| i.status == InviteStatus::Failed)
            .unwrap();
        let resent = engine.resend_invite(&failed.id).await.unwrap();
        assert_eq!(resent.status, InviteStatus::Pending);
        assert_ne!(resent.link, failed.link);

        assert!(matches!(
            engine.resend_invite("inv_nope").await,
            Err(Error::NotFound(ref m)) if m == "Invite not found"
        ));
    }

    #[tokio::test]
    async fn invitations_are_invites_with_an_invitee() {
        let engine = engine();
        assert_eq!(engine.get_invitations().await.unwrap().len(), 3);

        let created = engine
            .create_invitation(CreateInvitationPayload {
                first_name: " Noor ".to_string(),
                last_name: "Asad".to_string(),
                contacts: vec![Contact {
                    method: ContactMethod::Phone,
                    value: " +923001112233 ".to_string(),
                }],
                invitation_code: None,
            })
            .await
            .unwrap();
        assert_eq!(created.first_name, "Noor");
        assert_eq!(created.contacts[0].value, "+923001112233");
        assert!(created.invitation_code.starts_with("INV-"));

        let invitations = engine.get_invitations().await.unwrap();
        assert_eq!(invitations.len(), 4);
        assert_eq!(invitations[0], created);
        let stored = &engine.get_invites().await.unwrap()[0];
        assert_eq!(stored.channel, InviteChannel::Sms);

        let empty = engine
            .create_invitation(CreateInvitationPayload {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                contacts: Vec::new(),
                invitation_code: None,
            })
            .await;
        assert!(matches!(empty, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn dashboard_collects_home_widgets() {
        let snapshot = engine().dashboard().await.unwrap();
        assert_eq!(snapshot.alerts.len(), 6);
        assert_eq!(snapshot.goals.len(), 5);
        assert_eq!(
            snapshot.current_statement.map(|s| s.id),
            Some("stmt_current".to_string())
        );
        assert_eq!(snapshot.wallet.total, cents(1_343_025));
    }

    #[tokio::test]
    async fn statement_lookup_by_id() {
        let engine = engine();
        assert!(engine.get_statement("stmt_03").await.unwrap().is_some());
        assert!(engine.get_statement("stmt_99").await.unwrap().is_none());
    }
}
