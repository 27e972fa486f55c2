use async_trait::async_trait;

use crate::domain::{
    Alert, CreateInvitationPayload, CreateInvitePayload, DepositPayload, Error, EscalatePayload,
    EscalationTicket, Goal, Invitation, Invite, LedgerEntry, Payout, Player, PlayerAction,
    PlayerActionPayload, PlayerFiatDeposit, Statement, WalletHealth, WalletSummary, War,
    WithdrawalPayload, WithdrawalResult,
};

/// Durable string key-value storage used to mirror part of the state.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// Everything the dashboard home page shows on first load.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub wallet: WalletSummary,
    pub health: WalletHealth,
    pub alerts: Vec<Alert>,
    pub current_statement: Option<Statement>,
    pub goals: Vec<Goal>,
}

/// The agent backend as seen by callers. Served either in-process by the mock
/// engine or over HTTP; callers cannot tell which.
#[async_trait]
pub trait AgentApi: Send + Sync {
    async fn get_wallet_summary(&self) -> Result<WalletSummary, Error>;

    async fn credit_agent_deposit(&self, payload: DepositPayload) -> Result<WalletSummary, Error>;

    async fn request_withdrawal(&self, payload: WithdrawalPayload) -> Result<WithdrawalResult, Error>;

    async fn get_ledger(&self) -> Result<Vec<LedgerEntry>, Error>;

    async fn get_players(&self) -> Result<Vec<Player>, Error>;

    async fn get_player(&self, id: &str) -> Result<Option<Player>, Error>;

    async fn update_player_status(
        &self,
        id: &str,
        action: PlayerAction,
        payload: PlayerActionPayload,
    ) -> Result<Player, Error>;

    async fn get_invites(&self) -> Result<Vec<Invite>, Error>;

    async fn create_invite(&self, payload: CreateInvitePayload) -> Result<Invite, Error>;

    async fn resend_invite(&self, id: &str) -> Result<Invite, Error>;

    async fn get_invitations(&self) -> Result<Vec<Invitation>, Error>;

    async fn create_invitation(&self, payload: CreateInvitationPayload) -> Result<Invitation, Error>;

    async fn get_payouts(&self) -> Result<Vec<Payout>, Error>;

    async fn approve_payout(&self, id: &str) -> Result<Payout, Error>;

    async fn decline_payout(&self, id: &str, reason: &str) -> Result<Payout, Error>;

    async fn escalate_payout(&self, id: &str, payload: EscalatePayload) -> Result<Payout, Error>;

    async fn get_escalation_tickets(&self) -> Result<Vec<EscalationTicket>, Error>;

    async fn get_player_deposits_summary(&self) -> Result<Vec<PlayerFiatDeposit>, Error>;

    async fn get_statements(&self) -> Result<Vec<Statement>, Error>;

    async fn get_statement(&self, id: &str) -> Result<Option<Statement>, Error>;

    async fn get_goals(&self) -> Result<Vec<Goal>, Error>;

    async fn get_wars(&self) -> Result<Vec<War>, Error>;

    async fn register_war(&self, id: &str) -> Result<War, Error>;

    async fn get_alerts(&self) -> Result<Vec<Alert>, Error>;

    async fn suspend_player(&self, id: &str, payload: PlayerActionPayload) -> Result<Player, Error> {
        self.update_player_status(id, PlayerAction::Suspend, payload).await
    }

    async fn reactivate_player(&self, id: &str, payload: PlayerActionPayload) -> Result<Player, Error> {
        self.update_player_status(id, PlayerAction::Reactivate, payload).await
    }

    async fn restrict_player(&self, id: &str, payload: PlayerActionPayload) -> Result<Player, Error> {
        self.update_player_status(id, PlayerAction::Restrict, payload).await
    }

    async fn unrestrict_player(&self, id: &str, payload: PlayerActionPayload) -> Result<Player, Error> {
        self.update_player_status(id, PlayerAction::Unrestrict, payload).await
    }

    async fn get_wallet_health(&self) -> Result<WalletHealth, Error> {
        Ok(self.get_wallet_summary().await?.health())
    }

    async fn dashboard(&self) -> Result<DashboardSnapshot, Error> {
        let (wallet, alerts, statements, goals) = futures::try_join!(
            self.get_wallet_summary(),
            self.get_alerts(),
            self.get_statements(),
            self.get_goals(),
        )?;
        Ok(DashboardSnapshot {
            health: wallet.health(),
            wallet,
            alerts,
            current_statement: statements.into_iter().next(),
            goals,
        })
    }
}
