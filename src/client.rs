use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::config::Config;
use crate::domain::{
    AgentApi, Alert, CreateInvitationPayload, CreateInvitePayload, DeclinePayload, DepositPayload,
    Error, EscalatePayload, EscalationTicket, Goal, Invitation, Invite, LedgerEntry, Payout, Player,
    PlayerAction, PlayerActionPayload, PlayerFiatDeposit, Statement, WalletHealth, WalletSummary,
    War, WithdrawalPayload, WithdrawalResult,
};
use crate::engine::MockEngine;
use crate::server::API_PREFIX;
use crate::state::{FileKv, MemoryKv, StateStore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Picks the backend once at startup. Callers only ever see the trait object.
pub fn connect(config: &Config) -> Result<Arc<dyn AgentApi>, Error> {
    if config.use_mock_api {
        mock(config)
    } else {
        info!(base_url = %config.api_base_url, "using remote backend");
        Ok(Arc::new(HttpBackend::new(&config.api_base_url)?))
    }
}

/// In-process backend, persisted under `data_dir` when one is configured.
pub fn mock(config: &Config) -> Result<Arc<dyn AgentApi>, Error> {
    let latency = Duration::from_millis(config.mock_latency_ms);
    let now = Utc::now();
    Ok(match &config.data_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "using mock backend with file storage");
            Arc::new(MockEngine::new(StateStore::open(FileKv::open(dir)?, now), latency))
        }
        None => {
            info!("using in-memory mock backend");
            Arc::new(MockEngine::new(StateStore::open(MemoryKv::new(), now), latency))
        }
    })
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`AgentApi`] over the `/api` HTTP surface.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base: String,
}

fn transport(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}

fn seg(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(transport)?;
        Ok(Self {
            http,
            base: format!("{}{API_PREFIX}", base_url.trim_end_matches('/')),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let response = self
            .http
            .get(format!("{}/{path}", self.base))
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}/{path}", self.base))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(transport);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        Err(match status {
            StatusCode::NOT_FOUND => Error::NotFound(message),
            StatusCode::CONFLICT => Error::InvalidTransition(message),
            StatusCode::UNPROCESSABLE_ENTITY => Error::Validation(message),
            _ => Error::Transport(message),
        })
    }
}

#[async_trait]
impl AgentApi for HttpBackend {
    async fn get_wallet_summary(&self) -> Result<WalletSummary, Error> {
        self.get("wallet/summary").await
    }

    async fn get_wallet_health(&self) -> Result<WalletHealth, Error> {
        self.get("wallet/health").await
    }

    async fn credit_agent_deposit(&self, payload: DepositPayload) -> Result<WalletSummary, Error> {
        self.post("agent/wallet/deposit", &payload).await
    }

    async fn request_withdrawal(&self, payload: WithdrawalPayload) -> Result<WithdrawalResult, Error> {
        self.post("agent/wallet/withdraw", &payload).await
    }

    async fn get_ledger(&self) -> Result<Vec<LedgerEntry>, Error> {
        self.get("ledger").await
    }

    async fn get_players(&self) -> Result<Vec<Player>, Error> {
        self.get("players").await
    }

    async fn get_player(&self, id: &str) -> Result<Option<Player>, Error> {
        self.get(&format!("players/{}", seg(id))).await
    }

    async fn update_player_status(
        &self,
        id: &str,
        action: PlayerAction,
        payload: PlayerActionPayload,
    ) -> Result<Player, Error> {
        self.post(&format!("players/{}/{}", seg(id), action.verb()), &payload)
            .await
    }

    async fn get_invites(&self) -> Result<Vec<Invite>, Error> {
        self.get("invites").await
    }

    async fn create_invite(&self, payload: CreateInvitePayload) -> Result<Invite, Error> {
        self.post("invites", &payload).await
    }

    async fn resend_invite(&self, id: &str) -> Result<Invite, Error> {
        self.post(&format!("invites/{}/resend", seg(id)), &json!({}))
            .await
    }

    async fn get_invitations(&self) -> Result<Vec<Invitation>, Error> {
        self.get("invitations").await
    }

    async fn create_invitation(&self, payload: CreateInvitationPayload) -> Result<Invitation, Error> {
        self.post("invitations", &payload).await
    }

    async fn get_payouts(&self) -> Result<Vec<Payout>, Error> {
        self.get("payouts").await
    }

    async fn approve_payout(&self, id: &str) -> Result<Payout, Error> {
        self.post(&format!("payouts/{}/approve", seg(id)), &json!({}))
            .await
    }

    async fn decline_payout(&self, id: &str, reason: &str) -> Result<Payout, Error> {
        let payload = DeclinePayload {
            reason: reason.to_string(),
        };
        self.post(&format!("payouts/{}/decline", seg(id)), &payload)
            .await
    }

    async fn escalate_payout(&self, id: &str, payload: EscalatePayload) -> Result<Payout, Error> {
        self.post(&format!("payouts/{}/escalate", seg(id)), &payload)
            .await
    }

    async fn get_escalation_tickets(&self) -> Result<Vec<EscalationTicket>, Error> {
        self.get("payouts/escalations").await
    }

    async fn get_player_deposits_summary(&self) -> Result<Vec<PlayerFiatDeposit>, Error> {
        self.get("player-deposits-summary").await
    }

    async fn get_statements(&self) -> Result<Vec<Statement>, Error> {
        self.get("statements").await
    }

    async fn get_statement(&self, id: &str) -> Result<Option<Statement>, Error> {
        self.get(&format!("statements/{}", seg(id))).await
    }

    async fn get_goals(&self) -> Result<Vec<Goal>, Error> {
        self.get("goals").await
    }

    async fn get_wars(&self) -> Result<Vec<War>, Error> {
        self.get("wars").await
    }

    async fn register_war(&self, id: &str) -> Result<War, Error> {
        self.post(&format!("wars/{}/register", seg(id)), &json!({}))
            .await
    }

    async fn get_alerts(&self) -> Result<Vec<Alert>, Error> {
        self.get("alerts").await
    }
}
