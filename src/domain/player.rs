use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KycTier {
    #[serde(rename = "Tier A")]
    A,
    #[serde(rename = "Tier B")]
    B,
    #[serde(rename = "Tier C")]
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Active,
    Suspended,
    Restricted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub username: String,
    pub kyc_tier: KycTier,
    pub status: PlayerStatus,
    pub risk_score: u8,
    pub last_active: DateTime<Utc>,
    pub balance_available: Money,
    pub balance_pending: Money,
    pub balance_locked: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status_change_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status_changed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status_changed_by: Option<String>,
}

/// Reason and audit stamp supplied with every status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerActionPayload {
    pub reason: String,
    pub acted_by: String,
    pub acted_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Suspend,
    Reactivate,
    Restrict,
    Unrestrict,
}

impl PlayerAction {
    pub fn target(&self) -> PlayerStatus {
        match self {
            PlayerAction::Suspend => PlayerStatus::Suspended,
            PlayerAction::Reactivate | PlayerAction::Unrestrict => PlayerStatus::Active,
            PlayerAction::Restrict => PlayerStatus::Restricted,
        }
    }

    /// Path segment used by the HTTP surface.
    pub fn verb(&self) -> &'static str {
        match self {
            PlayerAction::Suspend => "suspend",
            PlayerAction::Reactivate => "reactivate",
            PlayerAction::Restrict => "restrict",
            PlayerAction::Unrestrict => "unrestrict",
        }
    }
}

impl Player {
    /// Any status is reachable from any other; only the latest change is remembered.
    pub fn apply(&mut self, action: PlayerAction, payload: &PlayerActionPayload) {
        self.status = action.target();
        self.last_status_change_reason = Some(payload.reason.clone());
        self.last_status_changed_at = Some(payload.acted_at.clone());
        self.last_status_changed_by = Some(payload.acted_by.clone());
    }
}
