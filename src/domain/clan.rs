//! Read-mostly entities: commission statements, clan goals, wars, alerts and
//! player fiat deposits.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementStatus {
    Paid,
    Pending,
    Adjusted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub id: String,
    pub week_label: String,
    pub status: StatementStatus,
    pub ggr: Money,
    pub ngr: Money,
    pub commission_rate: Decimal,
    pub adjustments: Money,
    pub final_payout: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    pub ledger_ref_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalKind {
    Individual,
    #[serde(rename = "Clan-wide")]
    ClanWide,
    #[serde(rename = "All-member")]
    AllMember,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: GoalKind,
    pub title: String,
    pub description: String,
    pub progress: u8,
    pub remaining_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarStatus {
    Upcoming,
    Active,
    Past,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct War {
    pub id: String,
    pub name: String,
    pub status: WarStatus,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub entry_fee: Money,
    pub opponent: String,
    pub registered: bool,
    pub score_you: u32,
    pub score_them: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub deep_link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositStatus {
    Pending,
    Completed,
    Failed,
}

/// A player's fiat deposit converted to USDT out of the agent wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFiatDeposit {
    pub id: String,
    pub player_id: String,
    pub player_name: String,
    pub fiat_amount: String,
    pub usdt_amount: Money,
    pub status: DepositStatus,
    pub at: DateTime<Utc>,
}
