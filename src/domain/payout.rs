use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::money::Money;
use crate::domain::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutStatus {
    Pending,
    Approved,
    Declined,
    Escalate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutMethod {
    Crypto,
    Fiat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub at: DateTime<Utc>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TimelineEntry {
    pub fn new(at: DateTime<Utc>, status: &str, note: impl Into<String>) -> Self {
        Self {
            at,
            status: status.to_string(),
            note: Some(note.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub id: String,
    pub player_id: String,
    pub player_name: String,
    pub amount: Money,
    pub method: PayoutMethod,
    pub status: PayoutStatus,
    pub requested_at: DateTime<Utc>,
    pub destination_masked: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decline_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acted_by: Option<String>,
}

impl Payout {
    /// Approved, Declined and Escalate are terminal; there is no reversal path.
    pub fn ensure_actionable(&self, verb: &str) -> Result<(), Error> {
        match self.status {
            PayoutStatus::Pending => Ok(()),
            _ => Err(Error::InvalidTransition(format!(
                "Payout cannot be {verb}"
            ))),
        }
    }

    pub fn approve(&mut self, now: DateTime<Utc>, tx_hash: String) -> Result<(), Error> {
        self.ensure_actionable("approved")?;
        self.status = PayoutStatus::Approved;
        self.tx_hash.get_or_insert(tx_hash);
        self.timeline.push(TimelineEntry::new(
            now,
            "Approved",
            "Agent approved; payout executed",
        ));
        Ok(())
    }

    pub fn decline(&mut self, now: DateTime<Utc>, reason: &str, acted_by: &str) -> Result<(), Error> {
        self.ensure_actionable("declined")?;
        self.status = PayoutStatus::Declined;
        self.decline_message = Some(reason.to_string());
        self.acted_at = Some(now);
        self.acted_by = Some(acted_by.to_string());
        self.timeline.push(TimelineEntry::new(now, "Declined", reason));
        Ok(())
    }

    pub fn escalate(&mut self, now: DateTime<Utc>, ticket: &EscalationTicket) -> Result<(), Error> {
        self.ensure_actionable("escalated")?;
        self.status = PayoutStatus::Escalate;
        self.timeline.push(TimelineEntry::new(
            now,
            "Escalate",
            format!("Support ticket {}: {}", ticket.id, ticket.notes),
        ));
        Ok(())
    }
}

/// Support ticket opened when a payout decision is handed to support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationTicket {
    pub id: String,
    pub payout_id: String,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalatePayload {
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclinePayload {
    pub reason: String,
}
