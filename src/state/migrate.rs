//! Decoding of persisted collections.
//!
//! Current documents are `{"version": 2, "items": [...]}`. Version 1 documents
//! are bare JSON arrays written before statuses were closed enums; their
//! status strings are normalized here, once, when the store is opened.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Error, EscalationTicket, Invitation, Invite, Payout, Player};
use crate::ids;

pub const SCHEMA_VERSION: u64 = 2;

#[derive(Debug, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub version: u64,
    pub items: T,
}

pub fn encode<T: Serialize>(items: &[T]) -> Result<String, Error> {
    Ok(serde_json::to_string(&Versioned {
        version: SCHEMA_VERSION,
        items,
    })?)
}

enum Document {
    Current(Value),
    Legacy(Vec<Value>),
}

fn classify(raw: &str) -> Result<Document, Error> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(items) => Ok(Document::Legacy(items)),
        Value::Object(mut map) => match map.get("version").and_then(Value::as_u64) {
            Some(SCHEMA_VERSION) => Ok(Document::Current(
                map.remove("items").unwrap_or(Value::Array(Vec::new())),
            )),
            Some(other) => Err(Error::Storage(format!(
                "Unsupported document version {other}"
            ))),
            None => Err(Error::Storage("Document has no version".to_string())),
        },
        _ => Err(Error::Storage("Document is not a collection".to_string())),
    }
}

fn with_status<T: DeserializeOwned>(
    mut item: Value,
    normalize: fn(Option<&str>) -> &'static str,
) -> Result<T, Error> {
    if let Value::Object(map) = &mut item {
        let status = normalize(map.get("status").and_then(Value::as_str));
        map.insert("status".to_string(), Value::from(status));
    }
    Ok(serde_json::from_value(item)?)
}

/// `frozen` was the old name for a suspension; anything unknown becomes Active.
pub fn legacy_player_status(status: Option<&str>) -> &'static str {
    let Some(status) = status.map(str::trim) else {
        return "Active";
    };
    match status {
        "Active" => "Active",
        "Suspended" => "Suspended",
        "Restricted" => "Restricted",
        s if s.eq_ignore_ascii_case("frozen") => "Suspended",
        _ => "Active",
    }
}

pub fn legacy_payout_status(status: Option<&str>) -> &'static str {
    let Some(status) = status else {
        return "Pending";
    };
    match status.to_ascii_lowercase().as_str() {
        "approved" | "processing" | "paid" | "completed" => "Approved",
        "declined" | "failed" => "Declined",
        "escalated" | "escalate" => "Escalate",
        _ => "Pending",
    }
}

pub fn players(raw: &str) -> Result<Vec<Player>, Error> {
    match classify(raw)? {
        Document::Current(items) => Ok(serde_json::from_value(items)?),
        Document::Legacy(items) => items
            .into_iter()
            .map(|item| with_status(item, legacy_player_status))
            .collect(),
    }
}

pub fn payouts(raw: &str) -> Result<Vec<Payout>, Error> {
    match classify(raw)? {
        Document::Current(items) => Ok(serde_json::from_value(items)?),
        Document::Legacy(items) => items
            .into_iter()
            .map(|item| with_status(item, legacy_payout_status))
            .collect(),
    }
}

pub fn escalations(raw: &str) -> Result<Vec<EscalationTicket>, Error> {
    match classify(raw)? {
        Document::Current(items) => Ok(serde_json::from_value(items)?),
        Document::Legacy(items) => Ok(serde_json::from_value(Value::Array(items))?),
    }
}

/// Stored invites document, before it is combined with the seeded invites.
#[derive(Debug)]
pub enum StoredInvites {
    /// Current documents hold the whole collection, plain and named invites alike.
    All(Vec<Invite>),
    /// Legacy documents hold only the invitations (name plus contacts).
    Named(Vec<Invite>),
}

impl StoredInvites {
    /// Legacy invitations replace the seeded named invites and sit beside the
    /// seeded plain ones. An id already used by a plain invite is renamed.
    pub fn merge(self, seeded: Vec<Invite>) -> Vec<Invite> {
        let named = match self {
            StoredInvites::All(invites) => return invites,
            StoredInvites::Named(named) => named,
        };

        let mut merged: Vec<Invite> = seeded
            .into_iter()
            .filter(|i| i.invitee.is_none())
            .collect();
        for mut invite in named {
            if merged.iter().any(|i| i.id == invite.id) {
                invite.id = renamed_id(&merged, &invite.id);
            }
            merged.push(invite);
        }
        merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        merged
    }
}

fn renamed_id(taken: &[Invite], id: &str) -> String {
    let is_free = |candidate: &str| taken.iter().all(|i| i.id != candidate);
    if let Some(candidate) = id
        .strip_prefix("inv_")
        .map(|n| format!("invitation_{n}"))
        .filter(|c| is_free(c))
    {
        return candidate;
    }
    loop {
        let candidate = ids::prefixed("invitation", 8);
        if is_free(&candidate) {
            return candidate;
        }
    }
}

pub fn invites(raw: &str) -> Result<StoredInvites, Error> {
    match classify(raw)? {
        Document::Current(items) => Ok(StoredInvites::All(serde_json::from_value(items)?)),
        Document::Legacy(items) => {
            let invitations: Vec<Invitation> = serde_json::from_value(Value::Array(items))?;
            Ok(StoredInvites::Named(
                invitations
                    .into_iter()
                    .map(|invitation| invitation.into_invite(ids::invite_link()))
                    .collect(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InviteStatus, PayoutStatus, PlayerStatus};
    use serde_json::json;

    fn legacy_player(status: Option<&str>) -> Value {
        let mut player = json!({
            "id": "pl_1000",
            "name": "Adeel 1",
            "username": "player1",
            "kycTier": "Tier A",
            "riskScore": 0,
            "lastActive": "2026-01-10T10:00:00Z",
            "balanceAvailable": 150,
            "balancePending": 50,
            "balanceLocked": 80
        });
        if let Some(status) = status {
            player["status"] = Value::from(status);
        }
        player
    }

    #[test]
    fn legacy_player_statuses_are_normalized() {
        let raw = Value::Array(vec![
            legacy_player(Some("frozen")),
            legacy_player(Some(" Restricted ")),
            legacy_player(Some("banned")),
            legacy_player(None),
        ])
        .to_string();

        let statuses: Vec<_> = players(&raw).unwrap().into_iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            [
                PlayerStatus::Suspended,
                PlayerStatus::Restricted,
                PlayerStatus::Active,
                PlayerStatus::Active
            ]
        );
    }

    #[test]
    fn legacy_payout_statuses_are_normalized() {
        let cases = [
            (Some("Completed"), "Approved"),
            (Some("processing"), "Approved"),
            (Some("Failed"), "Declined"),
            (Some("escalated"), "Escalate"),
            (Some("weird"), "Pending"),
            (None, "Pending"),
        ];
        for (legacy, expected) in cases {
            assert_eq!(legacy_payout_status(legacy), expected);
        }

        let raw = json!([{
            "id": "pay_2",
            "playerId": "pl_1001",
            "playerName": "Player Two",
            "amount": 80,
            "method": "Crypto",
            "status": "paid",
            "requestedAt": "2026-01-10T10:00:00Z",
            "destinationMasked": "TRC20 •••• 8F2A"
        }])
        .to_string();
        let payouts = payouts(&raw).unwrap();
        assert_eq!(payouts[0].status, PayoutStatus::Approved);
        assert!(payouts[0].timeline.is_empty());
    }

    #[test]
    fn current_documents_round_trip_through_encode() {
        let raw = Value::Array(vec![legacy_player(Some("Suspended"))]).to_string();
        let loaded = players(&raw).unwrap();
        let encoded = encode(&loaded).unwrap();
        assert_eq!(players(&encoded).unwrap(), loaded);
    }

    #[test]
    fn unknown_versions_and_garbage_are_rejected() {
        assert!(matches!(
            players(r#"{"version": 9, "items": []}"#),
            Err(Error::Storage(_))
        ));
        assert!(matches!(players("42"), Err(Error::Storage(_))));
        assert!(matches!(players("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn legacy_invitations_become_named_invites() {
        let raw = json!([{
            "id": "inv_02",
            "firstName": "Sara",
            "lastName": "Ahmed",
            "contacts": [{"method": "PHONE", "value": "+971501234567"}],
            "status": "COMPLETED",
            "invitationCode": "INV-A1B2-C3D4-E5F6",
            "createdAt": "2026-01-10T10:00:00Z",
            "expiresAt": "2026-01-17T10:00:00Z"
        }])
        .to_string();
        let Ok(StoredInvites::Named(invites)) = invites(&raw) else {
            panic!("legacy array should decode as named invites");
        };
        assert_eq!(invites[0].status, InviteStatus::Accepted);
        assert_eq!(
            invites[0].invitee.as_ref().map(|i| i.first_name.as_str()),
            Some("Sara")
        );
    }
}
