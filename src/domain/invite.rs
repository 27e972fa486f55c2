//! Invites sent by the agent.
//!
//! There is a single stored entity. Simple channel invites have no `invitee`;
//! invites created for a named person carry one, and those are exposed on the
//! invitations endpoint through [`Invitation`], a view mapped from [`Invite`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InviteChannel {
    Email,
    WhatsApp,
    Telegram,
    #[serde(rename = "SMS")]
    Sms,
    Copy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InviteStatus {
    Pending,
    Accepted,
    Expired,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContactMethod {
    Email,
    WhatsApp,
    Phone,
    Telegram,
}

impl From<ContactMethod> for InviteChannel {
    fn from(method: ContactMethod) -> Self {
        match method {
            ContactMethod::Email => InviteChannel::Email,
            ContactMethod::WhatsApp => InviteChannel::WhatsApp,
            ContactMethod::Phone => InviteChannel::Sms,
            ContactMethod::Telegram => InviteChannel::Telegram,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub method: ContactMethod,
    pub value: String,
}

/// The named person an invite was created for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitee {
    pub first_name: String,
    pub last_name: String,
    pub contacts: Vec<Contact>,
    pub invitation_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub channel: InviteChannel,
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_by_player_id: Option<String>,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitee: Option<Invitee>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvitationStatus {
    Pending,
    Completed,
}

impl From<InviteStatus> for InvitationStatus {
    fn from(status: InviteStatus) -> Self {
        match status {
            InviteStatus::Accepted => InvitationStatus::Completed,
            _ => InvitationStatus::Pending,
        }
    }
}

impl From<InvitationStatus> for InviteStatus {
    fn from(status: InvitationStatus) -> Self {
        match status {
            InvitationStatus::Completed => InviteStatus::Accepted,
            InvitationStatus::Pending => InviteStatus::Pending,
        }
    }
}

/// Wire shape of a named invite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub contacts: Vec<Contact>,
    pub status: InvitationStatus,
    pub invitation_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Invitation {
    /// Returns `None` for plain channel invites.
    pub fn from_invite(invite: &Invite) -> Option<Self> {
        let invitee = invite.invitee.as_ref()?;
        Some(Self {
            id: invite.id.clone(),
            first_name: invitee.first_name.clone(),
            last_name: invitee.last_name.clone(),
            contacts: invitee.contacts.clone(),
            status: invite.status.into(),
            invitation_code: invitee.invitation_code.clone(),
            created_at: invite.created_at,
            expires_at: invite.expires_at,
        })
    }

    /// Folds an invitation back into the stored shape. The channel follows the
    /// first contact, defaulting to `Copy` when there are none.
    pub fn into_invite(self, link: String) -> Invite {
        let channel = self
            .contacts
            .first()
            .map(|c| InviteChannel::from(c.method))
            .unwrap_or(InviteChannel::Copy);
        Invite {
            id: self.id,
            label: Some(format!("{} {}", self.first_name, self.last_name)),
            channel,
            status: self.status.into(),
            created_at: self.created_at,
            expires_at: self.expires_at,
            accepted_by_player_id: None,
            link,
            invitee: Some(Invitee {
                first_name: self.first_name,
                last_name: self.last_name,
                contacts: self.contacts,
                invitation_code: self.invitation_code,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitePayload {
    pub channel: InviteChannel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitationPayload {
    pub first_name: String,
    pub last_name: String,
    pub contacts: Vec<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitation_code: Option<String>,
}
