pub mod clan;
pub mod error;
pub mod invite;
pub mod ledger;
pub mod money;
pub mod payout;
pub mod player;
pub mod traits;
pub mod wallet;

pub use clan::{
    Alert, DepositStatus, Goal, GoalKind, PlayerFiatDeposit, Severity, Statement,
    StatementStatus, War, WarStatus,
};
pub use error::Error;
pub use invite::{
    Contact, ContactMethod, CreateInvitationPayload, CreateInvitePayload, Invitation,
    InvitationStatus, Invite, InviteChannel, InviteStatus, Invitee,
};
pub use ledger::{LedgerEntry, LedgerKind};
pub use payout::{
    DeclinePayload, EscalatePayload, EscalationTicket, Payout, PayoutMethod, PayoutStatus,
    TimelineEntry,
};
pub use player::{KycTier, Player, PlayerAction, PlayerActionPayload, PlayerStatus};
pub use traits::{AgentApi, KeyValueStore};
pub use wallet::{
    DepositPayload, WalletHealth, WalletSummary, WithdrawalPayload,
    WithdrawalResult,
};
