use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::money::{self, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerKind {
    #[serde(rename = "Agent Deposit")]
    AgentDeposit,
    #[serde(rename = "Agent Withdrawal")]
    AgentWithdrawal,
    #[serde(rename = "Commission Credit")]
    CommissionCredit,
    #[serde(rename = "Player Deposit Conversion")]
    PlayerDepositConversion,
    #[serde(rename = "Credit Reclaim")]
    CreditReclaim,
    #[serde(rename = "War Entry Lock")]
    WarEntryLock,
    #[serde(rename = "War Entry Release")]
    WarEntryRelease,
    #[serde(rename = "Bonus Pool Co-fund")]
    BonusPoolCofund,
}

impl LedgerKind {
    pub fn label(&self) -> &'static str {
        match self {
            LedgerKind::AgentDeposit => "Agent Deposit",
            LedgerKind::AgentWithdrawal => "Agent Withdrawal",
            LedgerKind::CommissionCredit => "Commission Credit",
            LedgerKind::PlayerDepositConversion => "Player Deposit Conversion",
            LedgerKind::CreditReclaim => "Credit Reclaim",
            LedgerKind::WarEntryLock => "War Entry Lock",
            LedgerKind::WarEntryRelease => "War Entry Release",
            LedgerKind::BonusPoolCofund => "Bonus Pool Co-fund",
        }
    }
}

impl core::fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A balance-affecting event. `amount` is signed: credits positive, debits negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: LedgerKind,
    pub description: String,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_after: Option<Money>,
    pub ref_id: String,
}

/// One-line log form, e.g. `War Entry Lock -35.00 [war_13] -> 12415.25`.
impl core::fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {:.2} [{}]", self.kind, self.amount, self.ref_id)?;
        if let Some(balance) = self.balance_after {
            write!(f, " -> {balance:.2}")?;
        }
        Ok(())
    }
}

/// Orders entries newest first and replays them backwards from `current_total`.
///
/// The newest entry gets `balance_after = current_total`; every older entry gets
/// the balance of its successor minus the successor's amount. The sort is stable,
/// so entries sharing a timestamp keep their insertion order.
pub fn reconcile(entries: &mut [LedgerEntry], current_total: Money) {
    entries.sort_by(|a, b| b.at.cmp(&a.at));

    let mut running = current_total;
    for entry in entries.iter_mut() {
        entry.balance_after = Some(money::round_cents(running));
        running -= entry.amount;
    }
}
