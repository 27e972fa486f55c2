use serde::{Deserialize, Serialize};

use crate::domain::money::{self, Money};
use crate::domain::Error;

/// Prefund the agent must hold before player deposits convert without delay.
pub const REQUIRED_PREFUND: Money = Money::from_parts(2000, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub available: Money, // funds the agent can spend or withdraw
    pub locked: Money,    // funds held by war entries and pending conversions
    pub total: Money,     // available + locked
}

impl WalletSummary {
    pub fn new(available: Money, locked: Money) -> Self {
        let mut wallet = Self {
            available,
            locked,
            total: Money::ZERO,
        };
        wallet.sync_total();
        wallet
    }

    pub fn sync_total(&mut self) {
        self.total = self.available + self.locked;
    }

    pub fn credit(&mut self, amount: Money) -> Result<(), Error> {
        if amount <= Money::ZERO {
            return Err(Error::Validation("Amount must be greater than 0".to_string()));
        }
        self.available += amount;
        self.sync_total();
        Ok(())
    }

    /// Removes funds from the wallet entirely. Balances are kept at cent precision.
    pub fn debit(&mut self, amount: Money) -> Result<(), Error> {
        if amount <= Money::ZERO {
            return Err(Error::Validation("Amount must be greater than 0".to_string()));
        }
        if amount > self.available {
            return Err(Error::Validation(
                "Insufficient available balance".to_string(),
            ));
        }
        self.available = money::round_cents(self.available - amount);
        self.sync_total();
        Ok(())
    }

    /// Moves funds from available to locked; the total does not change.
    pub fn lock(&mut self, amount: Money) -> Result<(), Error> {
        if amount > self.available {
            return Err(Error::Validation(
                "Insufficient available balance".to_string(),
            ));
        }
        self.available -= amount;
        self.locked += amount;
        self.sync_total();
        Ok(())
    }

    pub fn health(&self) -> WalletHealth {
        WalletHealth::from(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,
    Blocked,
}

/// Prefund check shown on the wallet widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletHealth {
    pub available: Money,
    pub locked: Money,
    pub required_prefund: Money,
    pub blocked_conversions: u32,
    pub pending_player_deposits: u32,
    pub top_up_required: Money,
    pub status: HealthStatus,
}

impl From<&WalletSummary> for WalletHealth {
    fn from(wallet: &WalletSummary) -> Self {
        let blocked = u32::from(wallet.available < REQUIRED_PREFUND);
        Self {
            available: wallet.available,
            locked: wallet.locked,
            required_prefund: REQUIRED_PREFUND,
            blocked_conversions: blocked,
            pending_player_deposits: blocked,
            top_up_required: (REQUIRED_PREFUND - wallet.available).max(Money::ZERO),
            status: if blocked > 0 {
                HealthStatus::Blocked
            } else {
                HealthStatus::Healthy
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalPayload {
    pub to_address: String,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalResult {
    pub withdrawal_id: String,
    pub reference: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositPayload {
    pub amount: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::cents;

    #[test]
    fn lock_keeps_total() {
        let mut wallet = WalletSummary::new(cents(1_245_025), cents(98_000));
        wallet.lock(cents(3_500)).unwrap();
        assert_eq!(wallet.available, cents(1_241_525));
        assert_eq!(wallet.locked, cents(101_500));
        assert_eq!(wallet.total, cents(1_343_025));
    }

    #[test]
    fn debit_rejects_overdraw_and_non_positive() {
        let mut wallet = WalletSummary::new(cents(10_000), Money::ZERO);
        assert!(matches!(wallet.debit(cents(10_001)), Err(Error::Validation(_))));
        assert!(matches!(wallet.debit(Money::ZERO), Err(Error::Validation(_))));
        wallet.debit(cents(2_550)).unwrap();
        assert_eq!(wallet.total, cents(7_450));
    }

    #[test]
    fn health_flags_low_prefund() {
        let low = WalletSummary::new(cents(150_000), cents(5_000));
        let health = low.health();
        assert_eq!(health.status, HealthStatus::Blocked);
        assert_eq!(health.top_up_required, cents(50_000));

        let ok = WalletSummary::new(cents(1_245_025), cents(98_000)).health();
        assert_eq!(ok.status, HealthStatus::Healthy);
        assert_eq!(ok.top_up_required, Money::ZERO);
        assert_eq!(ok.blocked_conversions, 0);
    }
}
