use rust_decimal::{Decimal, RoundingStrategy};

/// Currency amount in USDT. Exact decimal, serialized as a JSON number.
pub type Money = Decimal;

/// Number of decimal places kept on stored balances.
pub const CENTS_DP: u32 = 2;

/// Builds an amount from a whole number of cents: `cents(1_343_025)` is 13430.25.
pub fn cents(value: i64) -> Money {
    Decimal::new(value, CENTS_DP)
}

/// Rounds half away from zero to cents, the way balances are displayed.
pub fn round_cents(value: Money) -> Money {
    value.round_dp_with_strategy(CENTS_DP, RoundingStrategy::MidpointAwayFromZero)
}
