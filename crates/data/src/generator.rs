//! Synthetic trade generator.
//!
//! Produces realistic trade records for load testing and demos: weighted
//! settlement outcomes, failure reasons, margin flags, and value-at-risk
//! drawn as a small fraction of notional. Seeded, so runs are
//! reproducible.

use chrono::{DateTime, Duration, Utc};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{FailureReason, TradeRecord, TradeSide};

const SYMBOLS: [&str; 10] = [
    "AAPL", "MSFT", "GOOG", "AMZN", "TSLA", "NVDA", "META", "NFLX", "ADBE", "ORCL",
];

/// Seeded generator of synthetic trade records.
pub struct TradeGenerator {
    rng: ChaCha8Rng,
}

impl TradeGenerator {
    /// Creates a generator with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Generates `count` trades dated within the 30 days before `now`.
    pub fn generate(&mut self, count: usize, now: DateTime<Utc>) -> Vec<TradeRecord> {
        (0..count).map(|_| self.next_trade(now)).collect()
    }

    /// Generates a single trade dated within the 30 days before `now`.
    pub fn next_trade(&mut self, now: DateTime<Utc>) -> TradeRecord {
        let trade_id = format!(
            "TRD{}",
            &Uuid::new_v4().simple().to_string()[..12].to_uppercase()
        );
        let symbol = SYMBOLS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("AAPL")
            .to_string();
        let side = if self.rng.gen_bool(0.5) {
            TradeSide::Buy
        } else {
            TradeSide::Sell
        };

        let quantity = Decimal::from(self.rng.gen_range(1..=5000));
        let price = Decimal::from_f64(self.rng.gen_range(5.0..3000.0))
            .unwrap_or(Decimal::ONE)
            .round_dp(2);

        let age = Duration::seconds(self.rng.gen_range(0..30 * 24 * 3600));
        let trade_date = now - age;
        let settlement_date = trade_date + Duration::days(self.rng.gen_range(1..=3));

        let mut record = TradeRecord::new(
            trade_id,
            symbol,
            side,
            quantity,
            price,
            trade_date,
            settlement_date,
        );

        let var_fraction = self.rng.gen_range(0.001..0.01);
        record.value_at_risk = (record.notional()
            * Decimal::from_f64(var_fraction).unwrap_or_default())
        .round_dp(4);
        record.is_margin_trade = self.rng.gen_bool(0.25);
        record.buyer_id = format!("BUY_{}", self.rng.gen_range(10000..=99999));
        record.seller_id = format!("SELL_{}", self.rng.gen_range(10000..=99999));

        let outcome = self.rng.gen_range(0.0..1.0);
        if outcome < 0.75 {
            // A slice of settled trades lands late so delay analysis has
            // signal to work with.
            let actual = if self.rng.gen_bool(0.2) {
                settlement_date + Duration::days(self.rng.gen_range(1..=4))
            } else {
                settlement_date
            };
            record.mark_settled(actual);
        } else if outcome < 0.90 {
            let reason = FailureReason::ALL
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(FailureReason::BadSettlement);
            record.mark_failed(reason);
        }
        // else: stays PENDING

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generated_trades_satisfy_invariants() {
        let mut generator = TradeGenerator::new(42);
        for record in generator.generate(500, fixed_now()) {
            record.validate().expect("generated trade must validate");
            assert!(record.quantity >= dec!(1) && record.quantity <= dec!(5000));
            assert!(record.price >= dec!(5) && record.price <= dec!(3000));
            assert!(record.trade_date <= fixed_now());
            assert!(record.settlement_date > record.trade_date);
        }
    }

    #[test]
    fn test_var_is_fraction_of_notional() {
        let mut generator = TradeGenerator::new(7);
        for record in generator.generate(200, fixed_now()) {
            let lower = record.notional() * dec!(0.001) - dec!(0.001);
            let upper = record.notional() * dec!(0.01) + dec!(0.001);
            assert!(
                record.value_at_risk >= lower && record.value_at_risk <= upper,
                "VaR {} outside [{}, {}] for notional {}",
                record.value_at_risk,
                lower,
                upper,
                record.notional()
            );
        }
    }

    #[test]
    fn test_settlement_iff_settled() {
        let mut generator = TradeGenerator::new(99);
        for record in generator.generate(300, fixed_now()) {
            assert_eq!(record.actual_settlement_date.is_some(), record.is_settled());
            assert_eq!(record.failure_reason.is_some(), record.is_failed());
        }
    }

    #[test]
    fn test_same_seed_same_trades() {
        let now = fixed_now();
        let a = TradeGenerator::new(1234).generate(50, now);
        let b = TradeGenerator::new(1234).generate(50, now);

        for (left, right) in a.iter().zip(&b) {
            assert_eq!(left.symbol, right.symbol);
            assert_eq!(left.quantity, right.quantity);
            assert_eq!(left.price, right.price);
            assert_eq!(left.status, right.status);
            assert_eq!(left.trade_date, right.trade_date);
        }
    }

    #[test]
    fn test_outcome_mix_is_plausible() {
        let mut generator = TradeGenerator::new(2024);
        let trades = generator.generate(1000, fixed_now());

        let settled = trades.iter().filter(|t| t.is_settled()).count();
        let failed = trades.iter().filter(|t| t.is_failed()).count();
        let pending = trades.iter().filter(|t| t.is_pending()).count();

        assert_eq!(settled + failed + pending, 1000);
        // 75/15/10 weights with generous tolerance
        assert!((650..=850).contains(&settled), "settled = {settled}");
        assert!((80..=220).contains(&failed), "failed = {failed}");
        assert!((40..=170).contains(&pending), "pending = {pending}");
    }
}
