//! Trade data model.
//!
//! One record per executed trade. Records are created by an ingestion
//! process (production feed or the synthetic generator) and are read-only
//! to the analytics layer.

use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An executed trade.
///
/// Side is carried by the explicit `side` column; `quantity` is always
/// positive. Analyses that need a signed quantity derive it via
/// [`TradeRecord::signed_quantity`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TradeRecord {
    /// Globally unique trade identifier
    pub trade_id: String,
    /// Instrument ticker
    pub symbol: String,
    /// Trade side: "BUY" or "SELL"
    pub side: String,
    /// Positive share count
    pub quantity: Decimal,
    /// Positive unit price
    pub price: Decimal,
    /// ISO currency code of the trade
    pub trade_currency: String,
    /// Timestamp of execution
    pub trade_date: DateTime<Utc>,
    /// Expected settlement timestamp
    pub settlement_date: DateTime<Utc>,
    /// Actual settlement timestamp, present once settlement occurred
    pub actual_settlement_date: Option<DateTime<Utc>>,
    /// Counterparty identifiers
    pub buyer_id: String,
    pub seller_id: String,
    /// Trade status: "SETTLED", "FAILED" or "PENDING"
    pub status: String,
    /// Failure reason, present iff status is "FAILED"
    pub failure_reason: Option<String>,
    /// Non-negative value at risk for this trade
    pub value_at_risk: Decimal,
    /// Whether the trade was executed on margin
    pub is_margin_trade: bool,
}

impl TradeRecord {
    /// Creates a new pending trade record.
    pub fn new(
        trade_id: String,
        symbol: String,
        side: TradeSide,
        quantity: Decimal,
        price: Decimal,
        trade_date: DateTime<Utc>,
        settlement_date: DateTime<Utc>,
    ) -> Self {
        Self {
            trade_id,
            symbol,
            side: side.as_str().to_string(),
            quantity,
            price,
            trade_currency: "USD".to_string(),
            trade_date,
            settlement_date,
            actual_settlement_date: None,
            buyer_id: String::new(),
            seller_id: String::new(),
            status: TradeStatus::Pending.as_str().to_string(),
            failure_reason: None,
            value_at_risk: Decimal::ZERO,
            is_margin_trade: false,
        }
    }

    /// Marks the trade as settled at the given timestamp.
    pub fn mark_settled(&mut self, actual_settlement_date: DateTime<Utc>) {
        self.status = TradeStatus::Settled.as_str().to_string();
        self.actual_settlement_date = Some(actual_settlement_date);
        self.failure_reason = None;
    }

    /// Marks the trade as failed with the given reason.
    pub fn mark_failed(&mut self, reason: FailureReason) {
        self.status = TradeStatus::Failed.as_str().to_string();
        self.failure_reason = Some(reason.as_str().to_string());
        self.actual_settlement_date = None;
    }

    /// Notional value of the trade (quantity × price).
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.quantity * self.price
    }

    /// Returns true if this trade failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == "FAILED"
    }

    /// Returns true if this trade settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.status == "SETTLED"
    }

    /// Returns true if this trade is still pending settlement.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == "PENDING"
    }

    /// Returns true if this is a sell order.
    #[must_use]
    pub fn is_sell(&self) -> bool {
        self.side == "SELL"
    }

    /// Quantity with the side applied as a sign: negative for sells.
    #[must_use]
    pub fn signed_quantity(&self) -> Decimal {
        if self.is_sell() {
            -self.quantity
        } else {
            self.quantity
        }
    }

    /// Returns the parsed trade status.
    #[must_use]
    pub fn parsed_status(&self) -> Option<TradeStatus> {
        TradeStatus::parse(&self.status)
    }

    /// Settlement delay in whole days, if the trade actually settled.
    ///
    /// Negative values mean the trade settled early.
    #[must_use]
    pub fn settlement_delay_days(&self) -> Option<i64> {
        self.actual_settlement_date
            .map(|actual| (actual - self.settlement_date).num_days())
    }

    /// Checks the documented record invariants.
    ///
    /// The store does not enforce these; the generator and ingestion
    /// paths are expected to call this before inserting.
    ///
    /// # Errors
    /// Returns an error describing the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.trade_id.is_empty(), "trade_id must not be empty");
        ensure!(
            self.quantity > Decimal::ZERO,
            "quantity must be positive, got {}",
            self.quantity
        );
        ensure!(
            self.price > Decimal::ZERO,
            "price must be positive, got {}",
            self.price
        );
        ensure!(
            self.value_at_risk >= Decimal::ZERO,
            "value_at_risk must be non-negative, got {}",
            self.value_at_risk
        );
        ensure!(
            TradeStatus::parse(&self.status).is_some(),
            "unknown status {:?}",
            self.status
        );
        ensure!(
            self.failure_reason.is_some() == self.is_failed(),
            "failure_reason must be present iff status is FAILED"
        );
        Ok(())
    }
}

/// Side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

/// Settlement status of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeStatus {
    Settled,
    Failed,
    Pending,
}

impl TradeStatus {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Settled => "SETTLED",
            TradeStatus::Failed => "FAILED",
            TradeStatus::Pending => "PENDING",
        }
    }

    /// Parses a status string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SETTLED" => Some(TradeStatus::Settled),
            "FAILED" => Some(TradeStatus::Failed),
            "PENDING" => Some(TradeStatus::Pending),
            _ => None,
        }
    }
}

/// Reason a trade failed to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    InsufficientFunds,
    BadSettlement,
    MissingDocs,
    ComplianceHold,
}

impl FailureReason {
    /// All known failure reasons.
    pub const ALL: [FailureReason; 4] = [
        FailureReason::InsufficientFunds,
        FailureReason::BadSettlement,
        FailureReason::MissingDocs,
        FailureReason::ComplianceHold,
    ];

    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::InsufficientFunds => "INSUFFICIENT_FUNDS",
            FailureReason::BadSettlement => "BAD_SETTLEMENT",
            FailureReason::MissingDocs => "MISSING_DOCS",
            FailureReason::ComplianceHold => "COMPLIANCE_HOLD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 14, 30, 0).unwrap()
    }

    fn sample_trade() -> TradeRecord {
        let trade_date = sample_timestamp();
        let mut record = TradeRecord::new(
            "TRD0123456789AB".to_string(),
            "AAPL".to_string(),
            TradeSide::Buy,
            dec!(100),
            dec!(150.25),
            trade_date,
            trade_date + chrono::Duration::days(2),
        );
        record.value_at_risk = dec!(75.1250);
        record
    }

    #[test]
    fn test_new_trade_is_pending() {
        let record = sample_trade();
        assert!(record.is_pending());
        assert!(!record.is_failed());
        assert!(record.actual_settlement_date.is_none());
        assert!(record.failure_reason.is_none());
    }

    #[test]
    fn test_notional() {
        let record = sample_trade();
        assert_eq!(record.notional(), dec!(15025.00));
    }

    #[test]
    fn test_signed_quantity() {
        let mut record = sample_trade();
        assert_eq!(record.signed_quantity(), dec!(100));

        record.side = TradeSide::Sell.as_str().to_string();
        assert!(record.is_sell());
        assert_eq!(record.signed_quantity(), dec!(-100));
    }

    #[test]
    fn test_mark_settled() {
        let mut record = sample_trade();
        let actual = record.settlement_date + chrono::Duration::days(1);
        record.mark_settled(actual);

        assert!(record.is_settled());
        assert_eq!(record.actual_settlement_date, Some(actual));
        assert_eq!(record.settlement_delay_days(), Some(1));
    }

    #[test]
    fn test_mark_failed_sets_reason() {
        let mut record = sample_trade();
        record.mark_failed(FailureReason::ComplianceHold);

        assert!(record.is_failed());
        assert_eq!(record.failure_reason.as_deref(), Some("COMPLIANCE_HOLD"));
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_settlement_delay_none_when_unsettled() {
        let record = sample_trade();
        assert_eq!(record.settlement_delay_days(), None);
    }

    #[test]
    fn test_settlement_delay_negative_when_early() {
        let mut record = sample_trade();
        let actual = record.settlement_date - chrono::Duration::days(1);
        record.mark_settled(actual);
        assert_eq!(record.settlement_delay_days(), Some(-1));
    }

    #[test]
    fn test_validate_rejects_orphan_failure_reason() {
        let mut record = sample_trade();
        record.failure_reason = Some("MISSING_DOCS".to_string());
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_quantity() {
        let mut record = sample_trade();
        record.quantity = Decimal::ZERO;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_status() {
        let mut record = sample_trade();
        record.status = "LIMBO".to_string();
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [TradeStatus::Settled, TradeStatus::Failed, TradeStatus::Pending] {
            assert_eq!(TradeStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TradeStatus::parse("settled"), None);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut record = sample_trade();
        record.mark_failed(FailureReason::BadSettlement);

        let json = serde_json::to_string(&record).expect("serialization failed");
        let parsed: TradeRecord = serde_json::from_str(&json).expect("deserialization failed");

        assert_eq!(parsed.trade_id, record.trade_id);
        assert_eq!(parsed.quantity, record.quantity);
        assert_eq!(parsed.failure_reason, record.failure_reason);
    }
}
