// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Settlement arithmetic and summary aggregation.
//!
//! Derived amounts are computed at write time and never stored out of
//! sync with their inputs. Every derivation step rounds half-up to two
//! decimal places independently; values are never re-rounded cumulatively.
//!
//! Sign convention: `sub_total = received − sold − operating_cost`.

use crate::error::DomainError;
use crate::reference::CaseReference;
use crate::validation::{validate_amount, validate_commission_rate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Rounds a monetary amount half-up to two decimal places.
#[must_use]
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn round_ratio(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// How the commission for a settlement is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommissionInput {
    /// No commission: defaults to zero.
    None,
    /// An explicit commission amount, used as-is.
    Amount(Decimal),
    /// A percentage rate applied to the subtotal.
    Rate(Decimal),
}

/// The derived amounts of a settlement computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementAmounts {
    /// `received − sold − operating_cost`, rounded to 2 decimals.
    pub sub_total: Decimal,
    /// The commission amount, per the supplied `CommissionInput`.
    pub commission: Decimal,
    /// `sub_total − commission`, rounded to 2 decimals.
    pub unpaid: Decimal,
}

/// Computes the derived settlement amounts from the three input amounts.
///
/// * `sub_total = round2(received − sold − operating_cost)`
/// * commission: an explicit amount is used as-is; a rate `r` yields
///   `round2(sub_total × r / 100)`; otherwise zero.
/// * `unpaid = round2(sub_total − commission)`
///
/// # Errors
///
/// * `DomainError::InvalidAmount` if any input amount is negative.
/// * `DomainError::InvalidCommissionRate` if a rate lies outside [0, 100].
pub fn compute_settlement(
    received: Decimal,
    sold: Decimal,
    operating_cost: Decimal,
    commission: CommissionInput,
) -> Result<SettlementAmounts, DomainError> {
    validate_amount("received", received)?;
    validate_amount("sold", sold)?;
    validate_amount("operating_cost", operating_cost)?;

    let sub_total = round_amount(received - sold - operating_cost);

    let commission = match commission {
        CommissionInput::None => Decimal::ZERO,
        CommissionInput::Amount(amount) => {
            validate_amount("commission", amount)?;
            amount
        }
        CommissionInput::Rate(rate) => {
            validate_commission_rate(rate)?;
            round_amount(sub_total * rate / Decimal::ONE_HUNDRED)
        }
    };

    let unpaid = round_amount(sub_total - commission);

    Ok(SettlementAmounts {
        sub_total,
        commission,
        unpaid,
    })
}

/// The settlement ledger entry for a case.
///
/// At most one settlement record exists per case; creating a second one
/// is expressed as an update of the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// Canonical identifier assigned by the persistence layer.
    /// `None` indicates the record has not been persisted yet.
    pub settlement_id: Option<i64>,
    /// The case this record belongs to.
    pub case_reference: CaseReference,
    /// The amount received from the customer.
    pub received: Decimal,
    /// The amount remitted to suppliers.
    pub sold: Decimal,
    /// Operating costs for the case.
    pub operating_cost: Decimal,
    /// Derived: `received − sold − operating_cost`.
    pub sub_total: Decimal,
    /// The commission amount.
    pub commission: Decimal,
    /// Derived: `sub_total − commission`.
    pub unpaid: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
    /// When the record was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the record was last recomputed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl SettlementRecord {
    /// Creates a new settlement record from inputs and derived amounts,
    /// without a persisted ID.
    #[must_use]
    pub const fn new(
        case_reference: CaseReference,
        received: Decimal,
        sold: Decimal,
        operating_cost: Decimal,
        amounts: SettlementAmounts,
        notes: Option<String>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            settlement_id: None,
            case_reference,
            received,
            sold,
            operating_cost,
            sub_total: amounts.sub_total,
            commission: amounts.commission,
            unpaid: amounts.unpaid,
            notes,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Aggregate totals across a set of settlement records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    /// Sum of received amounts.
    pub total_received: Decimal,
    /// Sum of sold amounts.
    pub total_sold: Decimal,
    /// Sum of operating costs.
    pub total_operating_cost: Decimal,
    /// Sum of subtotals.
    pub total_sub_total: Decimal,
    /// Sum of commissions.
    pub total_commission: Decimal,
    /// Sum of unpaid amounts.
    pub total_unpaid: Decimal,
    /// `total_sub_total / total_received` rounded to 4 decimals, or zero
    /// when nothing was received.
    pub profit_margin: Decimal,
}

impl SettlementSummary {
    /// A summary with every total zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            total_received: Decimal::ZERO,
            total_sold: Decimal::ZERO,
            total_operating_cost: Decimal::ZERO,
            total_sub_total: Decimal::ZERO,
            total_commission: Decimal::ZERO,
            total_unpaid: Decimal::ZERO,
            profit_margin: Decimal::ZERO,
        }
    }
}

/// Reduces a set of settlement records to aggregate totals.
///
/// A pure reduction with no side effects, used for reporting. The empty
/// set yields all-zero totals and a zero profit margin.
#[must_use]
pub fn summarize(records: &[SettlementRecord]) -> SettlementSummary {
    let mut summary = SettlementSummary::zero();

    for record in records {
        summary.total_received += record.received;
        summary.total_sold += record.sold;
        summary.total_operating_cost += record.operating_cost;
        summary.total_sub_total += record.sub_total;
        summary.total_commission += record.commission;
        summary.total_unpaid += record.unpaid;
    }

    if summary.total_received > Decimal::ZERO {
        summary.profit_margin = round_ratio(summary.total_sub_total / summary.total_received);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use time::OffsetDateTime;

    fn record(received: Decimal, sold: Decimal, operating_cost: Decimal) -> SettlementRecord {
        let amounts =
            compute_settlement(received, sold, operating_cost, CommissionInput::None).unwrap();
        SettlementRecord::new(
            CaseReference::parse("GF-20260314-001").unwrap(),
            received,
            sold,
            operating_cost,
            amounts,
            None,
            OffsetDateTime::UNIX_EPOCH,
        )
    }

    #[test]
    fn test_subtotal_without_commission() {
        let amounts = compute_settlement(
            dec!(100000),
            dec!(80000),
            dec!(10000),
            CommissionInput::None,
        )
        .unwrap();

        assert_eq!(amounts.sub_total, dec!(10000.00));
        assert_eq!(amounts.commission, dec!(0));
        assert_eq!(amounts.unpaid, dec!(10000.00));
    }

    #[test]
    fn test_commission_rate_is_applied_to_subtotal() {
        let amounts = compute_settlement(
            dec!(100000),
            dec!(80000),
            dec!(10000),
            CommissionInput::Rate(dec!(10)),
        )
        .unwrap();

        assert_eq!(amounts.sub_total, dec!(10000.00));
        assert_eq!(amounts.commission, dec!(1000.00));
        assert_eq!(amounts.unpaid, dec!(9000.00));
    }

    #[test]
    fn test_explicit_commission_amount_is_used_as_is() {
        let amounts = compute_settlement(
            dec!(100000),
            dec!(80000),
            dec!(10000),
            CommissionInput::Amount(dec!(1234.56)),
        )
        .unwrap();

        assert_eq!(amounts.commission, dec!(1234.56));
        assert_eq!(amounts.unpaid, dec!(8765.44));
    }

    #[test]
    fn test_each_step_rounds_independently() {
        // sub_total rounds 0.005 up to 0.01; the rate then applies to the
        // rounded subtotal, not the raw difference.
        let amounts = compute_settlement(
            dec!(10.005),
            dec!(5.00),
            dec!(5.00),
            CommissionInput::Rate(dec!(50)),
        )
        .unwrap();

        assert_eq!(amounts.sub_total, dec!(0.01));
        assert_eq!(amounts.commission, dec!(0.01));
        assert_eq!(amounts.unpaid, dec!(0.00));
    }

    #[test]
    fn test_negative_inputs_are_rejected() {
        let result = compute_settlement(
            dec!(-1),
            dec!(0),
            dec!(0),
            CommissionInput::None,
        );
        assert!(matches!(
            result.unwrap_err(),
            DomainError::InvalidAmount { field: "received", .. }
        ));
    }

    #[test]
    fn test_rate_above_100_is_rejected() {
        let result = compute_settlement(
            dec!(100),
            dec!(0),
            dec!(0),
            CommissionInput::Rate(dec!(101)),
        );
        assert!(matches!(
            result.unwrap_err(),
            DomainError::InvalidCommissionRate { .. }
        ));
    }

    #[test]
    fn test_summarize_empty_set_is_all_zero() {
        let summary = summarize(&[]);

        assert_eq!(summary, SettlementSummary::zero());
        assert_eq!(summary.profit_margin, dec!(0));
    }

    #[test]
    fn test_summarize_totals_and_margin() {
        let records = vec![
            record(dec!(100000), dec!(80000), dec!(10000)),
            record(dec!(50000), dec!(30000), dec!(5000)),
        ];

        let summary = summarize(&records);

        assert_eq!(summary.total_received, dec!(150000));
        assert_eq!(summary.total_sold, dec!(110000));
        assert_eq!(summary.total_operating_cost, dec!(15000));
        assert_eq!(summary.total_sub_total, dec!(25000.00));
        assert_eq!(summary.total_unpaid, dec!(25000.00));
        // 25000 / 150000 = 0.16666…, rounded half-up at 4 decimals.
        assert_eq!(summary.profit_margin, dec!(0.1667));
    }

    #[test]
    fn test_summarize_zero_received_has_zero_margin() {
        let records = vec![record(dec!(0), dec!(0), dec!(0))];

        let summary = summarize(&records);

        assert_eq!(summary.profit_margin, dec!(0));
    }
}
