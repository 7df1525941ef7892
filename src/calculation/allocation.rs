//! Tip pool allocation.
//!
//! Splits a tip pool across workers in proportion to the hours each worked.
//! Every share is rounded to cents on its own, so the shares may not add up
//! to the pool exactly; the difference is reported as rounding drift.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::AuditStep;

/// The result of an allocation, including the shares and an audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// One share per input slot, rounded to 2 decimal places.
    pub shares: Vec<Decimal>,
    /// The hours that took part in the split.
    pub total_hours: Decimal,
    /// The pool that was split.
    pub tip_pool: Decimal,
    /// The sum of the rounded shares.
    pub total_allocated: Decimal,
    /// `tip_pool - total_allocated`.
    pub rounding_drift: Decimal,
    /// True if there were no hours to split over and every share is zero.
    pub degenerate: bool,
    /// The audit step recording this allocation.
    pub audit_step: AuditStep,
}

/// Rounds a monetary amount to cents, halves away from zero.
///
/// # Example
///
/// ```
/// use shift_tips::calculation::round2;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round2(Decimal::new(33335, 3)), Decimal::new(3334, 2)); // 33.335 -> 33.34
/// assert_eq!(round2(Decimal::new(40, 0)).to_string(), "40.00");
/// ```
pub fn round2(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Splits `tip_pool` across slots in proportion to their hours.
///
/// For each slot `i`: `share[i] = round2(hours[i] / sum(hours) * tip_pool)`.
///
/// Blank and negative hours contribute nothing and receive `0.00`. A blank or
/// negative pool is split as zero. When no slot contributes any hours every
/// share is `0.00` and the result is flagged as degenerate. The same happens
/// when the amounts are too large for `Decimal` to split.
///
/// # Examples
///
/// ```
/// use shift_tips::calculation::allocate_tips;
/// use rust_decimal::Decimal;
///
/// let hours = vec![Some(Decimal::new(4, 0)), Some(Decimal::new(8, 0))];
/// let result = allocate_tips(&hours, Some(Decimal::new(120, 0)));
///
/// assert_eq!(result.shares, vec![Decimal::new(4000, 2), Decimal::new(8000, 2)]);
/// assert!(!result.degenerate);
/// ```
pub fn allocate_tips(hours: &[Option<Decimal>], tip_pool: Option<Decimal>) -> AllocationResult {
    let contributing: Vec<Decimal> = hours
        .iter()
        .map(|h| h.filter(|h| h.is_sign_positive()).unwrap_or(Decimal::ZERO))
        .collect();
    let pool = tip_pool
        .filter(|p| p.is_sign_positive())
        .unwrap_or(Decimal::ZERO);

    let split = checked_sum(&contributing)
        .filter(|total| *total > Decimal::ZERO)
        .and_then(|total| split_pool(&contributing, pool, total).map(|shares| (total, shares)));

    let degenerate = split.is_none();
    let (total_hours, shares) = split.unwrap_or_else(|| {
        warn!(
            slots = hours.len(),
            tip_pool = %pool,
            "Tip pool cannot be split over these hours; every share is zero"
        );
        (
            checked_sum(&contributing).unwrap_or(Decimal::MAX),
            vec![round2(Decimal::ZERO); hours.len()],
        )
    });

    // Rounding each share can push the total one unit past `Decimal::MAX`
    let total_allocated = shares
        .iter()
        .fold(round2(Decimal::ZERO), |acc, share| acc.saturating_add(*share));
    let rounding_drift = pool.saturating_sub(total_allocated);

    debug!(
        slots = shares.len(),
        total_hours = %total_hours,
        tip_pool = %pool,
        total_allocated = %total_allocated,
        rounding_drift = %rounding_drift,
        "Allocated tip pool"
    );

    let audit_step = AuditStep {
        rule_id: "proportional_allocation".to_string(),
        rule_name: "Proportional Tip Allocation".to_string(),
        input: serde_json::json!({
            "hours": hours
                .iter()
                .map(|h| h.map(|h| h.normalize().to_string()))
                .collect::<Vec<_>>(),
            "tip_pool": pool.normalize().to_string()
        }),
        output: serde_json::json!({
            "shares": shares.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            "total_allocated": total_allocated.to_string(),
            "rounding_drift": rounding_drift.to_string()
        }),
        reasoning: if degenerate && total_hours > Decimal::ZERO {
            format!(
                "Split of ${} over {} slot(s) exceeds the decimal range: all shares set to $0.00",
                pool.normalize(),
                hours.len()
            )
        } else if degenerate {
            format!(
                "No contributing hours across {} slot(s): all shares set to $0.00",
                hours.len()
            )
        } else {
            format!(
                "Split ${} over {} hours across {} slot(s): allocated ${} (drift ${})",
                pool.normalize(),
                total_hours.normalize(),
                hours.len(),
                total_allocated,
                rounding_drift
            )
        },
    };

    AllocationResult {
        shares,
        total_hours,
        tip_pool: pool,
        total_allocated,
        rounding_drift,
        degenerate,
        audit_step,
    }
}

fn checked_sum(values: &[Decimal]) -> Option<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
}

/// Computes every rounded share, or `None` if any of them overflows.
///
/// Multiplies before dividing, and divides first only when the product
/// overflows.
fn split_pool(
    contributing: &[Decimal],
    pool: Decimal,
    total_hours: Decimal,
) -> Option<Vec<Decimal>> {
    contributing
        .iter()
        .map(|h| {
            h.checked_mul(pool)
                .and_then(|amount| amount.checked_div(total_hours))
                .or_else(|| {
                    h.checked_div(total_hours)
                        .and_then(|ratio| ratio.checked_mul(pool))
                })
                .map(round2)
        })
        .collect()
}
