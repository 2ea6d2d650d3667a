use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::config::PayrollPolicy;
use crate::error::{HrmError, HrmResult};
use crate::store;

/// Everything the balance computation needs, gathered up front so the
/// arithmetic itself stays pure and testable.
#[derive(Debug, Clone, Copy)]
pub struct BalanceInputs {
    /// Annual cap from the leave type.
    pub cap: i64,
    pub carry_forward_allowed: bool,
    /// `None` when the staff lookup failed; proration is skipped and the
    /// joining year defaults to the target year.
    pub join_date: Option<NaiveDate>,
    /// Year the balance is computed for.
    pub year: i32,
    /// Approved days already taken this year.
    pub used_current_year: i64,
    /// Approved days taken in the previous year, for carry-forward.
    pub used_previous_year: i64,
    /// Policy cap on carried-forward days.
    pub carry_forward_cap: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct LeaveBalance {
    #[schema(example = 10)]
    pub entitled: i64,
    #[schema(example = 0)]
    pub carried_forward: i64,
    #[schema(example = 10)]
    pub total_entitled: i64,
    #[schema(example = 3)]
    pub used: i64,
    #[schema(example = 7)]
    pub available: i64,
}

/// Months of entitlement earned in the joining year. Joining on or before
/// the 15th counts the joining month; from the 16th it does not. The
/// mid-month cutoff is board policy and deliberately asymmetric.
fn months_worked_in_join_year(join_date: NaiveDate) -> i64 {
    let month = i64::from(join_date.month());
    let counts_join_month = if join_date.day() > 15 { 0 } else { 1 };
    (12 - month + counts_join_month).max(0)
}

/// Computes entitlement, carry-forward, usage and availability for one
/// staff member / leave type / year. Pure; no storage access.
pub fn compute_balance(inputs: &BalanceInputs) -> LeaveBalance {
    let join_year = inputs.join_date.map_or(inputs.year, |d| d.year());

    let entitled = match inputs.join_date {
        Some(join) if join_year == inputs.year => {
            inputs.cap * months_worked_in_join_year(join) / 12
        }
        _ => inputs.cap,
    };

    // Previous-year entitlement for carry-forward is the unprorated cap.
    let carried_forward = if inputs.carry_forward_allowed && inputs.year > join_year {
        (inputs.cap - inputs.used_previous_year)
            .max(0)
            .min(inputs.carry_forward_cap)
    } else {
        0
    };

    let total_entitled = entitled + carried_forward;
    let used = inputs.used_current_year;
    let available = (total_entitled - used).max(0);

    LeaveBalance {
        entitled,
        carried_forward,
        total_entitled,
        used,
        available,
    }
}

/// Store-backed wrapper: resolves the leave type (error if unknown), the
/// joining date (missing staff degrades to no proration) and the usage
/// sums, then delegates to [`compute_balance`].
pub async fn balance_for(
    pool: &MySqlPool,
    policy: &PayrollPolicy,
    staff_id: u64,
    leave_type_id: u64,
    year: i32,
) -> HrmResult<LeaveBalance> {
    let leave_type = store::leave::leave_type_by_id(pool, leave_type_id)
        .await?
        .ok_or(HrmError::NotFound("Leave type"))?;

    let join_date = store::staff::find_by_id(pool, staff_id)
        .await?
        .map(|s| s.date_of_joining);

    let used_current_year =
        store::leave::approved_days(pool, staff_id, leave_type_id, year).await?;
    let used_previous_year = if leave_type.carry_forward_allowed {
        store::leave::approved_days(pool, staff_id, leave_type_id, year - 1).await?
    } else {
        0
    };

    Ok(compute_balance(&BalanceInputs {
        cap: leave_type.max_days_per_year,
        carry_forward_allowed: leave_type.carry_forward_allowed,
        join_date,
        year,
        used_current_year,
        used_previous_year,
        carry_forward_cap: policy.carry_forward_cap,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn inputs(cap: i64) -> BalanceInputs {
        BalanceInputs {
            cap,
            carry_forward_allowed: false,
            join_date: Some(date(2020, 1, 1)),
            year: 2026,
            used_current_year: 0,
            used_previous_year: 0,
            carry_forward_cap: 30,
        }
    }

    #[test]
    fn full_entitlement_after_the_joining_year() {
        let balance = compute_balance(&inputs(12));
        assert_eq!(balance.entitled, 12);
        assert_eq!(balance.available, 12);
    }

    #[test]
    fn proration_example_march_10_joiner() {
        // cap 12, joined 2026-03-10: months worked = 12 - 3 + 1 = 10,
        // entitled = floor(12 * 10 / 12) = 10.
        let balance = compute_balance(&BalanceInputs {
            join_date: Some(date(2026, 3, 10)),
            ..inputs(12)
        });
        assert_eq!(balance.entitled, 10);
    }

    #[test]
    fn mid_month_cutoff_is_the_16th() {
        // Joining on the 15th still earns the joining month...
        let on_15th = compute_balance(&BalanceInputs {
            join_date: Some(date(2026, 6, 15)),
            ..inputs(24)
        });
        // months = 12 - 6 + 1 = 7 → floor(24 * 7 / 12) = 14
        assert_eq!(on_15th.entitled, 14);

        // ...joining on the 16th does not.
        let on_16th = compute_balance(&BalanceInputs {
            join_date: Some(date(2026, 6, 16)),
            ..inputs(24)
        });
        // months = 12 - 6 = 6 → 12
        assert_eq!(on_16th.entitled, 12);
    }

    #[test]
    fn december_joiner_after_the_15th_gets_nothing() {
        let balance = compute_balance(&BalanceInputs {
            join_date: Some(date(2026, 12, 20)),
            ..inputs(12)
        });
        assert_eq!(balance.entitled, 0);
        assert_eq!(balance.available, 0);
    }

    #[test]
    fn missing_staff_skips_proration() {
        // Join date unknown: joining year defaults to the target year but
        // entitlement stays at the full cap.
        let balance = compute_balance(&BalanceInputs {
            join_date: None,
            ..inputs(12)
        });
        assert_eq!(balance.entitled, 12);
        assert_eq!(balance.carried_forward, 0);
    }

    #[test]
    fn no_carry_forward_when_type_disallows_it() {
        let balance = compute_balance(&BalanceInputs {
            carry_forward_allowed: false,
            used_previous_year: 0,
            ..inputs(12)
        });
        assert_eq!(balance.carried_forward, 0);
    }

    #[test]
    fn no_carry_forward_in_the_joining_year() {
        let balance = compute_balance(&BalanceInputs {
            carry_forward_allowed: true,
            join_date: Some(date(2026, 2, 1)),
            year: 2026,
            ..inputs(12)
        });
        assert_eq!(balance.carried_forward, 0);
    }

    #[test]
    fn carry_forward_is_last_years_remainder() {
        let balance = compute_balance(&BalanceInputs {
            carry_forward_allowed: true,
            used_previous_year: 4,
            ..inputs(12)
        });
        assert_eq!(balance.carried_forward, 8);
        assert_eq!(balance.total_entitled, 20);
    }

    #[test]
    fn carry_forward_is_capped() {
        let balance = compute_balance(&BalanceInputs {
            carry_forward_allowed: true,
            used_previous_year: 0,
            ..inputs(45)
        });
        assert_eq!(balance.carried_forward, 30);
    }

    #[test]
    fn overdrawn_previous_year_floors_carry_forward_at_zero() {
        let balance = compute_balance(&BalanceInputs {
            carry_forward_allowed: true,
            used_previous_year: 15,
            ..inputs(12)
        });
        assert_eq!(balance.carried_forward, 0);
    }

    #[test]
    fn available_never_goes_negative() {
        let balance = compute_balance(&BalanceInputs {
            used_current_year: 40,
            ..inputs(12)
        });
        assert_eq!(balance.used, 40);
        assert_eq!(balance.available, 0);
    }
}
