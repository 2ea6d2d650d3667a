use sqlx::MySqlPool;

use crate::config::PayrollPolicy;
use crate::error::{HrmError, HrmResult};
use crate::model::payslip::Payslip;
use crate::model::staff::StaffMember;
use crate::service::salary::{self, AttendanceSnapshot, PayProfile, SalaryComponents};
use crate::store;
use crate::utils::period_lock;

/// Validates a payroll period. Months outside 1–12 are caller mistakes,
/// not storage errors.
pub fn validate_period(year: i32, month: u32) -> HrmResult<()> {
    if !(1..=12).contains(&month) {
        return Err(HrmError::Validation(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    if !(2000..=2100).contains(&year) {
        return Err(HrmError::Validation(format!(
            "year {year} is outside the supported range"
        )));
    }
    Ok(())
}

/// Gathers the inputs for one staff/period salary run: the admission row
/// (an error if absent), the monthly attendance snapshot and the deduction
/// schedule (both zero-defaulted when absent).
async fn gather_inputs(
    pool: &MySqlPool,
    staff_id: u64,
) -> HrmResult<(StaffMember, crate::model::deduction::DeductionSchedule)> {
    let staff = store::staff::find_by_id(pool, staff_id)
        .await?
        .ok_or(HrmError::NotFound("Staff member"))?;

    let schedule = store::deduction::for_staff(pool, staff.id)
        .await?
        .unwrap_or_default();

    Ok((staff, schedule))
}

async fn attendance_snapshot(
    pool: &MySqlPool,
    staff_id: u64,
    year: i32,
    month: u32,
) -> HrmResult<AttendanceSnapshot> {
    let snapshot = store::attendance::monthly_summary(pool, staff_id, year, month)
        .await?
        .map(|s| AttendanceSnapshot {
            days_present: s.days_present,
            days_absent: s.days_absent,
            overtime_hours: s.overtime_hours,
        })
        .unwrap_or_default();
    Ok(snapshot)
}

/// Generates (or regenerates) the payslip for one staff member and period:
/// computes the salary components and upserts the row keyed by
/// (staff, year, month). Regeneration overwrites in place — last write wins,
/// no version history. The upsert runs under the period lock so concurrent
/// regenerations of the same period cannot interleave.
pub async fn generate_payslip(
    pool: &MySqlPool,
    policy: &PayrollPolicy,
    staff_id: u64,
    year: i32,
    month: u32,
    generated_by: u64,
) -> HrmResult<Payslip> {
    validate_period(year, month)?;

    let (staff, schedule) = gather_inputs(pool, staff_id).await?;
    let attendance = attendance_snapshot(pool, staff.id, year, month).await?;

    let components = salary::compute_salary(
        &PayProfile::from(&staff),
        &attendance,
        &schedule,
        policy,
        &[],
        &[],
    );

    let _guard = period_lock::lock_period(staff.id, year, month).await;
    store::payslip::upsert(
        pool,
        staff.id,
        year,
        month,
        &components,
        &attendance,
        generated_by,
    )
    .await?;

    store::payslip::find(pool, staff.id, year, month)
        .await?
        .ok_or(HrmError::NotFound("Payslip"))
}

/// Fetch-or-generate: returns the persisted payslip when one exists for the
/// period, otherwise generates and persists it.
pub async fn fetch_or_generate(
    pool: &MySqlPool,
    policy: &PayrollPolicy,
    staff_id: u64,
    year: i32,
    month: u32,
    generated_by: u64,
) -> HrmResult<Payslip> {
    validate_period(year, month)?;

    if let Some(existing) = store::payslip::find(pool, staff_id, year, month).await? {
        return Ok(existing);
    }

    generate_payslip(pool, policy, staff_id, year, month, generated_by).await
}

/// Salary preview for the calculation endpoint: same computation as a
/// generation run, but attendance may be overridden and nothing persists.
pub async fn preview_salary(
    pool: &MySqlPool,
    policy: &PayrollPolicy,
    staff_id: u64,
    year: i32,
    month: u32,
    attendance_override: Option<AttendanceSnapshot>,
    extra_allowances: &[f64],
    extra_deductions: &[f64],
) -> HrmResult<SalaryComponents> {
    validate_period(year, month)?;

    let (staff, schedule) = gather_inputs(pool, staff_id).await?;
    let attendance = match attendance_override {
        Some(snapshot) => snapshot,
        None => attendance_snapshot(pool, staff.id, year, month).await?,
    };

    Ok(salary::compute_salary(
        &PayProfile::from(&staff),
        &attendance,
        &schedule,
        policy,
        extra_allowances,
        extra_deductions,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_zero_is_rejected() {
        assert!(matches!(
            validate_period(2026, 0),
            Err(HrmError::Validation(_))
        ));
    }

    #[test]
    fn month_thirteen_is_rejected() {
        assert!(matches!(
            validate_period(2026, 13),
            Err(HrmError::Validation(_))
        ));
    }

    #[test]
    fn ordinary_periods_pass() {
        assert!(validate_period(2026, 1).is_ok());
        assert!(validate_period(2026, 12).is_ok());
    }

    #[test]
    fn far_future_years_are_rejected() {
        assert!(validate_period(2101, 6).is_err());
        assert!(validate_period(1999, 6).is_err());
    }
}
