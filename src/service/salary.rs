use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::PayrollPolicy;
use crate::model::deduction::DeductionSchedule;
use crate::model::staff::StaffMember;

/// The salary-bearing slice of an admission row.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayProfile {
    pub basic_pay: f64,
    /// Per-staff DA override; falls back to [`PayrollPolicy::default_da_percentage`].
    pub da_percentage: Option<f64>,
    /// Per-staff HRA override; falls back to [`PayrollPolicy::default_hra_percentage`].
    pub hra_percentage: Option<f64>,
    pub special_pay: f64,
    pub special_allowance: f64,
    pub other_allowance: f64,
}

impl From<&StaffMember> for PayProfile {
    fn from(staff: &StaffMember) -> Self {
        Self {
            basic_pay: staff.basic_pay,
            da_percentage: staff.da_percentage,
            hra_percentage: staff.hra_percentage,
            special_pay: staff.special_pay,
            special_allowance: staff.special_allowance,
            other_allowance: staff.other_allowance,
        }
    }
}

/// The attendance figures a salary calculation depends on. Zero-defaults
/// stand in when no monthly summary exists yet.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
pub struct AttendanceSnapshot {
    #[schema(example = 22)]
    pub days_present: u32,
    #[schema(example = 0)]
    pub days_absent: u32,
    #[schema(example = 0.0)]
    pub overtime_hours: f64,
}

/// Fully broken-down result of one salary calculation.
///
/// Every field keeps full f64 precision; rounding to two decimals is a
/// presentation concern (JSON formatting, the payslip document), never
/// applied mid-calculation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SalaryComponents {
    pub basic_pay: f64,
    pub da: f64,
    pub hra: f64,
    pub special_pay: f64,
    pub special_allowance: f64,
    pub other_allowance: f64,
    pub extra_allowances: f64,
    pub gross_salary: f64,

    pub attendance_deduction: f64,
    pub provident_fund: f64,
    pub esi: f64,
    pub professional_tax: f64,
    pub custom_deductions: f64,
    pub extra_deductions: f64,
    pub total_deductions: f64,

    pub net_salary: f64,
}

/// Computes the month's salary for one staff member.
///
/// Pure over its inputs; the payslip assembler persists the result. The
/// attendance deduction divides basic pay by the policy divisor (30) rather
/// than the calendar length of the month, and net salary is floored at zero
/// however large the deductions grow.
pub fn compute_salary(
    pay: &PayProfile,
    attendance: &AttendanceSnapshot,
    schedule: &DeductionSchedule,
    policy: &PayrollPolicy,
    extra_allowances: &[f64],
    extra_deductions: &[f64],
) -> SalaryComponents {
    let basic_pay = pay.basic_pay;
    let da_pct = pay.da_percentage.unwrap_or(policy.default_da_percentage);
    let hra_pct = pay.hra_percentage.unwrap_or(policy.default_hra_percentage);

    let da = basic_pay * da_pct / 100.0;
    let hra = basic_pay * hra_pct / 100.0;
    let extra_allowance_sum: f64 = extra_allowances.iter().sum();

    let gross_salary = basic_pay
        + da
        + hra
        + pay.special_pay
        + pay.special_allowance
        + pay.other_allowance
        + extra_allowance_sum;

    let attendance_deduction = if attendance.days_absent > 0 {
        (basic_pay / policy.attendance_month_divisor) * f64::from(attendance.days_absent)
    } else {
        0.0
    };

    let provident_fund = basic_pay * policy.pf_rate;
    let esi = if gross_salary <= policy.esi_gross_ceiling {
        gross_salary * policy.esi_rate
    } else {
        0.0
    };
    let professional_tax = if gross_salary > policy.professional_tax_threshold {
        policy.professional_tax
    } else {
        0.0
    };

    let custom_deductions = schedule.monthly_total();
    let extra_deduction_sum: f64 = extra_deductions.iter().sum();

    let total_deductions = attendance_deduction
        + provident_fund
        + esi
        + professional_tax
        + custom_deductions
        + extra_deduction_sum;

    let net_salary = (gross_salary - total_deductions).max(0.0);

    SalaryComponents {
        basic_pay,
        da,
        hra,
        special_pay: pay.special_pay,
        special_allowance: pay.special_allowance,
        other_allowance: pay.other_allowance,
        extra_allowances: extra_allowance_sum,
        gross_salary,
        attendance_deduction,
        provident_fund,
        esi,
        professional_tax,
        custom_deductions,
        extra_deductions: extra_deduction_sum,
        total_deductions,
        net_salary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PayrollPolicy {
        PayrollPolicy::default()
    }

    fn pay(basic: f64) -> PayProfile {
        PayProfile {
            basic_pay: basic,
            ..Default::default()
        }
    }

    #[test]
    fn worked_example_basic_20000() {
        // basic 20000, DA 42% = 8400, HRA 24% = 4800, gross 33200;
        // PF 2400, ESI 0 (gross above ceiling), PT 200; net 30600.
        let comps = compute_salary(
            &pay(20_000.0),
            &AttendanceSnapshot::default(),
            &DeductionSchedule::default(),
            &policy(),
            &[],
            &[],
        );

        assert_eq!(comps.da, 8_400.0);
        assert_eq!(comps.hra, 4_800.0);
        assert_eq!(comps.gross_salary, 33_200.0);
        assert_eq!(comps.provident_fund, 2_400.0);
        assert_eq!(comps.esi, 0.0);
        assert_eq!(comps.professional_tax, 200.0);
        assert_eq!(comps.total_deductions, 2_600.0);
        assert_eq!(comps.net_salary, 30_600.0);
    }

    #[test]
    fn staff_overrides_beat_policy_defaults() {
        let profile = PayProfile {
            basic_pay: 10_000.0,
            da_percentage: Some(50.0),
            hra_percentage: Some(10.0),
            ..Default::default()
        };
        let comps = compute_salary(
            &profile,
            &AttendanceSnapshot::default(),
            &DeductionSchedule::default(),
            &policy(),
            &[],
            &[],
        );
        assert_eq!(comps.da, 5_000.0);
        assert_eq!(comps.hra, 1_000.0);
    }

    #[test]
    fn attendance_deduction_uses_fixed_30_day_divisor() {
        let attendance = AttendanceSnapshot {
            days_present: 25,
            days_absent: 3,
            overtime_hours: 0.0,
        };
        let comps = compute_salary(
            &pay(30_000.0),
            &attendance,
            &DeductionSchedule::default(),
            &policy(),
            &[],
            &[],
        );
        // 30000 / 30 * 3, whether the month has 28 or 31 days
        assert_eq!(comps.attendance_deduction, 3_000.0);
    }

    #[test]
    fn no_attendance_deduction_without_absences() {
        let comps = compute_salary(
            &pay(30_000.0),
            &AttendanceSnapshot {
                days_present: 31,
                days_absent: 0,
                overtime_hours: 2.0,
            },
            &DeductionSchedule::default(),
            &policy(),
            &[],
            &[],
        );
        assert_eq!(comps.attendance_deduction, 0.0);
    }

    #[test]
    fn esi_applies_at_the_ceiling_but_not_above() {
        // Gross built purely from an extra allowance lands exactly on the
        // ceiling; the boundary is inclusive.
        let at_ceiling = compute_salary(
            &pay(0.0),
            &AttendanceSnapshot::default(),
            &DeductionSchedule::default(),
            &policy(),
            &[25_000.0],
            &[],
        );
        assert_eq!(at_ceiling.gross_salary, 25_000.0);
        assert_eq!(at_ceiling.esi, 25_000.0 * 0.0175);

        let above = compute_salary(
            &pay(0.0),
            &AttendanceSnapshot::default(),
            &DeductionSchedule::default(),
            &policy(),
            &[25_000.5],
            &[],
        );
        assert_eq!(above.esi, 0.0);
    }

    #[test]
    fn professional_tax_is_flat_above_threshold() {
        // gross = basic * 1.66; basic 6000 → gross 9960, below threshold
        let below = compute_salary(
            &pay(6_000.0),
            &AttendanceSnapshot::default(),
            &DeductionSchedule::default(),
            &policy(),
            &[],
            &[],
        );
        assert_eq!(below.professional_tax, 0.0);

        let above = compute_salary(
            &pay(7_000.0),
            &AttendanceSnapshot::default(),
            &DeductionSchedule::default(),
            &policy(),
            &[],
            &[],
        );
        assert_eq!(above.professional_tax, 200.0);
    }

    #[test]
    fn schedule_and_extras_enter_total_deductions() {
        let schedule = DeductionSchedule {
            gpf_monthly: 1_000.0,
            income_tax_monthly: 500.0,
            ..Default::default()
        };
        let comps = compute_salary(
            &pay(20_000.0),
            &AttendanceSnapshot::default(),
            &schedule,
            &policy(),
            &[750.0],
            &[250.0],
        );
        assert_eq!(comps.extra_allowances, 750.0);
        assert_eq!(comps.gross_salary, 33_950.0);
        assert_eq!(comps.custom_deductions, 1_500.0);
        assert_eq!(comps.extra_deductions, 250.0);
        // pf 2400 + pt 200 + custom 1500 + extra 250
        assert_eq!(comps.total_deductions, 4_350.0);
    }

    #[test]
    fn net_salary_never_goes_negative() {
        let schedule = DeductionSchedule {
            recovery_monthly: 1_000_000.0,
            ..Default::default()
        };
        let comps = compute_salary(
            &pay(15_000.0),
            &AttendanceSnapshot {
                days_present: 0,
                days_absent: 30,
                overtime_hours: 0.0,
            },
            &schedule,
            &policy(),
            &[],
            &[],
        );
        assert_eq!(comps.net_salary, 0.0);
        assert!(comps.total_deductions > comps.gross_salary);
    }

    #[test]
    fn intermediates_keep_full_precision() {
        // 0.0175 of an odd gross produces a long fraction; it must not be
        // rounded inside the calculation.
        let comps = compute_salary(
            &pay(10_001.0),
            &AttendanceSnapshot::default(),
            &DeductionSchedule::default(),
            &policy(),
            &[],
            &[],
        );
        let expected_esi = comps.gross_salary * 0.0175;
        assert_eq!(comps.esi, expected_esi);
    }
}
