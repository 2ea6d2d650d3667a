use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The active deduction schedule for one staff member.
///
/// `*_monthly` amounts feed the salary calculation; `*_total` amounts are
/// carried for reporting (outstanding recoveries, cumulative contributions).
/// A staff member without a schedule row behaves as an all-zero schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(default)]
pub struct DeductionSchedule {
    #[schema(example = 1)]
    pub staff_id: u64,

    #[schema(example = 1000.0)]
    pub gpf_monthly: f64,
    pub gpf_total: f64,

    pub nps_govt_monthly: f64,
    pub nps_govt_total: f64,
    pub nps_self_monthly: f64,
    pub nps_self_total: f64,

    #[schema(example = 500.0)]
    pub lic_monthly: f64,
    pub lic_total: f64,
    pub gic_monthly: f64,
    pub gic_total: f64,

    pub electricity_monthly: f64,
    pub electricity_total: f64,
    pub water_monthly: f64,
    pub water_total: f64,

    pub recovery_monthly: f64,
    pub recovery_total: f64,

    pub leave_deduction_monthly: f64,

    pub income_tax_monthly: f64,
    pub income_tax_total: f64,

    pub other_deduction_1_monthly: f64,
    pub other_deduction_2_monthly: f64,
    pub other_deduction_3_monthly: f64,
}

impl DeductionSchedule {
    /// Sum of the eleven named monthly deduction heads that enter the
    /// salary calculation. NPS contributions are tracked on the schedule
    /// but recovered through GPF/recovery heads, so they are not added here.
    pub fn monthly_total(&self) -> f64 {
        self.gpf_monthly
            + self.lic_monthly
            + self.gic_monthly
            + self.electricity_monthly
            + self.water_monthly
            + self.recovery_monthly
            + self.leave_deduction_monthly
            + self.income_tax_monthly
            + self.other_deduction_1_monthly
            + self.other_deduction_2_monthly
            + self.other_deduction_3_monthly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_total_sums_the_eleven_heads() {
        let schedule = DeductionSchedule {
            gpf_monthly: 1000.0,
            lic_monthly: 500.0,
            gic_monthly: 100.0,
            electricity_monthly: 250.0,
            water_monthly: 50.0,
            recovery_monthly: 300.0,
            leave_deduction_monthly: 0.0,
            income_tax_monthly: 800.0,
            other_deduction_1_monthly: 10.0,
            other_deduction_2_monthly: 20.0,
            other_deduction_3_monthly: 30.0,
            ..Default::default()
        };
        assert_eq!(schedule.monthly_total(), 3060.0);
    }

    #[test]
    fn nps_contributions_do_not_enter_monthly_total() {
        let schedule = DeductionSchedule {
            nps_govt_monthly: 1400.0,
            nps_self_monthly: 1400.0,
            ..Default::default()
        };
        assert_eq!(schedule.monthly_total(), 0.0);
    }

    #[test]
    fn missing_schedule_defaults_to_zero() {
        assert_eq!(DeductionSchedule::default().monthly_total(), 0.0);
    }
}
