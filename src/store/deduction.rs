use sqlx::MySqlPool;

use crate::model::deduction::DeductionSchedule;

const SCHEDULE_COLUMNS: &str = "staff_id, gpf_monthly, gpf_total, \
     nps_govt_monthly, nps_govt_total, nps_self_monthly, nps_self_total, \
     lic_monthly, lic_total, gic_monthly, gic_total, \
     electricity_monthly, electricity_total, water_monthly, water_total, \
     recovery_monthly, recovery_total, leave_deduction_monthly, \
     income_tax_monthly, income_tax_total, \
     other_deduction_1_monthly, other_deduction_2_monthly, other_deduction_3_monthly";

/// The active schedule for one staff member; `None` means no deductions
/// have been configured and callers substitute zero defaults.
pub async fn for_staff(
    pool: &MySqlPool,
    staff_id: u64,
) -> Result<Option<DeductionSchedule>, sqlx::Error> {
    let sql = format!("SELECT {SCHEDULE_COLUMNS} FROM staff_deductions WHERE staff_id = ?");
    sqlx::query_as::<_, DeductionSchedule>(&sql)
        .bind(staff_id)
        .fetch_optional(pool)
        .await
}

/// Replaces the staff member's schedule wholesale; one active row per staff.
pub async fn upsert(pool: &MySqlPool, schedule: &DeductionSchedule) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO staff_deductions
            (staff_id, gpf_monthly, gpf_total,
             nps_govt_monthly, nps_govt_total, nps_self_monthly, nps_self_total,
             lic_monthly, lic_total, gic_monthly, gic_total,
             electricity_monthly, electricity_total, water_monthly, water_total,
             recovery_monthly, recovery_total, leave_deduction_monthly,
             income_tax_monthly, income_tax_total,
             other_deduction_1_monthly, other_deduction_2_monthly, other_deduction_3_monthly)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            gpf_monthly = VALUES(gpf_monthly),
            gpf_total = VALUES(gpf_total),
            nps_govt_monthly = VALUES(nps_govt_monthly),
            nps_govt_total = VALUES(nps_govt_total),
            nps_self_monthly = VALUES(nps_self_monthly),
            nps_self_total = VALUES(nps_self_total),
            lic_monthly = VALUES(lic_monthly),
            lic_total = VALUES(lic_total),
            gic_monthly = VALUES(gic_monthly),
            gic_total = VALUES(gic_total),
            electricity_monthly = VALUES(electricity_monthly),
            electricity_total = VALUES(electricity_total),
            water_monthly = VALUES(water_monthly),
            water_total = VALUES(water_total),
            recovery_monthly = VALUES(recovery_monthly),
            recovery_total = VALUES(recovery_total),
            leave_deduction_monthly = VALUES(leave_deduction_monthly),
            income_tax_monthly = VALUES(income_tax_monthly),
            income_tax_total = VALUES(income_tax_total),
            other_deduction_1_monthly = VALUES(other_deduction_1_monthly),
            other_deduction_2_monthly = VALUES(other_deduction_2_monthly),
            other_deduction_3_monthly = VALUES(other_deduction_3_monthly)
        "#,
    )
    .bind(schedule.staff_id)
    .bind(schedule.gpf_monthly)
    .bind(schedule.gpf_total)
    .bind(schedule.nps_govt_monthly)
    .bind(schedule.nps_govt_total)
    .bind(schedule.nps_self_monthly)
    .bind(schedule.nps_self_total)
    .bind(schedule.lic_monthly)
    .bind(schedule.lic_total)
    .bind(schedule.gic_monthly)
    .bind(schedule.gic_total)
    .bind(schedule.electricity_monthly)
    .bind(schedule.electricity_total)
    .bind(schedule.water_monthly)
    .bind(schedule.water_total)
    .bind(schedule.recovery_monthly)
    .bind(schedule.recovery_total)
    .bind(schedule.leave_deduction_monthly)
    .bind(schedule.income_tax_monthly)
    .bind(schedule.income_tax_total)
    .bind(schedule.other_deduction_1_monthly)
    .bind(schedule.other_deduction_2_monthly)
    .bind(schedule.other_deduction_3_monthly)
    .execute(pool)
    .await?;
    Ok(())
}
