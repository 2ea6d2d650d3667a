use sqlx::MySqlPool;

use crate::model::payslip::Payslip;
use crate::service::salary::{AttendanceSnapshot, SalaryComponents};

const PAYSLIP_COLUMNS: &str = "id, staff_id, year, month, basic_pay, da, hra, \
     special_pay, special_allowance, other_allowance, gross_salary, \
     attendance_deduction, provident_fund, esi, professional_tax, custom_deductions, \
     total_deductions, net_salary, days_present, days_absent, generated_by, \
     generated_at, updated_at";

pub async fn find(
    pool: &MySqlPool,
    staff_id: u64,
    year: i32,
    month: u32,
) -> Result<Option<Payslip>, sqlx::Error> {
    let sql =
        format!("SELECT {PAYSLIP_COLUMNS} FROM payslips WHERE staff_id = ? AND year = ? AND month = ?");
    sqlx::query_as::<_, Payslip>(&sql)
        .bind(staff_id)
        .bind(year)
        .bind(month)
        .fetch_optional(pool)
        .await
}

/// Writes the computed components for the period, overwriting any payslip
/// already generated for the same (staff, year, month) key.
pub async fn upsert(
    pool: &MySqlPool,
    staff_id: u64,
    year: i32,
    month: u32,
    components: &SalaryComponents,
    attendance: &AttendanceSnapshot,
    generated_by: u64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO payslips
            (staff_id, year, month, basic_pay, da, hra,
             special_pay, special_allowance, other_allowance, gross_salary,
             attendance_deduction, provident_fund, esi, professional_tax,
             custom_deductions, total_deductions, net_salary,
             days_present, days_absent, generated_by)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            basic_pay = VALUES(basic_pay),
            da = VALUES(da),
            hra = VALUES(hra),
            special_pay = VALUES(special_pay),
            special_allowance = VALUES(special_allowance),
            other_allowance = VALUES(other_allowance),
            gross_salary = VALUES(gross_salary),
            attendance_deduction = VALUES(attendance_deduction),
            provident_fund = VALUES(provident_fund),
            esi = VALUES(esi),
            professional_tax = VALUES(professional_tax),
            custom_deductions = VALUES(custom_deductions),
            total_deductions = VALUES(total_deductions),
            net_salary = VALUES(net_salary),
            days_present = VALUES(days_present),
            days_absent = VALUES(days_absent),
            generated_by = VALUES(generated_by),
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(staff_id)
    .bind(year)
    .bind(month)
    .bind(components.basic_pay)
    .bind(components.da)
    .bind(components.hra)
    .bind(components.special_pay)
    .bind(components.special_allowance)
    .bind(components.other_allowance)
    .bind(components.gross_salary)
    .bind(components.attendance_deduction)
    .bind(components.provident_fund)
    .bind(components.esi)
    .bind(components.professional_tax)
    .bind(components.custom_deductions)
    .bind(components.total_deductions)
    .bind(components.net_salary)
    .bind(attendance.days_present)
    .bind(attendance.days_absent)
    .bind(generated_by)
    .execute(pool)
    .await?;
    Ok(())
}

/// Payslip history for one staff member, newest period first.
pub async fn history(
    pool: &MySqlPool,
    staff_id: u64,
    year: Option<i32>,
    limit: i64,
) -> Result<Vec<Payslip>, sqlx::Error> {
    match year {
        Some(year) => {
            let sql = format!(
                "SELECT {PAYSLIP_COLUMNS} FROM payslips \
                 WHERE staff_id = ? AND year = ? \
                 ORDER BY year DESC, month DESC LIMIT ?"
            );
            sqlx::query_as::<_, Payslip>(&sql)
                .bind(staff_id)
                .bind(year)
                .bind(limit)
                .fetch_all(pool)
                .await
        }
        None => {
            let sql = format!(
                "SELECT {PAYSLIP_COLUMNS} FROM payslips \
                 WHERE staff_id = ? \
                 ORDER BY year DESC, month DESC LIMIT ?"
            );
            sqlx::query_as::<_, Payslip>(&sql)
                .bind(staff_id)
                .bind(limit)
                .fetch_all(pool)
                .await
        }
    }
}
