use chrono::{NaiveDate, NaiveTime};
use sqlx::MySqlPool;

use crate::model::attendance::{DailyAttendanceRecord, MonthlyAttendanceSummary};
use crate::service::attendance_summary::SummaryTotals;

const DAILY_COLUMNS: &str = "id, staff_id, date, status, check_in_time, check_out_time, \
     total_hours, overtime_hours, remarks";

/// Payload for marking one day. The same shape serves single marks and
/// bulk updates; an existing (staff, date) row is overwritten, not duplicated.
#[derive(Debug, Clone)]
pub struct DailyMark {
    pub staff_id: u64,
    pub date: NaiveDate,
    pub status: String,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub total_hours: f64,
    pub overtime_hours: f64,
    pub remarks: Option<String>,
}

/// Upserts one daily record by its (staff_id, date) unique key. A duplicate
/// day becomes an update rather than a constraint error.
pub async fn upsert_daily(pool: &MySqlPool, mark: &DailyMark) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO daily_attendance
            (staff_id, date, status, check_in_time, check_out_time,
             total_hours, overtime_hours, remarks)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            status = VALUES(status),
            check_in_time = VALUES(check_in_time),
            check_out_time = VALUES(check_out_time),
            total_hours = VALUES(total_hours),
            overtime_hours = VALUES(overtime_hours),
            remarks = VALUES(remarks),
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(mark.staff_id)
    .bind(mark.date)
    .bind(&mark.status)
    .bind(mark.check_in_time)
    .bind(mark.check_out_time)
    .bind(mark.total_hours)
    .bind(mark.overtime_hours)
    .bind(&mark.remarks)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn daily_by_id(
    pool: &MySqlPool,
    id: u64,
) -> Result<Option<DailyAttendanceRecord>, sqlx::Error> {
    let sql = format!("SELECT {DAILY_COLUMNS} FROM daily_attendance WHERE id = ?");
    sqlx::query_as::<_, DailyAttendanceRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All daily records in one (staff, year, month) bucket, date order.
pub async fn daily_for_month(
    pool: &MySqlPool,
    staff_id: u64,
    year: i32,
    month: u32,
) -> Result<Vec<DailyAttendanceRecord>, sqlx::Error> {
    let sql = format!(
        "SELECT {DAILY_COLUMNS} FROM daily_attendance \
         WHERE staff_id = ? AND YEAR(date) = ? AND MONTH(date) = ? \
         ORDER BY date"
    );
    sqlx::query_as::<_, DailyAttendanceRecord>(&sql)
        .bind(staff_id)
        .bind(year)
        .bind(month)
        .fetch_all(pool)
        .await
}

pub async fn monthly_summary(
    pool: &MySqlPool,
    staff_id: u64,
    year: i32,
    month: u32,
) -> Result<Option<MonthlyAttendanceSummary>, sqlx::Error> {
    sqlx::query_as::<_, MonthlyAttendanceSummary>(
        r#"
        SELECT id, staff_id, year, month, days_present, days_absent,
               days_on_leave, days_holiday, total_hours, overtime_hours
        FROM attendance_records
        WHERE staff_id = ? AND year = ? AND month = ?
        "#,
    )
    .bind(staff_id)
    .bind(year)
    .bind(month)
    .fetch_optional(pool)
    .await
}

/// Writes the recomputed bucket totals, keyed by (staff_id, year, month).
pub async fn upsert_summary(
    pool: &MySqlPool,
    staff_id: u64,
    year: i32,
    month: u32,
    totals: &SummaryTotals,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO attendance_records
            (staff_id, year, month, days_present, days_absent,
             days_on_leave, days_holiday, total_hours, overtime_hours)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            days_present = VALUES(days_present),
            days_absent = VALUES(days_absent),
            days_on_leave = VALUES(days_on_leave),
            days_holiday = VALUES(days_holiday),
            total_hours = VALUES(total_hours),
            overtime_hours = VALUES(overtime_hours),
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(staff_id)
    .bind(year)
    .bind(month)
    .bind(totals.days_present)
    .bind(totals.days_absent)
    .bind(totals.days_on_leave)
    .bind(totals.days_holiday)
    .bind(totals.total_hours)
    .bind(totals.overtime_hours)
    .execute(pool)
    .await?;
    Ok(())
}
