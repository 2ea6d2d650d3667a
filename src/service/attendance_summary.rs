use chrono::{Datelike, NaiveDate};
use sqlx::MySqlPool;

use crate::error::HrmResult;
use crate::model::attendance::{AttendanceStatus, DailyAttendanceRecord};
use crate::store;
use crate::utils::period_lock;

/// Counters folded out of one month's daily records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SummaryTotals {
    pub days_present: u32,
    pub days_absent: u32,
    pub days_on_leave: u32,
    pub days_holiday: u32,
    pub total_hours: f64,
    pub overtime_hours: f64,
}

/// Folds a month's daily records into summary counters. Statuses are the
/// persisted lowercase strings; anything unrecognized is ignored rather
/// than failing the whole roll-up.
pub fn fold_daily(records: &[DailyAttendanceRecord]) -> SummaryTotals {
    let mut totals = SummaryTotals::default();

    for record in records {
        match record.status.parse::<AttendanceStatus>() {
            Ok(AttendanceStatus::Present) => totals.days_present += 1,
            Ok(AttendanceStatus::Absent) => totals.days_absent += 1,
            Ok(AttendanceStatus::Leave) => totals.days_on_leave += 1,
            Ok(AttendanceStatus::Holiday) => totals.days_holiday += 1,
            Err(_) => {
                tracing::warn!(status = %record.status, record_id = record.id, "unknown attendance status skipped");
            }
        }
        totals.total_hours += record.total_hours;
        totals.overtime_hours += record.overtime_hours;
    }

    totals
}

/// Working days in a bucket: every marked day that is not a holiday.
pub fn working_days(totals: &SummaryTotals) -> u32 {
    totals.days_present + totals.days_absent + totals.days_on_leave
}

/// Percentage of working days attended, rounded to two decimals.
/// Zero when the month has no working days yet.
pub fn attendance_percentage(days_present: u32, working_days: u32) -> f64 {
    if working_days == 0 {
        return 0.0;
    }
    let pct = f64::from(days_present) / f64::from(working_days) * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Recomputes the monthly summary for the (staff, year, month) bucket of
/// `date` and upserts it. Called after every daily-record create, update or
/// bulk update.
///
/// The recompute is a full scan of the bucket each time, so re-running it
/// against unchanged daily records writes an identical row. Writes for the
/// same bucket are serialized through the period lock so concurrent marks
/// cannot interleave their read-fold-write cycles.
pub async fn recompute_monthly_summary(
    pool: &MySqlPool,
    staff_id: u64,
    date: NaiveDate,
) -> HrmResult<SummaryTotals> {
    let year = date.year();
    let month = date.month();

    let _guard = period_lock::lock_period(staff_id, year, month).await;

    let records = store::attendance::daily_for_month(pool, staff_id, year, month).await?;
    let totals = fold_daily(&records);
    store::attendance::upsert_summary(pool, staff_id, year, month, &totals).await?;

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, status: &str, hours: f64, overtime: f64) -> DailyAttendanceRecord {
        DailyAttendanceRecord {
            id: u64::from(day),
            staff_id: 1,
            date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
            status: status.to_string(),
            check_in_time: None,
            check_out_time: None,
            total_hours: hours,
            overtime_hours: overtime,
            remarks: None,
        }
    }

    #[test]
    fn fold_counts_each_status_bucket() {
        let records = vec![
            record(2, "present", 8.0, 0.0),
            record(3, "present", 8.0, 1.5),
            record(4, "absent", 0.0, 0.0),
            record(5, "leave", 0.0, 0.0),
            record(6, "holiday", 0.0, 0.0),
        ];
        let totals = fold_daily(&records);
        assert_eq!(totals.days_present, 2);
        assert_eq!(totals.days_absent, 1);
        assert_eq!(totals.days_on_leave, 1);
        assert_eq!(totals.days_holiday, 1);
        assert_eq!(totals.total_hours, 16.0);
        assert_eq!(totals.overtime_hours, 1.5);
    }

    #[test]
    fn fold_is_deterministic_over_the_same_rows() {
        let records = vec![
            record(2, "present", 8.0, 0.5),
            record(3, "absent", 0.0, 0.0),
            record(4, "present", 7.5, 0.0),
        ];
        assert_eq!(fold_daily(&records), fold_daily(&records));
    }

    #[test]
    fn unknown_statuses_are_skipped_but_hours_still_count() {
        let records = vec![record(2, "present", 8.0, 0.0), record(3, "wfh", 8.0, 0.0)];
        let totals = fold_daily(&records);
        assert_eq!(totals.days_present, 1);
        assert_eq!(totals.total_hours, 16.0);
    }

    #[test]
    fn empty_bucket_folds_to_zero() {
        assert_eq!(fold_daily(&[]), SummaryTotals::default());
    }

    #[test]
    fn holidays_are_excluded_from_working_days() {
        let totals = fold_daily(&[
            record(2, "present", 8.0, 0.0),
            record(3, "absent", 0.0, 0.0),
            record(4, "holiday", 0.0, 0.0),
        ]);
        assert_eq!(working_days(&totals), 2);
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        // 20 of 21 working days = 95.238…% → 95.24
        assert_eq!(attendance_percentage(20, 21), 95.24);
        // 1 of 3 = 33.333…% → 33.33
        assert_eq!(attendance_percentage(1, 3), 33.33);
    }

    #[test]
    fn percentage_of_empty_month_is_zero() {
        assert_eq!(attendance_percentage(0, 0), 0.0);
    }

    #[test]
    fn full_attendance_is_one_hundred() {
        assert_eq!(attendance_percentage(22, 22), 100.0);
    }
}
