use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Attendance outcome for one staff member on one calendar day.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
    Holiday,
}

/// One daily attendance event. Unique per (staff_id, date); marking the same
/// day twice updates the existing row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DailyAttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1)]
    pub staff_id: u64,

    #[schema(example = "2026-02-02", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "present", value_type = String)]
    pub status: String,

    #[schema(example = "09:05:00", value_type = String, format = "time", nullable = true)]
    pub check_in_time: Option<NaiveTime>,

    #[schema(example = "17:30:00", value_type = String, format = "time", nullable = true)]
    pub check_out_time: Option<NaiveTime>,

    #[schema(example = 8.0)]
    pub total_hours: f64,

    #[schema(example = 0.5)]
    pub overtime_hours: f64,

    #[schema(nullable = true)]
    pub remarks: Option<String>,
}

/// Cached monthly roll-up of the daily records, keyed by (staff, year, month).
/// Fully recomputed from the daily bucket whenever any daily record changes.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct MonthlyAttendanceSummary {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1)]
    pub staff_id: u64,

    #[schema(example = 2026)]
    pub year: i32,

    #[schema(example = 2)]
    pub month: u32,

    #[schema(example = 22)]
    pub days_present: u32,

    #[schema(example = 1)]
    pub days_absent: u32,

    #[schema(example = 2)]
    pub days_on_leave: u32,

    #[schema(example = 4)]
    pub days_holiday: u32,

    #[schema(example = 176.0)]
    pub total_hours: f64,

    #[schema(example = 6.5)]
    pub overtime_hours: f64,
}
