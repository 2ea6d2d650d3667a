use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Static reference data describing one category of leave.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveType {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Earned Leave")]
    pub leave_type_name: String,

    /// Annual entitlement cap in days.
    #[schema(example = 12)]
    pub max_days_per_year: i64,

    pub carry_forward_allowed: bool,

    pub is_active: bool,
}

/// Lifecycle of a leave application.
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
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

/// One application for leave, referencing an admission row and a leave type.
///
/// `status` is persisted as the lowercase string form of [`LeaveStatus`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveApplication {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1)]
    pub staff_id: u64,

    #[schema(example = 1)]
    pub leave_type_id: u64,

    #[schema(example = "2026-02-02", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2026-02-04", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    /// Working days requested, always > 0.
    #[schema(example = 3)]
    pub days: i64,

    #[schema(example = "Family function")]
    pub reason: String,

    #[schema(example = "pending", value_type = String)]
    pub status: String,

    #[schema(nullable = true)]
    pub rejection_reason: Option<String>,

    #[schema(example = "2026-01-20T09:00:00Z", value_type = String, format = "date-time")]
    pub applied_at: Option<DateTime<Utc>>,
}
