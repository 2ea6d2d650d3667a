use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The persisted, period-keyed salary record for one staff member and month.
///
/// Unique per (staff_id, year, month); regeneration upserts in place, so the
/// row always holds the result of the most recent generation. Monetary fields
/// carry full f64 precision; rounding happens only at presentation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Payslip {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1)]
    pub staff_id: u64,

    #[schema(example = 2026)]
    pub year: i32,

    #[schema(example = 2)]
    pub month: u32,

    #[schema(example = 20000.0)]
    pub basic_pay: f64,

    #[schema(example = 8400.0)]
    pub da: f64,

    #[schema(example = 4800.0)]
    pub hra: f64,

    pub special_pay: f64,
    pub special_allowance: f64,
    pub other_allowance: f64,

    #[schema(example = 33200.0)]
    pub gross_salary: f64,

    pub attendance_deduction: f64,
    pub provident_fund: f64,
    pub esi: f64,
    pub professional_tax: f64,
    pub custom_deductions: f64,

    #[schema(example = 2600.0)]
    pub total_deductions: f64,

    #[schema(example = 30600.0)]
    pub net_salary: f64,

    #[schema(example = 22)]
    pub days_present: u32,

    #[schema(example = 0)]
    pub days_absent: u32,

    /// User id of the admin/HR account that generated this payslip.
    #[schema(example = 1)]
    pub generated_by: u64,

    #[schema(example = "2026-03-01T10:00:00Z", value_type = String, format = "date-time")]
    pub generated_at: Option<DateTime<Utc>>,

    #[schema(example = "2026-03-01T10:00:00Z", value_type = String, format = "date-time")]
    pub updated_at: Option<DateTime<Utc>>,
}
