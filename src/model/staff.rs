use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An admission record: one row per staff member employed by the board.
///
/// Salary-relevant fields (`basic_pay`, the DA/HRA overrides and the fixed
/// allowances) live on the admission row itself; the payroll calculator reads
/// them through a [`crate::service::salary::PayProfile`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "staff_id": "CB-1001",
        "name": "Ram Kumar",
        "father_name": "Shyam Kumar",
        "designation": "Junior Clerk",
        "basic_pay": 20000.0,
        "da_percentage": null,
        "hra_percentage": null,
        "special_pay": 0.0,
        "special_allowance": 0.0,
        "other_allowance": 0.0,
        "bank_name": "SBI",
        "account_number": "XXXXXX1234",
        "date_of_joining": "2023-03-10",
        "status": "active"
    })
)]
pub struct StaffMember {
    #[schema(example = 1)]
    pub id: u64,

    /// Board-assigned staff code, unique across admissions.
    #[schema(example = "CB-1001")]
    pub staff_id: String,

    #[schema(example = "Ram Kumar")]
    pub name: String,

    #[schema(example = "Shyam Kumar", nullable = true)]
    pub father_name: Option<String>,

    #[schema(example = "Junior Clerk")]
    pub designation: String,

    #[schema(example = 20000.0)]
    pub basic_pay: f64,

    /// Per-staff DA override; `None` falls back to the policy default.
    #[schema(example = 42.0, nullable = true)]
    pub da_percentage: Option<f64>,

    /// Per-staff HRA override; `None` falls back to the policy default.
    #[schema(example = 24.0, nullable = true)]
    pub hra_percentage: Option<f64>,

    #[schema(example = 0.0)]
    pub special_pay: f64,

    #[schema(example = 0.0)]
    pub special_allowance: f64,

    #[schema(example = 0.0)]
    pub other_allowance: f64,

    #[schema(example = "SBI", nullable = true)]
    pub bank_name: Option<String>,

    #[schema(example = "XXXXXX1234", nullable = true)]
    pub account_number: Option<String>,

    #[schema(example = "2023-03-10", value_type = String, format = "date")]
    pub date_of_joining: NaiveDate,

    #[schema(example = "active")]
    pub status: String,
}
