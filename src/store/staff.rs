use sqlx::MySqlPool;

use crate::model::staff::StaffMember;

const STAFF_COLUMNS: &str = "id, staff_id, name, father_name, designation, basic_pay, \
     da_percentage, hra_percentage, special_pay, special_allowance, other_allowance, \
     bank_name, account_number, date_of_joining, status";

pub async fn find_by_id(pool: &MySqlPool, id: u64) -> Result<Option<StaffMember>, sqlx::Error> {
    let sql = format!("SELECT {STAFF_COLUMNS} FROM admissions WHERE id = ?");
    sqlx::query_as::<_, StaffMember>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Resolves a staff reference the way the admin panel sends it: either the
/// board staff code or the numeric row id.
pub async fn find_by_ref(
    pool: &MySqlPool,
    staff_ref: &str,
) -> Result<Option<StaffMember>, sqlx::Error> {
    let numeric_id: u64 = staff_ref.parse().unwrap_or(0);
    let sql = format!("SELECT {STAFF_COLUMNS} FROM admissions WHERE staff_id = ? OR id = ?");
    sqlx::query_as::<_, StaffMember>(&sql)
        .bind(staff_ref)
        .bind(numeric_id)
        .fetch_optional(pool)
        .await
}
