use sqlx::MySqlPool;

use crate::model::leave::LeaveType;

pub async fn leave_type_by_id(
    pool: &MySqlPool,
    id: u64,
) -> Result<Option<LeaveType>, sqlx::Error> {
    sqlx::query_as::<_, LeaveType>(
        r#"
        SELECT id, leave_type_name, max_days_per_year, carry_forward_allowed, is_active
        FROM leave_types
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn active_leave_types(pool: &MySqlPool) -> Result<Vec<LeaveType>, sqlx::Error> {
    sqlx::query_as::<_, LeaveType>(
        r#"
        SELECT id, leave_type_name, max_days_per_year, carry_forward_allowed, is_active
        FROM leave_types
        WHERE is_active = 1
        ORDER BY leave_type_name
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Approved days taken by one staff member for one leave type in a year.
/// Applications are attributed to the year their start date falls in.
pub async fn approved_days(
    pool: &MySqlPool,
    staff_id: u64,
    leave_type_id: u64,
    year: i32,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT CAST(COALESCE(SUM(days), 0) AS SIGNED)
        FROM leave_applications
        WHERE staff_id = ?
          AND leave_type_id = ?
          AND status = 'approved'
          AND YEAR(start_date) = ?
        "#,
    )
    .bind(staff_id)
    .bind(leave_type_id)
    .bind(year)
    .fetch_one(pool)
    .await
}
