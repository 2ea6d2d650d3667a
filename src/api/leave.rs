use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::error::HrmError;
use crate::model::leave::{LeaveApplication, LeaveStatus, LeaveType};
use crate::model::role::Role;
use crate::service::leave_balance::{self, LeaveBalance};
use crate::store;
use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

const APPLICATION_COLUMNS: &str = "id, staff_id, leave_type_id, start_date, end_date, days, \
     reason, status, rejection_reason, applied_at";

#[derive(Deserialize, ToSchema)]
pub struct CreateLeaveApplication {
    /// Required for HR/admin submissions on behalf of staff; ignored for
    /// self-service staff accounts.
    #[schema(example = 1)]
    pub staff_id: Option<u64>,
    #[schema(example = 1)]
    pub leave_type_id: u64,
    #[schema(example = "2026-02-02", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-02-04", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = 3)]
    pub days: i64,
    #[schema(example = "Family function")]
    pub reason: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RejectLeave {
    #[schema(example = "Short staffed that week")]
    pub rejection_reason: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    /// Filter by admission row id
    #[schema(example = 1)]
    pub staff_id: Option<u64>,
    /// Filter by application status
    #[schema(example = "pending")]
    pub status: Option<String>,
    /// Filter by the year the leave starts in
    #[schema(example = 2026)]
    pub year: Option<i32>,
    /// Pagination page number (1-based)
    #[schema(example = 1)]
    pub page: Option<u64>,
    #[schema(example = 10)]
    pub per_page: Option<u64>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct BalanceQuery {
    /// Restrict to one leave type; omit for all active types
    #[schema(example = 1)]
    pub leave_type_id: Option<u64>,
    /// Target year; defaults to the current year
    #[schema(example = 2026)]
    pub year: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct BalanceResponse {
    #[schema(example = 1)]
    pub leave_type_id: u64,
    #[schema(example = "Earned Leave")]
    pub leave_type_name: String,
    #[schema(example = 2026)]
    pub year: i32,
    #[serde(flatten)]
    pub balance: LeaveBalance,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveApplication>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    U64(u64),
    I32(i32),
    Str(&'a str),
}

/// Active leave types
#[utoipa::path(
    get,
    path = "/api/v1/leave/types",
    responses(
        (status = 200, description = "Active leave types", body = [LeaveType])
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn list_leave_types(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let types = store::leave::active_leave_types(pool.get_ref())
        .await
        .map_err(HrmError::Internal)?;
    Ok(HttpResponse::Ok().json(types))
}

/// Leave balance for one staff member
#[utoipa::path(
    get,
    path = "/api/v1/leave/balance/{staff_ref}",
    params(
        ("staff_ref", Path, description = "Staff code or row id"),
        BalanceQuery
    ),
    responses(
        (status = 200, description = "Balance per leave type", body = [BalanceResponse]),
        (status = 404, description = "Leave type not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn get_balance(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<String>,
    query: web::Query<BalanceQuery>,
) -> actix_web::Result<impl Responder> {
    let staff_ref = path.into_inner();
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    // An unknown staff reference degrades to an unprorated balance with no
    // usage, rather than failing the whole request.
    let staff_id = match store::staff::find_by_ref(pool.get_ref(), &staff_ref)
        .await
        .map_err(HrmError::Internal)?
    {
        Some(staff) => staff.id,
        None => staff_ref.parse().unwrap_or(0),
    };

    let types = match query.leave_type_id {
        Some(type_id) => vec![
            store::leave::leave_type_by_id(pool.get_ref(), type_id)
                .await
                .map_err(HrmError::Internal)?
                .ok_or(HrmError::NotFound("Leave type"))?,
        ],
        None => store::leave::active_leave_types(pool.get_ref())
            .await
            .map_err(HrmError::Internal)?,
    };

    let mut balances = Vec::with_capacity(types.len());
    for leave_type in types {
        let balance =
            leave_balance::balance_for(pool.get_ref(), &config.policy, staff_id, leave_type.id, year)
                .await?;
        balances.push(BalanceResponse {
            leave_type_id: leave_type.id,
            leave_type_name: leave_type.leave_type_name,
            year,
            balance,
        });
    }

    Ok(HttpResponse::Ok().json(balances))
}

/// Submit a leave application
#[utoipa::path(
    post,
    path = "/api/v1/leave/applications",
    request_body = CreateLeaveApplication,
    responses(
        (status = 201, description = "Leave application submitted", body = Object, example = json!({
            "message": "Leave application submitted",
            "status": "pending"
        })),
        (status = 400, description = "Validation failure or insufficient balance"),
        (status = 404, description = "Staff member or leave type not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn create_application(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<CreateLeaveApplication>,
) -> actix_web::Result<impl Responder> {
    // Staff accounts apply for themselves; HR/admin name the staff member.
    let staff_id = if auth.role == Role::Staff {
        auth.require_staff_link()?
    } else {
        payload
            .staff_id
            .ok_or_else(|| HrmError::Validation("staff_id is required".into()))?
    };

    if payload.start_date > payload.end_date {
        return Err(HrmError::Validation("start_date cannot be after end_date".into()).into());
    }
    if payload.days <= 0 {
        return Err(HrmError::Validation("days must be a positive number".into()).into());
    }
    if payload.reason.trim().is_empty() {
        return Err(HrmError::Validation("reason is required".into()).into());
    }

    let staff = store::staff::find_by_id(pool.get_ref(), staff_id)
        .await
        .map_err(HrmError::Internal)?
        .ok_or(HrmError::NotFound("Staff member"))?;

    // Balance is checked here, at submission. Approval does not re-check,
    // so pending applications approved together may overdraw; that matches
    // the board's existing process.
    let year = payload.start_date.year();
    let balance = leave_balance::balance_for(
        pool.get_ref(),
        &config.policy,
        staff.id,
        payload.leave_type_id,
        year,
    )
    .await?;

    if payload.days > balance.available {
        return Err(HrmError::InsufficientBalance {
            available: balance.available,
            requested: payload.days,
        }
        .into());
    }

    sqlx::query(
        r#"
        INSERT INTO leave_applications
            (staff_id, leave_type_id, start_date, end_date, days, reason, status, applied_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(staff.id)
    .bind(payload.leave_type_id)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(payload.days)
    .bind(payload.reason.trim())
    .bind(LeaveStatus::Pending.as_ref())
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, staff_id = staff.id, "Failed to create leave application");
        HrmError::Internal(e)
    })?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Leave application submitted",
        "status": "pending"
    })))
}

/// Paginated leave application list
#[utoipa::path(
    get,
    path = "/api/v1/leave/applications",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list", body = LeaveListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn list_applications(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(staff_id) = query.staff_id {
        where_sql.push_str(" AND staff_id = ?");
        args.push(FilterValue::U64(staff_id));
    }

    if let Some(status) = query.status.as_deref() {
        if status.parse::<LeaveStatus>().is_err() {
            return Err(HrmError::Validation(format!("Unknown leave status: {status}")).into());
        }
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    if let Some(year) = query.year {
        where_sql.push_str(" AND YEAR(start_date) = ?");
        args.push(FilterValue::I32(year));
    }

    let count_sql = format!("SELECT COUNT(*) FROM leave_applications{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::I32(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to count leave applications");
        HrmError::Internal(e)
    })?;

    let data_sql = format!(
        "SELECT {APPLICATION_COLUMNS} FROM leave_applications{} \
         ORDER BY applied_at DESC LIMIT ? OFFSET ?",
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, LeaveApplication>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::I32(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let applications = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch leave applications");
            HrmError::Internal(e)
        })?;

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        data: applications,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}

/// One leave application
#[utoipa::path(
    get,
    path = "/api/v1/leave/applications/{id}",
    params(
        ("id" = u64, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Leave application found", body = LeaveApplication),
        (status = 404, description = "Leave application not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn get_application(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let id = path.into_inner();
    let sql = format!("SELECT {APPLICATION_COLUMNS} FROM leave_applications WHERE id = ?");
    let application = sqlx::query_as::<_, LeaveApplication>(&sql)
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "Failed to fetch leave application");
            HrmError::Internal(e)
        })?
        .ok_or(HrmError::NotFound("Leave application"))?;

    Ok(HttpResponse::Ok().json(application))
}

/// Approve a pending application
#[utoipa::path(
    put,
    path = "/api/v1/leave/applications/{id}/approve",
    params(
        ("id" = u64, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Leave approved"),
        (status = 400, description = "Not found or already processed")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn approve_application(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let id = path.into_inner();

    let result = sqlx::query(
        r#"
        UPDATE leave_applications
        SET status = 'approved', approved_by = ?, approved_at = CURRENT_TIMESTAMP
        WHERE id = ?
        AND status = 'pending'
        "#,
    )
    .bind(auth.user_id)
    .bind(id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, id, "Approve leave failed");
        HrmError::Internal(e)
    })?;

    if result.rows_affected() == 0 {
        return Err(HrmError::Validation(
            "Leave application not found or already processed".into(),
        )
        .into());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave approved"
    })))
}

/// Reject a pending application
#[utoipa::path(
    put,
    path = "/api/v1/leave/applications/{id}/reject",
    params(
        ("id" = u64, Path, description = "Application id")
    ),
    request_body = RejectLeave,
    responses(
        (status = 200, description = "Leave rejected"),
        (status = 400, description = "Missing reason, not found, or already processed")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn reject_application(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<RejectLeave>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    if payload.rejection_reason.trim().is_empty() {
        return Err(
            HrmError::Validation("rejection_reason is required when rejecting".into()).into(),
        );
    }

    let id = path.into_inner();

    let result = sqlx::query(
        r#"
        UPDATE leave_applications
        SET status = 'rejected', approved_by = ?, approved_at = CURRENT_TIMESTAMP,
            rejection_reason = ?
        WHERE id = ?
        AND status = 'pending'
        "#,
    )
    .bind(auth.user_id)
    .bind(payload.rejection_reason.trim())
    .bind(id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, id, "Reject leave failed");
        HrmError::Internal(e)
    })?;

    if result.rows_affected() == 0 {
        return Err(HrmError::Validation(
            "Leave application not found or already processed".into(),
        )
        .into());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave rejected"
    })))
}

/// Cancel a pending or approved application
#[utoipa::path(
    delete,
    path = "/api/v1/leave/applications/{id}",
    params(
        ("id" = u64, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Leave application cancelled"),
        (status = 404, description = "Not found or cannot be cancelled")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn cancel_application(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    // Staff may cancel only their own applications.
    let mut sql = String::from(
        "UPDATE leave_applications \
         SET status = 'cancelled', cancelled_at = CURRENT_TIMESTAMP \
         WHERE id = ? AND status IN ('pending', 'approved')",
    );
    if auth.role == Role::Staff {
        sql.push_str(" AND staff_id = ?");
    }

    let mut query = sqlx::query(&sql).bind(id);
    if auth.role == Role::Staff {
        query = query.bind(auth.require_staff_link()?);
    }

    let result = query.execute(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, id, "Cancel leave failed");
        HrmError::Internal(e)
    })?;

    if result.rows_affected() == 0 {
        return Err(HrmError::NotFound("Leave application").into());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave application cancelled"
    })))
}
