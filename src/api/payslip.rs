use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::error::HrmError;
use crate::model::payslip::Payslip;
use crate::service::payslip::{self, fetch_or_generate, generate_payslip, preview_salary};
use crate::service::payslip_doc;
use crate::service::salary::AttendanceSnapshot;
use crate::store;
use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct HistoryQuery {
    #[schema(example = 2026)]
    pub year: Option<i32>,
    /// Number of periods to return, newest first
    #[schema(example = 12)]
    pub limit: Option<i64>,
}

#[derive(Deserialize, ToSchema)]
pub struct CalculateSalary {
    #[schema(example = 1)]
    pub staff_id: u64,
    #[schema(example = 2026)]
    pub year: Option<i32>,
    #[schema(example = 2)]
    pub month: Option<u32>,
    /// Override the stored attendance snapshot
    #[schema(example = 22)]
    pub days_present: Option<u32>,
    #[schema(example = 2)]
    pub days_absent: Option<u32>,
    #[schema(example = 0.0)]
    pub overtime_hours: Option<f64>,
    /// One-off allowances added to gross for this preview
    pub additional_allowances: Option<Vec<f64>>,
    /// One-off deductions added to the total for this preview
    pub additional_deductions: Option<Vec<f64>>,
}

async fn resolve_staff_id(pool: &MySqlPool, staff_ref: &str) -> Result<u64, HrmError> {
    store::staff::find_by_ref(pool, staff_ref)
        .await?
        .map(|s| s.id)
        .ok_or(HrmError::NotFound("Staff member"))
}

/// Fetch the period's payslip, generating it first if none exists
#[utoipa::path(
    get,
    path = "/api/v1/payslip/{staff_ref}/{year}/{month}",
    params(
        ("staff_ref", Path, description = "Staff code or row id"),
        ("year" = i32, Path, description = "Year"),
        ("month" = u32, Path, description = "Month (1-12)")
    ),
    responses(
        (status = 200, description = "Payslip for the period", body = Payslip),
        (status = 404, description = "Staff member not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Payslip"
)]
pub async fn get_payslip(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<(String, i32, u32)>,
) -> actix_web::Result<impl Responder> {
    let (staff_ref, year, month) = path.into_inner();
    let staff_id = resolve_staff_id(pool.get_ref(), &staff_ref).await?;

    let payslip = fetch_or_generate(
        pool.get_ref(),
        &config.policy,
        staff_id,
        year,
        month,
        auth.user_id,
    )
    .await?;

    Ok(HttpResponse::Ok().json(payslip))
}

/// Regenerate the period's payslip, overwriting any existing row
#[utoipa::path(
    post,
    path = "/api/v1/payslip/generate/{staff_ref}/{year}/{month}",
    params(
        ("staff_ref", Path, description = "Staff code or row id"),
        ("year" = i32, Path, description = "Year"),
        ("month" = u32, Path, description = "Month (1-12)")
    ),
    responses(
        (status = 200, description = "Payslip generated", body = Payslip),
        (status = 404, description = "Staff member not found"),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Payslip"
)]
pub async fn regenerate_payslip(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<(String, i32, u32)>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let (staff_ref, year, month) = path.into_inner();
    let staff_id = resolve_staff_id(pool.get_ref(), &staff_ref).await?;

    let payslip = generate_payslip(
        pool.get_ref(),
        &config.policy,
        staff_id,
        year,
        month,
        auth.user_id,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Payslip generated successfully",
        "payslip": payslip
    })))
}

/// The fixed-layout payslip document for a generated period
#[utoipa::path(
    get,
    path = "/api/v1/payslip/{staff_ref}/{year}/{month}/document",
    params(
        ("staff_ref", Path, description = "Staff code or row id"),
        ("year" = i32, Path, description = "Year"),
        ("month" = u32, Path, description = "Month (1-12)")
    ),
    responses(
        (status = 200, description = "Rendered payslip document", content_type = "text/plain"),
        (status = 404, description = "Payslip not generated for the period")
    ),
    security(("bearer_auth" = [])),
    tag = "Payslip"
)]
pub async fn payslip_document(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<(String, i32, u32)>,
) -> actix_web::Result<impl Responder> {
    let (staff_ref, year, month) = path.into_inner();
    payslip::validate_period(year, month)?;

    let staff = store::staff::find_by_ref(pool.get_ref(), &staff_ref)
        .await
        .map_err(HrmError::Internal)?
        .ok_or(HrmError::NotFound("Staff member"))?;

    // The document echoes the persisted row; an ungenerated period is a 404,
    // not an implicit generation.
    let payslip = store::payslip::find(pool.get_ref(), staff.id, year, month)
        .await
        .map_err(HrmError::Internal)?
        .ok_or(HrmError::NotFound("Payslip"))?;

    let document = payslip_doc::render(&payslip, &staff);

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(document))
}

/// Payslip history, newest period first
#[utoipa::path(
    get,
    path = "/api/v1/payslip/history/{staff_ref}",
    params(
        ("staff_ref", Path, description = "Staff code or row id"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "Past payslips", body = [Payslip]),
        (status = 404, description = "Staff member not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Payslip"
)]
pub async fn history(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> actix_web::Result<impl Responder> {
    let staff_ref = path.into_inner();
    let staff_id = resolve_staff_id(pool.get_ref(), &staff_ref).await?;
    let limit = query.limit.unwrap_or(12).clamp(1, 120);

    let payslips = store::payslip::history(pool.get_ref(), staff_id, query.year, limit)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, staff_id, "Failed to fetch payslip history");
            HrmError::Internal(e)
        })?;

    Ok(HttpResponse::Ok().json(payslips))
}

/// Salary preview without persisting anything
#[utoipa::path(
    post,
    path = "/api/v1/payslip/calculate",
    request_body = CalculateSalary,
    responses(
        (status = 200, description = "Computed salary components"),
        (status = 404, description = "Staff member not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Payslip"
)]
pub async fn calculate(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<CalculateSalary>,
) -> actix_web::Result<impl Responder> {
    let now = Utc::now();
    let year = payload.year.unwrap_or_else(|| now.year());
    let month = payload.month.unwrap_or_else(|| now.month());

    let attendance_override = match (
        payload.days_present,
        payload.days_absent,
        payload.overtime_hours,
    ) {
        (None, None, None) => None,
        (present, absent, overtime) => Some(AttendanceSnapshot {
            days_present: present.unwrap_or(0),
            days_absent: absent.unwrap_or(0),
            overtime_hours: overtime.unwrap_or(0.0),
        }),
    };

    let components = preview_salary(
        pool.get_ref(),
        &config.policy,
        payload.staff_id,
        year,
        month,
        attendance_override,
        payload.additional_allowances.as_deref().unwrap_or(&[]),
        payload.additional_deductions.as_deref().unwrap_or(&[]),
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "staff_id": payload.staff_id,
        "year": year,
        "month": month,
        "salary_components": components
    })))
}
