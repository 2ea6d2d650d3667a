use crate::auth::auth::AuthUser;
use crate::error::HrmError;
use crate::model::attendance::AttendanceStatus;
use crate::service::attendance_summary::{self, attendance_percentage, working_days};
use crate::store::{self, attendance::DailyMark};
use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = 1)]
    pub staff_id: u64,
    #[schema(example = "2026-02-02", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "present")]
    pub status: AttendanceStatus, // enum ensures Swagger dropdown
    #[schema(example = "09:05:00", value_type = String, format = "time")]
    pub check_in_time: Option<NaiveTime>,
    #[schema(example = "17:30:00", value_type = String, format = "time")]
    pub check_out_time: Option<NaiveTime>,
    #[schema(example = 8.0)]
    pub total_hours: Option<f64>,
    #[schema(example = 0.5)]
    pub overtime_hours: Option<f64>,
    pub remarks: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateAttendance {
    pub status: Option<AttendanceStatus>,
    #[schema(value_type = String, format = "time")]
    pub check_in_time: Option<NaiveTime>,
    #[schema(value_type = String, format = "time")]
    pub check_out_time: Option<NaiveTime>,
    pub total_hours: Option<f64>,
    pub overtime_hours: Option<f64>,
    pub remarks: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct BulkEntry {
    #[schema(example = 1)]
    pub staff_id: u64,
    #[schema(example = "present")]
    pub status: AttendanceStatus,
    #[schema(value_type = String, format = "time")]
    pub check_in_time: Option<NaiveTime>,
    #[schema(value_type = String, format = "time")]
    pub check_out_time: Option<NaiveTime>,
    pub total_hours: Option<f64>,
    pub overtime_hours: Option<f64>,
    pub remarks: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct BulkUpdate {
    #[schema(example = "2026-02-02", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub staff_attendance: Vec<BulkEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct BulkRowError {
    pub staff_id: u64,
    pub error: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct SummaryQuery {
    #[schema(example = 2026)]
    pub year: Option<i32>,
    #[schema(example = 2)]
    pub month: Option<u32>,
}

/// Mark one day's attendance (marking an already-marked day updates it)
#[utoipa::path(
    post,
    path = "/api/v1/attendance/mark",
    request_body = MarkAttendance,
    responses(
        (status = 200, description = "Attendance recorded and summary recomputed"),
        (status = 404, description = "Staff member not found"),
        (status = 401),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn mark(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<MarkAttendance>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let staff = store::staff::find_by_id(pool.get_ref(), payload.staff_id)
        .await
        .map_err(HrmError::Internal)?
        .ok_or(HrmError::NotFound("Staff member"))?;

    let mark = DailyMark {
        staff_id: staff.id,
        date: payload.date,
        status: payload.status.as_ref().to_string(),
        check_in_time: payload.check_in_time,
        check_out_time: payload.check_out_time,
        total_hours: payload.total_hours.unwrap_or(0.0),
        overtime_hours: payload.overtime_hours.unwrap_or(0.0),
        remarks: payload.remarks.clone(),
    };

    store::attendance::upsert_daily(pool.get_ref(), &mark)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, staff_id = staff.id, "Failed to mark attendance");
            HrmError::Internal(e)
        })?;

    let totals =
        attendance_summary::recompute_monthly_summary(pool.get_ref(), staff.id, payload.date)
            .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Attendance recorded",
        "days_present": totals.days_present,
        "days_absent": totals.days_absent
    })))
}

/// Update one daily record by id
#[utoipa::path(
    put,
    path = "/api/v1/attendance/records/{id}",
    params(
        ("id" = u64, Path, description = "Daily record id")
    ),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Record updated and summary recomputed"),
        (status = 404, description = "Attendance record not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn update_record(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateAttendance>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let id = path.into_inner();
    let existing = store::attendance::daily_by_id(pool.get_ref(), id)
        .await
        .map_err(HrmError::Internal)?
        .ok_or(HrmError::NotFound("Attendance record"))?;

    // Merge the partial payload over the stored row, then write through the
    // same upsert path the mark endpoint uses.
    let mark = DailyMark {
        staff_id: existing.staff_id,
        date: existing.date,
        status: payload
            .status
            .map(|s| s.as_ref().to_string())
            .unwrap_or(existing.status),
        check_in_time: payload.check_in_time.or(existing.check_in_time),
        check_out_time: payload.check_out_time.or(existing.check_out_time),
        total_hours: payload.total_hours.unwrap_or(existing.total_hours),
        overtime_hours: payload.overtime_hours.unwrap_or(existing.overtime_hours),
        remarks: payload.remarks.clone().or(existing.remarks),
    };

    store::attendance::upsert_daily(pool.get_ref(), &mark)
        .await
        .map_err(HrmError::Internal)?;

    attendance_summary::recompute_monthly_summary(pool.get_ref(), mark.staff_id, mark.date).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Attendance record updated"
    })))
}

/// Bulk-mark one day for many staff members
#[utoipa::path(
    post,
    path = "/api/v1/attendance/bulk-update",
    request_body = BulkUpdate,
    responses(
        (status = 200, description = "Per-row results", body = Object, example = json!({
            "message": "Bulk attendance update completed",
            "processed": 2, "successful": 2, "failed": 0
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn bulk_update(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<BulkUpdate>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    if payload.staff_attendance.is_empty() {
        return Err(HrmError::Validation("staff_attendance must not be empty".into()).into());
    }

    let mut successful: Vec<u64> = Vec::new();
    let mut errors: Vec<BulkRowError> = Vec::new();

    for entry in &payload.staff_attendance {
        let staff = match store::staff::find_by_id(pool.get_ref(), entry.staff_id).await {
            Ok(Some(staff)) => staff,
            Ok(None) => {
                errors.push(BulkRowError {
                    staff_id: entry.staff_id,
                    error: "Staff member not found".into(),
                });
                continue;
            }
            Err(e) => {
                tracing::error!(error = %e, staff_id = entry.staff_id, "Bulk mark lookup failed");
                errors.push(BulkRowError {
                    staff_id: entry.staff_id,
                    error: "Storage failure".into(),
                });
                continue;
            }
        };

        let mark = DailyMark {
            staff_id: staff.id,
            date: payload.date,
            status: entry.status.as_ref().to_string(),
            check_in_time: entry.check_in_time,
            check_out_time: entry.check_out_time,
            total_hours: entry.total_hours.unwrap_or(0.0),
            overtime_hours: entry.overtime_hours.unwrap_or(0.0),
            remarks: entry.remarks.clone(),
        };

        let outcome: Result<(), HrmError> = async {
            store::attendance::upsert_daily(pool.get_ref(), &mark)
                .await
                .map_err(HrmError::Internal)?;
            attendance_summary::recompute_monthly_summary(pool.get_ref(), staff.id, payload.date)
                .await?;
            Ok(())
        }
        .await;

        match outcome {
            Ok(()) => successful.push(staff.id),
            Err(e) => {
                tracing::error!(error = %e, staff_id = staff.id, "Bulk mark failed");
                errors.push(BulkRowError {
                    staff_id: staff.id,
                    error: "Storage failure".into(),
                });
            }
        }
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Bulk attendance update completed",
        "processed": payload.staff_attendance.len(),
        "successful": successful.len(),
        "failed": errors.len(),
        "results": successful,
        "errors": errors
    })))
}

/// Monthly summary plus the daily records behind it
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{staff_ref}/{year}/{month}",
    params(
        ("staff_ref", Path, description = "Staff code or row id"),
        ("year" = i32, Path, description = "Year"),
        ("month" = u32, Path, description = "Month (1-12)")
    ),
    responses(
        (status = 200, description = "Summary and daily records"),
        (status = 404, description = "Staff member not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn month_records(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<(String, i32, u32)>,
) -> actix_web::Result<impl Responder> {
    let (staff_ref, year, month) = path.into_inner();
    crate::service::payslip::validate_period(year, month)?;

    let staff = store::staff::find_by_ref(pool.get_ref(), &staff_ref)
        .await
        .map_err(HrmError::Internal)?
        .ok_or(HrmError::NotFound("Staff member"))?;

    let summary = store::attendance::monthly_summary(pool.get_ref(), staff.id, year, month)
        .await
        .map_err(HrmError::Internal)?;
    let daily = store::attendance::daily_for_month(pool.get_ref(), staff.id, year, month)
        .await
        .map_err(HrmError::Internal)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "staff": staff,
        "year": year,
        "month": month,
        "monthly_summary": summary,
        "daily_records": daily
    })))
}

/// Attendance statistics with the percentage figure
#[utoipa::path(
    get,
    path = "/api/v1/attendance/summary/{staff_ref}",
    params(
        ("staff_ref", Path, description = "Staff code or row id"),
        SummaryQuery
    ),
    responses(
        (status = 200, description = "Monthly statistics and attendance percentage"),
        (status = 404, description = "Staff member not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn summary(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    query: web::Query<SummaryQuery>,
) -> actix_web::Result<impl Responder> {
    let staff_ref = path.into_inner();
    let now = Utc::now();
    let year = query.year.unwrap_or_else(|| now.year());
    let month = query.month.unwrap_or_else(|| now.month());
    crate::service::payslip::validate_period(year, month)?;

    let staff = store::staff::find_by_ref(pool.get_ref(), &staff_ref)
        .await
        .map_err(HrmError::Internal)?
        .ok_or(HrmError::NotFound("Staff member"))?;

    let daily = store::attendance::daily_for_month(pool.get_ref(), staff.id, year, month)
        .await
        .map_err(HrmError::Internal)?;
    let totals = attendance_summary::fold_daily(&daily);
    let percentage = attendance_percentage(totals.days_present, working_days(&totals));

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "staff": staff,
        "year": year,
        "month": month,
        "days_present": totals.days_present,
        "days_absent": totals.days_absent,
        "days_on_leave": totals.days_on_leave,
        "days_holiday": totals.days_holiday,
        "total_hours": totals.total_hours,
        "overtime_hours": totals.overtime_hours,
        "attendance_percentage": percentage
    })))
}
