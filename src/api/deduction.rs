use crate::auth::auth::AuthUser;
use crate::error::HrmError;
use crate::model::deduction::DeductionSchedule;
use crate::store;
use actix_web::{HttpResponse, Responder, web};
use sqlx::MySqlPool;

/// Deduction schedule for one staff member (zero defaults if none is set)
#[utoipa::path(
    get,
    path = "/api/v1/deductions/{staff_ref}",
    params(
        ("staff_ref", Path, description = "Staff code or row id")
    ),
    responses(
        (status = 200, description = "Active schedule", body = DeductionSchedule),
        (status = 404, description = "Staff member not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Deductions"
)]
pub async fn get_schedule(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let staff_ref = path.into_inner();
    let staff = store::staff::find_by_ref(pool.get_ref(), &staff_ref)
        .await
        .map_err(HrmError::Internal)?
        .ok_or(HrmError::NotFound("Staff member"))?;

    let schedule = store::deduction::for_staff(pool.get_ref(), staff.id)
        .await
        .map_err(HrmError::Internal)?
        .unwrap_or(DeductionSchedule {
            staff_id: staff.id,
            ..Default::default()
        });

    Ok(HttpResponse::Ok().json(schedule))
}

/// Replace the deduction schedule for one staff member
#[utoipa::path(
    put,
    path = "/api/v1/deductions/{staff_ref}",
    params(
        ("staff_ref", Path, description = "Staff code or row id")
    ),
    request_body = DeductionSchedule,
    responses(
        (status = 200, description = "Schedule saved"),
        (status = 400, description = "Negative amounts rejected"),
        (status = 404, description = "Staff member not found"),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Deductions"
)]
pub async fn put_schedule(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    payload: web::Json<DeductionSchedule>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let staff_ref = path.into_inner();
    let staff = store::staff::find_by_ref(pool.get_ref(), &staff_ref)
        .await
        .map_err(HrmError::Internal)?
        .ok_or(HrmError::NotFound("Staff member"))?;

    let mut schedule = payload.into_inner();
    schedule.staff_id = staff.id;

    let amounts = [
        schedule.gpf_monthly,
        schedule.nps_govt_monthly,
        schedule.nps_self_monthly,
        schedule.lic_monthly,
        schedule.gic_monthly,
        schedule.electricity_monthly,
        schedule.water_monthly,
        schedule.recovery_monthly,
        schedule.leave_deduction_monthly,
        schedule.income_tax_monthly,
        schedule.other_deduction_1_monthly,
        schedule.other_deduction_2_monthly,
        schedule.other_deduction_3_monthly,
    ];
    if amounts.iter().any(|v| *v < 0.0) {
        return Err(HrmError::Validation("Deduction amounts cannot be negative".into()).into());
    }

    store::deduction::upsert(pool.get_ref(), &schedule)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, staff_id = staff.id, "Failed to save deduction schedule");
            HrmError::Internal(e)
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Deduction schedule saved"
    })))
}
