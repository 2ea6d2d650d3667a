use crate::{
    auth::auth::AuthUser,
    error::HrmError,
    model::staff::StaffMember,
    store,
    utils::db_utils::{build_update_sql, execute_update},
};
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::ToSchema;

/// Columns an admin edit may touch through the dynamic update endpoint.
const UPDATABLE_COLUMNS: &[&str] = &[
    "staff_id",
    "name",
    "father_name",
    "designation",
    "basic_pay",
    "da_percentage",
    "hra_percentage",
    "special_pay",
    "special_allowance",
    "other_allowance",
    "bank_name",
    "account_number",
    "date_of_joining",
    "status",
];

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateStaff {
    #[schema(example = "CB-1001")]
    pub staff_id: String,
    #[schema(example = "Ram Kumar")]
    pub name: String,
    #[schema(example = "Shyam Kumar")]
    pub father_name: Option<String>,
    #[schema(example = "Junior Clerk")]
    pub designation: String,
    #[schema(example = 20000.0)]
    pub basic_pay: f64,
    #[schema(example = 42.0)]
    pub da_percentage: Option<f64>,
    #[schema(example = 24.0)]
    pub hra_percentage: Option<f64>,
    #[schema(example = 0.0)]
    pub special_pay: Option<f64>,
    #[schema(example = 0.0)]
    pub special_allowance: Option<f64>,
    #[schema(example = 0.0)]
    pub other_allowance: Option<f64>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub date_of_joining: chrono::NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StaffQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub designation: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct StaffListResponse {
    pub data: Vec<StaffMember>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 42)]
    pub total: i64,
}

/// Create admission record
#[utoipa::path(
    post,
    path = "/api/v1/staff",
    request_body = CreateStaff,
    responses(
        (status = 201, description = "Staff member admitted", body = Object, example = json!({
            "message": "Staff member admitted successfully"
        })),
        (status = 409, description = "Duplicate staff code"),
        (status = 401),
        (status = 403)
    ),
    tag = "Staff",
    security(("bearer_auth" = []))
)]
pub async fn create_staff(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateStaff>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    if payload.staff_id.trim().is_empty() || payload.name.trim().is_empty() {
        return Err(HrmError::Validation("staff_id and name are required".into()).into());
    }
    if payload.basic_pay < 0.0 {
        return Err(HrmError::Validation("basic_pay cannot be negative".into()).into());
    }

    let result = sqlx::query(
        r#"
        INSERT INTO admissions
        (staff_id, name, father_name, designation, basic_pay,
         da_percentage, hra_percentage, special_pay, special_allowance, other_allowance,
         bank_name, account_number, date_of_joining, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'active')
        "#,
    )
    .bind(&payload.staff_id)
    .bind(&payload.name)
    .bind(&payload.father_name)
    .bind(&payload.designation)
    .bind(payload.basic_pay)
    .bind(payload.da_percentage)
    .bind(payload.hra_percentage)
    .bind(payload.special_pay.unwrap_or(0.0))
    .bind(payload.special_allowance.unwrap_or(0.0))
    .bind(payload.other_allowance.unwrap_or(0.0))
    .bind(&payload.bank_name)
    .bind(&payload.account_number)
    .bind(payload.date_of_joining)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Created().json(json!({
            "message": "Staff member admitted successfully"
        }))),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Err(HrmError::Conflict(format!(
                        "Staff code {} already exists",
                        payload.staff_id
                    ))
                    .into());
                }
            }
            error!(error = %e, "Failed to create admission record");
            Err(HrmError::Internal(e).into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/staff",
    params(
        ("page", Query, description = "Page number"),
        ("per_page", Query, description = "Items per page"),
        ("designation", Query, description = "Filter by designation"),
        ("status", Query, description = "Filter by status"),
        ("search", Query, description = "Search by name or staff code")
    ),
    responses(
        (status = 200, description = "Paginated staff list", body = StaffListResponse)
    ),
    tag = "Staff",
    security(("bearer_auth" = []))
)]
pub async fn list_staff(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<StaffQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    // ---------- build WHERE clause dynamically ----------
    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(designation) = &query.designation {
        conditions.push("designation = ?");
        bindings.push(designation.clone());
    }

    if let Some(status) = &query.status {
        conditions.push("status = ?");
        bindings.push(status.clone());
    }

    if let Some(search) = &query.search {
        conditions.push("(name LIKE ? OR staff_id LIKE ?)");
        let like = format!("%{}%", search);
        bindings.push(like.clone());
        bindings.push(like);
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) as total FROM admissions {}", where_clause);
    debug!(sql = %count_sql, bindings = ?bindings, "Counting staff");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &bindings {
        count_query = count_query.bind(b);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %count_sql, "Failed to count staff");
        ErrorInternalServerError("Database error")
    })?;

    let data_sql = format!(
        "SELECT * FROM admissions {} ORDER BY id DESC LIMIT ? OFFSET ?",
        where_clause
    );

    let mut data_query = sqlx::query_as::<_, StaffMember>(&data_sql);
    for b in &bindings {
        data_query = data_query.bind(b);
    }
    data_query = data_query.bind(per_page as i64).bind(offset as i64);

    let staff = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %data_sql, "Failed to fetch staff list");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(StaffListResponse {
        data: staff,
        page,
        per_page,
        total,
    }))
}

/// Get staff member by staff code or row id
#[utoipa::path(
    get,
    path = "/api/v1/staff/{staff_ref}",
    params(
        ("staff_ref", Path, description = "Staff code or row id")
    ),
    responses(
        (status = 200, description = "Staff member found", body = StaffMember),
        (status = 404, description = "Staff member not found")
    ),
    tag = "Staff",
    security(("bearer_auth" = []))
)]
pub async fn get_staff(
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

    Ok(HttpResponse::Ok().json(staff))
}

/// Update staff member (dynamic field map)
#[utoipa::path(
    put,
    path = "/api/v1/staff/{id}",
    params(
        ("id", Path, description = "Admission row id")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Staff member updated"),
        (status = 400, description = "Unknown field in payload"),
        (status = 404, description = "Staff member not found")
    ),
    tag = "Staff",
    security(("bearer_auth" = []))
)]
pub async fn update_staff(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let staff_id = path.into_inner();

    let update = build_update_sql("admissions", &body, UPDATABLE_COLUMNS, "id", staff_id)?;

    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(HrmError::Internal)?;

    if affected == 0 {
        return Err(HrmError::NotFound("Staff member").into());
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Staff member updated successfully"
    })))
}

/// Delete staff member
#[utoipa::path(
    delete,
    path = "/api/v1/staff/{id}",
    params(
        ("id", Path, description = "Admission row id")
    ),
    responses(
        (status = 200, description = "Successfully deleted"),
        (status = 404, description = "Staff member not found")
    ),
    tag = "Staff",
    security(("bearer_auth" = []))
)]
pub async fn delete_staff(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let staff_id = path.into_inner();

    let result = sqlx::query("DELETE FROM admissions WHERE id = ?")
        .bind(staff_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, staff_id, "Failed to delete staff member");
            HrmError::Internal(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(HrmError::NotFound("Staff member").into());
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}
