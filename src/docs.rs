use crate::api::attendance::{
    BulkEntry, BulkRowError, BulkUpdate, MarkAttendance, SummaryQuery, UpdateAttendance,
};
use crate::api::leave::{
    BalanceQuery, BalanceResponse, CreateLeaveApplication, LeaveFilter, LeaveListResponse,
    RejectLeave,
};
use crate::api::payslip::{CalculateSalary, HistoryQuery};
use crate::api::staff::{CreateStaff, StaffListResponse, StaffQuery};
use crate::model::attendance::{AttendanceStatus, DailyAttendanceRecord, MonthlyAttendanceSummary};
use crate::model::deduction::DeductionSchedule;
use crate::model::leave::{LeaveApplication, LeaveStatus, LeaveType};
use crate::model::payslip::Payslip;
use crate::model::staff::StaffMember;
use crate::service::leave_balance::LeaveBalance;
use crate::service::salary::{AttendanceSnapshot, SalaryComponents};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cantonment Board HRM API",
        version = "1.0.0",
        description = r#"
## Cantonment Board HR & Payroll System

Backend for the board's HR administration: staff admissions, leave,
attendance, deduction schedules and payslip generation.

### Key Features
- **Staff Management**
  - Admission records with salary structure and bank details
- **Leave Management**
  - Balance calculation with first-year proration and carry-forward,
    application workflow with approval/rejection
- **Attendance Management**
  - Daily marking (single and bulk) with automatic monthly roll-up
- **Payroll**
  - Salary computation (DA/HRA, statutory and scheduled deductions),
    period-keyed payslips and a printable payslip document

### Security
Endpoints under the API prefix require **JWT Bearer authentication**;
admin-only operations additionally check the caller's role.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::staff::create_staff,
        crate::api::staff::list_staff,
        crate::api::staff::get_staff,
        crate::api::staff::update_staff,
        crate::api::staff::delete_staff,

        crate::api::leave::list_leave_types,
        crate::api::leave::get_balance,
        crate::api::leave::create_application,
        crate::api::leave::list_applications,
        crate::api::leave::get_application,
        crate::api::leave::approve_application,
        crate::api::leave::reject_application,
        crate::api::leave::cancel_application,

        crate::api::attendance::mark,
        crate::api::attendance::update_record,
        crate::api::attendance::bulk_update,
        crate::api::attendance::month_records,
        crate::api::attendance::summary,

        crate::api::payslip::get_payslip,
        crate::api::payslip::regenerate_payslip,
        crate::api::payslip::payslip_document,
        crate::api::payslip::history,
        crate::api::payslip::calculate,

        crate::api::deduction::get_schedule,
        crate::api::deduction::put_schedule
    ),
    components(
        schemas(
            StaffMember,
            CreateStaff,
            StaffQuery,
            StaffListResponse,
            LeaveType,
            LeaveStatus,
            LeaveApplication,
            LeaveBalance,
            BalanceQuery,
            BalanceResponse,
            CreateLeaveApplication,
            RejectLeave,
            LeaveFilter,
            LeaveListResponse,
            AttendanceStatus,
            DailyAttendanceRecord,
            MonthlyAttendanceSummary,
            MarkAttendance,
            UpdateAttendance,
            BulkEntry,
            BulkUpdate,
            BulkRowError,
            SummaryQuery,
            DeductionSchedule,
            Payslip,
            AttendanceSnapshot,
            SalaryComponents,
            CalculateSalary,
            HistoryQuery
        )
    ),
    tags(
        (name = "Staff", description = "Staff admission management APIs"),
        (name = "Leave", description = "Leave balance and application APIs"),
        (name = "Attendance", description = "Attendance marking and summary APIs"),
        (name = "Payslip", description = "Salary calculation and payslip APIs"),
        (name = "Deductions", description = "Deduction schedule APIs"),
    )
)]
pub struct ApiDoc;
