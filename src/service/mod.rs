pub mod attendance_summary;
pub mod leave_balance;
pub mod payslip;
pub mod payslip_doc;
pub mod salary;
