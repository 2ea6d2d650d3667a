use crate::model::payslip::Payslip;
use crate::model::staff::StaffMember;

const BOARD_NAME: &str = "CANTONMENT BOARD";
const DOC_WIDTH: usize = 58;

fn center(text: &str) -> String {
    if text.len() >= DOC_WIDTH {
        return text.to_string();
    }
    let pad = (DOC_WIDTH - text.len()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn money_line(label: &str, amount: f64) -> String {
    // Two-decimal rounding happens here, at presentation, and nowhere
    // earlier in the pipeline.
    format!("{label:<38}{amount:>18.2}")
}

fn rule() -> String {
    "-".repeat(DOC_WIDTH)
}

/// Renders the persisted payslip into the board's fixed-layout document.
///
/// Consumes exactly the stored payslip fields plus the staff identity block;
/// nothing is recomputed, so the document always mirrors what the payslip
/// table holds for the period.
pub fn render(payslip: &Payslip, staff: &StaffMember) -> String {
    let mut doc = Vec::new();

    doc.push(center(BOARD_NAME));
    doc.push(center("PAYSLIP"));
    doc.push(center(&format!("{:02}/{}", payslip.month, payslip.year)));
    doc.push(rule());

    doc.push(format!("Staff ID      : {}", staff.staff_id));
    doc.push(format!("Name          : {}", staff.name));
    doc.push(format!("Designation   : {}", staff.designation));
    if let Some(father) = &staff.father_name {
        doc.push(format!("Father's Name : {father}"));
    }
    doc.push(rule());

    doc.push("EARNINGS".to_string());
    doc.push(money_line("  Basic Pay", payslip.basic_pay));
    doc.push(money_line("  Dearness Allowance", payslip.da));
    doc.push(money_line("  House Rent Allowance", payslip.hra));
    doc.push(money_line("  Special Pay", payslip.special_pay));
    doc.push(money_line("  Special Allowance", payslip.special_allowance));
    doc.push(money_line("  Other Allowance", payslip.other_allowance));
    doc.push(money_line("GROSS SALARY", payslip.gross_salary));
    doc.push(rule());

    doc.push("DEDUCTIONS".to_string());
    doc.push(money_line("  Attendance Deduction", payslip.attendance_deduction));
    doc.push(money_line("  Provident Fund", payslip.provident_fund));
    doc.push(money_line("  ESI", payslip.esi));
    doc.push(money_line("  Professional Tax", payslip.professional_tax));
    doc.push(money_line("  Scheduled Deductions", payslip.custom_deductions));
    doc.push(money_line("TOTAL DEDUCTIONS", payslip.total_deductions));
    doc.push(rule());

    doc.push(money_line("NET SALARY", payslip.net_salary));
    doc.push(rule());

    doc.push("ATTENDANCE".to_string());
    doc.push(format!("  Days Present : {}", payslip.days_present));
    doc.push(format!("  Days Absent  : {}", payslip.days_absent));

    if let (Some(bank), Some(account)) = (&staff.bank_name, &staff.account_number) {
        doc.push(rule());
        doc.push("BANK DETAILS".to_string());
        doc.push(format!("  Bank    : {bank}"));
        doc.push(format!("  Account : {account}"));
    }

    doc.push(rule());
    doc.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn staff() -> StaffMember {
        StaffMember {
            id: 1,
            staff_id: "CB-1001".into(),
            name: "Ram Kumar".into(),
            father_name: Some("Shyam Kumar".into()),
            designation: "Junior Clerk".into(),
            basic_pay: 20_000.0,
            da_percentage: None,
            hra_percentage: None,
            special_pay: 0.0,
            special_allowance: 0.0,
            other_allowance: 0.0,
            bank_name: Some("SBI".into()),
            account_number: Some("XXXXXX1234".into()),
            date_of_joining: NaiveDate::from_ymd_opt(2023, 3, 10).unwrap(),
            status: "active".into(),
        }
    }

    fn payslip() -> Payslip {
        Payslip {
            id: 1,
            staff_id: 1,
            year: 2026,
            month: 2,
            basic_pay: 20_000.0,
            da: 8_400.0,
            hra: 4_800.0,
            special_pay: 0.0,
            special_allowance: 0.0,
            other_allowance: 0.0,
            gross_salary: 33_200.0,
            attendance_deduction: 0.0,
            provident_fund: 2_400.0,
            esi: 0.0,
            professional_tax: 200.0,
            custom_deductions: 0.0,
            total_deductions: 2_600.0,
            net_salary: 30_600.0,
            days_present: 22,
            days_absent: 0,
            generated_by: 1,
            generated_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn document_carries_header_and_period() {
        let doc = render(&payslip(), &staff());
        assert!(doc.contains("CANTONMENT BOARD"));
        assert!(doc.contains("PAYSLIP"));
        assert!(doc.contains("02/2026"));
    }

    #[test]
    fn amounts_are_rounded_to_two_decimals_at_render_time() {
        let mut slip = payslip();
        slip.esi = 437.49875;
        let doc = render(&slip, &staff());
        assert!(doc.contains("437.50"));
        assert!(!doc.contains("437.49875"));
    }

    #[test]
    fn document_shows_stored_values_without_recomputation() {
        // A deliberately inconsistent stored net proves the renderer echoes
        // the persisted row instead of recalculating.
        let mut slip = payslip();
        slip.net_salary = 1.0;
        let doc = render(&slip, &staff());
        assert!(doc.contains("NET SALARY"));
        assert!(doc.contains("1.00"));
        assert!(!doc.contains("30600.00"));
    }

    #[test]
    fn bank_block_requires_both_fields() {
        let mut s = staff();
        s.account_number = None;
        let doc = render(&payslip(), &s);
        assert!(!doc.contains("BANK DETAILS"));

        let doc_with_bank = render(&payslip(), &staff());
        assert!(doc_with_bank.contains("BANK DETAILS"));
        assert!(doc_with_bank.contains("SBI"));
    }

    #[test]
    fn attendance_block_snapshots_the_payslip_counts() {
        let doc = render(&payslip(), &staff());
        assert!(doc.contains("Days Present : 22"));
        assert!(doc.contains("Days Absent  : 0"));
    }
}
