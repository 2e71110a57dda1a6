//! Report rendering - turns a snapshot plus its aggregates into the fixed
//! HTML document handed to the PDF/share collaborator.
//!
//! Rendering is pure: the only non-derived input is the generation timestamp,
//! which the caller supplies. Amounts use the `Rs.` currency prefix with
//! thousands grouping throughout.

use crate::core::aggregate::Aggregates;
use crate::core::status::ExpenseStatus;
use crate::entities::{expense, funder};
use chrono::{DateTime, Utc};

/// Formats an amount as `Rs. 1,234,567` (or `Rs. 1,234.50` when there is a
/// fractional part). Non-finite amounts render as zero, matching the
/// aggregation engine's treatment of malformed data.
#[must_use]
pub fn format_rupees(amount: f64) -> String {
    if !amount.is_finite() {
        return "Rs. 0".to_string();
    }
    let negative = amount < 0.0;
    let abs = amount.abs();
    // Cast safety: f64 -> u64 saturates; validated amounts sit far below the
    // saturation range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut whole = abs.trunc() as u64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut cents = (abs.fract() * 100.0).round() as u64;
    if cents >= 100 {
        whole += 1;
        cents = 0;
    }

    let grouped = group_thousands(whole);
    let sign = if negative { "-" } else { "" };
    if cents == 0 {
        format!("Rs. {sign}{grouped}")
    } else {
        format!("Rs. {sign}{grouped}.{cents:02}")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Escapes text for interpolation into the HTML document.
#[must_use]
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// The funder cell for an expense row: the funder's name, or `Not Assigned`
/// when the expense has no funder or the id no longer resolves.
fn funder_display(funders: &[funder::Model], expense: &expense::Model) -> String {
    expense
        .funder_id
        .as_deref()
        .and_then(|id| funders.iter().find(|funder| funder.id == id))
        .map_or_else(|| "Not Assigned".to_string(), |funder| html_escape(&funder.name))
}

fn creation_date(expense: &expense::Model) -> String {
    expense
        .created_at
        .map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d").to_string())
}

fn expense_row(expense: &expense::Model, funders: &[funder::Model]) -> String {
    format!(
        "            <tr>\n                <td>{}</td>\n                <td class=\"amount\">{}</td>\n                <td>{}</td>\n                <td>{}</td>\n                <td>{}</td>\n            </tr>\n",
        html_escape(&expense.title),
        format_rupees(expense.amount),
        html_escape(&expense.status),
        funder_display(funders, expense),
        creation_date(expense),
    )
}

const EXPENSE_TABLE_HEADER: &str = "            <tr>\n                <th>Title</th>\n                <th>Amount</th>\n                <th>Status</th>\n                <th>Funder</th>\n                <th>Date</th>\n            </tr>\n";

const REPORT_STYLE: &str = r"
        @page { size: A4; margin: 2cm; }
        body {
            font-family: Arial, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 800px;
            margin: 0 auto;
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 2px solid #0F6E66;
            padding-bottom: 20px;
        }
        .header h1 { color: #0F6E66; margin: 0; font-size: 24px; }
        .header p { color: #666; margin: 10px 0 0; }
        .section { margin-bottom: 30px; page-break-inside: avoid; }
        .section-title {
            font-size: 18px;
            font-weight: bold;
            color: #0F6E66;
            margin-bottom: 15px;
            border-bottom: 1px solid #eee;
            padding-bottom: 5px;
        }
        .amount { color: #0F6E66; font-weight: bold; text-align: right; }
        .footer {
            margin-top: 40px;
            text-align: center;
            font-size: 12px;
            color: #666;
            border-top: 1px solid #eee;
            padding-top: 20px;
        }
        table { width: 100%; border-collapse: collapse; margin: 15px 0; }
        th, td { padding: 8px; text-align: left; border-bottom: 1px solid #eee; }
        th { background-color: #f8f8f8; color: #0F6E66; }
        .category-section { margin-top: 20px; margin-bottom: 30px; }
        .category-title {
            font-size: 16px;
            font-weight: bold;
            color: #333;
            margin-bottom: 10px;
            background-color: #f5f5f5;
            padding: 8px;
            border-radius: 4px;
        }
";

/// Renders the full expense report as an HTML document.
///
/// Structure is fixed: header, budget summary, the four status buckets in
/// lifecycle order, one section per category with expenses listing that
/// category's expenses, the funder breakdown, and the recent-expense table.
/// Expenses whose category no longer resolves appear in no category section
/// but are still part of the totals and the recent table.
#[must_use]
pub fn render_report(
    funders: &[funder::Model],
    expenses: &[expense::Model],
    aggregates: &Aggregates,
    generated_at: DateTime<Utc>,
) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"utf-8\">\n    <title>Expense Management Report</title>\n    <style>");
    html.push_str(REPORT_STYLE);
    html.push_str("    </style>\n</head>\n<body>\n");

    html.push_str(&format!(
        "    <div class=\"header\">\n        <h1>Expense Management Report</h1>\n        <p>Generated on: {}</p>\n    </div>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    // Budget summary
    html.push_str("    <div class=\"section\">\n        <div class=\"section-title\">Budget Summary</div>\n        <table>\n            <tr>\n                <th>Item</th>\n                <th>Amount</th>\n            </tr>\n");
    for (label, amount) in [
        ("Total Budget", aggregates.overview.total_budget),
        ("Received Fund", aggregates.overview.received_fund),
        ("Remaining Fund", aggregates.overview.remaining_fund),
    ] {
        html.push_str(&format!(
            "            <tr>\n                <td>{label}</td>\n                <td class=\"amount\">{}</td>\n            </tr>\n",
            format_rupees(amount)
        ));
    }
    html.push_str("        </table>\n    </div>\n");

    // Status buckets, fixed lifecycle order
    html.push_str("    <div class=\"section\">\n        <div class=\"section-title\">Expense Status</div>\n        <table>\n            <tr>\n                <th>Status</th>\n                <th>Count</th>\n                <th>Amount</th>\n            </tr>\n");
    for status in ExpenseStatus::ALL {
        let bucket = aggregates.statuses.bucket(status);
        html.push_str(&format!(
            "            <tr>\n                <td>{status}</td>\n                <td>{}</td>\n                <td class=\"amount\">{}</td>\n            </tr>\n",
            bucket.count,
            format_rupees(bucket.amount)
        ));
    }
    html.push_str("        </table>\n    </div>\n");

    // Per-category sections; entries exist only for categories with expenses
    html.push_str("    <div class=\"section\">\n        <div class=\"section-title\">Expenses by Category</div>\n");
    for entry in &aggregates.categories {
        html.push_str(&format!(
            "        <div class=\"category-section\">\n            <div class=\"category-title\">{} ({} expenses - Total: {})</div>\n            <table>\n",
            html_escape(&entry.name),
            entry.count,
            format_rupees(entry.total_amount)
        ));
        html.push_str(EXPENSE_TABLE_HEADER);
        for expense in expenses.iter().filter(|e| e.category_id == entry.id) {
            html.push_str(&expense_row(expense, funders));
        }
        html.push_str("            </table>\n        </div>\n");
    }
    html.push_str("    </div>\n");

    // Funder breakdown
    html.push_str("    <div class=\"section\">\n        <div class=\"section-title\">Expenses by Funder</div>\n        <table>\n            <tr>\n                <th>Funder</th>\n                <th>Count</th>\n                <th>Amount</th>\n            </tr>\n");
    for entry in &aggregates.funders {
        html.push_str(&format!(
            "            <tr>\n                <td>{}</td>\n                <td>{}</td>\n                <td class=\"amount\">{}</td>\n            </tr>\n",
            html_escape(&entry.name),
            entry.count,
            format_rupees(entry.total_amount)
        ));
    }
    html.push_str("        </table>\n    </div>\n");

    // Recent expenses
    html.push_str("    <div class=\"section\">\n        <div class=\"section-title\">Recent Expenses</div>\n        <table>\n");
    html.push_str(EXPENSE_TABLE_HEADER);
    for expense in &aggregates.recent {
        html.push_str(&expense_row(expense, funders));
    }
    html.push_str("        </table>\n    </div>\n");

    html.push_str("    <div class=\"footer\">\n        <p>This report was generated by BudgetFlow</p>\n    </div>\n</body>\n</html>\n");

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::expense;
    use crate::test_utils::{make_category, make_expense, make_funder, ts};

    fn sample_generated_at() -> DateTime<Utc> {
        ts("2024-06-15T10:30:00Z")
    }

    #[test]
    fn test_format_rupees_groups_thousands() {
        assert_eq!(format_rupees(0.0), "Rs. 0");
        assert_eq!(format_rupees(100.0), "Rs. 100");
        assert_eq!(format_rupees(1_500.0), "Rs. 1,500");
        assert_eq!(format_rupees(1_234_567.0), "Rs. 1,234,567");
    }

    #[test]
    fn test_format_rupees_keeps_fractional_part() {
        assert_eq!(format_rupees(1_234.5), "Rs. 1,234.50");
        assert_eq!(format_rupees(99.99), "Rs. 99.99");
    }

    #[test]
    fn test_format_rupees_rounds_carry_into_whole() {
        assert_eq!(format_rupees(999.999), "Rs. 1,000");
    }

    #[test]
    fn test_format_rupees_handles_bad_values() {
        assert_eq!(format_rupees(f64::NAN), "Rs. 0");
        assert_eq!(format_rupees(f64::INFINITY), "Rs. 0");
        assert_eq!(format_rupees(-25.0), "Rs. -25");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape("<b>Tom & \"Jerry\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"
        );
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_report_contains_fixed_sections_in_order() {
        let categories = vec![make_category("c1", "Food")];
        let funders = vec![make_funder("f1", "Aunty")];
        let expenses = vec![expense::Model {
            category_id: "c1".to_string(),
            funder_id: Some("f1".to_string()),
            created_at: Some(ts("2024-06-01T00:00:00Z")),
            ..make_expense("e1", 1_500.0, "Received")
        }];
        let aggregates = Aggregates::derive(&categories, &funders, &expenses);

        let html = render_report(&funders, &expenses, &aggregates, sample_generated_at());

        let sections = [
            "Budget Summary",
            "Expense Status",
            "Expenses by Category",
            "Expenses by Funder",
            "Recent Expenses",
        ];
        let mut last = 0;
        for section in sections {
            let position = html.find(section).unwrap_or_else(|| {
                panic!("missing section {section}");
            });
            assert!(position > last, "section {section} out of order");
            last = position;
        }

        assert!(html.contains("Generated on: 2024-06-15 10:30:00 UTC"));
        assert!(html.contains("Rs. 1,500"));
        assert!(html.contains("Aunty"));
    }

    #[test]
    fn test_status_rows_in_lifecycle_order() {
        let aggregates = Aggregates::derive(&[], &[], &[]);
        let html = render_report(&[], &[], &aggregates, sample_generated_at());

        let status_section = &html[html.find("Expense Status").unwrap_or(0)..];
        let outstanding = status_section.find("Outstanding").unwrap_or(usize::MAX);
        let pending = status_section.find("Pending").unwrap_or(usize::MAX);
        let received = status_section.find("Received").unwrap_or(usize::MAX);
        let spent = status_section.find("Spent").unwrap_or(usize::MAX);
        assert!(outstanding < pending && pending < received && received < spent);
    }

    #[test]
    fn test_unassigned_and_dangling_funders_render_not_assigned() {
        let categories = vec![make_category("c1", "Food")];
        let funders = vec![make_funder("f1", "Aunty")];
        let expenses = vec![
            expense::Model {
                category_id: "c1".to_string(),
                ..make_expense("e1", 10.0, "Pending")
            },
            expense::Model {
                category_id: "c1".to_string(),
                funder_id: Some("f-gone".to_string()),
                ..make_expense("e2", 20.0, "Pending")
            },
        ];
        let aggregates = Aggregates::derive(&categories, &funders, &expenses);

        let html = render_report(&funders, &expenses, &aggregates, sample_generated_at());
        assert_eq!(html.matches("Not Assigned").count(), 4); // both rows, category section + recent
    }

    #[test]
    fn test_orphaned_expense_left_out_of_category_sections() {
        let categories = vec![make_category("c1", "Food")];
        let expenses = vec![
            expense::Model {
                category_id: "c1".to_string(),
                ..make_expense("e1", 100.0, "Pending")
            },
            expense::Model {
                category_id: "c-deleted".to_string(),
                ..make_expense("e2", 40.0, "Pending")
            },
        ];
        let aggregates = Aggregates::derive(&categories, &[], &expenses);

        let html = render_report(&[], &expenses, &aggregates, sample_generated_at());

        // Orphan appears once (recent table) instead of twice
        assert_eq!(html.matches("Expense e2").count(), 1);
        assert_eq!(html.matches("Expense e1").count(), 2);
        // Totals still include the orphan
        assert!(html.contains("Rs. 140"));
    }

    #[test]
    fn test_category_section_lists_all_expenses_not_just_recent() {
        let categories = vec![make_category("c1", "Food")];
        let expenses: Vec<expense::Model> = (0..7)
            .map(|n| expense::Model {
                category_id: "c1".to_string(),
                created_at: Some(ts("2024-01-01T00:00:00Z")),
                ..make_expense(&format!("e{n}"), 10.0, "Pending")
            })
            .collect();
        let aggregates = Aggregates::derive(&categories, &[], &expenses);

        let html = render_report(&[], &expenses, &aggregates, sample_generated_at());

        // Category section shows all seven; the recent table only five.
        // Each title appears in the category section, and five appear again.
        let total_rows = (0..7)
            .map(|n| html.matches(&format!("Expense e{n}")).count())
            .sum::<usize>();
        assert_eq!(total_rows, 7 + 5);
        assert!(html.contains("Food (7 expenses - Total: Rs. 70)"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let categories = vec![make_category("c1", "<Food & Drink>")];
        let expenses = vec![expense::Model {
            category_id: "c1".to_string(),
            title: "<script>alert(1)</script>".to_string(),
            ..make_expense("e1", 10.0, "Pending")
        }];
        let aggregates = Aggregates::derive(&categories, &[], &expenses);

        let html = render_report(&[], &expenses, &aggregates, sample_generated_at());
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;Food &amp; Drink&gt;"));
    }
}
