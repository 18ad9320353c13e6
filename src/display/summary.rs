//! Run summary display
//!
//! Renders what a collation run found and did as terminal tables.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{
    double_separator, format_header, format_month_ranges, format_variance, separator, truncate,
};
use crate::services::{
    BudgetComparison, Classification, MissingStatement, RunSummary, TransferReport,
};

const WIDTH: usize = 60;
const REASON_WIDTH: usize = 50;

#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

#[derive(Tabled)]
struct MissingRow {
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Type")]
    account_type: String,
    #[tabled(rename = "Missing months")]
    months: String,
}

#[derive(Tabled)]
struct BudgetDisplayRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Planned")]
    planned: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Variance")]
    variance: String,
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Format the file classification report
pub fn format_classification(classification: &Classification) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Statement files: {} valid",
        classification.valid.len()
    ));
    if !classification.unnamed.is_empty() {
        output.push_str(&format!(", {} other CSV", classification.unnamed.len()));
    }
    output.push_str(&format!(
        ", {} invalid, {} ignored\n",
        classification.invalid.len(),
        classification.non_csv.len()
    ));

    if !classification.valid.is_empty() {
        output.push('\n');
        for file in &classification.valid {
            output.push_str(&format!("  {}\n", file.name.file_name()));
        }
    }
    for path in &classification.unnamed {
        output.push_str(&format!("  {} (generic layout)\n", file_label(path)));
    }

    if !classification.invalid.is_empty() {
        let rows = classification
            .invalid
            .iter()
            .map(|f| FileRow {
                file: file_label(&f.path),
                reason: truncate(&f.reason, REASON_WIDTH),
            })
            .collect();
        output.push_str("\nSkipped files:\n");
        output.push_str(&render::<FileRow>(rows));
        output.push('\n');
    }

    output
}

/// Format missing account/type/month combinations, one row per account and type
pub fn format_missing(missing: &[MissingStatement]) -> String {
    if missing.is_empty() {
        return "Every account has a statement for every month.\n".to_string();
    }

    let mut rows: Vec<MissingRow> = Vec::new();
    let mut months: Vec<u8> = Vec::new();
    for (idx, item) in missing.iter().enumerate() {
        months.push(item.month);
        let last_of_group = missing
            .get(idx + 1)
            .map(|next| next.account != item.account || next.account_type != item.account_type)
            .unwrap_or(true);
        if last_of_group {
            rows.push(MissingRow {
                account: item.account.clone(),
                account_type: item.account_type.clone(),
                months: format_month_ranges(&months),
            });
            months.clear();
        }
    }

    format!("Missing statements:\n{}\n", render(rows))
}

/// Format the transfer detection outcome
pub fn format_transfer_report(report: &TransferReport) -> String {
    let pairs = report.pairs.len();
    format!(
        "Transfers: {} flagged, {} {} matched, {} unmatched\n",
        report.flagged,
        pairs,
        if pairs == 1 { "pair" } else { "pairs" },
        report.unmatched.len()
    )
}

/// Format the budget comparison as a table with a total line
pub fn format_budget_comparison(budget: &BudgetComparison) -> String {
    if budget.rows.is_empty() {
        return "No budget categories configured.\n".to_string();
    }

    let mut rows: Vec<BudgetDisplayRow> = budget
        .rows
        .iter()
        .map(|r| BudgetDisplayRow {
            category: r.category.clone(),
            planned: r.planned.to_string(),
            spent: r.spent.to_string(),
            variance: format_variance(r.variance),
        })
        .collect();
    rows.push(BudgetDisplayRow {
        category: "Total".to_string(),
        planned: budget.total_planned().to_string(),
        spent: budget.total_spent().to_string(),
        variance: format_variance(budget.total_variance()),
    });

    format!("Budget comparison:\n{}\n", render(rows))
}

/// Format the full run summary
pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut output = String::new();
    output.push_str(&format_header("Statement Collation", WIDTH));
    output.push('\n');
    output.push_str(&double_separator(WIDTH));
    output.push('\n');
    output.push_str(&format_classification(&summary.classification));

    if !summary.missing.is_empty() {
        output.push('\n');
        output.push_str(&format_missing(&summary.missing));
    }

    output.push_str(&separator(WIDTH));
    output.push('\n');

    match summary.output_path() {
        Err(e) => output.push_str(&format!("{}.\n", e)),
        Ok(path) => {
            output.push_str(&format!("Combined {} transactions\n", summary.rows));
            if let Some(report) = &summary.transfers {
                output.push_str(&format_transfer_report(report));
            }
            if let Some(budget) = &summary.budget {
                output.push('\n');
                output.push_str(&format_budget_comparison(budget));
            }
            output.push_str(&format!("\nWrote {}\n", path.display()));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLine, BudgetTable, Money};
    use crate::services::{BudgetService, RejectedFile};
    use std::path::PathBuf;

    fn missing(account: &str, month: u8) -> MissingStatement {
        MissingStatement {
            account: account.into(),
            account_type: "cheq".into(),
            month,
        }
    }

    #[test]
    fn test_classification_lists_invalid_reasons() {
        let classification = Classification {
            invalid: vec![RejectedFile {
                path: PathBuf::from("/tmp/2024_13_td_cheq.csv"),
                reason: "invalid month '13'".into(),
            }],
            non_csv: vec![PathBuf::from("notes.txt")],
            ..Classification::default()
        };

        let output = format_classification(&classification);
        assert!(output.contains("0 valid"));
        assert!(output.contains("1 invalid, 1 ignored"));
        assert!(output.contains("2024_13_td_cheq.csv"));
        assert!(output.contains("invalid month '13'"));
    }

    #[test]
    fn test_missing_grouped_by_account() {
        let output = format_missing(&[
            missing("td", 2),
            missing("td", 3),
            missing("td", 4),
            missing("wea", 11),
        ]);
        assert!(output.contains("02-04"));
        assert!(output.contains("wea"));
        assert!(output.contains("11"));
    }

    #[test]
    fn test_budget_table_has_total() {
        let table = BudgetTable::new(vec![BudgetLine::new("Dining", Money::from_cents(10000))]);
        let comparison = BudgetService::new(&table).compare(&[]);

        let output = format_budget_comparison(&comparison);
        assert!(output.contains("Dining"));
        assert!(output.contains("Total"));
        assert!(output.contains("$100.00 under"));
    }

    #[test]
    fn test_transfer_report_pluralizes_pairs() {
        let one = TransferReport {
            flagged: 3,
            pairs: vec![(0, 1)],
            unmatched: vec![2],
        };
        assert_eq!(
            format_transfer_report(&one),
            "Transfers: 3 flagged, 1 pair matched, 1 unmatched\n"
        );

        let two = TransferReport {
            flagged: 4,
            pairs: vec![(0, 1), (2, 3)],
            unmatched: Vec::new(),
        };
        assert!(format_transfer_report(&two).contains("2 pairs matched"));
    }

    #[test]
    fn test_summary_without_data() {
        let output = format_run_summary(&RunSummary::default());
        assert!(output.contains("No data found to combine."));
        assert!(!output.contains("Wrote"));
    }
}
