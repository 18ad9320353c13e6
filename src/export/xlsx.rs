//! XLSX export
//!
//! The Transactions sheet gets a header row and one row per transaction.
//! Parsed dates become date cells and amounts become numbers with a
//! two-decimal format, so the sheet sorts and sums correctly in a
//! spreadsheet application.

use std::path::Path;

use chrono::Datelike;
use rust_xlsxwriter::{
    ExcelDateTime, Format, Table, TableColumn, TableStyle, Workbook, Worksheet,
};

use super::{ensure_parent, yes_no, WriteOptions};
use crate::error::CollateResult;
use crate::models::{Money, Transaction, TxnDate};
use crate::services::BudgetComparison;

pub const TRANSACTIONS_SHEET: &str = "Transactions";
pub const BUDGET_SHEET: &str = "Budget";

const BUDGET_HEADERS: [&str; 4] = ["Category", "Planned", "Spent", "Variance"];

struct Formats {
    header: Format,
    date: Format,
    money: Format,
    total_label: Format,
    total_money: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            date: Format::new().set_num_format("yyyy-mm-dd"),
            money: Format::new().set_num_format("0.00"),
            total_label: Format::new().set_bold(),
            total_money: Format::new().set_bold().set_num_format("0.00"),
        }
    }
}

/// Write the workbook, replacing any existing file
pub fn write_workbook(
    path: &Path,
    transactions: &[Transaction],
    budget: Option<&BudgetComparison>,
    options: &WriteOptions,
) -> CollateResult<()> {
    ensure_parent(path)?;

    let formats = Formats::new();
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(TRANSACTIONS_SHEET)?;
    write_transactions(sheet, transactions, options, &formats)?;

    if let Some(budget) = budget {
        let sheet = workbook.add_worksheet();
        sheet.set_name(BUDGET_SHEET)?;
        write_budget(sheet, budget, &formats)?;
    }

    workbook.save(path)?;

    tracing::info!(
        file = %path.display(),
        rows = transactions.len(),
        budget = budget.is_some(),
        "wrote workbook"
    );
    Ok(())
}

fn write_transactions(
    sheet: &mut Worksheet,
    transactions: &[Transaction],
    options: &WriteOptions,
    formats: &Formats,
) -> CollateResult<()> {
    let headers = options.headers();

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &formats.header)?;
    }

    for (idx, txn) in transactions.iter().enumerate() {
        let row = idx as u32 + 1;

        write_date(sheet, row, &txn.date, &formats.date)?;
        sheet.write_string(row, 1, &txn.kind)?;
        sheet.write_string(row, 2, &txn.description)?;
        write_money(sheet, row, 3, txn.amount, &formats.money)?;
        if let Some(balance) = txn.balance {
            write_money(sheet, row, 4, balance, &formats.money)?;
        }
        if let Some(category) = &txn.category {
            sheet.write_string(row, 5, category)?;
        }
        if let Some(source) = &txn.source {
            sheet.write_number(row, 6, source.year)?;
            sheet.write_number(row, 7, source.month)?;
            sheet.write_string(row, 8, &source.account)?;
            sheet.write_string(row, 9, &source.account_type)?;
        }
        if options.include_transfers {
            sheet.write_string(row, 10, yes_no(txn.is_transfer))?;
            if let Some(pair) = txn.transfer_pair {
                sheet.write_number(row, 11, pair as f64)?;
            }
        }
    }

    // A table needs at least one data row
    if options.formatted_table && !transactions.is_empty() {
        let columns: Vec<TableColumn> = headers
            .iter()
            .map(|h| TableColumn::new().set_header(*h))
            .collect();
        let table = Table::new()
            .set_columns(&columns)
            .set_style(TableStyle::Medium9);
        sheet.add_table(
            0,
            0,
            transactions.len() as u32,
            headers.len() as u16 - 1,
            &table,
        )?;
    }

    sheet.autofit();
    Ok(())
}

fn write_budget(
    sheet: &mut Worksheet,
    budget: &BudgetComparison,
    formats: &Formats,
) -> CollateResult<()> {
    for (col, header) in BUDGET_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &formats.header)?;
    }

    for (idx, line) in budget.rows.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &line.category)?;
        write_money(sheet, row, 1, line.planned, &formats.money)?;
        write_money(sheet, row, 2, line.spent, &formats.money)?;
        write_money(sheet, row, 3, line.variance, &formats.money)?;
    }

    let total_row = budget.rows.len() as u32 + 1;
    sheet.write_string_with_format(total_row, 0, "Total", &formats.total_label)?;
    write_money(sheet, total_row, 1, budget.total_planned(), &formats.total_money)?;
    write_money(sheet, total_row, 2, budget.total_spent(), &formats.total_money)?;
    write_money(sheet, total_row, 3, budget.total_variance(), &formats.total_money)?;

    sheet.autofit();
    Ok(())
}

/// Date cell when Excel can represent the date, text otherwise
fn write_date(
    sheet: &mut Worksheet,
    row: u32,
    date: &TxnDate,
    format: &Format,
) -> CollateResult<()> {
    let parsed = date.as_date().and_then(|d| {
        let year = u16::try_from(d.year()).ok()?;
        ExcelDateTime::from_ymd(year, d.month() as u8, d.day() as u8).ok()
    });
    match parsed {
        Some(cell) => sheet.write_datetime_with_format(row, 0, &cell, format)?,
        None => sheet.write_string(row, 0, date.to_string())?,
    };
    Ok(())
}

fn write_money(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    amount: Money,
    format: &Format,
) -> CollateResult<()> {
    sheet.write_number_with_format(row, col, amount.to_f64(), format)?;
    Ok(())
}
