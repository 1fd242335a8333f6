//! Ledger CSV parser
//!
//! Expected header (any column order, extra columns ignored):
//!   Date,Description,Amount,Type
//!
//! A `Category` column, as written by uploads, is ignored: categories are
//! always re-derived from the description.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use spendwise_core::{Transaction, TxnType};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

pub const REQUIRED_COLUMNS: [&str; 4] = ["Date", "Description", "Amount", "Type"];

// Month-first before day-first, so `01/05/2024` is January 5 and `25/01/2024`
// can only be day-first
const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d %b %Y",
    "%b %d, %Y",
];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a ledger date; `None` when empty or in no known format
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn amount_regex() -> Result<Regex> {
    // Optional sign, optional currency marker, digits with thousands separators
    Ok(Regex::new(concat!(
        r"^(?P<sign>[-+])?\s*",
        r"(?:[$€£₹]|Rs\.?|INR|USD)?\s*",
        r"(?P<num>\d[\d,]*(?:\.\d+)?|\.\d+)$"
    ))?)
}

fn parse_amount(re: &Regex, raw: &str) -> Option<f64> {
    let caps = re.captures(raw.trim())?;
    let value: f64 = caps["num"].replace(',', "").parse().ok()?;
    match caps.name("sign").map(|m| m.as_str()) {
        Some("-") => Some(-value),
        _ => Some(value),
    }
}

struct ColumnMap {
    date: usize,
    description: usize,
    amount: usize,
    kind: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| IngestError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            date: find(REQUIRED_COLUMNS[0])?,
            description: find(REQUIRED_COLUMNS[1])?,
            amount: find(REQUIRED_COLUMNS[2])?,
            kind: find(REQUIRED_COLUMNS[3])?,
        })
    }
}

/// Parse a ledger CSV file into uncategorized transactions.
pub fn parse_ledger_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path.as_ref())?;
    let txns = parse_ledger_reader(file)?;
    debug!("Parsed {} ledger rows from {}", txns.len(), path.as_ref().display());
    Ok(txns)
}

/// Parse ledger CSV from any reader. Every data row must carry a numeric
/// amount and a known type; dates may be missing or malformed.
pub fn parse_ledger_reader<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(rdr.headers()?)?;
    let amount_re = amount_regex()?;

    let mut txns = Vec::new();
    let mut undated = 0usize;

    for result in rdr.records() {
        let record = result?;
        let row = record.position().map(|p| p.line()).unwrap_or(0);

        // Skip fully blank trailing rows
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let date = record.get(columns.date).unwrap_or("").trim();
        let description = record.get(columns.description).unwrap_or("").trim();
        let amount_raw = record.get(columns.amount).unwrap_or("");
        let kind_raw = record.get(columns.kind).unwrap_or("");

        let amount = parse_amount(&amount_re, amount_raw).ok_or_else(|| IngestError::Parse {
            row,
            message: format!("invalid amount '{}'", amount_raw.trim()),
        })?;
        let kind = TxnType::parse(kind_raw).ok_or_else(|| IngestError::Parse {
            row,
            message: format!("unknown type '{}' (expected Income or Expense)", kind_raw.trim()),
        })?;

        let parsed_date = parse_date(date);
        if parsed_date.is_none() {
            undated += 1;
        }

        txns.push(Transaction::new(date, parsed_date, description, amount, kind));
    }

    if undated > 0 {
        warn!("{} ledger rows have no parseable date and are left out of monthly trends", undated);
    }

    Ok(txns)
}

/// Write categorized transactions as CSV with a trailing `Category` column.
pub fn write_ledger<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Date", "Description", "Amount", "Type", "Category"])?;

    for txn in transactions {
        let amount = txn.amount.to_string();
        wtr.write_record([
            txn.date.as_str(),
            txn.description.as_str(),
            amount.as_str(),
            txn.kind.as_str(),
            txn.category.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendwise_core::Categorizer;

    const SCENARIO: &str = "\
Date,Description,Amount,Type
2024-01-05,Amazon purchase,1200,Expense
2024-01-31,Salary,50000,Income
2024-02-02,Netflix,500,Expense
";

    #[test]
    fn test_parse_basic_rows() {
        let txns = parse_ledger_reader(SCENARIO.as_bytes()).unwrap();
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].amount, 1200.0);
        assert_eq!(txns[0].kind, TxnType::Expense);
        assert_eq!(txns[1].kind, TxnType::Income);
        assert_eq!(txns[2].parsed_date, NaiveDate::from_ymd_opt(2024, 2, 2));
        assert_eq!(txns[2].date, "2024-02-02");
    }

    #[test]
    fn test_columns_in_any_order_with_extras() {
        let csv = "Type,Notes,Amount,Description,Date\nExpense,x,300,Uber,2024-03-01\n";
        let txns = parse_ledger_reader(csv.as_bytes()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "Uber");
        assert_eq!(txns[0].amount, 300.0);
    }

    #[test]
    fn test_missing_column() {
        let csv = "Date,Description,Amount\n2024-01-01,Salary,100\n";
        let err = parse_ledger_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn(ref c) if c == "Type"));
    }

    #[test]
    fn test_empty_input_is_missing_column() {
        let err = parse_ledger_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn(_)));
    }

    #[test]
    fn test_bad_amount_reports_row() {
        let csv = "Date,Description,Amount,Type\n2024-01-01,Salary,100,Income\n2024-01-02,Pizza,abc,Expense\n";
        let err = parse_ledger_reader(csv.as_bytes()).unwrap_err();
        match err {
            IngestError::Parse { row, message } => {
                assert_eq!(row, 3);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_type() {
        let csv = "Date,Description,Amount,Type\n2024-01-01,Transfer,100,Transfer\n";
        let err = parse_ledger_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::Parse { .. }));
    }

    #[test]
    fn test_invalid_date_is_kept() {
        let csv = "Date,Description,Amount,Type\nsomeday,Pizza,250,Expense\n,Burger,100,Expense\n";
        let txns = parse_ledger_reader(csv.as_bytes()).unwrap();
        assert_eq!(txns.len(), 2);
        assert!(txns.iter().all(|t| t.parsed_date.is_none()));
        assert_eq!(txns[0].date, "someday");
    }

    #[test]
    fn test_amount_formats() {
        let re = amount_regex().unwrap();
        assert_eq!(parse_amount(&re, "1,200.50"), Some(1200.5));
        assert_eq!(parse_amount(&re, " $45 "), Some(45.0));
        assert_eq!(parse_amount(&re, "₹ 3,000"), Some(3000.0));
        assert_eq!(parse_amount(&re, "-15.00"), Some(-15.0));
        assert_eq!(parse_amount(&re, ""), None);
        assert_eq!(parse_amount(&re, "12abc"), None);
    }

    #[test]
    fn test_date_formats() {
        let jan5 = NaiveDate::from_ymd_opt(2024, 1, 5);
        assert_eq!(parse_date("2024-01-05"), jan5);
        assert_eq!(parse_date("01/05/2024"), jan5);
        assert_eq!(parse_date("2024/01/05"), jan5);
        assert_eq!(parse_date("5 Jan 2024"), jan5);
        assert_eq!(parse_date("2024-01-05 10:30:00"), jan5);
        assert_eq!(parse_date("2024-13-45"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_day_first_dates() {
        let jan25 = NaiveDate::from_ymd_opt(2024, 1, 25);
        assert_eq!(parse_date("25/01/2024"), jan25);
        assert_eq!(parse_date("25-01-2024"), jan25);
        // ambiguous dates stay month-first
        assert_eq!(parse_date("03/04/2024"), NaiveDate::from_ymd_opt(2024, 3, 4));

        let csv = "Date,Description,Amount,Type\n25/01/2024,Salary,50000,Income\n28/01/2024,Netflix,500,Expense\n";
        let txns = parse_ledger_reader(csv.as_bytes()).unwrap();
        assert_eq!(txns[0].parsed_date, jan25);
        assert_eq!(txns[1].parsed_date, NaiveDate::from_ymd_opt(2024, 1, 28));
    }

    #[test]
    fn test_write_then_reparse_ignores_category_column() {
        let mut txns = parse_ledger_reader(SCENARIO.as_bytes()).unwrap();
        Categorizer::default().categorize_all(&mut txns);

        let mut buf = Vec::new();
        write_ledger(&mut buf, &txns).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("Date,Description,Amount,Type,Category"));
        assert!(text.lines().any(|l| l == "2024-01-05,Amazon purchase,1200,Expense,Shopping"));

        let reparsed = parse_ledger_reader(text.as_bytes()).unwrap();
        assert_eq!(reparsed.len(), 3);
        assert_eq!(reparsed[1].description, "Salary");
    }
}
