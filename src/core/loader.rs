//! Reads the cash-flow CSV into validated [`Transaction`]s.
//!
//! Every row must be well formed; the first bad row aborts the load with an
//! error naming its line.

use super::config::AppConfig;
use super::transaction::{Transaction, TransactionType};
use anyhow::{Context, Result, anyhow, bail};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Accepted header names per column. The Portuguese names come from the
/// spreadsheets this tool was first used with.
const DATE_HEADERS: &[&str] = &["Date", "Data"];
const TYPE_HEADERS: &[&str] = &["Type", "Tipo"];
const CATEGORY_HEADERS: &[&str] = &["Category", "Categoria"];
const AMOUNT_HEADERS: &[&str] = &["Amount", "Valor"];
const DESCRIPTION_HEADERS: &[&str] = &["Description", "Descrição", "Descricao"];
const RECURRING_HEADERS: &[&str] = &["Recurring", "Recorrente"];

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Options controlling how the raw file is interpreted.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub date_format: String,
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for LoadOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            date_format: config.date_format.clone(),
            // Validated as ASCII when the config is loaded.
            delimiter: config.delimiter as u8,
        }
    }
}

/// Column positions resolved from the header row.
#[derive(Debug)]
struct ColumnIndex {
    date: usize,
    kind: usize,
    category: usize,
    amount: usize,
    description: Option<usize>,
    recurring: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };
        let require = |names: &[&str]| {
            find(names).ok_or_else(|| anyhow!("Missing required column '{}'", names[0]))
        };

        Ok(Self {
            date: require(DATE_HEADERS)?,
            kind: require(TYPE_HEADERS)?,
            category: require(CATEGORY_HEADERS)?,
            amount: require(AMOUNT_HEADERS)?,
            description: find(DESCRIPTION_HEADERS),
            recurring: find(RECURRING_HEADERS),
        })
    }
}

pub fn load_from_path<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    debug!("Loading transactions from {}", path.display());
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    load_from_reader(file, options)
        .with_context(|| format!("Failed to load transactions from {}", path.display()))
}

pub fn load_from_reader<R: Read>(mut reader: R, options: &LoadOptions) -> Result<Vec<Transaction>> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .context("Failed to read input")?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_reader(data.as_slice());

    let headers = reader.headers().context("Failed to read header row")?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;
    debug!(?columns, "Resolved input columns");

    let mut lines = LineCounter::new(&data);
    let mut transactions = Vec::new();
    for result in reader.records() {
        let record = result.context("Failed to read row")?;
        let offset = record
            .position()
            .map_or(0, |p| usize::try_from(p.byte()).unwrap_or(usize::MAX));
        let line = lines.record_start(offset);
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let transaction = parse_record(&record, &columns, options)
            .with_context(|| format!("Invalid row at line {line}"))?;
        transactions.push(transaction);
    }

    debug!("Loaded {} transactions", transactions.len());
    Ok(transactions)
}

/// Maps record offsets to 1-based physical line numbers.
///
/// A record's position is where the reader stopped after the previous one,
/// before the blank lines it skips, so those breaks are counted here.
struct LineCounter<'a> {
    data: &'a [u8],
    offset: usize,
    newlines: usize,
}

impl<'a> LineCounter<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            newlines: 0,
        }
    }

    /// Offsets must be non-decreasing.
    fn record_start(&mut self, offset: usize) -> usize {
        let offset = offset.clamp(self.offset, self.data.len());
        self.newlines += count_newlines(&self.data[self.offset..offset]);
        self.offset = offset;

        let skipped = self.data[offset..]
            .iter()
            .take_while(|&&b| b == b'\n' || b == b'\r')
            .filter(|&&b| b == b'\n')
            .count();
        self.newlines + skipped + 1
    }
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

fn parse_record(
    record: &StringRecord,
    columns: &ColumnIndex,
    options: &LoadOptions,
) -> Result<Transaction> {
    let field = |idx: usize| record.get(idx).unwrap_or("");
    let optional_field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

    let date = parse_date(field(columns.date), &options.date_format)?;
    let kind = TransactionType::from_str(field(columns.kind))?;

    let category = field(columns.category);
    if category.is_empty() {
        bail!("Category must not be empty");
    }

    let amount = parse_amount(field(columns.amount))?;
    let recurring = parse_recurring(optional_field(columns.recurring))?;

    Ok(Transaction {
        date,
        kind,
        category: category.to_string(),
        amount,
        description: optional_field(columns.description).to_string(),
        recurring,
    })
}

fn parse_date(s: &str, format: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, format) {
        return Ok(date);
    }
    // Spreadsheet exports often carry a midnight timestamp.
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .map(|dt| dt.date())
        .map_err(|_| anyhow!("Could not parse date '{s}' with format '{format}'"))
}

fn parse_amount(s: &str) -> Result<Decimal> {
    if s.is_empty() {
        bail!("Amount must not be empty");
    }
    // Whichever of ',' and '.' comes last is the decimal separator; the other
    // one groups thousands.
    let normalized = match (s.rfind(','), s.rfind('.')) {
        (Some(comma), dot) if dot.is_none_or(|d| comma > d) => {
            s.replace('.', "").replacen(',', ".", 1)
        }
        _ => s.replace(',', ""),
    };
    let amount = Decimal::from_str(&normalized).map_err(|e| anyhow!("Invalid amount '{s}': {e}"))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        bail!("Amount must not be negative, got '{s}'");
    }
    Ok(amount)
}

fn parse_recurring(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "" | "false" | "no" | "n" | "não" | "nao" | "0" => Ok(false),
        "true" | "yes" | "y" | "sim" | "s" | "1" => Ok(true),
        _ => Err(anyhow!("Invalid recurring flag '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn load(csv_data: &str) -> Result<Vec<Transaction>> {
        load_from_reader(csv_data.as_bytes(), &LoadOptions::default())
    }

    #[test]
    fn test_load_english_headers() {
        let csv_data = "\
Date,Type,Category,Amount,Description,Recurring
2024-01-05,Income,Salary,5000.00,January salary,true
2024-01-10,Expense,Rent,1500,Apartment,yes
2024-01-15,Savings,Emergency,250.50,,false
";
        let transactions = load(csv_data).unwrap();
        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[0].kind, TransactionType::Income);
        assert_eq!(transactions[0].amount, dec!(5000.00));
        assert!(transactions[0].recurring);
        assert_eq!(transactions[1].category, "Rent");
        assert_eq!(transactions[2].description, "");
        assert_eq!(transactions[2].amount, dec!(250.50));
        assert!(!transactions[2].recurring);
    }

    #[test]
    fn test_load_portuguese_headers_in_any_order() {
        let csv_data = "\
Valor,Data,Tipo,Categoria,Descrição,Recorrente
\"89,90\",2024-02-01 00:00:00,Expense,Mercado,Compras,Não
";
        let transactions = load(csv_data).unwrap();
        assert_eq!(transactions.len(), 1);
        let t = &transactions[0];
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(t.amount, dec!(89.90));
        assert_eq!(t.category, "Mercado");
        assert_eq!(t.description, "Compras");
        assert!(!t.recurring);
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let csv_data = "Date,Type,Category,Amount\n2024-03-01,Income,Bonus,10\n";
        let transactions = load(csv_data).unwrap();
        assert_eq!(transactions[0].description, "");
        assert!(!transactions[0].recurring);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv_data = "Date,Type,Category,Amount\n2024-03-01,Income,Bonus,10\n,,,\n";
        assert_eq!(load(csv_data).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_required_column() {
        let err = load("Date,Type,Amount\n2024-03-01,Income,10\n").unwrap_err();
        assert!(err.to_string().contains("Category"));
    }

    #[test]
    fn test_malformed_rows_report_line_number() {
        let csv_data = "\
Date,Type,Category,Amount
2024-03-01,Income,Bonus,10
2024-03-02,Transfer,Bank,10
";
        let err = load(csv_data).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err:#}");
        assert!(format!("{err:#}").contains("Transfer"));
    }

    #[test]
    fn test_negative_and_invalid_amounts_are_rejected() {
        assert!(load("Date,Type,Category,Amount\n2024-03-01,Expense,Food,-5\n").is_err());
        assert!(load("Date,Type,Category,Amount\n2024-03-01,Expense,Food,abc\n").is_err());
        assert!(load("Date,Type,Category,Amount\n2024-03-01,Expense,Food,\n").is_err());
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let err = load("Date,Type,Category,Amount\n01/03/2024,Expense,Food,5\n").unwrap_err();
        assert!(format!("{err:#}").contains("Could not parse date"));
    }

    #[test]
    fn test_custom_date_format_and_delimiter() {
        let options = LoadOptions {
            date_format: "%d/%m/%Y".to_string(),
            delimiter: b';',
        };
        let csv_data = "Data;Tipo;Categoria;Valor\n31/12/2023;Expense;Lazer;1234,56\n";
        let transactions = load_from_reader(csv_data.as_bytes(), &options).unwrap();
        assert_eq!(
            transactions[0].date,
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
        assert_eq!(transactions[0].amount, dec!(1234.56));
    }

    fn load_amount(raw: &str) -> Result<Decimal> {
        let csv_data = format!("Date,Type,Category,Amount\n2024-03-01,Income,Salary,\"{raw}\"\n");
        Ok(load(&csv_data)?[0].amount)
    }

    #[test]
    fn test_amount_separators() {
        assert_eq!(load_amount("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(load_amount("1.234,56").unwrap(), dec!(1234.56));
        assert_eq!(load_amount("89,90").unwrap(), dec!(89.90));
        assert_eq!(load_amount("1.234.567,89").unwrap(), dec!(1234567.89));
        assert_eq!(load_amount("12,345,678.9").unwrap(), dec!(12345678.9));
        assert_eq!(load_amount("2500").unwrap(), dec!(2500));
    }

    #[test]
    fn test_ambiguous_amounts_are_rejected() {
        assert!(load_amount("1,234,56").is_err());
        assert!(load_amount("1.234.56").is_err());
        assert!(load_amount("12,34.5,6").is_err());
    }

    #[test]
    fn test_line_counter_skips_leading_breaks() {
        let data = b"Date\r\na\r\n\r\n\r\nb\r\n";
        let mut lines = LineCounter::new(data);
        assert_eq!(lines.record_start(6), 2);
        // "b" sits on line 6 whether the offset is past the blank lines,
        // right after "a"'s terminator, or before it.
        assert_eq!(lines.record_start(9), 6);
        assert_eq!(lines.record_start(15), 6);
        assert_eq!(LineCounter::new(data).record_start(7), 6);
    }

    #[test]
    fn test_line_number_counts_blank_lines_and_quoted_newlines() {
        let csv_data = "\
Date,Type,Category,Amount,Description
2024-03-01,Income,Bonus,10,ok


2024-03-02,Transfer,Bank,10,bad
";
        let err = load(csv_data).unwrap_err();
        assert_eq!(err.to_string(), "Invalid row at line 5");

        let csv_data = "\
Date,Type,Category,Amount,Description
2024-03-01,Expense,Food,10,\"two
lines\"
2024-03-02,Expense,Food,-1,bad
";
        let err = load(csv_data).unwrap_err();
        assert_eq!(err.to_string(), "Invalid row at line 4");
    }

    #[test]
    fn test_empty_file_with_header_yields_no_rows() {
        assert!(load("Date,Type,Category,Amount\n").unwrap().is_empty());
    }
}
