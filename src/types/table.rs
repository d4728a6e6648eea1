//! Raw tabular price history as stored in the blob store.

use chrono::NaiveDate;
use std::collections::HashSet;

/// Date format used by the exchange's exported history.
pub const EUROPEAN_DATE_FORMAT: &str = "%d.%m.%Y";

/// A single cell of a raw price table.
///
/// Decoded CSV only ever produces `Null` and `Text`. `Number` and `Date`
/// appear once a table has been normalized and rendered back.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    /// Build a cell from raw CSV text. Blank text is null.
    pub fn from_text(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Cell::Null
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    /// Check if the cell carries no value.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Render the cell the way the exchange formats it.
    ///
    /// Numbers use a decimal comma without thousands grouping so that
    /// rendering and re-parsing is lossless.
    pub fn render(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(v) => v.to_string().replace('.', ","),
            Cell::Date(d) => d.format(EUROPEAN_DATE_FORMAT).to_string(),
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Null)
    }
}

/// Rows × named columns, un-normalized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Create an empty table with the given header.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(|c| c.into().trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Null);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find a column by name, ignoring surrounding whitespace and case.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.columns
            .iter()
            .position(|c| c.trim().eq_ignore_ascii_case(wanted))
    }

    /// Decode CSV text. The first record is the header.
    pub fn from_csv(text: &str) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let mut table = RawTable::new(headers.iter());

        for record in reader.records() {
            let record = record?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            table.push_row(record.iter().map(Cell::from_text).collect());
        }

        Ok(table)
    }

    /// Encode as CSV text with a header row.
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(Cell::render))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Combine freshly scraped rows with an existing blob.
    ///
    /// New rows come first. Columns are the union of both headers, in order of
    /// first appearance. Rows that render identically are kept once.
    pub fn merge(new: RawTable, existing: RawTable) -> RawTable {
        let mut columns = new.columns.clone();
        for column in &existing.columns {
            if !columns.iter().any(|c| c.eq_ignore_ascii_case(column)) {
                columns.push(column.clone());
            }
        }

        let mut merged = RawTable::new(columns);
        let mut seen: HashSet<Vec<String>> = HashSet::new();

        for source in [new, existing] {
            let mapping: Vec<Option<usize>> = merged
                .columns
                .iter()
                .map(|c| source.column_index(c))
                .collect();

            for row in source.rows {
                let aligned: Vec<Cell> = mapping
                    .iter()
                    .map(|idx| idx.and_then(|i| row.get(i).cloned()).unwrap_or(Cell::Null))
                    .collect();
                let key: Vec<String> = aligned.iter().map(Cell::render).collect();
                if seen.insert(key) {
                    merged.rows.push(aligned);
                }
            }
        }

        merged
    }
}
