//! Dataset loading for the sorts: plain numeric text files and CSV tables.
//!
//! Loading is a separate phase that finishes before any sort starts. Every
//! failure surfaces here as a [`DatasetError`]; key extraction on loaded data
//! cannot fail.

use crate::core::KeyExtractor;
use crate::error::DatasetError;
use std::cmp::Ordering;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A numeric dataset entry.
///
/// Tokens containing a `.` are floats, everything else is an integer.
/// Ordering is by exact numeric value across both kinds, with `-0.0` equal to
/// `0.0`. NaNs sit at the ends as [`f64::total_cmp`] places them, so the order
/// is total.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Parses one token, or returns `None` if it is not a number.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.contains('.') {
            token.parse().ok().map(Number::Float)
        } else {
            token.parse().ok().map(Number::Int)
        }
    }
}

/// Compares an integer with a float without rounding either one.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, the first float above every i64.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= BOUND {
        return Ordering::Less;
    }
    if float < -BOUND {
        return Ordering::Greater;
    }

    // In range, so the whole part converts to i64 exactly.
    let whole = float.trunc();
    int.cmp(&(whole as i64)).then_with(|| whole.total_cmp(&float))
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).reverse(),
            (Number::Float(a), Number::Float(b)) if a == b => Ordering::Equal,
            (Number::Float(a), Number::Float(b)) => a.total_cmp(&b),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{value}"),
            // Debug keeps the trailing `.0` on whole floats.
            Number::Float(value) => write!(f, "{value:?}"),
        }
    }
}

/// Parses a numeric dataset.
///
/// Blank lines are skipped. A line containing a comma is split on commas,
/// any other line on whitespace; empty tokens are ignored.
///
/// # Examples
///
/// ```
/// use sortsuite::dataset::{parse_numbers, Number};
///
/// let numbers = parse_numbers("5\n\n1, 4\n2 8.5\n").unwrap();
/// assert_eq!(
///     numbers,
///     vec![Number::Int(5), Number::Int(1), Number::Int(4), Number::Int(2), Number::Float(8.5)]
/// );
/// ```
pub fn parse_numbers(text: &str) -> Result<Vec<Number>, DatasetError> {
    let mut numbers = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let comma_separated = line.contains(',');
        let tokens = line
            .split(|c: char| if comma_separated { c == ',' } else { c.is_whitespace() })
            .map(str::trim)
            .filter(|token| !token.is_empty());

        for token in tokens {
            let number = Number::parse(token).ok_or_else(|| DatasetError::InvalidNumber {
                line: index + 1,
                token: token.to_string(),
            })?;
            numbers.push(number);
        }
    }
    Ok(numbers)
}

/// Reads and parses a numeric dataset file. See [`parse_numbers`].
pub fn load_numbers(path: impl AsRef<Path>) -> Result<Vec<Number>, DatasetError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_numbers(&text)
}

/// One CSV cell. Numbers order before text.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Value {
    Number(Number),
    Text(String),
}

impl Value {
    /// Infers the cell type: a number if the trimmed cell parses as one.
    pub fn parse(cell: &str) -> Self {
        match Number::parse(cell) {
            Some(number) => Value::Number(number),
            None => Value::Text(cell.trim().to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(number) => fmt::Display::fmt(number, f),
            Value::Text(text) => f.write_str(text),
        }
    }
}

/// One CSV record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// A CSV dataset with a header row.
#[derive(Clone, Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Reads a CSV table, keeping at most `limit` data rows.
    ///
    /// Every row must have as many fields as the header. Header names lose any
    /// byte-order mark and surrounding whitespace; cells are trimmed.
    pub fn from_reader<R: Read>(reader: R, limit: Option<usize>) -> Result<Self, DatasetError> {
        let mut input = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = input
            .headers()?
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in input.records().take(limit.unwrap_or(usize::MAX)) {
            let record = record?;
            rows.push(Row(record.iter().map(Value::parse).collect()));
        }

        Ok(Self { headers, rows })
    }

    /// Opens and reads a CSV file. See [`Table::from_reader`].
    pub fn load(path: impl AsRef<Path>, limit: Option<usize>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), limit)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a column by name, exact match first, then ignoring ASCII case.
    pub fn column(&self, name: &str) -> Result<Column, DatasetError> {
        let index = self
            .headers
            .iter()
            .position(|header| header == name)
            .or_else(|| {
                self.headers
                    .iter()
                    .position(|header| header.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| DatasetError::UnknownColumn {
                name: name.to_string(),
                available: self.headers.join(", "),
            })?;

        Ok(Column {
            index,
            name: self.headers[index].clone(),
            ignore_case: false,
        })
    }
}

/// Field-projection key extractor over [`Row`]s.
#[derive(Clone, Debug)]
pub struct Column {
    index: usize,
    name: String,
    ignore_case: bool,
}

impl Column {
    /// Compares text cells by their lowercase form.
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl KeyExtractor<Row> for Column {
    type Key = Value;

    // Rows of the owning table always have the column; a shorter foreign row
    // sorts as empty text.
    fn key(&self, row: &Row) -> Value {
        match row.get(self.index) {
            Some(Value::Text(text)) if self.ignore_case => Value::Text(text.to_lowercase()),
            Some(value) => value.clone(),
            None => Value::Text(String::new()),
        }
    }
}
