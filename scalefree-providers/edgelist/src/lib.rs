//! Delimited edge-list provider feeding interaction records to the
//! real-network adapter.
//!
//! Each non-blank line is split on a delimiter and two configured columns are
//! read as interactor identifiers; an optional third column names the
//! organism group. Rows that cannot supply those columns become
//! [`MalformedRecord`]s so the adapter can count them, and so do lines that
//! are not valid UTF-8.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use scalefree_core::{MalformedReason, MalformedRecord};
use thiserror::Error;

/// A decoded `(left, right)` interaction or the reason it was rejected.
pub type EdgeRecord = Result<(String, String), MalformedRecord>;
/// A decoded `(group, left, right)` interaction or the reason it was
/// rejected.
pub type GroupedEdgeRecord = Result<(String, String, String), MalformedRecord>;

/// Errors raised while reading or writing edge lists.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EdgeListError {
    /// The underlying reader or writer failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// The format configuration cannot be applied.
    #[error("invalid edge-list format: {reason}")]
    InvalidFormat {
        /// Description of the inconsistency.
        reason: String,
    },
}

/// Column layout of a delimited interaction file.
///
/// # Examples
/// ```
/// use scalefree_providers_edgelist::EdgeListFormat;
///
/// let format = EdgeListFormat::default().with_delimiter(',').with_columns(1, 2);
/// assert_eq!(format.delimiter(), ',');
/// assert_eq!(format.columns(), (1, 2));
/// assert_eq!(format.required_columns(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeListFormat {
    delimiter: char,
    columns: (usize, usize),
    group_column: Option<usize>,
    skip_header: bool,
    comment_prefix: Option<char>,
}

impl Default for EdgeListFormat {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            columns: (0, 1),
            group_column: None,
            skip_header: false,
            comment_prefix: Some('#'),
        }
    }
}

impl EdgeListFormat {
    /// Layout of the BioGRID tab-separated release files: interactors in
    /// columns 7 and 8, taxon id in column 5, and a header row.
    #[must_use]
    pub fn biogrid() -> Self {
        Self::default()
            .with_columns(7, 8)
            .with_group_column(Some(5))
            .with_skip_header(true)
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the zero-based endpoint columns.
    #[must_use]
    pub fn with_columns(mut self, left: usize, right: usize) -> Self {
        self.columns = (left, right);
        self
    }

    /// Sets the zero-based group column, if any.
    #[must_use]
    pub fn with_group_column(mut self, column: Option<usize>) -> Self {
        self.group_column = column;
        self
    }

    /// Treats the first line as a header.
    #[must_use]
    pub fn with_skip_header(mut self, skip: bool) -> Self {
        self.skip_header = skip;
        self
    }

    /// Sets the prefix marking comment lines; `None` disables comments.
    #[must_use]
    pub fn with_comment_prefix(mut self, prefix: Option<char>) -> Self {
        self.comment_prefix = prefix;
        self
    }

    /// Returns the field delimiter.
    #[must_use]
    #[rustfmt::skip]
    pub fn delimiter(&self) -> char { self.delimiter }

    /// Returns the endpoint columns.
    #[must_use]
    #[rustfmt::skip]
    pub fn columns(&self) -> (usize, usize) { self.columns }

    /// Returns the group column.
    #[must_use]
    #[rustfmt::skip]
    pub fn group_column(&self) -> Option<usize> { self.group_column }

    /// Returns whether the first line is skipped.
    #[must_use]
    #[rustfmt::skip]
    pub fn skip_header(&self) -> bool { self.skip_header }

    /// Returns the number of columns a row must have.
    #[must_use]
    pub fn required_columns(&self) -> usize {
        let (left, right) = self.columns;
        left.max(right).max(self.group_column.unwrap_or(0)) + 1
    }

    fn validate(&self) -> Result<(), EdgeListError> {
        let (left, right) = self.columns;
        if left == right {
            return Err(EdgeListError::InvalidFormat {
                reason: format!("endpoint columns must differ, both are {left}"),
            });
        }
        if self.group_column.is_some_and(|group| group == left || group == right) {
            return Err(EdgeListError::InvalidFormat {
                reason: "group column must differ from the endpoint columns".to_owned(),
            });
        }
        Ok(())
    }
}

/// Reads interaction records from any buffered reader.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use scalefree_providers_edgelist::{EdgeListFormat, EdgeListReader};
///
/// let input = "a\tb\nb\n# note\nb\tc\n";
/// let records = EdgeListReader::new(EdgeListFormat::default())?
///     .read_records(Cursor::new(input))?;
/// assert_eq!(records.len(), 3);
/// assert!(records[1].is_err());
/// # Ok::<(), scalefree_providers_edgelist::EdgeListError>(())
/// ```
#[derive(Clone, Debug)]
pub struct EdgeListReader {
    format: EdgeListFormat,
}

impl EdgeListReader {
    /// Creates a reader for `format`.
    ///
    /// # Errors
    /// Returns [`EdgeListError::InvalidFormat`] when the endpoint columns
    /// coincide or the group column repeats an endpoint column.
    pub fn new(format: EdgeListFormat) -> Result<Self, EdgeListError> {
        format.validate()?;
        Ok(Self { format })
    }

    /// Returns the configured format.
    #[must_use]
    #[rustfmt::skip]
    pub fn format(&self) -> &EdgeListFormat { &self.format }

    /// Decodes every data line into an endpoint pair, ignoring any group
    /// column.
    ///
    /// # Errors
    /// Returns [`EdgeListError::Io`] when reading fails.
    pub fn read_records<R: BufRead>(&self, reader: R) -> Result<Vec<EdgeRecord>, EdgeListError> {
        self.decode(reader, |line, fields| {
            let (left, right) = self.endpoints(line, fields)?;
            Ok((left.to_owned(), right.to_owned()))
        })
    }

    /// Decodes every data line into a `(group, left, right)` triple.
    ///
    /// # Errors
    /// Returns [`EdgeListError::InvalidFormat`] when no group column is
    /// configured and [`EdgeListError::Io`] when reading fails.
    pub fn read_grouped_records<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<Vec<GroupedEdgeRecord>, EdgeListError> {
        let group_column = self.format.group_column.ok_or_else(|| EdgeListError::InvalidFormat {
            reason: "grouped reading needs a group column".to_owned(),
        })?;
        self.decode(reader, |line, fields| {
            let (left, right) = self.endpoints(line, fields)?;
            let group = field(fields, group_column)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| MalformedRecord::new(Some(line), MalformedReason::MissingGroup))?;
            Ok((group.to_owned(), left.to_owned(), right.to_owned()))
        })
    }

    fn decode<R, T, F>(&self, mut reader: R, mut parse: F) -> Result<Vec<Result<T, MalformedRecord>>, EdgeListError>
    where
        R: BufRead,
        F: FnMut(usize, &[&str]) -> Result<T, MalformedRecord>,
    {
        let mut records = Vec::new();
        let mut buffer = Vec::new();
        let mut number = 0_usize;
        while reader.read_until(b'\n', &mut buffer)? > 0 {
            let bytes = std::mem::take(&mut buffer);
            number += 1;
            if number == 1 && self.format.skip_header {
                continue;
            }
            let Ok(line) = String::from_utf8(strip_line_ending(bytes)) else {
                records.push(Err(MalformedRecord::new(
                    Some(number),
                    MalformedReason::InvalidEncoding,
                )));
                continue;
            };
            if line.trim().is_empty()
                || self
                    .format
                    .comment_prefix
                    .is_some_and(|prefix| line.starts_with(prefix))
            {
                continue;
            }
            let fields: Vec<&str> = line.split(self.format.delimiter).map(str::trim).collect();
            records.push(parse(number, &fields));
        }
        Ok(records)
    }

    fn endpoints<'a>(&self, line: usize, fields: &[&'a str]) -> Result<(&'a str, &'a str), MalformedRecord> {
        let required = self.format.required_columns();
        if fields.len() < required {
            return Err(MalformedRecord::new(
                Some(line),
                MalformedReason::TooFewColumns {
                    required,
                    found: fields.len(),
                },
            ));
        }
        let (left_column, right_column) = self.format.columns;
        match (field(fields, left_column), field(fields, right_column)) {
            (Some(left), Some(right)) if !left.is_empty() && !right.is_empty() => Ok((left, right)),
            _ => Err(MalformedRecord::new(Some(line), MalformedReason::MissingEndpoint)),
        }
    }
}

fn strip_line_ending(mut bytes: Vec<u8>) -> Vec<u8> {
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
    bytes
}

fn field<'a>(fields: &[&'a str], column: usize) -> Option<&'a str> {
    fields.get(column).copied()
}

/// Writes `edges` one per line, separated by `delimiter`, and returns the
/// number of lines written.
///
/// # Errors
/// Returns [`EdgeListError::Io`] when writing fails.
///
/// # Examples
/// ```
/// use scalefree_providers_edgelist::write_edges;
///
/// let mut out = Vec::new();
/// let written = write_edges(&mut out, [(0, 1), (1, 2)], '\t')?;
/// assert_eq!(written, 2);
/// assert_eq!(String::from_utf8_lossy(&out), "0\t1\n1\t2\n");
/// # Ok::<(), scalefree_providers_edgelist::EdgeListError>(())
/// ```
pub fn write_edges<W, I, A, B>(mut writer: W, edges: I, delimiter: char) -> Result<usize, EdgeListError>
where
    W: Write,
    I: IntoIterator<Item = (A, B)>,
    A: Display,
    B: Display,
{
    let mut written = 0;
    for (left, right) in edges {
        writeln!(writer, "{left}{delimiter}{right}")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}
