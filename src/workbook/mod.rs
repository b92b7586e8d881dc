// Workbook loading: turns spreadsheet files into string tables the rest of
// the pipeline can consume without caring about the on-disk format.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use calamine::{DataType, Reader, open_workbook_auto};
use log::{debug, info};

use crate::errors::ToolscoutError;

/// A single named table of trimmed string cells.
///
/// Both worksheet and delimited sources are reduced to this shape: a header
/// row plus data rows, padded so every row has one cell per header.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of the first column with the given header, if any.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Index of the last column with the given header.
    ///
    /// When normalization maps several source headers onto the same canonical
    /// name, lookups resolve to the last occurrence, so the last column wins.
    pub fn last_column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().rposition(|h| h == header)
    }

    /// Cell content at (row, column); out-of-bounds reads yield "".
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All tables loaded from one source file, in source iteration order.
#[derive(Debug, Clone)]
pub struct Workbook {
    pub source: PathBuf,
    pub tables: Vec<Table>,
}

/// Load every table from a workbook file.
///
/// Excel formats are read sheet by sheet; delimited files produce a single
/// table named after the file stem. All-empty rows are dropped and rows are
/// padded to the widest row so downstream column lookups stay in bounds.
pub fn load_workbook(path: &Path) -> Result<Workbook, ToolscoutError> {
    if !path.exists() {
        return Err(ToolscoutError::MissingWorkbook {
            path: format!("{:?}", path),
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let tables = match extension.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" => read_excel_workbook(path)?,
        "csv" | "tsv" | "txt" => vec![read_delimited_table(path)?],
        _ => {
            return Err(ToolscoutError::UnsupportedFormat {
                path: format!("{:?}", path),
            });
        }
    };

    if tables.is_empty() {
        return Err(ToolscoutError::EmptyWorkbook {
            path: format!("{:?}", path),
        });
    }

    info!("Loaded {:?}, found {} tables", path, tables.len());
    Ok(Workbook {
        source: path.to_path_buf(),
        tables,
    })
}

fn read_excel_workbook(path: &Path) -> Result<Vec<Table>, ToolscoutError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| ToolscoutError::WorkbookOpen {
        path: format!("{:?}", path),
        source: e,
    })?;

    let sheet_names = workbook.sheet_names().to_owned();
    let mut tables = Vec::new();

    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .ok_or_else(|| ToolscoutError::MissingWorksheet {
                sheet: sheet_name.clone(),
            })?
            .map_err(|e| ToolscoutError::WorksheetRead {
                sheet: sheet_name.clone(),
                source: e,
            })?;

        let mut rows_iter = range.rows();
        let mut headers: Vec<String> = match rows_iter.next() {
            Some(header_row) => header_row.iter().map(cell_to_string).collect(),
            // An empty sheet still shows up in the data check, it just never
            // qualifies as a matrix or catalogue.
            None => Vec::new(),
        };

        let mut rows = Vec::new();
        for row in rows_iter {
            let values: Vec<String> = row.iter().map(cell_to_string).collect();
            if values.iter().all(|value| value.is_empty()) {
                continue;
            }
            rows.push(values);
        }

        align_row_lengths(&mut headers, &mut rows);
        tables.push(Table {
            name: sheet_name,
            headers,
            rows,
        });
    }

    Ok(tables)
}

fn read_delimited_table(path: &Path) -> Result<Table, ToolscoutError> {
    let delimiter = detect_delimiter(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ToolscoutError::DelimitedRead {
            path: format!("{:?}", path),
            source: e,
        })?;

    let mut headers: Vec<String> = reader
        .headers()
        .map_err(|e| ToolscoutError::DelimitedRead {
            path: format!("{:?}", path),
            source: e,
        })?
        .iter()
        .map(|value| value.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ToolscoutError::DelimitedRead {
            path: format!("{:?}", path),
            source: e,
        })?;
        let values: Vec<String> = record
            .iter()
            .map(|value| value.trim().to_string())
            .collect();
        if values.iter().all(|value| value.is_empty()) {
            continue;
        }
        rows.push(values);
    }

    align_row_lengths(&mut headers, &mut rows);

    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("Sheet1")
        .to_string();

    Ok(Table {
        name,
        headers,
        rows,
    })
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        _ => cell.to_string().trim().to_string(),
    }
}

/// Pad headers and rows to the widest row so column indexes stay valid.
fn align_row_lengths(headers: &mut Vec<String>, rows: &mut Vec<Vec<String>>) {
    let mut column_count = headers.len();
    for row in rows.iter() {
        if row.len() > column_count {
            column_count = row.len();
        }
    }

    if headers.len() < column_count {
        headers.resize(column_count, String::new());
    }

    for row in rows.iter_mut() {
        if row.len() < column_count {
            row.resize(column_count, String::new());
        } else if row.len() > column_count {
            row.truncate(column_count);
        }
    }
}

/// Sniff the delimiter from the first non-empty lines of the file.
fn detect_delimiter(path: &Path) -> Result<u8, ToolscoutError> {
    let file = File::open(path).map_err(|e| ToolscoutError::DelimiterDetect {
        path: format!("{:?}", path),
        source: e,
    })?;
    let mut reader = BufReader::new(file);
    let mut buffer = String::new();

    for _ in 0..5 {
        buffer.clear();
        let bytes_read =
            reader
                .read_line(&mut buffer)
                .map_err(|e| ToolscoutError::DelimiterDetect {
                    path: format!("{:?}", path),
                    source: e,
                })?;
        if bytes_read == 0 {
            break;
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let counts = [
            (b'\t', buffer.matches('\t').count()),
            (b',', buffer.matches(',').count()),
            (b';', buffer.matches(';').count()),
        ];

        if let Some((delimiter, count)) = counts.iter().max_by_key(|(_, count)| *count) {
            if *count > 0 {
                return Ok(*delimiter);
            }
        }
    }

    Ok(b',')
}

/// Memoized workbook loads, keyed by source path.
///
/// Each interaction cycle re-runs the selection pipeline, so the parse is
/// cached and only invalidated when a different file is supplied (or a reload
/// is forced from the UI).
pub struct WorkbookCache {
    cached: Option<Workbook>,
}

impl WorkbookCache {
    pub fn new() -> Self {
        Self { cached: None }
    }

    /// Load the workbook at `path`, reusing the cached parse when the path
    /// matches the previous load.
    pub fn load(&mut self, path: &Path) -> Result<&Workbook, ToolscoutError> {
        let reusable = self.cached.as_ref().is_some_and(|wb| wb.source == path);
        if reusable {
            debug!("Workbook cache hit for {:?}", path);
        } else {
            self.cached = Some(load_workbook(path)?);
        }
        Ok(self.cached.as_ref().expect("cache populated above"))
    }

    /// Drop any cached parse and load `path` from disk.
    pub fn reload(&mut self, path: &Path) -> Result<&Workbook, ToolscoutError> {
        self.invalidate();
        self.load(path)
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

impl Default for WorkbookCache {
    fn default() -> Self {
        Self::new()
    }
}
