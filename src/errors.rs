// Error types for toolscout

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum ToolscoutError {
    // Errors reading source workbooks
    #[snafu(display("Unable to open workbook {path}"))]
    WorkbookOpen {
        path: String,
        source: calamine::Error,
    },
    #[snafu(display("Unable to read worksheet {sheet}"))]
    WorksheetRead {
        sheet: String,
        source: calamine::Error,
    },
    #[snafu(display("Worksheet {sheet} could not be loaded from the workbook"))]
    MissingWorksheet { sheet: String },
    #[snafu(display("Unable to read delimited table {path}"))]
    DelimitedRead { path: String, source: csv::Error },
    #[snafu(display("Unable to inspect {path} to detect its delimiter"))]
    DelimiterDetect { path: String, source: io::Error },
    #[snafu(display("Workbook {path} contains no tables"))]
    EmptyWorkbook { path: String },
    #[snafu(display("Unsupported workbook format: {path}"))]
    UnsupportedFormat { path: String },
    #[snafu(display("Workbook file not found: {path}"))]
    MissingWorkbook { path: String },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
}
