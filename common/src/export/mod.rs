//! Export core modules shared across front-ends.

pub mod pdf_core;

pub use pdf_core::{build_report_lines, report_file_name, PdfExportSettings, PdfLayoutCore};
