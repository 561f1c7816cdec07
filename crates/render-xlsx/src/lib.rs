//! Spreadsheet backend for quote documents.
//!
//! Rendering happens in two steps that can be tested on their own:
//! [`build_sheet`] lays the quote out as a [`SheetGrid`], and [`write_workbook`]
//! serializes a grid into an XLSX package with a shared-strings table.

mod grid;
mod package;
mod renderer;
mod strings;

pub use grid::{COLUMN_WIDTHS, Cell, SheetGrid, TABLE_HEADER, build_sheet};
pub use package::{PART_NAMES, write_workbook};
pub use renderer::{DEFAULT_SHEET_NAME, XlsxQuoteRenderer};
pub use strings::{SharedStrings, column_letters, escape_xml, escape_xstring};
