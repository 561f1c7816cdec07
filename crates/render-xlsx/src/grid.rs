//! The quote laid out as a grid of cells, independent of any file format.

use quotedoc_types::{ComputedQuote, FormatError, NumberFormat};

/// Widths of columns A to D, in character units.
pub const COLUMN_WIDTHS: [f64; 4] = [12.0, 40.0, 20.0, 20.0];

/// Column holding the client block in the first two rows (E).
const CLIENT_COLUMN: usize = 4;

pub const TABLE_HEADER: [&str; 4] = ["Cantidad", "Descripción", "Precio Unitario", "Precio Total"];

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Rows of cells plus column widths. Row and column indices are zero-based.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetGrid {
    rows: Vec<Vec<Cell>>,
    column_widths: Vec<f64>,
}

impl SheetGrid {
    pub fn new(column_widths: &[f64]) -> Self {
        Self {
            rows: Vec::new(),
            column_widths: column_widths.to_vec(),
        }
    }

    /// Appends a row; trailing empty cells are dropped.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        while cells.last().is_some_and(Cell::is_empty) {
            cells.pop();
        }
        self.rows.push(cells);
    }

    pub fn push_blank(&mut self) {
        self.rows.push(Vec::new());
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row, in cells.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(column)
    }

    pub fn column_widths(&self) -> &[f64] {
        &self.column_widths
    }
}

/// Lays out the fixed row plan of a quote sheet.
///
/// Quantities stay numeric; prices and totals go through `number_format` so they
/// read exactly as they do in the PDF.
pub fn build_sheet(quote: &ComputedQuote, number_format: &NumberFormat) -> Result<SheetGrid, FormatError> {
    let issuer = quote.issuer();
    let request = quote.request();
    let mut grid = SheetGrid::new(&COLUMN_WIDTHS);

    grid.push_row(with_client_column(Cell::text(&issuer.name), &request.client_name));
    grid.push_row(with_client_column(
        Cell::text(format!("Cuit: {}", issuer.tax_id)),
        &format!("CUIT: {}", request.client_tax_id),
    ));
    grid.push_row(vec![Cell::text(&issuer.address)]);
    grid.push_row(vec![Cell::text(&issuer.email)]);
    grid.push_blank();

    grid.push_row(vec![
        Cell::text("Fecha de emisión:"),
        Cell::text(&request.issue_date),
    ]);
    grid.push_blank();

    grid.push_row(TABLE_HEADER.iter().map(|h| Cell::text(*h)).collect());
    for item in quote.items() {
        grid.push_row(vec![
            Cell::Integer(item.quantity()),
            Cell::text(item.description()),
            Cell::Text(number_format.format(item.unit_price())?),
            Cell::Text(number_format.format(item.extended_total())?),
        ]);
    }
    grid.push_blank();

    grid.push_row(vec![
        Cell::Empty,
        Cell::Empty,
        Cell::text("TOTAL"),
        Cell::Text(number_format.format(quote.grand_total())?),
    ]);
    grid.push_blank();

    grid.push_row(vec![
        Cell::text("Condiciones de pago:"),
        Cell::text(&request.payment_terms),
    ]);

    Ok(grid)
}

fn with_client_column(first: Cell, client: &str) -> Vec<Cell> {
    let mut row = vec![Cell::Empty; CLIENT_COLUMN + 1];
    row[0] = first;
    row[CLIENT_COLUMN] = Cell::text(client);
    row
}
