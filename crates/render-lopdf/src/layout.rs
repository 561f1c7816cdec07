//! Fixed page geometry of the quote document, in points from the top-left corner.

use quotedoc_types::Color;

pub const PAGE_MARGIN: f32 = 40.0;

pub const WATERMARK_OPACITY: f32 = 0.1;

pub const LOGO_X: f32 = 250.0;
pub const LOGO_Y: f32 = 40.0;
pub const LOGO_WIDTH: f32 = 100.0;

pub const ISSUER_X: f32 = 40.0;
pub const ISSUER_NAME_Y: f32 = 40.0;
pub const ISSUER_NAME_SIZE: f32 = 16.0;
/// Tax id, address and email.
pub const ISSUER_LINES_Y: [f32; 3] = [60.0, 75.0, 90.0];
pub const ISSUER_LINE_SIZE: f32 = 10.0;

pub const CLIENT_X: f32 = 400.0;
/// Client name, client tax id and issue date.
pub const CLIENT_LINES_Y: [f32; 3] = [40.0, 55.0, 70.0];
pub const CLIENT_SIZE: f32 = 12.0;

pub const TITLE: &str = "Presupuesto por Ud. requerido";
pub const TITLE_X: f32 = 40.0;
pub const TITLE_Y: f32 = 150.0;
pub const TITLE_SIZE: f32 = 18.0;

pub const TABLE_TOP: f32 = 180.0;
pub const TABLE_X: f32 = 40.0;
pub const COLUMN_WIDTHS: [f32; 4] = [80.0, 250.0, 90.0, 90.0];
pub const COLUMN_X: [f32; 4] = [40.0, 120.0, 370.0, 460.0];
pub const TABLE_WIDTH: f32 = 510.0;
pub const ROW_HEIGHT: f32 = 25.0;
pub const CELL_INSET_X: f32 = 10.0;
pub const CELL_INSET_Y: f32 = 7.0;

pub const HEADER_LABELS: [&str; 4] = ["Cantidad", "Descripción", "Precio U.", "Precio Total"];
pub const HEADER_SIZE: f32 = 12.0;
pub const ROW_SIZE: f32 = 10.0;

pub const TOTAL_LABEL: &str = "TOTAL:";
pub const TOTAL_SIZE: f32 = 11.0;
pub const TOTAL_FILL: Color = Color::YELLOW;

pub const FOOTER_GAP: f32 = 20.0;
pub const FOOTER_LABEL: &str = "Condiciones de pago: ";
pub const FOOTER_SIZE: f32 = 11.0;
/// Leading as a multiple of the font size.
pub const LINE_SPACING: f32 = 1.156;

pub const CURRENCY_PREFIX: &str = "$";
