//! Serializes a [`SheetGrid`] into a minimal single-sheet XLSX package.

use crate::grid::{Cell, SheetGrid};
use crate::strings::{SharedStrings, column_letters, escape_xml};
use quotedoc_render_core::RenderError;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
    r#"</Types>"#,
);

const ROOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"</Relationships>"#,
);

const WORKBOOK_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
    r#"</Relationships>"#,
);

const STYLES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/><family val="2"/></font></fonts>"#,
    r#"<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>"#,
    r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
    r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    r#"<cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>"#,
    r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
    r#"</styleSheet>"#,
);

/// Package parts in write order.
pub const PART_NAMES: [&str; 7] = [
    "[Content_Types].xml",
    "_rels/.rels",
    "xl/workbook.xml",
    "xl/_rels/workbook.xml.rels",
    "xl/styles.xml",
    "xl/sharedStrings.xml",
    "xl/worksheets/sheet1.xml",
];

fn xml_error(e: std::fmt::Error) -> RenderError {
    RenderError::Spreadsheet(format!("XML write error: {}", e))
}

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets>"#,
            r#"</workbook>"#,
        ),
        escape_xml(sheet_name)
    )
}

/// Builds the worksheet XML, interning text cells into `strings`.
fn sheet_xml(grid: &SheetGrid, strings: &mut SharedStrings) -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(1024 + grid.row_count() * 128);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#);

    let columns = grid.column_count().max(1);
    write!(
        xml,
        r#"<dimension ref="A1:{}{}"/>"#,
        column_letters(columns - 1),
        grid.row_count().max(1)
    )?;

    if !grid.column_widths().is_empty() {
        xml.push_str("<cols>");
        for (i, width) in grid.column_widths().iter().enumerate() {
            write!(
                xml,
                r#"<col min="{0}" max="{0}" width="{1}" customWidth="1"/>"#,
                i + 1,
                width
            )?;
        }
        xml.push_str("</cols>");
    }

    xml.push_str("<sheetData>");
    for (r, row) in grid.rows().iter().enumerate() {
        if row.iter().all(Cell::is_empty) {
            continue;
        }
        let row_number = r + 1;
        write!(xml, r#"<row r="{}">"#, row_number)?;
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_letters(c), row_number);
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    write!(xml, r#"<c r="{}" t="s"><v>{}</v></c>"#, reference, strings.intern(s))?
                }
                Cell::Integer(n) => write!(xml, r#"<c r="{}"><v>{}</v></c>"#, reference, n)?,
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    Ok(xml)
}

/// Writes `grid` as a workbook with a single sheet named `sheet_name`.
pub fn write_workbook(grid: &SheetGrid, sheet_name: &str) -> Result<Vec<u8>, RenderError> {
    let mut strings = SharedStrings::new();
    let sheet = sheet_xml(grid, &mut strings).map_err(xml_error)?;
    let shared = strings.to_xml().map_err(xml_error)?;
    let workbook = workbook_xml(sheet_name);

    let parts: [(&str, &str); 7] = [
        (PART_NAMES[0], CONTENT_TYPES),
        (PART_NAMES[1], ROOT_RELS),
        (PART_NAMES[2], workbook.as_str()),
        (PART_NAMES[3], WORKBOOK_RELS),
        (PART_NAMES[4], STYLES),
        (PART_NAMES[5], shared.as_str()),
        (PART_NAMES[6], sheet.as_str()),
    ];

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in parts {
        writer
            .start_file(name, options)
            .map_err(|e| RenderError::Spreadsheet(format!("{}: {}", name, e)))?;
        writer.write_all(content.as_bytes())?;
    }
    let cursor = writer
        .finish()
        .map_err(|e| RenderError::Spreadsheet(e.to_string()))?;

    let bytes = cursor.into_inner();
    log::debug!(
        "wrote workbook '{}': {} row(s), {} shared string(s), {} bytes",
        sheet_name,
        grid.row_count(),
        strings.len(),
        bytes.len()
    );
    Ok(bytes)
}
