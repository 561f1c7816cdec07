use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event as XmlEvent};
use std::collections::BTreeMap;
use std::error::Error;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Cell values of the first worksheet, keyed by reference ("A1", "D12").
///
/// Shared strings are resolved; numbers keep their literal text.
pub struct GeneratedSheet {
    pub cells: BTreeMap<String, String>,
}

impl GeneratedSheet {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Box<dyn Error>> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let strings = read_shared_strings(&read_part(&mut archive, "xl/sharedStrings.xml")?)?;
        let sheet = read_part(&mut archive, "xl/worksheets/sheet1.xml")?;
        Ok(Self {
            cells: read_cells(&sheet, &strings)?,
        })
    }

    pub fn cell(&self, reference: &str) -> Option<&str> {
        self.cells.get(reference).map(String::as_str)
    }

    /// Values of column `column` ("B") for rows `first..=last`, skipping empty cells.
    pub fn column(&self, column: &str, first: usize, last: usize) -> Vec<&str> {
        (first..=last)
            .filter_map(|row| self.cell(&format!("{}{}", column, row)))
            .collect()
    }
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<String, Box<dyn Error>> {
    let mut xml = String::new();
    archive.by_name(name)?.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Text of every `<si>` entry, in table order.
fn read_shared_strings(xml: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            XmlEvent::Start(e) if e.name().as_ref() == b"si" => current = Some(String::new()),
            XmlEvent::Start(e) if e.name().as_ref() == b"t" => in_text = true,
            XmlEvent::End(e) if e.name().as_ref() == b"t" => in_text = false,
            XmlEvent::End(e) if e.name().as_ref() == b"si" => {
                strings.push(current.take().unwrap_or_default());
            }
            XmlEvent::Text(e) if in_text => {
                if let Some(s) = current.as_mut() {
                    s.push_str(&quick_xml::escape::unescape(std::str::from_utf8(e.as_ref())?)?);
                }
            }
            XmlEvent::GeneralRef(e) if in_text => {
                if let Some(s) = current.as_mut() {
                    s.push_str(&resolve_reference(e.as_ref())?);
                }
            }
            XmlEvent::Eof => break,
            _ => (),
        }
        buf.clear();
    }
    Ok(strings)
}

/// Every `<c>` with a `<v>`, resolving `t="s"` cells through `strings`.
fn read_cells(xml: &str, strings: &[String]) -> Result<BTreeMap<String, String>, Box<dyn Error>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut cells = BTreeMap::new();
    // (reference, is shared string, value)
    let mut current: Option<(String, bool, String)> = None;
    let mut in_value = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            XmlEvent::Start(e) if e.name().as_ref() == b"c" => {
                let reference = attribute(&e, b"r")?.ok_or("cell without a reference")?;
                let shared = attribute(&e, b"t")?.as_deref() == Some("s");
                current = Some((reference, shared, String::new()));
            }
            XmlEvent::Start(e) if e.name().as_ref() == b"v" => in_value = true,
            XmlEvent::End(e) if e.name().as_ref() == b"v" => in_value = false,
            XmlEvent::Text(e) if in_value => {
                if let Some((_, _, value)) = current.as_mut() {
                    value.push_str(std::str::from_utf8(e.as_ref())?);
                }
            }
            XmlEvent::End(e) if e.name().as_ref() == b"c" => {
                if let Some((reference, shared, value)) = current.take() {
                    let value = if shared {
                        strings
                            .get(value.trim().parse::<usize>()?)
                            .cloned()
                            .ok_or("shared string index out of range")?
                    } else {
                        value
                    };
                    cells.insert(reference, value);
                }
            }
            XmlEvent::Eof => break,
            _ => (),
        }
        buf.clear();
    }
    Ok(cells)
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, Box<dyn Error>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(String::from_utf8(attr.value.into_owned())?));
        }
    }
    Ok(None)
}

/// Expands `&name;` or `&#N;` as reported by the reader (without `&` and `;`).
fn resolve_reference(name: &[u8]) -> Result<String, Box<dyn Error>> {
    let name = std::str::from_utf8(name)?;
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16)?,
            None => code.parse::<u32>()?,
        };
        return Ok(char::from_u32(value).ok_or("invalid character reference")?.to_string());
    }
    Ok(quick_xml::escape::resolve_predefined_entity(name)
        .ok_or("unknown entity")?
        .to_string())
}
