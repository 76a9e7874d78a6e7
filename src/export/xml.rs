use std::io::{self, Write};

use super::record::{ExportInfo, ExportRecord};

pub fn write_xml<W: Write>(
    info: &ExportInfo,
    records: &[ExportRecord],
    writer: &mut W,
) -> io::Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(writer, "<ColorRecords>")?;

    writeln!(writer, "  <ExportInfo>")?;
    element(writer, 4, "Timestamp", &info.timestamp)?;
    element(writer, 4, "TotalRecords", &info.total_records.to_string())?;
    element(writer, 4, "Format", &info.format)?;
    writeln!(writer, "  </ExportInfo>")?;

    writeln!(writer, "  <Records>")?;
    for record in records {
        writeln!(writer, r#"    <ColorRecord sequence="{}">"#, record.sequence)?;
        element(writer, 6, "Timestamp", &record.timestamp)?;
        element(writer, 6, "ImageFile", &record.image_file)?;

        writeln!(writer, "      <Position>")?;
        element(writer, 8, "X", &record.position.x.to_string())?;
        element(writer, 8, "Y", &record.position.y.to_string())?;
        writeln!(writer, "      </Position>")?;

        writeln!(writer, "      <RGB>")?;
        element(writer, 8, "R", &record.rgb.r.to_string())?;
        element(writer, 8, "G", &record.rgb.g.to_string())?;
        element(writer, 8, "B", &record.rgb.b.to_string())?;
        element(writer, 8, "Hex", &record.hex)?;
        writeln!(writer, "      </RGB>")?;

        writeln!(writer, "      <HSV>")?;
        element(writer, 8, "H", &record.hsv.h.to_string())?;
        element(writer, 8, "S", &record.hsv.s.to_string())?;
        element(writer, 8, "V", &record.hsv.v.to_string())?;
        writeln!(writer, "      </HSV>")?;

        writeln!(writer, "    </ColorRecord>")?;
    }
    writeln!(writer, "  </Records>")?;
    writeln!(writer, "</ColorRecords>")
}

fn element<W: Write>(writer: &mut W, indent: usize, name: &str, text: &str) -> io::Result<()> {
    writeln!(writer, "{:indent$}<{name}>{}</{name}>", "", escape(text))
}

/// Escapes the five XML special characters for text and attribute content.
///
/// Tab, newline and carriage return become character references so they
/// survive parsing verbatim. Other C0 controls and the noncharacters
/// U+FFFE/U+FFFF cannot appear in an XML 1.0 document at all and are
/// replaced with U+FFFD.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {
                out.push(char::REPLACEMENT_CHARACTER)
            }
            other => out.push(other),
        }
    }
    out
}
