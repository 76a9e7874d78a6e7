use std::io::{self, Write};

use super::record::{ExportInfo, ExportRecord};

pub const TXT_BANNER: &str = "图像取色记录 - Image Color Picker Records";
pub const TXT_RULE: &str = "==================================================";
pub const TXT_SEPARATOR: &str = "--------------------------------------------------";

pub fn write_txt<W: Write>(
    info: &ExportInfo,
    records: &[ExportRecord],
    writer: &mut W,
) -> io::Result<()> {
    writeln!(writer, "{TXT_BANNER}")?;
    writeln!(writer, "{TXT_RULE}")?;
    writeln!(writer, "导出时间: {}", info.timestamp)?;
    writeln!(writer, "记录总数: {}", info.total_records)?;
    writeln!(writer, "格式: {}", info.format)?;
    writeln!(writer, "{TXT_RULE}")?;
    writeln!(writer)?;

    for record in records {
        writeln!(writer, "记录 #{}", record.sequence)?;
        writeln!(writer, "时间戳: {}", record.timestamp)?;
        writeln!(writer, "图像文件: {}", escape_line(&record.image_file))?;
        writeln!(writer, "坐标: ({}, {})", record.position.x, record.position.y)?;
        writeln!(
            writer,
            "RGB: ({}, {}, {})",
            record.rgb.r, record.rgb.g, record.rgb.b
        )?;
        writeln!(writer, "十六进制: {}", record.hex)?;
        writeln!(
            writer,
            "HSV: ({}°, {}%, {}%)",
            record.hsv.h, record.hsv.s, record.hsv.v
        )?;
        writeln!(writer, "{TXT_SEPARATOR}")?;
    }
    Ok(())
}

/// Keeps a label on one line: backslash and control characters are written
/// as Rust-style escapes (`\\`, `\n`, `\r`, `\t`, `\u{1b}`).
pub fn escape_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", u32::from(c))),
            other => out.push(other),
        }
    }
    out
}
