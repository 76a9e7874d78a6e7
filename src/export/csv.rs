use std::io::Write;

use super::record::{ExportInfo, ExportRecord};
use crate::error::ExportError;

pub const CSV_HEADER: [&str; 12] = [
    "序号",
    "时间戳",
    "图像文件",
    "X坐标",
    "Y坐标",
    "R值",
    "G值",
    "B值",
    "十六进制",
    "H值(度)",
    "S值(%)",
    "V值(%)",
];

/// Metadata lines start with this byte; readers skip them as comments.
pub const CSV_COMMENT: u8 = b'#';

pub fn write_csv<W: Write>(
    info: &ExportInfo,
    records: &[ExportRecord],
    writer: &mut W,
) -> Result<(), ExportError> {
    writeln!(writer, "# 导出时间: {}", info.timestamp)?;
    writeln!(writer, "# 记录总数: {}", info.total_records)?;
    writeln!(writer, "# 格式: {}", info.format)?;

    let mut csv_writer = ::csv::Writer::from_writer(&mut *writer);
    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        csv_writer.write_record([
            record.sequence.to_string(),
            record.timestamp.clone(),
            record.image_file.clone(),
            record.position.x.to_string(),
            record.position.y.to_string(),
            record.rgb.r.to_string(),
            record.rgb.g.to_string(),
            record.rgb.b.to_string(),
            record.hex.clone(),
            record.hsv.h.to_string(),
            record.hsv.s.to_string(),
            record.hsv.v.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
