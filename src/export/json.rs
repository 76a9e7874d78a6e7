use std::io::Write;

use serde::{Deserialize, Serialize};

use super::record::{ExportInfo, ExportRecord};
use crate::error::ExportError;

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDocument {
    pub export_info: ExportInfo,
    pub color_records: Vec<ExportRecord>,
}

pub fn write_json<W: Write>(
    info: ExportInfo,
    records: Vec<ExportRecord>,
    writer: &mut W,
) -> Result<(), ExportError> {
    let document = JsonDocument {
        export_info: info,
        color_records: records,
    };
    serde_json::to_writer_pretty(&mut *writer, &document)?;
    writeln!(writer)?;
    Ok(())
}
