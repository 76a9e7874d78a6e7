//! Ledger serialization.
//!
//! Four independent renderers (JSON, CSV, XML, plain text) draw from the same
//! `ExportRecord` list, so every format carries identical values for a given
//! ledger snapshot. Exporting never touches the ledger itself.

mod csv;
mod json;
mod record;
mod txt;
mod xml;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use chrono::{Local, NaiveDateTime, SubsecRound};
use log::info;

use crate::error::ExportError;
use crate::models::ColorSample;

pub use self::csv::{CSV_COMMENT, CSV_HEADER};
pub use json::JsonDocument;
pub use record::{
    to_records, ExportFormat, ExportInfo, ExportRecord, HsvFields, PositionFields, RgbFields,
};
pub use txt::{escape_line as txt_escape, TXT_BANNER, TXT_SEPARATOR};
pub use xml::escape as xml_escape;

/// Renders `samples` in `format` to `writer`, stamping the header with
/// `exported_at`.
pub fn export<W: Write>(
    samples: &[ColorSample],
    format: ExportFormat,
    exported_at: NaiveDateTime,
    writer: &mut W,
) -> Result<(), ExportError> {
    let info = ExportInfo::new(format, exported_at, samples.len());
    let records = to_records(samples);

    match format {
        ExportFormat::Json => json::write_json(info, records, writer)?,
        ExportFormat::Csv => self::csv::write_csv(&info, &records, writer)?,
        ExportFormat::Xml => xml::write_xml(&info, &records, writer)?,
        ExportFormat::Txt => txt::write_txt(&info, &records, writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Renders into memory.
pub fn export_to_bytes(
    samples: &[ColorSample],
    format: ExportFormat,
    exported_at: NaiveDateTime,
) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    export(samples, format, exported_at, &mut buffer)?;
    Ok(buffer)
}

/// Writes an export file stamped with the current local time.
pub fn export_to_path(
    samples: &[ColorSample],
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    let exported_at = Local::now().naive_local().trunc_subsecs(0);
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    export(samples, format, exported_at, &mut writer)?;
    info!(
        "Exported {} records as {} to {}",
        samples.len(),
        format,
        path.display()
    );
    Ok(())
}

/// Picks the format from a file extension, falling back to `default`.
pub fn format_for_path(path: &Path, default: ExportFormat) -> ExportFormat {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ExportFormat::from_extension)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SampleLedger;
    use crate::models::{Hsv, NewSample, Rgb};
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn sample_ledger() -> SampleLedger {
        let mut ledger = SampleLedger::new();
        ledger.append_at(
            NewSample {
                source_label: "sunset.bmp".into(),
                position: (640, 512),
                rgb: Rgb::new(255, 128, 0),
                hsv: Hsv { h: 30, s: 100, v: 100 },
            },
            at(10, 0, 1),
        );
        ledger.append_at(
            NewSample {
                source_label: "a \"quoted\", <odd> & 'name'\n\tsecond line.bmp".into(),
                position: (0, 1023),
                rgb: Rgb::new(100, 150, 200),
                hsv: Hsv { h: 210, s: 50, v: 78 },
            },
            at(10, 0, 2),
        );
        ledger.append_at(
            NewSample {
                source_label: "屏幕截图".into(),
                position: (-20, 5),
                rgb: Rgb::new(7, 7, 7),
                hsv: Hsv { h: 0, s: 0, v: 2 },
            },
            at(10, 0, 2),
        );
        ledger
    }

    fn render(ledger: &SampleLedger, format: ExportFormat) -> String {
        let bytes = export_to_bytes(ledger.all(), format, at(11, 30, 0)).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    fn read_json(text: &str) -> (ExportInfo, Vec<ExportRecord>) {
        let document: JsonDocument = serde_json::from_str(text).unwrap();
        (document.export_info, document.color_records)
    }

    fn read_csv(text: &str) -> Vec<ExportRecord> {
        let mut reader = ::csv::ReaderBuilder::new()
            .comment(Some(CSV_COMMENT))
            .from_reader(text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());
        reader
            .records()
            .map(|row| {
                let row = row.unwrap();
                let num = |i: usize| row[i].to_string();
                ExportRecord {
                    sequence: num(0).parse().unwrap(),
                    timestamp: num(1),
                    image_file: num(2),
                    position: PositionFields {
                        x: num(3).parse().unwrap(),
                        y: num(4).parse().unwrap(),
                    },
                    rgb: RgbFields {
                        r: num(5).parse().unwrap(),
                        g: num(6).parse().unwrap(),
                        b: num(7).parse().unwrap(),
                    },
                    hex: num(8),
                    hsv: HsvFields {
                        h: num(9).parse().unwrap(),
                        s: num(10).parse().unwrap(),
                        v: num(11).parse().unwrap(),
                    },
                }
            })
            .collect()
    }

    fn xml_unescape(text: &str) -> String {
        text.replace("&#9;", "\t")
            .replace("&#10;", "\n")
            .replace("&#13;", "\r")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&")
    }

    fn xml_text<'a>(block: &'a str, tag: &str) -> &'a str {
        let open = format!("<{tag}>");
        let close = format!("</{tag}>");
        let start = block.find(&open).unwrap() + open.len();
        let end = start + block[start..].find(&close).unwrap();
        &block[start..end]
    }

    fn read_xml(text: &str) -> Vec<ExportRecord> {
        text.split("<ColorRecord sequence=\"")
            .skip(1)
            .map(|block| {
                let sequence = block[..block.find('"').unwrap()].parse().unwrap();
                let num = |tag: &str| xml_text(block, tag).to_string();
                ExportRecord {
                    sequence,
                    timestamp: num("Timestamp"),
                    image_file: xml_unescape(&num("ImageFile")),
                    position: PositionFields {
                        x: num("X").parse().unwrap(),
                        y: num("Y").parse().unwrap(),
                    },
                    rgb: RgbFields {
                        r: num("R").parse().unwrap(),
                        g: num("G").parse().unwrap(),
                        b: num("B").parse().unwrap(),
                    },
                    hex: num("Hex"),
                    hsv: HsvFields {
                        h: num("H").parse().unwrap(),
                        s: num("S").parse().unwrap(),
                        v: num("V").parse().unwrap(),
                    },
                }
            })
            .collect()
    }

    fn txt_unescape(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            }
        }
        out
    }

    fn read_txt(text: &str) -> Vec<ExportRecord> {
        text.split(TXT_SEPARATOR)
            .filter(|block| block.contains("记录 #"))
            .map(|block| {
                let line = |label: &str| -> String {
                    block
                        .lines()
                        .find_map(|l| l.strip_prefix(label))
                        .unwrap()
                        .to_string()
                };
                let numbers = |label: &str| -> Vec<i64> {
                    line(label)
                        .trim_matches(|c| c == '(' || c == ')')
                        .split(", ")
                        .map(|n| n.trim_end_matches(['°', '%']).parse().unwrap())
                        .collect()
                };
                let position = numbers("坐标: ");
                let rgb = numbers("RGB: ");
                let hsv = numbers("HSV: ");
                ExportRecord {
                    sequence: line("记录 #").parse().unwrap(),
                    timestamp: line("时间戳: "),
                    image_file: txt_unescape(&line("图像文件: ")),
                    position: PositionFields {
                        x: position[0] as i32,
                        y: position[1] as i32,
                    },
                    rgb: RgbFields {
                        r: rgb[0] as u8,
                        g: rgb[1] as u8,
                        b: rgb[2] as u8,
                    },
                    hex: line("十六进制: "),
                    hsv: HsvFields {
                        h: hsv[0] as u16,
                        s: hsv[1] as u8,
                        v: hsv[2] as u8,
                    },
                }
            })
            .collect()
    }

    #[test]
    fn json_layout_and_header() {
        let ledger = sample_ledger();
        let text = render(&ledger, ExportFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["export_info"]["format"], "JSON");
        assert_eq!(value["export_info"]["total_records"], 3);
        assert_eq!(value["export_info"]["timestamp"], "2024-03-09 11:30:00");

        let first = &value["color_records"][0];
        assert_eq!(first["sequence"], 1);
        assert_eq!(first["image_file"], "sunset.bmp");
        assert_eq!(first["position"]["x"], 640);
        assert_eq!(first["rgb"]["g"], 128);
        assert_eq!(first["hsv"]["h"], 30);
        assert_eq!(first["hex"], "#FF8000");
        // labels stay readable rather than \u-escaped
        assert!(text.contains("屏幕截图"));
    }

    #[test]
    fn every_format_carries_identical_values() {
        let ledger = sample_ledger();
        let expected = to_records(ledger.all());

        let (info, json_records) = read_json(&render(&ledger, ExportFormat::Json));
        assert_eq!(info.total_records, 3);
        assert_eq!(json_records, expected);
        assert_eq!(read_csv(&render(&ledger, ExportFormat::Csv)), expected);
        assert_eq!(read_xml(&render(&ledger, ExportFormat::Xml)), expected);
        assert_eq!(read_txt(&render(&ledger, ExportFormat::Txt)), expected);
    }

    #[test]
    fn csv_quotes_awkward_labels() {
        let text = render(&sample_ledger(), ExportFormat::Csv);
        assert!(text.starts_with("# 导出时间: 2024-03-09 11:30:00\n"));
        assert!(text.contains("# 记录总数: 3\n"));
        assert!(text.contains("# 格式: CSV\n"));
        assert!(text.contains(&CSV_HEADER.join(",")));
        assert!(text.contains("\"a \"\"quoted\"\", <odd> & 'name'\n\tsecond line.bmp\""));
    }

    #[test]
    fn xml_nests_fields_and_escapes() {
        let text = render(&sample_ledger(), ExportFormat::Xml);
        assert!(text.contains("<Format>XML</Format>"));
        assert!(text.contains("<TotalRecords>3</TotalRecords>"));
        assert!(text.contains(r#"<ColorRecord sequence="2">"#));
        assert!(text.contains("&lt;odd&gt; &amp; &apos;name&apos;"));
        assert!(!text.contains("<odd>"));
        assert!(text.contains("<Hex>#6496C8</Hex>"));
    }

    #[test]
    fn control_characters_stay_inside_one_field() {
        let text = render(&sample_ledger(), ExportFormat::Txt);
        assert!(text.contains("图像文件: a \"quoted\", <odd> & 'name'\\n\\tsecond line.bmp\n"));

        let text = render(&sample_ledger(), ExportFormat::Xml);
        assert!(text.contains("&apos;name&apos;&#10;&#9;second line.bmp</ImageFile>"));

        assert_eq!(xml_escape("bell\u{7}\u{0}"), "bell\u{fffd}\u{fffd}");
        assert_eq!(txt_escape("esc\u{1b} C:\\dir"), "esc\\u{1b} C:\\\\dir");
        assert_eq!(txt_unescape(&txt_escape("a\\n\nb")), "a\\n\nb");
    }

    #[test]
    fn txt_blocks_end_with_separator() {
        let text = render(&sample_ledger(), ExportFormat::Txt);
        assert!(text.starts_with(TXT_BANNER));
        assert!(text.contains("格式: TXT"));
        assert_eq!(text.matches(TXT_SEPARATOR).count(), 3);
        assert!(text.trim_end().ends_with(TXT_SEPARATOR));
    }

    #[test]
    fn empty_ledger_exports_headers_only() {
        let ledger = SampleLedger::new();
        let (info, records) = read_json(&render(&ledger, ExportFormat::Json));
        assert_eq!(info.total_records, 0);
        assert!(records.is_empty());
        assert!(read_csv(&render(&ledger, ExportFormat::Csv)).is_empty());
        assert!(read_xml(&render(&ledger, ExportFormat::Xml)).is_empty());
    }

    #[test]
    fn formats_from_names_and_paths() {
        assert_eq!("CSV".parse::<ExportFormat>().ok(), Some(ExportFormat::Csv));
        assert_eq!(".xml".parse::<ExportFormat>().ok(), Some(ExportFormat::Xml));
        assert!(matches!(
            "bmp".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat(_))
        ));
        assert_eq!(
            format_for_path(Path::new("out/records.TXT"), ExportFormat::Json),
            ExportFormat::Txt
        );
        assert_eq!(
            format_for_path(Path::new("records"), ExportFormat::Csv),
            ExportFormat::Csv
        );
    }

    #[test]
    fn export_to_path_writes_file_and_reports_io_errors() {
        let ledger = sample_ledger();
        let dir = std::env::temp_dir().join(format!("pixel-picker-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("records.json");

        export_to_path(ledger.all(), ExportFormat::Json, &path).unwrap();
        let (_, records) = read_json(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(records.len(), 3);

        let missing = dir.join("no-such-dir").join("records.json");
        let err = export_to_path(ledger.all(), ExportFormat::Json, &missing).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
        assert_eq!(ledger.count(), 3);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
