use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::display::{self, ColorReadout};
use crate::export::ExportFormat;
use crate::session::PickerSession;
use crate::settings::{PickerSettings, SettingsStore};

#[derive(Parser, Debug)]
#[command(author, version, about = "Read exact pixel colors from an image")]
pub struct Cli {
    /// Settings file (JSON); defaults apply when absent
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sample canvas positions and optionally export the records
    Pick {
        image: PathBuf,

        /// Canvas position as X,Y (repeatable)
        #[arg(short, long = "point", value_parser = parse_point, required = true)]
        points: Vec<(f64, f64)>,

        /// Zoom preset such as 150%
        #[arg(short, long, default_value = "100%")]
        zoom: String,

        /// Write the records here; format follows the extension
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Force an export format (json, csv, xml, txt)
        #[arg(long)]
        format: Option<ExportFormat>,
    },
    /// Print dimensions and color mode of an image
    Info { image: PathBuf },
}

pub fn parse_point(value: &str) -> Result<(f64, f64), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|err| format!("invalid coordinate '{part}': {err}"))
    };
    Ok((parse(x)?, parse(y)?))
}

pub fn execute(cli: Cli) -> Result<()> {
    let settings = match &cli.settings {
        Some(path) => SettingsStore::new(path.clone())?.settings(),
        None => PickerSettings::default(),
    };
    let mut session = PickerSession::new(settings);

    match cli.command {
        Command::Info { image } => {
            let summary = session.load_image(&image)?;
            println!("{}", summary.status);
            println!("mode: {}", summary.mode);
            if let Some((w, h)) = summary.display_dimensions {
                println!("display copy: {w}x{h}");
            }
            if let Some(note) = summary.resolution_note {
                println!("{note}");
            }
        }
        Command::Pick {
            image,
            points,
            zoom,
            export,
            format,
        } => {
            let summary = session.load_image(&image)?;
            println!("{}", summary.status);
            if let Some(note) = &summary.resolution_note {
                println!("{note}");
            }
            if !session.set_zoom_label(&zoom) {
                bail!("invalid zoom '{zoom}'");
            }

            for point in points {
                match session.pick(point)? {
                    Some(sample) => {
                        let readout = ColorReadout::from(sample);
                        println!(
                            "#{} {}  {}  {}",
                            sample.sequence(),
                            readout.coordinates,
                            readout.hex,
                            readout.status
                        );
                    }
                    None => println!("({}, {}) is outside the image", point.0, point.1),
                }
            }
            println!("{}", display::ledger_count_label(session.ledger().count()));

            if let Some(path) = export {
                let written = session
                    .export(&path, format)
                    .with_context(|| format!("failed to export to {}", path.display()))?;
                println!(
                    "exported {} as {written} to {}",
                    session.ledger().count(),
                    path.display()
                );
            }
        }
    }
    Ok(())
}

/// Parses the process arguments; usage errors and `--help` exit here.
pub fn parse_args() -> Cli {
    Cli::parse()
}
