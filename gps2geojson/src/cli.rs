//! Options de la ligne de commande et commande de conversion

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use gpslog::BootTime;

use crate::config::{parse_delimiter, Config};
use crate::export::geojson::export_to_geojson;
use crate::report::ConversionReport;

/// Options de conversion (prioritaires sur le fichier de config et l'environnement)
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// GPS log to convert [default: GPS.csv]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// GeoJSON file to write, replaced if it exists [default: GPS.geojson]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// System boot time, origin of the log timestamps (e.g. 2023-04-22T13:56:00)
    #[arg(short, long)]
    pub boot_time: Option<BootTime>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Column delimiter (single ASCII character, "tab" for tabulation) [default: ;]
    #[arg(short, long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Round coordinates to this number of decimals (6 matches the legacy output)
    #[arg(long)]
    pub precision: Option<u8>,

    /// Append a LineString feature covering the whole track
    #[arg(long)]
    pub track_line: bool,

    /// Skip malformed rows instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Save a JSON conversion report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl ConvertArgs {
    /// Résout la configuration finale: défauts, fichier, environnement, CLI
    pub fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        config.apply_env()?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Applique les options explicitement passées
    pub fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(boot_time) = self.boot_time {
            config.boot_time = boot_time;
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(precision) = self.precision {
            config.precision = Some(precision);
        }
        if self.track_line {
            config.track_line = true;
        }
        if self.skip_invalid {
            config.skip_invalid = true;
        }
        if let Some(report) = &self.report {
            config.report = Some(report.clone());
        }
    }
}

/// Exécute la conversion journal GPS -> GeoJSON.
///
/// Le journal est lu et converti entièrement avant l'ouverture de la
/// destination: une ligne invalide (hors mode tolérant) n'écrit rien.
pub fn cmd_convert(config: &Config) -> Result<ConversionReport> {
    let start = Instant::now();
    let options = config.parse_options()?;

    info!(
        input = %config.input.display(),
        boot_time = %options.boot_time,
        skip_invalid = options.skip_invalid,
        "Reading GPS log"
    );

    let result = gpslog::parse(&config.input, &options)
        .with_context(|| format!("Failed to convert GPS log: {}", config.input.display()))?;

    info!(
        rows = result.rows_read,
        points = result.points.len(),
        skipped = result.rows_skipped(),
        "GPS log parsed"
    );

    export_to_geojson(&result.points, &config.export_options(), &config.output)?;

    info!(output = %config.output.display(), "GeoJSON written");

    let mut report = ConversionReport::new(&config.input, &config.output);
    report.record(&result);
    report.set_elapsed(start.elapsed());
    report.finalize();

    if let Some(path) = &config.report {
        report
            .save_to_file(path)
            .with_context(|| format!("Failed to save report: {}", path.display()))?;
        info!(path = %path.display(), "Report saved");
    }

    Ok(report)
}
