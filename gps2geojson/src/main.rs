//! Point d'entrée CLI pour gps2geojson

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use gps2geojson::cli::{self, ConvertArgs};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

/// Convertir un journal GPS (timestamp;lat;lon;alt) en trace GeoJSON horodatée
#[derive(Parser)]
#[command(name = "gps2geojson")]
#[command(author, version)]
#[command(about = "Convert a GPS sample log (timestamp;lat;lon;alt) to a timestamped GeoJSON track")]
#[command(long_about = "Convert a semicolon-delimited GPS sample log to a GeoJSON FeatureCollection.\n\nEach row becomes a 3D Point (lon, lat, alt in meters) with an absolute ISO-8601 timestamp computed from the system boot time.\nDefaults: GPS.csv -> GPS.geojson in the working directory.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    convert: ConvertArgs,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    let config = cli.convert.resolve()?;
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        boot_time = %config.boot_time(),
        "Export vers GeoJSON"
    );

    let report = cli::cmd_convert(&config)?;

    info!("{}", report.summary());
    if !cli.quiet {
        report.display();
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
