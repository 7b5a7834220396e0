//! # gps2geojson
//!
//! Conversion de journaux GPS (`timestamp;lat;lon;alt`) en trace GeoJSON horodatée.
//!
//! ## Features
//!
//! - Un Point 3D (lon, lat, alt en mètres) par échantillon, dans l'ordre du journal
//! - Dates absolues calculées depuis l'heure de démarrage du système
//! - Configuration par fichier JSON, `.env`/environnement et CLI
//! - Mode tolérant optionnel et rapport de conversion
//!
//! ## Usage CLI
//!
//! ```bash
//! # Conversion GPS.csv -> GPS.geojson (répertoire courant)
//! gps2geojson
//!
//! # Autre heure de démarrage, fichiers explicites
//! gps2geojson --input flight.csv --output flight.geojson --boot-time 2024-11-11T13:21:06
//! ```

pub mod cli;
pub mod config;
pub mod export;
pub mod report;

pub use config::Config;
pub use report::{ConversionReport, ConversionStatus};
