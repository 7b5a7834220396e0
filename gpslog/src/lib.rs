//! # gpslog
//!
//! Parser pour les journaux d'échantillons GPS (`timestamp;lat;lon;alt`).
//!
//! ## Format
//!
//! - Texte délimité (`;` par défaut), première ligne = en-tête
//! - Colonnes recherchées par nom, colonnes supplémentaires ignorées
//! - `timestamp`: microsecondes depuis le démarrage du système
//! - `lat`/`lon`: degrés × 1e7, `alt`: millimètres
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gpslog::{parse, ParseOptions};
//! use std::path::Path;
//!
//! let options = ParseOptions::new("2023-04-22T13:56:00".parse()?);
//! let result = parse(Path::new("GPS.csv"), &options)?;
//!
//! for point in &result.points {
//!     println!("{} {:?}", point.timestamp, point.position());
//! }
//! ```

pub mod convert;
pub mod error;
pub mod parser;
pub mod track;
pub mod types;

pub use convert::BootTime;
pub use error::GpsLogError;
pub use track::TrackSummary;
pub use types::{ParseOptions, ParseResult, Sample, TrackPoint};

use std::path::Path;

use tracing::debug;

/// Lit et convertit un journal GPS.
///
/// Le fichier est lu entièrement et refermé avant toute conversion.
///
/// # Errors
///
/// Retourne `GpsLogError` si le fichier est illisible, si l'en-tête est
/// incomplet, ou (hors mode tolérant) à la première ligne invalide.
pub fn parse(path: &Path, options: &ParseOptions) -> Result<ParseResult, GpsLogError> {
    let data = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = data.len(), "GPS log read");
    parse_bytes(&data, options)
}

/// Convertit un journal GPS déjà en mémoire
pub fn parse_bytes(data: &[u8], options: &ParseOptions) -> Result<ParseResult, GpsLogError> {
    // Validation UTF-8 SIMD
    let content = simdutf8::compat::from_utf8(data).map_err(|e| GpsLogError::InvalidUtf8 {
        line: memchr::memchr_iter(b'\n', &data[..e.valid_up_to()]).count() + 1,
    })?;

    parser::parse_content(content, options)
}
