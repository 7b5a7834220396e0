//! Types de données pour le crate gpslog

use chrono::NaiveDateTime;

use crate::convert::BootTime;
use crate::GpsLogError;

/// Échantillon brut lu dans le journal, unités d'origine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Numéro de ligne dans le fichier (1 = en-tête)
    pub line: usize,

    /// Microsecondes écoulées depuis le démarrage du système
    pub timestamp: i64,

    /// Latitude en degrés × 1e7
    pub lat: f64,

    /// Longitude en degrés × 1e7
    pub lon: f64,

    /// Altitude en millimètres
    pub alt: f64,
}

/// Point de trace converti, prêt à être exporté
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    /// Longitude en degrés
    pub lon: f64,

    /// Latitude en degrés
    pub lat: f64,

    /// Altitude en mètres
    pub alt: f64,

    /// Date absolue (naïve, sans fuseau)
    pub time: NaiveDateTime,

    /// Date ISO-8601 suffixée par un "Z" littéral
    pub timestamp: String,
}

impl TrackPoint {
    /// Coordonnées dans l'ordre GeoJSON (lon, lat, alt)
    pub fn position(&self) -> [f64; 3] {
        [self.lon, self.lat, self.alt]
    }
}

/// Options de lecture
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Origine des timestamps relatifs
    pub boot_time: BootTime,

    /// Séparateur de colonnes
    pub delimiter: u8,

    /// Ignorer les lignes invalides au lieu d'interrompre la lecture
    pub skip_invalid: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            boot_time: BootTime::default(),
            delimiter: b';',
            skip_invalid: false,
        }
    }
}

impl ParseOptions {
    pub fn new(boot_time: BootTime) -> Self {
        Self {
            boot_time,
            ..Default::default()
        }
    }
}

/// Résultat de la lecture d'un journal GPS
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Points convertis, dans l'ordre du fichier
    pub points: Vec<TrackPoint>,

    /// Nombre de lignes de données lues (lignes vides exclues)
    pub rows_read: usize,

    /// Lignes ignorées en mode tolérant
    pub errors: Vec<GpsLogError>,
}

impl ParseResult {
    /// Nombre de lignes ignorées
    pub fn rows_skipped(&self) -> usize {
        self.errors.len()
    }
}
