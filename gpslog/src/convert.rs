//! Conversion des échantillons bruts en points de trace
//!
//! Les unités du journal sont entières: degrés × 1e7, millimètres et
//! microsecondes depuis le démarrage. La date absolue est calculée par
//! addition calendaire naïve (pas de fuseau, pas de seconde intercalaire)
//! puis rendue en ISO-8601 suivie d'un "Z" littéral.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use tracing::debug;

use crate::types::{Sample, TrackPoint};
use crate::GpsLogError;

/// Facteur degrés × 1e7 -> degrés
pub const DEGREE_SCALE: f64 = 10_000_000.0;

/// Facteur millimètres -> mètres
pub const ALTITUDE_SCALE: f64 = 1000.0;

/// Formats acceptés pour l'heure de démarrage
const BOOT_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Heure de démarrage du système: origine de tous les timestamps du journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BootTime(NaiveDateTime);

impl BootTime {
    /// Date absolue correspondant à un décalage en microsecondes
    pub fn offset(&self, micros: i64) -> Option<NaiveDateTime> {
        self.0.checked_add_signed(TimeDelta::microseconds(micros))
    }
}

impl Default for BootTime {
    /// 2023-04-22T13:56:00, l'heure de démarrage des journaux historiques
    fn default() -> Self {
        let time = NaiveDate::from_ymd_opt(2023, 4, 22)
            .and_then(|d| d.and_hms_opt(13, 56, 0))
            .expect("default boot time is a valid date");
        Self(time)
    }
}

impl From<NaiveDateTime> for BootTime {
    fn from(time: NaiveDateTime) -> Self {
        Self(time)
    }
}

impl FromStr for BootTime {
    type Err = GpsLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        BOOT_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(Self)
            .ok_or_else(|| {
                GpsLogError::InvalidBootTime(format!(
                    "'{}' (expected YYYY-MM-DDTHH:MM:SS, e.g. 2023-04-22T13:56:00)",
                    s
                ))
            })
    }
}

impl fmt::Display for BootTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&isoformat(&self.0))
    }
}

/// Rendu ISO-8601 sans fuseau: `YYYY-MM-DDTHH:MM:SS`, suivi de `.ffffff`
/// seulement si la partie microsecondes est non nulle
pub fn isoformat(time: &NaiveDateTime) -> String {
    let base = time.format("%Y-%m-%dT%H:%M:%S").to_string();
    let micros = time.nanosecond() / 1000;
    if micros == 0 {
        base
    } else {
        format!("{}.{:06}", base, micros)
    }
}

/// Convertit un échantillon brut en point de trace
pub fn to_track_point(sample: &Sample, boot_time: &BootTime) -> Result<TrackPoint, GpsLogError> {
    debug!(line = sample.line, timestamp = sample.timestamp, "raw timestamp");

    let lat = sample.lat / DEGREE_SCALE;
    let lon = sample.lon / DEGREE_SCALE;
    let alt = sample.alt / ALTITUDE_SCALE;

    // Années 1..=9999 uniquement: au-delà le rendu ISO change de forme
    let time = boot_time
        .offset(sample.timestamp)
        .filter(|t| (1..=9999).contains(&t.year()))
        .ok_or(GpsLogError::TimeOverflow { line: sample.line })?;

    let timestamp = format!("{}Z", isoformat(&time));

    Ok(TrackPoint {
        lon,
        lat,
        alt,
        time,
        timestamp,
    })
}
