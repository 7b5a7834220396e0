//! Statistiques de trace (durée, altitudes, longueur)

use chrono::NaiveDateTime;
use geo::{HaversineLength, LineString};

use crate::types::TrackPoint;

/// Résumé d'une trace convertie
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackSummary {
    /// Nombre de points
    pub points: usize,

    /// Date du premier point (ordre du fichier)
    pub first_time: Option<NaiveDateTime>,

    /// Date du dernier point (ordre du fichier)
    pub last_time: Option<NaiveDateTime>,

    /// Altitude minimale en mètres
    pub min_alt: Option<f64>,

    /// Altitude maximale en mètres
    pub max_alt: Option<f64>,

    /// Longueur horizontale en mètres (haversine)
    pub length_m: f64,
}

impl TrackSummary {
    pub fn from_points(points: &[TrackPoint]) -> Self {
        let altitudes = points.iter().map(|p| p.alt);

        Self {
            points: points.len(),
            first_time: points.first().map(|p| p.time),
            last_time: points.last().map(|p| p.time),
            min_alt: altitudes.clone().reduce(f64::min),
            max_alt: altitudes.reduce(f64::max),
            length_m: line_string(points).haversine_length(),
        }
    }

    /// Durée entre le premier et le dernier point, en secondes
    pub fn duration_secs(&self) -> Option<f64> {
        let (first, last) = (self.first_time?, self.last_time?);
        let delta = last - first;
        Some(delta.num_microseconds().map_or(delta.num_seconds() as f64, |us| us as f64 / 1e6))
    }
}

/// Trace 2D (lon, lat) dans l'ordre des points
pub fn line_string(points: &[TrackPoint]) -> LineString<f64> {
    points.iter().map(|p| (p.lon, p.lat)).collect::<Vec<_>>().into()
}
