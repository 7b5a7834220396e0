//! Rapport de conversion
//!
//! Collecte les compteurs (lignes lues, points écrits, lignes ignorées) et
//! le résumé de la trace, pour affichage console ou sauvegarde JSON.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;

use gpslog::{GpsLogError, ParseResult, TrackSummary};

/// Statut global de la conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConversionStatus {
    /// Toutes les lignes converties
    Success,
    /// Conversion réussie avec des lignes ignorées
    PartialSuccess,
    /// Aucun point écrit
    Empty,
}

/// Ligne ignorée en mode tolérant
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    /// Numéro de ligne dans le journal
    pub line: Option<usize>,
    /// Message d'erreur
    pub message: String,
}

impl From<&GpsLogError> for RowError {
    fn from(error: &GpsLogError) -> Self {
        Self {
            line: error.line(),
            message: error.to_string(),
        }
    }
}

/// Rapport complet de conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Journal source
    pub input: PathBuf,
    /// Fichier GeoJSON produit
    pub output: PathBuf,
    /// Statut global
    pub status: ConversionStatus,

    /// Lignes de données lues
    pub rows_read: usize,
    /// Points écrits
    pub points_written: usize,
    /// Lignes ignorées
    pub rows_skipped: usize,

    /// Date du premier point
    pub first_time: Option<NaiveDateTime>,
    /// Date du dernier point
    pub last_time: Option<NaiveDateTime>,
    /// Durée couverte par la trace
    pub duration_secs: Option<f64>,
    /// Altitude minimale (m)
    pub min_alt: Option<f64>,
    /// Altitude maximale (m)
    pub max_alt: Option<f64>,
    /// Longueur horizontale (m)
    pub length_m: f64,

    /// Durée de la conversion
    pub elapsed_secs: f64,

    /// Lignes ignorées, avec leur erreur
    pub errors: Vec<RowError>,
}

impl ConversionReport {
    /// Crée un rapport vide pour un couple source/destination
    pub fn new(input: &Path, output: &Path) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            status: ConversionStatus::Empty,
            rows_read: 0,
            points_written: 0,
            rows_skipped: 0,
            first_time: None,
            last_time: None,
            duration_secs: None,
            min_alt: None,
            max_alt: None,
            length_m: 0.0,
            elapsed_secs: 0.0,
            errors: Vec::new(),
        }
    }

    /// Enregistre le résultat de la lecture
    pub fn record(&mut self, result: &ParseResult) {
        let summary = TrackSummary::from_points(&result.points);

        self.rows_read = result.rows_read;
        self.points_written = result.points.len();
        self.rows_skipped = result.rows_skipped();
        self.first_time = summary.first_time;
        self.last_time = summary.last_time;
        self.duration_secs = summary.duration_secs();
        self.min_alt = summary.min_alt;
        self.max_alt = summary.max_alt;
        self.length_m = summary.length_m;
        self.errors = result.errors.iter().map(RowError::from).collect();
    }

    /// Définit la durée de la conversion
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_secs = elapsed.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = if self.points_written == 0 {
            ConversionStatus::Empty
        } else if self.rows_skipped > 0 {
            ConversionStatus::PartialSuccess
        } else {
            ConversionStatus::Success
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("CONVERSION REPORT - {}", self.input.display());
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Output: {}", self.output.display());
        println!("Elapsed: {:.2}s", self.elapsed_secs);

        println!("\n--- SUMMARY ---");
        println!(
            "Rows: {} read, {} points written, {} skipped",
            self.rows_read, self.points_written, self.rows_skipped
        );

        if let (Some(first), Some(last)) = (self.first_time, self.last_time) {
            println!("\n--- TRACK ---");
            println!("From: {}", first);
            println!("To: {}", last);
            if let Some(duration) = self.duration_secs {
                println!("Duration: {:.1}s", duration);
            }
            if let (Some(min), Some(max)) = (self.min_alt, self.max_alt) {
                println!("Altitude: {:.1} m .. {:.1} m", min, max);
            }
            println!("Length: {:.1} m", self.length_m);
        }

        if !self.errors.is_empty() {
            println!("\n--- SKIPPED ROWS ({}) ---", self.errors.len());
            for e in self.errors.iter().take(20) {
                println!("  {}", e.message);
            }
            if self.errors.len() > 20 {
                println!("  ... and {} more", self.errors.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} points written, {} skipped -> {}",
            self.input.display(),
            self.points_written,
            self.rows_skipped,
            self.output.display()
        )
    }
}
