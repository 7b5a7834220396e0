//! Types d'erreurs pour le crate gpslog

use thiserror::Error;

/// Erreurs pouvant survenir lors de la lecture d'un journal GPS
#[derive(Debug, Error)]
pub enum GpsLogError {
    /// Erreur d'I/O lors de la lecture du fichier
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Erreur du lecteur CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Fichier vide (pas même une ligne d'en-tête)
    #[error("Empty input: no header line")]
    EmptyInput,

    /// Colonne obligatoire absente de l'en-tête
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// Ligne trop courte pour contenir un champ obligatoire
    #[error("Line {line}: missing field '{field}'")]
    MissingField { line: usize, field: &'static str },

    /// Valeur non numérique (ou non finie) dans un champ numérique
    #[error("Line {line}: invalid number in field '{field}': {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Contenu qui n'est pas de l'UTF-8 valide
    #[error("Line {line}: invalid UTF-8")]
    InvalidUtf8 { line: usize },

    /// Date absolue hors de la plage représentable
    #[error("Line {line}: timestamp overflows the calendar range")]
    TimeOverflow { line: usize },

    /// Séparateur non ASCII
    #[error("Invalid delimiter: 0x{0:02x} (must be a single ASCII character)")]
    InvalidDelimiter(u8),

    /// Heure de démarrage illisible
    #[error("Invalid boot time: {0}")]
    InvalidBootTime(String),
}

impl GpsLogError {
    /// Crée une erreur de nombre invalide avec contexte
    pub fn invalid_number(line: usize, field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            line,
            field,
            value: value.into(),
        }
    }

    /// Numéro de ligne concerné, si l'erreur porte sur une ligne
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MissingField { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::InvalidUtf8 { line }
            | Self::TimeOverflow { line } => Some(*line),
            _ => None,
        }
    }
}
