//! Configuration du convertisseur
//!
//! Priorité croissante: valeurs par défaut, fichier JSON, variables
//! d'environnement (`.env` compris), options de la ligne de commande.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gpslog::{BootTime, ParseOptions};

use crate::export::geojson::ExportOptions;

/// Préfixe des variables d'environnement
pub const ENV_PREFIX: &str = "GPS2GEOJSON_";

/// Nombre maximal de décimales pour l'arrondi des coordonnées
pub const MAX_PRECISION: u8 = 15;

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Journal GPS source
    pub input: PathBuf,

    /// Fichier GeoJSON produit (écrasé à chaque exécution)
    pub output: PathBuf,

    /// Heure de démarrage du système, origine des timestamps
    #[serde(with = "boot_time_format")]
    pub boot_time: BootTime,

    /// Séparateur de colonnes
    pub delimiter: char,

    /// Arrondi des coordonnées (nombre de décimales), aucun par défaut
    pub precision: Option<u8>,

    /// Ajouter une feature LineString couvrant toute la trace
    pub track_line: bool,

    /// Ignorer les lignes invalides au lieu d'échouer
    pub skip_invalid: bool,

    /// Rapport JSON optionnel
    pub report: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("GPS.csv"),
            output: PathBuf::from("GPS.geojson"),
            boot_time: BootTime::default(),
            delimiter: ';',
            precision: None,
            track_line: false,
            skip_invalid: false,
            report: None,
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Applique les variables d'environnement `GPS2GEOJSON_*`
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Applique des surcharges lues via `lookup` (nom complet de la variable)
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |key: &str| lookup(&format!("{}{}", ENV_PREFIX, key));

        if let Some(input) = var("INPUT") {
            self.input = PathBuf::from(input);
        }
        if let Some(output) = var("OUTPUT") {
            self.output = PathBuf::from(output);
        }
        if let Some(boot_time) = var("BOOT_TIME") {
            self.boot_time = boot_time
                .parse()
                .with_context(|| format!("Invalid {}BOOT_TIME", ENV_PREFIX))?;
        }
        if let Some(delimiter) = var("DELIMITER") {
            self.delimiter = parse_delimiter(&delimiter).map_err(anyhow::Error::msg)?;
        }
        if let Some(precision) = var("PRECISION") {
            let precision = precision
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}PRECISION: {}", ENV_PREFIX, precision))?;
            self.precision = Some(precision);
        }

        Ok(())
    }

    /// Vérifie la cohérence de la configuration
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            anyhow::bail!(
                "Invalid delimiter: {:?} (must be a single ASCII character)",
                self.delimiter
            );
        }
        if let Some(precision) = self.precision {
            if precision > MAX_PRECISION {
                anyhow::bail!(
                    "Precision out of range: {} (max {})",
                    precision,
                    MAX_PRECISION
                );
            }
        }
        if self.input == self.output {
            anyhow::bail!(
                "Input and output are the same file: {}",
                self.input.display()
            );
        }
        Ok(())
    }

    pub fn boot_time(&self) -> BootTime {
        self.boot_time
    }

    /// Options de lecture pour le crate gpslog
    pub fn parse_options(&self) -> Result<ParseOptions> {
        self.validate()?;
        Ok(ParseOptions {
            boot_time: self.boot_time(),
            delimiter: self.delimiter as u8,
            skip_invalid: self.skip_invalid,
        })
    }

    /// Options d'écriture GeoJSON
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            precision: self.precision,
            track_line: self.track_line,
        }
    }
}

/// Heure de démarrage en texte, mêmes formats que la CLI et l'environnement
mod boot_time_format {
    use gpslog::BootTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(boot_time: &BootTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(boot_time)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BootTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}

/// Parse un séparateur: un seul caractère ASCII, `\t` ou `tab` pour la tabulation
pub fn parse_delimiter(s: &str) -> Result<char, String> {
    match s {
        "\\t" | "tab" => return Ok('\t'),
        _ => {}
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!(
            "Invalid delimiter: {:?} (must be a single ASCII character)",
            s
        )),
    }
}
