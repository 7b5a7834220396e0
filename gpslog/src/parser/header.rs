//! Parser pour la ligne d'en-tête (recherche des colonnes par nom)

use csv::StringRecord;

use crate::GpsLogError;

/// Position des colonnes utiles dans un enregistrement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub timestamp: usize,
    pub lat: usize,
    pub lon: usize,
    pub alt: usize,
}

impl Header {
    /// Recherche les colonnes dans l'enregistrement d'en-tête
    pub fn from_record(record: &StringRecord) -> Result<Self, GpsLogError> {
        let names: Vec<&str> = record.iter().map(str::trim).collect();

        let find = |column: &'static str| {
            names
                .iter()
                .position(|&name| name == column)
                .ok_or(GpsLogError::MissingColumn(column))
        };

        Ok(Self {
            timestamp: find("timestamp")?,
            lat: find("lat")?,
            lon: find("lon")?,
            alt: find("alt")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_header_standard() {
        let header = Header::from_record(&record(&["timestamp", "lat", "lon", "alt"])).unwrap();
        assert_eq!(
            header,
            Header {
                timestamp: 0,
                lat: 1,
                lon: 2,
                alt: 3
            }
        );
    }

    #[test]
    fn test_header_reordered_with_extra_columns() {
        let header = Header::from_record(&record(&[
            "fix",
            "alt",
            "lon",
            "sats",
            "lat",
            "timestamp",
            "hdop",
        ]))
        .unwrap();
        assert_eq!(header.alt, 1);
        assert_eq!(header.lon, 2);
        assert_eq!(header.lat, 4);
        assert_eq!(header.timestamp, 5);
    }

    #[test]
    fn test_header_spaces_trimmed() {
        let header = Header::from_record(&record(&["timestamp ", " lat ", " lon ", " alt"])).unwrap();
        assert_eq!(header.timestamp, 0);
        assert_eq!(header.alt, 3);
    }

    #[test]
    fn test_header_missing_column() {
        let result = Header::from_record(&record(&["timestamp", "lat", "lon"]));
        assert!(matches!(result, Err(GpsLogError::MissingColumn("alt"))));

        // Comparaison exacte, sensible à la casse
        let result = Header::from_record(&record(&["Timestamp", "lat", "lon", "alt"]));
        assert!(matches!(result, Err(GpsLogError::MissingColumn("timestamp"))));
    }
}
