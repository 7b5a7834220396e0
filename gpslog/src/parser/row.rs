//! Parser pour les lignes de données

use csv::StringRecord;

use crate::parser::Header;
use crate::types::Sample;
use crate::GpsLogError;

/// Parse un enregistrement de données en échantillon brut
pub fn parse(line_no: usize, record: &StringRecord, header: &Header) -> Result<Sample, GpsLogError> {
    let field = |index: usize, name: &'static str| {
        record
            .get(index)
            .map(str::trim)
            .ok_or(GpsLogError::MissingField {
                line: line_no,
                field: name,
            })
    };

    let timestamp = parse_integer(line_no, "timestamp", field(header.timestamp, "timestamp")?)?;
    let lat = parse_decimal(line_no, "lat", field(header.lat, "lat")?)?;
    let lon = parse_decimal(line_no, "lon", field(header.lon, "lon")?)?;
    let alt = parse_decimal(line_no, "alt", field(header.alt, "alt")?)?;

    Ok(Sample {
        line: line_no,
        timestamp,
        lat,
        lon,
        alt,
    })
}

/// Entier signé (le timestamp n'accepte pas de partie décimale)
fn parse_integer(line: usize, field: &'static str, value: &str) -> Result<i64, GpsLogError> {
    value
        .parse::<i64>()
        .map_err(|_| GpsLogError::invalid_number(line, field, value))
}

/// Nombre décimal fini (parsing rapide via fast-float)
fn parse_decimal(line: usize, field: &'static str, value: &str) -> Result<f64, GpsLogError> {
    fast_float::parse::<f64, _>(value)
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GpsLogError::invalid_number(line, field, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: Header = Header {
        timestamp: 0,
        lat: 1,
        lon: 2,
        alt: 3,
    };

    fn row(line: &str) -> StringRecord {
        StringRecord::from(line.split(';').collect::<Vec<_>>())
    }

    #[test]
    fn test_parse_row() {
        let sample = parse(2, &row("1000000;474000000;85000000;500000"), &HEADER).unwrap();
        assert_eq!(
            sample,
            Sample {
                line: 2,
                timestamp: 1_000_000,
                lat: 474000000.0,
                lon: 85000000.0,
                alt: 500000.0,
            }
        );
    }

    #[test]
    fn test_parse_row_negative_and_spaces() {
        let sample = parse(5, &row(" -250 ; -338567000 ; 1512093000 ; -1200 "), &HEADER).unwrap();
        assert_eq!(sample.timestamp, -250);
        assert_eq!(sample.lat, -338567000.0);
        assert_eq!(sample.lon, 1512093000.0);
        assert_eq!(sample.alt, -1200.0);
    }

    #[test]
    fn test_parse_row_decimal_coordinates_accepted() {
        let sample = parse(2, &row("0;474000000.5;85000000;500000.25"), &HEADER).unwrap();
        assert_eq!(sample.lat, 474000000.5);
        assert_eq!(sample.alt, 500000.25);
    }

    #[test]
    fn test_parse_row_extra_columns_ignored() {
        let header = Header {
            timestamp: 1,
            lat: 2,
            lon: 3,
            alt: 5,
        };
        let sample = parse(2, &row("3D;0;1;2;12;3"), &header).unwrap();
        assert_eq!(sample.timestamp, 0);
        assert_eq!(sample.lon, 2.0);
        assert_eq!(sample.alt, 3.0);
    }

    #[test]
    fn test_parse_row_decimal_timestamp_rejected() {
        let result = parse(2, &row("1.5;474000000;85000000;500000"), &HEADER);
        assert!(matches!(
            result,
            Err(GpsLogError::InvalidNumber {
                field: "timestamp",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_row_missing_field() {
        let result = parse(7, &row("0;474000000;85000000"), &HEADER);
        assert!(matches!(
            result,
            Err(GpsLogError::MissingField {
                line: 7,
                field: "alt"
            })
        ));
    }

    #[test]
    fn test_parse_row_empty_and_non_finite_rejected() {
        let result = parse(2, &row("0;;85000000;500000"), &HEADER);
        assert!(matches!(
            result,
            Err(GpsLogError::InvalidNumber { field: "lat", .. })
        ));

        let result = parse(2, &row("0;474000000;nan;500000"), &HEADER);
        assert!(matches!(
            result,
            Err(GpsLogError::InvalidNumber { field: "lon", .. })
        ));

        let result = parse(2, &row("0;474000000;85000000;inf"), &HEADER);
        assert!(matches!(
            result,
            Err(GpsLogError::InvalidNumber { field: "alt", .. })
        ));
    }
}
