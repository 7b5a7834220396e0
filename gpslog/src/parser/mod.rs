//! Parsers du journal GPS (en-tête puis lignes de données)

pub mod header;
pub mod row;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::convert::to_track_point;
use crate::types::{ParseOptions, ParseResult};
use crate::GpsLogError;

pub use header::Header;

/// Marque d'ordre des octets UTF-8 parfois présente en tête de fichier
const BOM: char = '\u{feff}';

/// Parse le contenu décodé d'un journal: en-tête, lignes, conversion.
///
/// Lecture CSV avec guillemets RFC 4180; les lignes vides sont ignorées
/// et les numéros de ligne commencent à 1.
pub fn parse_content(content: &str, options: &ParseOptions) -> Result<ParseResult, GpsLogError> {
    if !options.delimiter.is_ascii() {
        return Err(GpsLogError::InvalidDelimiter(options.delimiter));
    }

    let content = content.strip_prefix(BOM).unwrap_or(content);

    // En-tête lu comme un enregistrement ordinaire: première ligne non vide
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader
        .records()
        .filter(|record| !matches!(record, Ok(record) if is_blank(record)));

    let header = records.next().ok_or(GpsLogError::EmptyInput)??;
    let header = Header::from_record(&header)?;
    debug!(?header, "header parsed");

    let mut result = ParseResult::default();

    for record in records {
        let record = record?;
        let line_no = line_of(content, &record);
        result.rows_read += 1;

        let point = row::parse(line_no, &record, &header)
            .and_then(|sample| to_track_point(&sample, &options.boot_time));

        match point {
            Ok(point) => result.points.push(point),
            Err(e) if options.skip_invalid => {
                warn!(line = line_no, error = %e, "Skipping invalid row");
                result.errors.push(e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(result)
}

/// Ligne composée uniquement d'espaces
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|field| field.trim().is_empty())
}

/// Numéro de la ligne où commence l'enregistrement.
///
/// La position du lecteur peut précéder les lignes vides sautées avant
/// l'enregistrement: elles sont ajoutées au compte.
fn line_of(content: &str, record: &StringRecord) -> usize {
    let Some(position) = record.position() else {
        return 0;
    };

    let skipped = content
        .as_bytes()
        .get(position.byte() as usize..)
        .unwrap_or_default()
        .iter()
        .take_while(|&&b| b == b'\r' || b == b'\n')
        .filter(|&&b| b == b'\n')
        .count();

    position.line() as usize + skipped
}
