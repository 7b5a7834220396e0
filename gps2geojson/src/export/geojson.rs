//! Export de la trace en GeoJSON (FeatureCollection de points horodatés)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use tracing::debug;

use gpslog::TrackPoint;

/// Options d'écriture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Arrondi des coordonnées (décimales), pleine précision si absent
    pub precision: Option<u8>,

    /// Ajouter une feature LineString couvrant toute la trace
    pub track_line: bool,
}

/// Construit la FeatureCollection: un Point par échantillon, dans l'ordre
pub fn build_collection(points: &[TrackPoint], options: &ExportOptions) -> FeatureCollection {
    let mut features: Vec<Feature> = points
        .iter()
        .map(|point| point_feature(point, options.precision))
        .collect();

    if options.track_line && points.len() >= 2 {
        features.push(track_feature(points, options.precision));
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Exporte les points en GeoJSON.
///
/// Le fichier est écrit à côté de la destination puis renommé: une
/// destination existante est remplacée d'un bloc.
pub fn export_to_geojson(
    points: &[TrackPoint],
    options: &ExportOptions,
    output_path: &Path,
) -> Result<()> {
    let collection = build_collection(points, options);
    let tmp_path = temp_path(output_path);

    if let Err(e) = write_collection(&collection, &tmp_path) {
        std::fs::remove_file(&tmp_path).ok();
        return Err(e);
    }

    if let Err(e) = std::fs::rename(&tmp_path, output_path) {
        std::fs::remove_file(&tmp_path).ok();
        return Err(e)
            .with_context(|| format!("Failed to replace file: {}", output_path.display()));
    }

    debug!(
        path = %output_path.display(),
        features = collection.features.len(),
        "GeoJSON written"
    );

    Ok(())
}

fn write_collection(collection: &FeatureCollection, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, collection).context("Failed to serialize GeoJSON")?;
    writer.flush()?;

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;

    Ok(())
}

/// Fichier temporaire caché dans le même répertoire que la destination
fn temp_path(output_path: &Path) -> PathBuf {
    let name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.geojson".to_string());
    output_path.with_file_name(format!(".{}.tmp", name))
}

/// Feature Point (lon, lat, alt) avec la propriété `timestamp`
fn point_feature(point: &TrackPoint, precision: Option<u8>) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert(
        "timestamp".to_string(),
        JsonValue::from(point.timestamp.clone()),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(round_position(
            point.position(),
            precision,
        )))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Feature LineString 3D de toute la trace, bornée par `start`/`end`
fn track_feature(points: &[TrackPoint], precision: Option<u8>) -> Feature {
    let line = points
        .iter()
        .map(|p| round_position(p.position(), precision))
        .collect();

    let mut properties = JsonObject::new();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        properties.insert("start".to_string(), JsonValue::from(first.timestamp.clone()));
        properties.insert("end".to_string(), JsonValue::from(last.timestamp.clone()));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(line))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Arrondi à `precision` décimales (demi-unité vers l'infini)
fn round_position(position: [f64; 3], precision: Option<u8>) -> Vec<f64> {
    match precision {
        Some(decimals) => {
            let factor = 10f64.powi(decimals as i32);
            position
                .iter()
                .map(|v| (v * factor).round() / factor)
                .collect()
        }
        None => position.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpslog::{ParseOptions, ParseResult};

    fn points(log: &str) -> Vec<TrackPoint> {
        let ParseResult { points, .. } =
            gpslog::parse_bytes(log.as_bytes(), &ParseOptions::default()).unwrap();
        points
    }

    fn to_json(collection: &FeatureCollection) -> serde_json::Value {
        serde_json::to_value(collection).unwrap()
    }

    #[test]
    fn test_point_feature() {
        let points = points("timestamp;lat;lon;alt\n0;474000000;85000000;500000\n");
        let json = to_json(&build_collection(&points, &ExportOptions::default()));

        assert_eq!(json["type"], "FeatureCollection");
        let feature = &json["features"][0];
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["geometry"]["type"], "Point");
        assert_eq!(
            feature["geometry"]["coordinates"],
            serde_json::json!([8.5, 47.4, 500.0])
        );
        assert_eq!(
            feature["properties"],
            serde_json::json!({"timestamp": "2023-04-22T13:56:00Z"})
        );
        assert!(feature.get("id").is_none());
    }

    #[test]
    fn test_empty_collection() {
        let json = to_json(&build_collection(&[], &ExportOptions::default()));
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"], serde_json::json!([]));
    }

    #[test]
    fn test_round_position() {
        let position = [8.1234567, 47.40000049, 500.0004];
        assert_eq!(round_position(position, None), position.to_vec());
        assert_eq!(
            round_position(position, Some(6)),
            vec![8.123457, 47.4, 500.0004]
        );
        assert_eq!(round_position(position, Some(0)), vec![8.0, 47.0, 500.0]);
    }

    #[test]
    fn test_track_line() {
        let points = points(
            "timestamp;lat;lon;alt\n\
             0;474000000;85000000;500000\n\
             1000000;474010000;85010000;510000\n",
        );
        let options = ExportOptions {
            precision: None,
            track_line: true,
        };
        let json = to_json(&build_collection(&points, &options));

        let features = json["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);
        let line = &features[2];
        assert_eq!(line["geometry"]["type"], "LineString");
        assert_eq!(
            line["geometry"]["coordinates"],
            serde_json::json!([[8.5, 47.4, 500.0], [8.501, 47.401, 510.0]])
        );
        assert_eq!(line["properties"]["start"], "2023-04-22T13:56:00Z");
        assert_eq!(line["properties"]["end"], "2023-04-22T13:56:01Z");
    }

    #[test]
    fn test_track_line_needs_two_points() {
        let points = points("timestamp;lat;lon;alt\n0;474000000;85000000;500000\n");
        let options = ExportOptions {
            precision: None,
            track_line: true,
        };
        let collection = build_collection(&points, &options);
        assert_eq!(collection.features.len(), 1);
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("/data/GPS.geojson")),
            PathBuf::from("/data/.GPS.geojson.tmp")
        );
        assert_eq!(
            temp_path(Path::new("GPS.geojson")),
            PathBuf::from(".GPS.geojson.tmp")
        );
    }

    #[test]
    fn test_export_to_geojson_overwrites() {
        let output_path =
            std::env::temp_dir().join(format!("test_export_{}.geojson", std::process::id()));
        std::fs::write(&output_path, "previous content, much longer than the new one").unwrap();

        export_to_geojson(&[], &ExportOptions::default(), &output_path).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        // Clés triées, compact: "features" avant "type"
        assert_eq!(content, r#"{"features":[],"type":"FeatureCollection"}"#);
        assert!(!temp_path(&output_path).exists());

        std::fs::remove_file(output_path).ok();
    }
}
