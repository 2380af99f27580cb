//! GPS extraction from embedded image metadata.
//!
//! Extraction failure is never fatal to an upload: a missing GPS tag, a
//! non-image payload, and a corrupt metadata block all yield `None`, and the
//! caller falls back to prompting for manual coordinates. The cases are only
//! distinguished in the debug log.

use exif::{In, Tag, Value};
use std::io::Cursor;
use tokio::task::spawn_blocking;

use crate::models::Coordinate;

/// Extract a GPS coordinate from an image's embedded metadata.
///
/// Decoding runs on the blocking pool; the returned coordinate has
/// hemisphere sign correction applied (South and West are negative).
pub async fn extract_gps(bytes: Vec<u8>) -> Option<Coordinate> {
    match spawn_blocking(move || extract_gps_sync(&bytes)).await {
        Ok(coordinate) => coordinate,
        Err(err) => {
            tracing::debug!(error = %err, "metadata decode task failed");
            None
        }
    }
}

fn extract_gps_sync(bytes: &[u8]) -> Option<Coordinate> {
    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(err) => {
            tracing::debug!(error = %err, "no readable metadata in upload");
            return None;
        }
    };

    let latitude = dms_field(&exif, Tag::GPSLatitude)?;
    let longitude = dms_field(&exif, Tag::GPSLongitude)?;

    let latitude = apply_hemisphere(latitude, hemisphere(&exif, Tag::GPSLatitudeRef), b'S');
    let longitude = apply_hemisphere(longitude, hemisphere(&exif, Tag::GPSLongitudeRef), b'W');

    Some(Coordinate::new(latitude, longitude))
}

/// Decode a degrees/minutes/seconds rational triple into decimal degrees.
/// Missing minute and second components default to zero.
fn dms_field(exif: &exif::Exif, tag: Tag) -> Option<f64> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Rational(parts) => {
            let degrees = parts.first()?.to_f64();
            let minutes = parts.get(1).map_or(0.0, |r| r.to_f64());
            let seconds = parts.get(2).map_or(0.0, |r| r.to_f64());
            Some(dms_to_decimal(degrees, minutes, seconds))
        }
        _ => None,
    }
}

fn hemisphere(exif: &exif::Exif, tag: Tag) -> Option<u8> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Ascii(values) => values
            .first()
            .and_then(|v| v.first())
            .map(u8::to_ascii_uppercase),
        _ => None,
    }
}

fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Negate the value when the hemisphere reference matches the negative
/// letter for that axis. An absent reference leaves the value as-is.
fn apply_hemisphere(value: f64, reference: Option<u8>, negative: u8) -> f64 {
    if reference == Some(negative) {
        -value
    } else {
        value
    }
}
