//! Encoded polyline codec (5-decimal fixed point, zig-zag, 5-bit chunks).
//!
//! Each coordinate is stored as the delta from the previous vertex, scaled by
//! 1e5 and rounded, so decoding reproduces the input to within 1e-5 degrees.

use thiserror::Error;

use crate::spatial::GeoPoint;

const PRECISION: f64 = 1e5;
const CHAR_OFFSET: u8 = 63;
const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: i64 = 0x1f;
const CONTINUATION_BIT: i64 = 0x20;
/// Largest shift that still fits a full chunk into an `i64`.
const MAX_SHIFT: u32 = 55;
/// Encoder clamp in degrees; keeps deltas and their zig-zag form inside `i64`.
pub const MAX_COORDINATE: f64 = 1e9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("invalid polyline character {byte:#04x} at byte {index}")]
    InvalidCharacter { index: usize, byte: u8 },
    #[error("polyline ends mid-value at byte {index}")]
    Truncated { index: usize },
    #[error("polyline value starting before byte {index} overflows")]
    Overflow { index: usize },
}

/// Decode an encoded polyline into its ordered vertices.
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::with_capacity(bytes.len() / 4);
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let vertex_start = index;
        let overflow = || PolylineError::Overflow {
            index: vertex_start,
        };
        lat = lat
            .checked_add(next_value(bytes, &mut index)?)
            .ok_or_else(overflow)?;
        lng = lng
            .checked_add(next_value(bytes, &mut index)?)
            .ok_or_else(overflow)?;
        points.push(GeoPoint::new(
            lat as f64 / PRECISION,
            lng as f64 / PRECISION,
        ));
    }

    Ok(points)
}

/// Encode vertices, rounding each coordinate to 1e-5 degrees.
///
/// Vertices with a non-finite coordinate are skipped; finite coordinates are
/// clamped to `±MAX_COORDINATE`.
pub fn encode<I>(points: I) -> String
where
    I: IntoIterator<Item = GeoPoint>,
{
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let (Some(lat), Some(lng)) = (fixed_point(point.latitude), fixed_point(point.longitude))
        else {
            continue;
        };
        push_value(lat - prev_lat, &mut out);
        push_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn fixed_point(degrees: f64) -> Option<i64> {
    if !degrees.is_finite() {
        return None;
    }
    Some((degrees.clamp(-MAX_COORDINATE, MAX_COORDINATE) * PRECISION).round() as i64)
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let start = *index;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated { index: *index });
        };
        if !(CHAR_OFFSET..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                index: *index,
                byte,
            });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { index: start });
        }

        let chunk = i64::from(byte - CHAR_OFFSET);
        *index += 1;
        result |= (chunk & CHUNK_MASK) << shift;
        shift += CHUNK_BITS;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

fn push_value(value: i64, out: &mut String) {
    let mut zigzag = if value < 0 { !(value << 1) } else { value << 1 };
    while zigzag >= CONTINUATION_BIT {
        push_chunk((CONTINUATION_BIT | (zigzag & CHUNK_MASK)) as u8, out);
        zigzag >>= CHUNK_BITS;
    }
    push_chunk(zigzag as u8, out);
}

fn push_chunk(chunk: u8, out: &mut String) {
    out.push(char::from(chunk + CHAR_OFFSET));
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference polyline from the provider's format documentation.
    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn reference_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(38.5, -120.2),
            GeoPoint::new(40.7, -120.95),
            GeoPoint::new(43.252, -126.453),
        ]
    }

    fn assert_close(actual: &[GeoPoint], expected: &[GeoPoint]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a.latitude - e.latitude).abs() < 1e-5, "{a} vs {e}");
            assert!((a.longitude - e.longitude).abs() < 1e-5, "{a} vs {e}");
        }
    }

    #[test]
    fn decodes_reference_polyline() {
        let points = decode(REFERENCE).expect("decode");
        assert_close(&points, &reference_points());
    }

    #[test]
    fn encodes_reference_polyline() {
        assert_eq!(encode(reference_points()), REFERENCE);
    }

    #[test]
    fn empty_string_has_no_vertices() {
        assert!(decode("").expect("decode").is_empty());
        assert_eq!(encode(Vec::<GeoPoint>::new()), "");
    }

    #[test]
    fn reencoding_keeps_provider_precision() {
        let points = vec![
            GeoPoint::new(12.971_598_7, 77.594_562_5),
            GeoPoint::new(-33.868_819_7, 151.209_295_5),
        ];
        let decoded = decode(&encode(points.clone())).expect("decode");
        assert_close(&decoded, &points);
    }

    #[test]
    fn non_finite_vertices_are_skipped() {
        let points = vec![
            GeoPoint::new(f64::INFINITY, 0.0),
            GeoPoint::new(38.5, -120.2),
            GeoPoint::new(f64::NEG_INFINITY, 0.0),
            GeoPoint::new(40.7, f64::NAN),
            GeoPoint::new(40.7, -120.95),
            GeoPoint::new(43.252, -126.453),
        ];
        assert_eq!(encode(points), REFERENCE);
    }

    #[test]
    fn huge_coordinates_are_clamped() {
        let points = vec![GeoPoint::new(1e300, -1e300), GeoPoint::new(-1e300, 1e300)];
        let decoded = decode(&encode(points)).expect("decode");
        assert_close(
            &decoded,
            &[
                GeoPoint::new(MAX_COORDINATE, -MAX_COORDINATE),
                GeoPoint::new(-MAX_COORDINATE, MAX_COORDINATE),
            ],
        );
    }

    #[test]
    fn truncated_input_is_rejected() {
        // Drop the final terminating chunk of the last longitude.
        let cut = &REFERENCE[..REFERENCE.len() - 1];
        assert!(matches!(
            decode(cut),
            Err(PolylineError::Truncated { .. })
        ));

        // A latitude with no longitude.
        assert!(matches!(
            decode("_p~iF"),
            Err(PolylineError::Truncated { index: 5 })
        ));
    }

    #[test]
    fn characters_outside_alphabet_are_rejected() {
        assert_eq!(
            decode("_p~iF ps|U"),
            Err(PolylineError::InvalidCharacter {
                index: 5,
                byte: b' '
            })
        );
    }

    #[test]
    fn endless_continuation_is_rejected() {
        let runaway = "~".repeat(20);
        assert!(matches!(
            decode(&runaway),
            Err(PolylineError::Overflow { index: 0 })
        ));
    }
}
