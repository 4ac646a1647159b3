use geo_types::{Coord, LineString};

use crate::error::{upstream_error, Error};

/// Precision of the `overview_polyline` points returned by Google.
pub const GOOGLE_PRECISION: u32 = 5;

/// Decodes an encoded polyline string into a path.
pub fn decode(encoded: &str, precision: u32) -> Result<LineString<f64>, Error> {
    let factor = 10f64.powi(precision as i32);
    let bytes = encoded.as_bytes();

    let mut index = 0;
    let mut latitude: i64 = 0;
    let mut longitude: i64 = 0;
    let mut coords = Vec::new();

    while index < bytes.len() {
        let (delta, next) = decode_value(bytes, index)?;
        latitude = accumulate(latitude, delta)?;
        let (delta, next) = decode_value(bytes, next)?;
        longitude = accumulate(longitude, delta)?;
        index = next;

        coords.push(Coord {
            x: longitude as f64 / factor,
            y: latitude as f64 / factor,
        });
    }

    Ok(LineString::from(coords))
}

fn accumulate(total: i64, delta: i64) -> Result<i64, Error> {
    total
        .checked_add(delta)
        .ok_or_else(|| upstream_error("polyline coordinate overflow"))
}

fn decode_value(bytes: &[u8], mut index: usize) -> Result<(i64, usize), Error> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(index)
            .ok_or_else(|| upstream_error("truncated polyline"))?;

        if !(63..=126).contains(&byte) {
            return Err(upstream_error("invalid polyline character"));
        }

        let chunk = (byte - 63) as i64;
        index += 1;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }

        if shift > 60 {
            return Err(upstream_error("polyline value overflow"));
        }
    }

    let value = if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    };

    Ok((value, index))
}
