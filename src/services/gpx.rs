//! GPX track ingestion
//!
//! Thin conversion from a recorded GPX file to the ordered `[lon, lat]`
//! coordinate sequence the rest of the system works with. Multi-segment
//! recordings are flattened in document order.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::types::GeoPoint;

/// A usable track needs at least a start and an end vertex.
const MIN_TRACK_POINTS: usize = 2;

/// Parse a GPX document into a track.
pub fn parse_track<R: Read>(reader: R) -> Result<Vec<GeoPoint>> {
    let document = gpx::read(reader).map_err(|e| anyhow!("Invalid GPX document: {}", e))?;

    let track: Vec<GeoPoint> = document
        .tracks
        .iter()
        .flat_map(|track| track.segments.iter())
        .flat_map(|segment| segment.points.iter())
        .map(|waypoint| GeoPoint {
            lon: waypoint.point().x(),
            lat: waypoint.point().y(),
        })
        .collect();

    if track.len() < MIN_TRACK_POINTS {
        bail!(
            "GPX document contains {} track point(s), need at least {}",
            track.len(),
            MIN_TRACK_POINTS
        );
    }

    Ok(track)
}

/// Read and parse a GPX file from disk.
pub fn track_from_gpx_file(path: &Path) -> Result<Vec<GeoPoint>> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    parse_track(BufReader::new(file))
}
