//! Terrain (.trn) header reader.
//!
//! Only the fixed 36-byte header is read; the heightmap that follows is
//! never touched. All fields are little-endian:
//!
//! | Offset | Type     | Field                            |
//! |--------|----------|----------------------------------|
//! | 0      | i32      | width (heightmap samples)        |
//! | 4      | i32      | height (heightmap samples)       |
//! | 8      | 3 × f32  | sample spacing                   |
//! | 20     | f32      | easting of the SE corner         |
//! | 24     | f32      | northing of the SE corner        |
//! | 28     | u16 + 2  | UTM zone                         |
//! | 32     | u16 + 2  | hemisphere letter (`N` / `S`)    |

use std::fs::File;
use std::io::Read;
use std::path::Path;

use landscape_core::constants::TRN_HEADER_SIZE;
use landscape_core::{LandscapeConfig, LandscapeOrigin, ObjectError, Region, Result};
use tracing::info;

/// Terrain header fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainHeader {
    pub width: u32,
    pub height: u32,
    pub spacing: [f32; 3],
    pub easting: f32,
    pub northing: f32,
    pub utm_zone: u16,
    pub hemisphere: char,
}

impl TerrainHeader {
    /// Projected coordinate of local (0, 0).
    pub fn origin(&self) -> LandscapeOrigin {
        LandscapeOrigin::new(self.easting as f64, self.northing as f64)
    }

    /// Number of tiles along (x, y).
    pub fn tile_count(&self, tile_samples: u32) -> (f64, f64) {
        (
            self.width as f64 / tile_samples as f64,
            self.height as f64 / tile_samples as f64,
        )
    }

    /// Landscape extent: the origin is the south-east corner, the grid
    /// extends west and north from it.
    pub fn region(&self, config: &LandscapeConfig) -> Region {
        let (tiles_x, tiles_y) = self.tile_count(config.tile_samples);
        Region::from_origin(
            self.origin(),
            tiles_x * config.tile_size_m,
            tiles_y * config.tile_size_m,
        )
    }
}

/// Read the terrain header from a .trn file.
pub fn load_trn_header(path: &Path) -> Result<TerrainHeader> {
    let unavailable = |reason: String| ObjectError::OriginUnavailable {
        path: path.to_path_buf(),
        reason,
    };

    let mut data = [0u8; TRN_HEADER_SIZE];
    let mut file = File::open(path).map_err(|e| unavailable(e.to_string()))?;
    file.read_exact(&mut data)
        .map_err(|e| unavailable(format!("header shorter than {TRN_HEADER_SIZE} bytes: {e}")))?;

    let header = parse_trn_header(&data).map_err(unavailable)?;
    info!(
        "Terrain {}: origin E {} N {}, zone {}{}, {}x{} samples",
        path.display(),
        header.easting,
        header.northing,
        header.utm_zone,
        header.hemisphere,
        header.width,
        header.height
    );
    Ok(header)
}

/// Parse a terrain header from bytes. The error is a plain reason string;
/// `load_trn_header` attaches the path.
pub fn parse_trn_header(data: &[u8]) -> std::result::Result<TerrainHeader, String> {
    if data.len() < TRN_HEADER_SIZE {
        return Err(format!(
            "header is {} bytes, expected {TRN_HEADER_SIZE}",
            data.len()
        ));
    }

    let i32_at = |o: usize| i32::from_le_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]]);
    let f32_at = |o: usize| f32::from_le_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]]);
    let u16_at = |o: usize| u16::from_le_bytes([data[o], data[o + 1]]);

    let width = i32_at(0);
    let height = i32_at(4);
    if width <= 0 || height <= 0 {
        return Err(format!("invalid grid size {width}x{height}"));
    }

    let easting = f32_at(20);
    let northing = f32_at(24);
    if !easting.is_finite() || !northing.is_finite() {
        return Err("origin is not finite".to_string());
    }

    Ok(TerrainHeader {
        width: width as u32,
        height: height as u32,
        spacing: [f32_at(8), f32_at(12), f32_at(16)],
        easting,
        northing,
        utm_zone: u16_at(28),
        hemisphere: char::from(u16_at(32) as u8),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a terrain header the way the landscape editor writes it.
    pub(crate) fn header_bytes(width: i32, height: i32, easting: f32, northing: f32) -> Vec<u8> {
        let mut buf = Vec::with_capacity(TRN_HEADER_SIZE + 8);
        buf.extend_from_slice(&width.to_le_bytes());
        buf.extend_from_slice(&height.to_le_bytes());
        for _ in 0..3 {
            buf.extend_from_slice(&90.0f32.to_le_bytes());
        }
        buf.extend_from_slice(&easting.to_le_bytes());
        buf.extend_from_slice(&northing.to_le_bytes());
        buf.extend_from_slice(&33u16.to_le_bytes());
        buf.extend_from_slice(&[0, 0]);
        buf.extend_from_slice(&(b'N' as u16).to_le_bytes());
        buf.extend_from_slice(&[0, 0]);
        // first heightmap samples
        buf.extend_from_slice(&[0u8; 8]);
        buf
    }

    #[test]
    fn test_parse_header() {
        let bytes = header_bytes(512, 768, 460_800.0, 5_760_000.0);
        let header = parse_trn_header(&bytes).unwrap();
        assert_eq!(header.width, 512);
        assert_eq!(header.height, 768);
        assert_eq!(header.spacing, [90.0; 3]);
        assert_eq!(header.utm_zone, 33);
        assert_eq!(header.hemisphere, 'N');
        assert_eq!(header.origin(), LandscapeOrigin::new(460_800.0, 5_760_000.0));
    }

    #[test]
    fn test_region_from_tiles() {
        let header = parse_trn_header(&header_bytes(512, 768, 460_800.0, 5_760_000.0)).unwrap();
        let region = header.region(&LandscapeConfig::default());
        assert_eq!(header.tile_count(256), (2.0, 3.0));
        assert_eq!(region.east_max, 460_800.0);
        assert_eq!(region.east_min, 460_800.0 - 2.0 * 23_040.0);
        assert_eq!(region.north_min, 5_760_000.0);
        assert_eq!(region.north_max, 5_760_000.0 + 3.0 * 23_040.0);
    }

    #[test]
    fn test_short_header() {
        let bytes = header_bytes(512, 512, 0.0, 0.0);
        assert!(parse_trn_header(&bytes[..20]).is_err());
    }

    #[test]
    fn test_invalid_size() {
        assert!(parse_trn_header(&header_bytes(0, 512, 0.0, 0.0)).is_err());
        assert!(parse_trn_header(&header_bytes(512, -1, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_load_header_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Test.trn");
        std::fs::write(&path, header_bytes(256, 256, 400_000.0, 5_500_000.0)).unwrap();
        let header = load_trn_header(&path).unwrap();
        assert_eq!(header.origin().easting, 400_000.0);
    }

    #[test]
    fn test_load_missing_or_short_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("Missing.trn");
        assert!(matches!(
            load_trn_header(&missing),
            Err(ObjectError::OriginUnavailable { .. })
        ));

        let short = dir.path().join("Short.trn");
        std::fs::write(&short, [0u8; 12]).unwrap();
        assert!(matches!(
            load_trn_header(&short),
            Err(ObjectError::OriginUnavailable { .. })
        ));
    }
}
