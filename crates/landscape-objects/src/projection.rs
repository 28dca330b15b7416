//! Geographic projection: WGS84 lon/lat to UTM easting/northing.
//!
//! Built with feature `proj-transforms`, projection goes through PROJ
//! (`EPSG:4326` → `EPSG:326zz`). Without it a transverse Mercator series
//! on the WGS84 ellipsoid is used, accurate to well under a meter within
//! the zone.

use glam::DVec2;
use landscape_core::{ObjectError, Result};

/// WGS84 semi-major axis (meters).
const WGS84_A: f64 = 6_378_137.0;

/// WGS84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// UTM scale factor on the central meridian.
const UTM_K0: f64 = 0.9996;

const UTM_FALSE_EASTING: f64 = 500_000.0;
const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Converts geographic degrees to planar meters.
pub trait Projector {
    fn project(&self, lon: f64, lat: f64) -> Result<DVec2>;
}

/// Projection into one UTM zone.
pub struct UtmProjection {
    zone: u8,
    #[cfg(feature = "proj-transforms")]
    transformer: proj::Proj,
}

impl UtmProjection {
    pub fn new(zone: u8) -> Result<Self> {
        if !(1..=60).contains(&zone) {
            return Err(ObjectError::Projection(format!(
                "UTM zone {zone} outside 1..=60"
            )));
        }

        #[cfg(feature = "proj-transforms")]
        {
            let target = format!("EPSG:326{zone:02}");
            let transformer = proj::Proj::new_known_crs("EPSG:4326", &target, None)
                .map_err(|e| ObjectError::Projection(format!("PROJ init for {target}: {e}")))?;
            tracing::info!("Projecting via PROJ into {target}");
            Ok(Self { zone, transformer })
        }

        #[cfg(not(feature = "proj-transforms"))]
        {
            tracing::info!("Projecting via built-in transverse Mercator, UTM zone {zone}");
            Ok(Self { zone })
        }
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// Central meridian of the zone (degrees).
    pub fn central_meridian(&self) -> f64 {
        zone_central_meridian(self.zone)
    }

    #[cfg(feature = "proj-transforms")]
    fn project_backend(&self, lon: f64, lat: f64) -> Result<DVec2> {
        // PROJ expects (lon, lat) order for EPSG:4326
        let (easting, northing) = self
            .transformer
            .convert((lon, lat))
            .map_err(|e| ObjectError::Projection(format!("({lon}, {lat}): {e}")))?;
        Ok(DVec2::new(easting, northing))
    }

    #[cfg(not(feature = "proj-transforms"))]
    fn project_backend(&self, lon: f64, lat: f64) -> Result<DVec2> {
        Ok(transverse_mercator(lon, lat, self.central_meridian()))
    }
}

impl Projector for UtmProjection {
    fn project(&self, lon: f64, lat: f64) -> Result<DVec2> {
        if !lon.is_finite() || !lat.is_finite() || lat.abs() > 84.0 {
            return Err(ObjectError::Projection(format!(
                "({lon}, {lat}) is outside the UTM domain"
            )));
        }
        self.project_backend(lon, lat)
    }
}

/// Central meridian of a UTM zone (degrees).
pub fn zone_central_meridian(zone: u8) -> f64 {
    -183.0 + 6.0 * zone as f64
}

/// UTM coordinates for a lon/lat (degrees) about `central_meridian`.
///
/// Snyder's series expansion (USGS Professional Paper 1395, eq. 8-9/8-10).
pub fn transverse_mercator(lon: f64, lat: f64, central_meridian: f64) -> DVec2 {
    let e2 = WGS84_F * (2.0 - WGS84_F);
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    let ep2 = e2 / (1.0 - e2);

    let phi = lat.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let tan_phi = phi.tan();

    let n = WGS84_A / (1.0 - e2 * sin_phi * sin_phi).sqrt();
    let t = tan_phi * tan_phi;
    let c = ep2 * cos_phi * cos_phi;
    let a = (lon - central_meridian).to_radians() * cos_phi;

    let m = WGS84_A
        * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin());

    let a2 = a * a;
    let a3 = a2 * a;
    let a4 = a3 * a;
    let a5 = a4 * a;
    let a6 = a5 * a;

    let x = UTM_K0
        * n
        * (a + (1.0 - t + c) * a3 / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0);
    let y = UTM_K0
        * (m + n
            * tan_phi
            * (a2 / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));

    let northing = if lat < 0.0 {
        y + UTM_FALSE_NORTHING_SOUTH
    } else {
        y
    };
    DVec2::new(UTM_FALSE_EASTING + x, northing)
}
