//! Object file layout and tuning defaults.

// --- Object file record layout ---

/// Number of little-endian f32 fields leading each record
/// (x, y, z, scale, orientation).
pub const RECORD_FLOAT_COUNT: usize = 5;

/// Width of the fixed name field following the length byte.
pub const NAME_FIELD_LEN: usize = 131;

/// Longest name that fits the name field.
pub const MAX_NAME_LEN: usize = NAME_FIELD_LEN;

/// Total size of one encoded record in bytes.
pub const RECORD_SIZE: usize = RECORD_FLOAT_COUNT * 4 + 1 + NAME_FIELD_LEN;

// --- Terrain header ---

/// Size of the terrain (.trn) header in bytes.
pub const TRN_HEADER_SIZE: usize = 36;

/// Heightmap samples along one tile edge.
pub const DEFAULT_TILE_SAMPLES: u32 = 256;

/// Tile edge length in meters (256 samples at 90 m).
pub const DEFAULT_TILE_SIZE_M: f64 = 23_040.0;

/// UTM zone used when neither config nor terrain header supply one.
pub const DEFAULT_UTM_ZONE: u8 = 33;

// --- Orientation inference ---

/// Nearest neighbors considered per point.
pub const DEFAULT_NEIGHBOR_COUNT: usize = 8;

/// Neighbors closer than this (meters) are treated as a parallel line.
pub const DEFAULT_PROXIMITY_THRESHOLD: f64 = 100.0;

/// Minimum surviving neighbors needed to orient a chain point.
pub const MIN_CHAIN_NEIGHBORS: usize = 2;

// --- Object templates ---

pub const DEFAULT_WIND_GENERATOR_TEMPLATE: &str = "Eolienne2.c3d";
pub const DEFAULT_POWER_TOWER_TEMPLATE: &str = "Powertower.c3d";

/// Default install directory of the simulator.
pub const DEFAULT_CONDOR_DIR: &str = "C:/Program Files/Condor2/";
