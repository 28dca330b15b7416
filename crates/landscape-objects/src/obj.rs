//! Object file (.obj) loader and writer.
//!
//! An object file is a flat sequence of fixed 152-byte records with no
//! header, count or checksum:
//!
//! | Offset | Size | Field                         |
//! |--------|------|-------------------------------|
//! | 0      | 4    | x (f32 LE, local)             |
//! | 4      | 4    | y (f32 LE, local)             |
//! | 8      | 4    | z (f32 LE)                    |
//! | 12     | 4    | scale (f32 LE)                |
//! | 16     | 4    | orientation (f32 LE, radians) |
//! | 20     | 1    | name length N                 |
//! | 21     | 131  | name, first N bytes used      |
//!
//! Bytes of the name field past N are ignored on read and zeroed on write.

use std::path::Path;

use glam::Vec3;
use landscape_core::constants::{MAX_NAME_LEN, NAME_FIELD_LEN, RECORD_FLOAT_COUNT, RECORD_SIZE};
use landscape_core::{ObjectError, PlacementRecord, Result};
use tracing::debug;

use crate::atomic::write_atomic;

/// Offset of the name length byte within a record.
const NAME_LEN_OFFSET: usize = RECORD_FLOAT_COUNT * 4;

/// Offset of the name field within a record.
const NAME_OFFSET: usize = NAME_LEN_OFFSET + 1;

/// Load all records from an object file.
pub fn load_objects(path: &Path) -> Result<Vec<PlacementRecord>> {
    let data = std::fs::read(path).map_err(|source| ObjectError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_objects(&data)?;
    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse records from a byte buffer.
///
/// An empty buffer yields no records. A trailing partial record fails
/// with `TruncatedRecord`.
pub fn parse_objects(data: &[u8]) -> Result<Vec<PlacementRecord>> {
    let mut records = Vec::with_capacity(data.len() / RECORD_SIZE);
    for (index, chunk) in data.chunks(RECORD_SIZE).enumerate() {
        if chunk.len() < RECORD_SIZE {
            return Err(ObjectError::TruncatedRecord {
                index,
                offset: index * RECORD_SIZE,
                available: chunk.len(),
                expected: RECORD_SIZE,
            });
        }
        records.push(parse_record(chunk, index)?);
    }
    Ok(records)
}

fn parse_record(chunk: &[u8], index: usize) -> Result<PlacementRecord> {
    let offset = index * RECORD_SIZE;
    let float_at = |i: usize| {
        let start = i * 4;
        f32::from_le_bytes([
            chunk[start],
            chunk[start + 1],
            chunk[start + 2],
            chunk[start + 3],
        ])
    };

    let length = chunk[NAME_LEN_OFFSET] as usize;
    if length == 0 || length > MAX_NAME_LEN {
        return Err(ObjectError::InvalidNameLength {
            index,
            offset,
            length,
        });
    }

    let name_bytes = &chunk[NAME_OFFSET..NAME_OFFSET + length];
    if !name_bytes.is_ascii() {
        return Err(ObjectError::InvalidName { index, offset });
    }
    let name: String = name_bytes.iter().map(|&b| b as char).collect();

    Ok(PlacementRecord {
        position: Vec3::new(float_at(0), float_at(1), float_at(2)),
        scale: float_at(3),
        orientation: float_at(4),
        name,
    })
}

/// Serialize records to object file bytes.
///
/// Validates every name before producing output, so a failure never
/// yields a partial buffer.
pub fn serialize_objects(records: &[PlacementRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(records.len() * RECORD_SIZE);
    for (index, record) in records.iter().enumerate() {
        encode_record(&mut buf, record, index)?;
    }
    Ok(buf)
}

fn encode_record(buf: &mut Vec<u8>, record: &PlacementRecord, index: usize) -> Result<()> {
    let offset = index * RECORD_SIZE;
    let name = record.name.as_bytes();
    if name.len() > MAX_NAME_LEN {
        return Err(ObjectError::NameTooLong {
            index,
            offset,
            name: record.name.clone(),
            length: name.len(),
        });
    }
    if name.is_empty() {
        return Err(ObjectError::InvalidNameLength {
            index,
            offset,
            length: 0,
        });
    }
    if !name.is_ascii() {
        return Err(ObjectError::InvalidName { index, offset });
    }

    let p = record.position;
    for value in [p.x, p.y, p.z, record.scale, record.orientation] {
        buf.extend_from_slice(&value.to_le_bytes());
    }
    buf.push(name.len() as u8);
    buf.extend_from_slice(name);
    buf.resize(buf.len() + NAME_FIELD_LEN - name.len(), 0);
    Ok(())
}

/// Write records to an object file, replacing any existing file.
///
/// Output goes to a temporary file in the destination directory which is
/// then renamed over `path`; the previous contents survive any failure.
pub fn write_objects(path: &Path, records: &[PlacementRecord]) -> Result<()> {
    let data = serialize_objects(records)?;
    write_atomic(path, &data)?;
    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn record(name: &str) -> PlacementRecord {
        PlacementRecord::new(Vec3::new(1200.5, -340.25, 87.0), 1.25, 3.0, name)
    }

    #[test]
    fn test_two_record_stream() {
        let long_name = "B".repeat(131);
        let records = vec![record("A"), record(&long_name)];

        let bytes = serialize_objects(&records).unwrap();
        assert_eq!(bytes.len(), 2 * RECORD_SIZE);
        assert_eq!(bytes[NAME_LEN_OFFSET], 1);
        assert_eq!(bytes[RECORD_SIZE + NAME_LEN_OFFSET], 131);

        let decoded = parse_objects(&bytes).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].name, "A");
        assert_eq!(decoded[1].name, long_name);
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_field_layout() {
        let bytes = serialize_objects(&[record("tree.c3d")]).unwrap();
        assert_eq!(&bytes[0..4], &1200.5f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &(-340.25f32).to_le_bytes());
        assert_eq!(&bytes[16..20], &3.0f32.to_le_bytes());
        assert_eq!(&bytes[21..29], b"tree.c3d");
        assert!(bytes[29..RECORD_SIZE].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_empty_stream() {
        assert!(parse_objects(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_padding_ignored() {
        let mut bytes = serialize_objects(&[record("Pine")]).unwrap();
        for b in &mut bytes[25..RECORD_SIZE] {
            *b = 0xAB;
        }
        let decoded = parse_objects(&bytes).unwrap();
        assert_eq!(decoded[0].name, "Pine");
    }

    #[test]
    fn test_truncated_final_record() {
        let mut bytes = serialize_objects(&[record("A"), record("B")]).unwrap();
        bytes.truncate(RECORD_SIZE + 50);
        match parse_objects(&bytes) {
            Err(ObjectError::TruncatedRecord {
                index,
                offset,
                available,
                expected,
            }) => {
                assert_eq!(index, 1);
                assert_eq!(offset, RECORD_SIZE);
                assert_eq!(available, 50);
                assert_eq!(expected, RECORD_SIZE);
            }
            other => panic!("expected TruncatedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_name_length() {
        let mut bytes = serialize_objects(&[record("A"), record("B")]).unwrap();
        bytes[RECORD_SIZE + NAME_LEN_OFFSET] = 0;
        assert!(matches!(
            parse_objects(&bytes),
            Err(ObjectError::InvalidNameLength {
                index: 1,
                offset: RECORD_SIZE,
                length: 0
            })
        ));

        bytes[RECORD_SIZE + NAME_LEN_OFFSET] = 132;
        assert!(matches!(
            parse_objects(&bytes),
            Err(ObjectError::InvalidNameLength { length: 132, .. })
        ));
    }

    #[test]
    fn test_non_ascii_name_rejected() {
        let mut bytes = serialize_objects(&[record("AB")]).unwrap();
        bytes[22] = 0xC3;
        assert!(matches!(
            parse_objects(&bytes),
            Err(ObjectError::InvalidName { index: 0, .. })
        ));
        assert!(matches!(
            serialize_objects(&[record("Éolienne.c3d")]),
            Err(ObjectError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_name_too_long() {
        let records = vec![record("ok"), record(&"x".repeat(132))];
        match serialize_objects(&records) {
            Err(ObjectError::NameTooLong {
                index,
                offset,
                length,
                ..
            }) => {
                assert_eq!(index, 1);
                assert_eq!(offset, RECORD_SIZE);
                assert_eq!(length, 132);
            }
            other => panic!("expected NameTooLong, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            serialize_objects(&[record("")]),
            Err(ObjectError::InvalidNameLength { length: 0, .. })
        ));
    }

    #[test]
    fn test_random_records_roundtrip() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let records: Vec<PlacementRecord> = (0..64)
            .map(|_| {
                let len = rng.gen_range(1..=MAX_NAME_LEN);
                let name: String = (0..len)
                    .map(|_| rng.gen_range(b'!'..=b'~') as char)
                    .collect();
                PlacementRecord::new(
                    Vec3::new(
                        rng.gen_range(-200_000.0..200_000.0),
                        rng.gen_range(-200_000.0..200_000.0),
                        rng.gen_range(-100.0..3000.0),
                    ),
                    rng.gen_range(0.1..4.0),
                    rng.gen_range(0.0..std::f32::consts::TAU),
                    name,
                )
            })
            .collect();

        let bytes = serialize_objects(&records).unwrap();
        assert_eq!(bytes.len(), records.len() * RECORD_SIZE);
        assert_eq!(parse_objects(&bytes).unwrap(), records);
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Test.obj");
        std::fs::write(&path, vec![0xFFu8; 1000]).unwrap();

        write_objects(&path, &[record("A")]).unwrap();
        assert_eq!(load_objects(&path).unwrap(), vec![record("A")]);
    }

    #[test]
    fn test_failed_write_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Test.obj");
        write_objects(&path, &[record("A")]).unwrap();

        let result = write_objects(&path, &[record("B"), record(&"x".repeat(200))]);
        assert!(matches!(result, Err(ObjectError::NameTooLong { .. })));
        assert_eq!(load_objects(&path).unwrap(), vec![record("A")]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("Test.obj");
        assert!(matches!(
            write_objects(&path, &[record("A")]),
            Err(ObjectError::DestinationWrite { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_objects(Path::new("/nonexistent/Test.obj")),
            Err(ObjectError::SourceRead { .. })
        ));
    }
}
