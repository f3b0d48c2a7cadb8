//! Common test utilities and shared fixtures

// Allow unused items since this module is shared across multiple test files
// and not every helper is used in every file
#[allow(unused_imports)]
pub use bytes::Bytes;
#[allow(unused_imports)]
pub use spooltag_rs::catalog::{CatalogMatch, FilamentCatalogEntry};
#[allow(unused_imports)]
pub use spooltag_rs::error::{DecodeError, TagError};
#[allow(unused_imports)]
pub use spooltag_rs::keys::{SectorKey, derive_keys};
#[allow(unused_imports)]
pub use spooltag_rs::reader::{TagHandle, TagScan, read_tag};
#[allow(unused_imports)]
pub use spooltag_rs::record::DecodedFilamentRecord;

use std::io;

/// Initialize a tracing subscriber for tests that exercise the logging
/// reader path. Safe to call more than once.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Copy `data` into the dump starting at the given block boundary.
#[allow(dead_code)]
pub fn put_block(buf: &mut [u8], block: usize, data: &[u8]) {
    buf[block * 16..block * 16 + data.len()].copy_from_slice(data);
}

/// A 15-block dump with known values at every field offset the record
/// decoder reads: "PLA" / "PLA Basic", color C12E1FFF, 250 g, 1.75 mm,
/// 330 m, tray UID 000102...0F, produced 2024-01-15 10:30.
#[allow(dead_code)]
pub fn sample_tag_dump() -> Vec<u8> {
    let mut buf = vec![0u8; 15 * 16];
    put_block(&mut buf, 2, b"PLA");
    put_block(&mut buf, 4, b"PLA Basic");

    let mut block5 = [0u8; 16];
    block5[..4].copy_from_slice(&[0xC1, 0x2E, 0x1F, 0xFF]);
    block5[4..6].copy_from_slice(&250u16.to_le_bytes());
    block5[8..12].copy_from_slice(&1.75f32.to_le_bytes());
    put_block(&mut buf, 5, &block5);

    let tray_uid: Vec<u8> = (0u8..16).collect();
    put_block(&mut buf, 9, &tray_uid);

    put_block(&mut buf, 12, b"2024_01_15_10_30");

    let mut block14 = [0u8; 16];
    block14[4..6].copy_from_slice(&330u16.to_le_bytes());
    put_block(&mut buf, 14, &block14);

    buf
}

/// Build a catalog entry with the fields the matching logic looks at.
#[allow(dead_code)]
pub fn catalog_entry(
    id: &str,
    name: &str,
    material: &str,
    color_hex: Option<&str>,
    translucent: bool,
) -> FilamentCatalogEntry {
    FilamentCatalogEntry {
        id: id.to_string(),
        name: name.to_string(),
        material: material.to_string(),
        empty_spool_weight_g: 250,
        color_hex: color_hex.map(String::from),
        translucent,
        glow: false,
        density: 1.24,
    }
}

/// Scriptable in-memory tag for reader tests. Records every key it saw,
/// every block read and whether the connection was closed.
#[allow(dead_code)]
pub struct MockTag {
    pub uid: Option<Vec<u8>>,
    pub sectors: usize,
    pub blocks_per_sector: usize,
    pub reject_sector: Option<usize>,
    pub fail_read_at: Option<usize>,
    pub seen_keys: Vec<SectorKey>,
    pub blocks_read: Vec<usize>,
    pub connected: bool,
    pub closed: bool,
}

#[allow(dead_code)]
impl MockTag {
    pub fn new(uid: &[u8], sectors: usize) -> Self {
        MockTag {
            uid: Some(uid.to_vec()),
            sectors,
            blocks_per_sector: 4,
            reject_sector: None,
            fail_read_at: None,
            seen_keys: Vec::new(),
            blocks_read: Vec::new(),
            connected: false,
            closed: false,
        }
    }
}

impl TagHandle for MockTag {
    fn uid(&self) -> Option<&[u8]> {
        self.uid.as_deref()
    }

    fn connect(&mut self) -> Result<(), TagError> {
        self.connected = true;
        Ok(())
    }

    fn sector_count(&self) -> usize {
        self.sectors
    }

    fn blocks_in_sector(&self, _sector: usize) -> usize {
        self.blocks_per_sector
    }

    fn authenticate(&mut self, sector: usize, key: &SectorKey) -> Result<bool, TagError> {
        self.seen_keys.push(*key);
        Ok(self.reject_sector != Some(sector))
    }

    fn read_block(&mut self, block: usize) -> Result<[u8; 16], TagError> {
        if self.fail_read_at == Some(block) {
            return Err(io::Error::other("radio glitch").into());
        }
        self.blocks_read.push(block);
        Ok([block as u8; 16])
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
