use crate::error::TagError;
use crate::keys::{SectorKey, derive_keys};
use bytes::Bytes;
use tracing::{debug, info, warn};

/// Low-level access to one physical tag, provided by the host platform.
///
/// A handle represents a single tag in the reader field. Methods that touch
/// the radio return `TagError::IoFailure` on transport problems.
pub trait TagHandle {
    /// UID bytes of the tag, if the platform reported one.
    fn uid(&self) -> Option<&[u8]>;

    /// Open the low-level connection to the tag.
    fn connect(&mut self) -> Result<(), TagError>;

    /// Number of sectors the tag exposes.
    fn sector_count(&self) -> usize;

    /// Number of 16-byte blocks in the given sector.
    fn blocks_in_sector(&self, sector: usize) -> usize;

    /// Authenticate a sector with a key in slot A. `Ok(false)` means the tag
    /// rejected the key.
    fn authenticate(&mut self, sector: usize, key: &SectorKey) -> Result<bool, TagError>;

    /// Read one 16-byte block by absolute block index.
    fn read_block(&mut self, block: usize) -> Result<[u8; 16], TagError>;

    /// Close the connection. Must be safe to call after any failure.
    fn close(&mut self);
}

/// The result of a full tag read: the UID as uppercase hex and the
/// contiguous dump of all readable blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct TagScan {
    pub uid: String,
    pub bytes: Bytes,
}

/// Authenticate and read every sector of a tag into one contiguous buffer.
///
/// The whole read is atomic from the caller's point of view: the first
/// authentication rejection or I/O error aborts the scan and nothing partial
/// is returned. The connection is closed on every exit path. Retrying after
/// a failed scan is the caller's decision, not this layer's.
pub fn read_tag<H: TagHandle>(handle: &mut H) -> Result<TagScan, TagError> {
    let uid = handle.uid().ok_or(TagError::MissingUid)?.to_vec();
    let uid_hex = hex::encode_upper(&uid);
    debug!(uid = %uid_hex, "starting tag read");

    handle.connect()?;
    let result = read_all_sectors(handle, &uid);
    handle.close();

    let bytes = result?;
    info!(uid = %uid_hex, len = bytes.len(), "tag read complete");
    Ok(TagScan { uid: uid_hex, bytes })
}

fn read_all_sectors<H: TagHandle>(handle: &mut H, uid: &[u8]) -> Result<Bytes, TagError> {
    let sector_count = handle.sector_count();
    let keys = derive_keys(uid, sector_count);

    let mut buffer = Vec::new();
    let mut block_index = 0usize;
    for (sector, key) in keys.iter().enumerate() {
        if !handle.authenticate(sector, key)? {
            warn!(sector, "sector rejected its derived key");
            return Err(TagError::AuthenticationFailed(sector));
        }
        for _ in 0..handle.blocks_in_sector(sector) {
            let block = handle.read_block(block_index)?;
            buffer.extend_from_slice(&block);
            block_index += 1;
        }
    }

    Ok(Bytes::from(buffer))
}
