use crate::constants::{KDF_CONTEXT, KEY_LENGTH, MASTER_SECRET};
use hkdf::Hkdf;
use sha2::Sha256;

/// A single 6-byte sector authentication key (key slot A).
pub type SectorKey = [u8; KEY_LENGTH];

/// Derive the per-sector key schedule for a tag.
///
/// HKDF-SHA256 with the tag UID as salt, the fixed master secret as input
/// key material and the `"RFID-A\0"` label as context. The output stream is
/// split into consecutive 6-byte keys, one per sector index in order.
/// Deterministic: the same UID always yields the same schedule.
pub fn derive_keys(uid: &[u8], sector_count: usize) -> Vec<SectorKey> {
    let hkdf = Hkdf::<Sha256>::new(Some(uid), &MASTER_SECRET);
    let mut okm = vec![0u8; sector_count * KEY_LENGTH];
    // Expand only fails when the requested length exceeds 255 hash blocks,
    // far beyond any real sector count.
    hkdf.expand(KDF_CONTEXT, &mut okm)
        .expect("HKDF output length within bounds");

    okm.chunks_exact(KEY_LENGTH)
        .map(|chunk| chunk.try_into().expect("chunk length is KEY_LENGTH"))
        .collect()
}
