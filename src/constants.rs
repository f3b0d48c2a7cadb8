// Protocol constants for the spool tag layout

/// Size of one addressable tag block (16 bytes)
pub const BLOCK_SIZE: usize = 16;

/// Length of a per-sector authentication key (6 bytes, key slot A)
pub const KEY_LENGTH: usize = 6;

/// Fixed master secret used as HKDF input key material
pub const MASTER_SECRET: [u8; 16] = [
    0x9a, 0x75, 0x9c, 0xf2, 0xc4, 0xf7, 0xca, 0xff, 0x22, 0x2c, 0xb9, 0x76, 0x9b, 0x41, 0xbc, 0x96,
];

/// HKDF info/context label for sector key derivation
pub const KDF_CONTEXT: &[u8] = b"RFID-A\0";

/// Format of the production timestamp text field on the tag
pub const DATETIME_PATTERN: &str = "%Y_%m_%d_%H_%M";

/// Length of the production timestamp text field (16 bytes, NUL padded)
pub const DATETIME_FIELD_LEN: usize = 16;

/// Minimum dump size accepted by the record decoder (5 blocks)
pub const MIN_RECORD_BYTES: usize = 5 * BLOCK_SIZE;

/// Decimal places the filament diameter is rounded to
pub const DIAMETER_DECIMALS: u32 = 2;
