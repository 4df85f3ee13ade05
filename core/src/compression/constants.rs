/// Stable codec IDs (u16).
///
/// The stream itself carries no codec id; these ids only name codecs in
/// configuration and telemetry.
pub mod codec_ids {
    pub const DEFLATE: u16 = 0x0001;
    pub const ZSTD: u16    = 0x0002;
    pub const LZ4: u16     = 0x0003;
}

/// Default compression levels (balanced).
pub const DEFAULT_LEVEL_DEFLATE: i32 = 6;
pub const DEFAULT_LEVEL_ZSTD: i32 = 6;
pub const DEFAULT_LEVEL_LZ4: i32 = 0; // block mode has no levels

/// Accepted level ranges per codec.
pub const LEVEL_RANGE_DEFLATE: (i32, i32) = (0, 9);
pub const LEVEL_RANGE_ZSTD: (i32, i32) = (1, 22);
