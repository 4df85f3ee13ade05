//! Wire framing for the compressed stream.
//!
//! Responsibilities:
//! - Define the frame record and its errors
//! - Encode frames as `[u32 LE length][payload]`
//! - Decode frames with strict truncation checks
//!
//! Non-responsibilities:
//! - Compression
//! - Ordering (frame order is chunk order, decided upstream)
//! - Parallelism

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    Frame,
    FrameView,
    FrameError,
};
pub use encode::{encode_frame, write_frame, FrameWriter};
pub use decode::{decode_all, decode_frame, read_frame, FrameReader};
