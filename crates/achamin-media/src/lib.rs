//! Audio mixing for the Achamin backend.
//!
//! Blends narration audio with a background-music track via FFmpeg.
//! Availability of the tool is probed, never assumed; all staging files are
//! scoped and removed on every exit path.

pub mod error;
pub mod mixer;

pub use error::{MediaError, MediaResult};
pub use mixer::{FfmpegMixer, MixEngine, MixGains};
