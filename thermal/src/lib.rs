//! Encode and decode thermal camera frame metadata.
//!
//! # Overview
//!
//! A thermal camera frame carries per-frame metadata as an opaque user-data
//! block inside a video elementary stream. This crate implements the versioned
//! binary layout of that block, designed to efficiently and safely:
//! - Recognize whether an arbitrary buffer is such a block
//! - Serialize an in-memory [ThermalMetadata] record into network-byte-order
//!   bytes
//! - Parse untrusted buffers back into validated records, validating every
//!   section against the bytes remaining before reading it
//!
//! # Wire Format
//!
//! A block starts with a fixed 16-byte identity tag and a packed
//! major/minor [Version], followed by the v0.1 header (gain mode, calibration
//! coefficients, raw value range, attitude reference), two parallel
//! variable-length arrays of camera orientation samples, and the embedded
//! JPEG thermal payload. Later minor versions append optional trailing
//! sections in a fixed order: shutter state (v0.2), temperature readings
//! (v0.3), and the thermal-to-visible alignment quaternion (v0.4).
//!
//! The encoder always emits [Version::CURRENT]. The decoder accepts blocks
//! written by older minor versions (absent sections keep documented default
//! values), treats newer minor versions as the current one, and rejects newer
//! major versions outright. All multi-byte fields, including float and double
//! bit patterns, are big endian.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use thermal_metadata::{is_thermal_metadata, GainMode, ThermalMetadata};
//!
//! let meta = ThermalMetadata {
//!     gain_mode: GainMode::FlirHighGain,
//!     value_min: 10,
//!     value_max: 870,
//!     jpeg_data: Bytes::from_static(&[0xff, 0xd8, 0xff, 0xd9]),
//!     ..Default::default()
//! };
//!
//! let encoded = meta.encode().unwrap();
//! assert!(is_thermal_metadata(&encoded));
//! assert_eq!(encoded.len(), meta.encode_size());
//!
//! let decoded = ThermalMetadata::decode(encoded).unwrap();
//! assert_eq!(decoded, meta);
//! ```

mod error;
mod json;
mod metadata;
mod types;
mod util;

pub use error::Error;
pub use metadata::{
    is_thermal_metadata, ThermalMetadata, MAX_CAM_ANGLES, USER_DATA_UUID, UUID_SIZE,
};
pub use types::{CamAngle, Calibration, FrameState, GainMode, Quaternion, Version};
