//! Value types carried by a thermal metadata record.

use crate::{
    error::Error,
    util::{at_least, read_u32},
};
use bytes::{Buf, BufMut};
use std::fmt;
use tracing::warn;

/// Format version of a metadata block, packed on the wire as a single `u32`
/// with the major number in the high 16 bits and the minor number in the low
/// 16 bits.
///
/// The major number gates compatibility: a decoder rejects any block with a
/// major number above its own. The minor number gates the optional trailing
/// sections added after v0.1.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
}

impl Version {
    /// Version stamped into every encoded block.
    pub const CURRENT: Self = Self { major: 0, minor: 4 };

    /// Encoded size of a version field.
    pub const SIZE: usize = std::mem::size_of::<u32>();

    pub(crate) fn write(&self, buf: &mut impl BufMut) {
        buf.put_u32((self.major as u32) << 16 | self.minor as u32);
    }

    pub(crate) fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        let packed = read_u32(buf)?;
        Ok(Self {
            major: (packed >> 16) as u16,
            minor: (packed & 0xffff) as u16,
        })
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Active thermal sensor gain mode for a frame, serialized as a `u32`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GainMode {
    /// FLIR low gain mode.
    #[default]
    FlirLowGain = 0,

    /// FLIR high gain mode.
    FlirHighGain = 1,
}

impl GainMode {
    /// Looks up a gain mode by name, ignoring case.
    ///
    /// Unrecognized names fall back to [GainMode::FlirLowGain] with a logged
    /// warning instead of failing.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("FLIR_LOW_GAIN") {
            Self::FlirLowGain
        } else if name.eq_ignore_ascii_case("FLIR_HIGH_GAIN") {
            Self::FlirHighGain
        } else {
            warn!(name, "unknown gain mode");
            Self::FlirLowGain
        }
    }

    /// Returns the canonical name of this gain mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FlirLowGain => "FLIR_LOW_GAIN",
            Self::FlirHighGain => "FLIR_HIGH_GAIN",
        }
    }

    pub(crate) fn write(&self, buf: &mut impl BufMut) {
        buf.put_u32(*self as u32);
    }

    pub(crate) fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        match read_u32(buf)? {
            0 => Ok(Self::FlirLowGain),
            1 => Ok(Self::FlirHighGain),
            _ => Err(Error::Invalid("GainMode", "unknown discriminant")),
        }
    }
}

impl fmt::Display for GainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Thermal frame shutter state, serialized as a `u32`. Added in v0.2; blocks
/// older than that decode as [FrameState::Valid].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FrameState {
    /// Valid thermal frame.
    #[default]
    Valid = 0,

    /// Shutter pending.
    ShutterDesired = 1,

    /// Shutter in progress.
    ShutterInProgress = 2,

    /// Unexpected state.
    Unexpected = 3,
}

impl FrameState {
    /// Looks up a frame state by name, ignoring case.
    ///
    /// Unrecognized names fall back to [FrameState::Unexpected] with a logged
    /// warning instead of failing.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("VALID") {
            Self::Valid
        } else if name.eq_ignore_ascii_case("SHUTTER_DESIRED") {
            Self::ShutterDesired
        } else if name.eq_ignore_ascii_case("SHUTTER_IN_PROGRESS") {
            Self::ShutterInProgress
        } else if name.eq_ignore_ascii_case("UNEXPECTED") {
            Self::Unexpected
        } else {
            warn!(name, "unknown frame state");
            Self::Unexpected
        }
    }

    /// Returns the canonical name of this frame state.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::ShutterDesired => "SHUTTER_DESIRED",
            Self::ShutterInProgress => "SHUTTER_IN_PROGRESS",
            Self::Unexpected => "UNEXPECTED",
        }
    }

    pub(crate) fn write(&self, buf: &mut impl BufMut) {
        buf.put_u32(*self as u32);
    }

    pub(crate) fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        match read_u32(buf)? {
            0 => Ok(Self::Valid),
            1 => Ok(Self::ShutterDesired),
            2 => Ok(Self::ShutterInProgress),
            3 => Ok(Self::Unexpected),
            _ => Err(Error::Invalid("FrameState", "unknown discriminant")),
        }
    }
}

impl fmt::Display for FrameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 4-component orientation value (x, y, z, w).
///
/// Treated as an opaque group of four floats; no geometric interpretation is
/// performed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Encoded size of a quaternion.
    pub const SIZE: usize = 4 * std::mem::size_of::<f32>();

    pub(crate) fn write(&self, buf: &mut impl BufMut) {
        buf.put_f32(self.x);
        buf.put_f32(self.y);
        buf.put_f32(self.z);
        buf.put_f32(self.w);
    }

    pub(crate) fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        at_least(buf, Self::SIZE)?;
        Ok(Self {
            x: buf.get_f32(),
            y: buf.get_f32(),
            z: buf.get_f32(),
            w: buf.get_f32(),
        })
    }
}

/// Per-frame radiometric calibration coefficients.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Calibration {
    /// R calibration value.
    pub r: f64,

    /// B calibration value.
    pub b: f64,

    /// F calibration value.
    pub f: f64,

    /// O calibration value.
    pub o: f64,

    /// tauWin calibration value.
    pub tau_win: f64,

    /// tWin calibration value.
    pub t_win: f64,

    /// tBg calibration value.
    pub t_bg: f64,

    /// Emissivity calibration value.
    pub emissivity: f64,
}

impl Calibration {
    /// Encoded size of the calibration coefficients.
    pub const SIZE: usize = 8 * std::mem::size_of::<f64>();

    pub(crate) fn write(&self, buf: &mut impl BufMut) {
        buf.put_f64(self.r);
        buf.put_f64(self.b);
        buf.put_f64(self.f);
        buf.put_f64(self.o);
        buf.put_f64(self.tau_win);
        buf.put_f64(self.t_win);
        buf.put_f64(self.t_bg);
        buf.put_f64(self.emissivity);
    }

    pub(crate) fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        at_least(buf, Self::SIZE)?;
        Ok(Self {
            r: buf.get_f64(),
            b: buf.get_f64(),
            f: buf.get_f64(),
            o: buf.get_f64(),
            tau_win: buf.get_f64(),
            t_win: buf.get_f64(),
            t_bg: buf.get_f64(),
            emissivity: buf.get_f64(),
        })
    }
}

/// A camera orientation sample paired with its capture timestamp.
///
/// On the wire the orientations and timestamps of a block are carried as two
/// parallel arrays of equal length; pairing them per element keeps the
/// lengths equal by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CamAngle {
    /// Camera orientation quaternion.
    pub orientation: Quaternion,

    /// Capture timestamp in microseconds.
    pub timestamp_us: u64,
}

impl CamAngle {
    /// Encoded size contributed by one sample (orientation plus timestamp).
    pub const SIZE: usize = Quaternion::SIZE + std::mem::size_of::<u64>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use test_case::test_case;

    #[test]
    fn test_version_packing() {
        let mut buf = BytesMut::new();
        let version = Version {
            major: 0x0102,
            minor: 0x0304,
        };
        version.write(&mut buf);
        assert_eq!(buf.as_ref(), [0x01, 0x02, 0x03, 0x04]);

        let mut encoded = buf.freeze();
        assert_eq!(Version::read(&mut encoded).unwrap(), version);
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::CURRENT.to_string(), "0.4");
        assert_eq!(Version { major: 2, minor: 0 }.to_string(), "2.0");
    }

    #[test_case("flir_high_gain" ; "lowercase")]
    #[test_case("FLIR_HIGH_GAIN" ; "uppercase")]
    #[test_case("Flir_High_Gain" ; "mixed_case")]
    fn test_gain_mode_name_ignores_case(name: &str) {
        assert_eq!(GainMode::from_name(name), GainMode::FlirHighGain);
    }

    #[test]
    fn test_gain_mode_unknown_name() {
        assert_eq!(GainMode::from_name("quux"), GainMode::FlirLowGain);
    }

    #[test]
    fn test_frame_state_names() {
        let states = [
            FrameState::Valid,
            FrameState::ShutterDesired,
            FrameState::ShutterInProgress,
            FrameState::Unexpected,
        ];
        for state in states {
            assert_eq!(FrameState::from_name(state.name()), state);
            assert_eq!(FrameState::from_name(&state.name().to_lowercase()), state);
        }
    }

    #[test]
    fn test_frame_state_unknown_name() {
        assert_eq!(FrameState::from_name("quux"), FrameState::Unexpected);
    }

    #[test]
    fn test_quaternion_big_endian() {
        let quat = Quaternion {
            x: 1.0,
            y: -1.0,
            z: 0.0,
            w: 0.5,
        };
        let mut buf = BytesMut::new();
        quat.write(&mut buf);
        assert_eq!(buf.len(), Quaternion::SIZE);
        assert_eq!(&buf[0..4], [0x3f, 0x80, 0x00, 0x00]); // big-endian IEEE 754
        assert_eq!(&buf[4..8], [0xbf, 0x80, 0x00, 0x00]);

        let mut encoded = buf.freeze();
        assert_eq!(Quaternion::read(&mut encoded).unwrap(), quat);
    }

    #[test]
    fn test_truncated_reads() {
        assert!(matches!(
            Version::read(&mut &[0u8; 3][..]),
            Err(Error::EndOfBuffer)
        ));
        assert!(matches!(
            Quaternion::read(&mut &[0u8; 15][..]),
            Err(Error::EndOfBuffer)
        ));
        assert!(matches!(
            Calibration::read(&mut &[0u8; 63][..]),
            Err(Error::EndOfBuffer)
        ));
    }

    #[test]
    fn test_unknown_discriminants() {
        let raw = 2u32.to_be_bytes();
        assert!(matches!(
            GainMode::read(&mut &raw[..]),
            Err(Error::Invalid("GainMode", _))
        ));

        let raw = 4u32.to_be_bytes();
        assert!(matches!(
            FrameState::read(&mut &raw[..]),
            Err(Error::Invalid("FrameState", _))
        ));
    }

    #[test]
    fn test_enum_wire_values() {
        let mut buf = BytesMut::new();
        GainMode::FlirHighGain.write(&mut buf);
        FrameState::ShutterInProgress.write(&mut buf);
        assert_eq!(buf.as_ref(), [0, 0, 0, 1, 0, 0, 0, 2]);
    }
}
