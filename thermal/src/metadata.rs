//! The thermal metadata record and its wire codec.
//!
//! A block is laid out as a fixed 16-byte identity tag, a packed version
//! word, the fixed v0.1 header, two `count`-sized arrays (orientations, then
//! timestamps), the embedded JPEG payload, and the version-gated trailing
//! sections (v0.2 shutter state, v0.3 temperatures, v0.4 alignment). Sections
//! always appear in this order regardless of the minor version that produced
//! them.

use crate::{
    error::Error,
    types::{CamAngle, Calibration, FrameState, GainMode, Quaternion, Version},
    util::{at_least, read_u32, read_u64},
};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Identity tag prefixing every thermal metadata block
/// (UUID a4897b82-4415-4171-b46a-bc8cd524c77e as four big-endian words).
pub const USER_DATA_UUID: [u32; 4] = [0xa4897b82, 0x44154171, 0xb46abc8c, 0xd524c77e];

/// Encoded size of the identity tag.
pub const UUID_SIZE: usize = USER_DATA_UUID.len() * std::mem::size_of::<u32>();

/// Maximum number of camera angle samples in a single block.
pub const MAX_CAM_ANGLES: usize = 50;

/// Size of the fixed v0.1 header (gain mode through camera angle count).
const V0_1_HEADER_SIZE: usize = std::mem::size_of::<u32>() // gain_mode
    + Calibration::SIZE
    + std::mem::size_of::<u32>() // jpeg_data_size
    + 2 * std::mem::size_of::<u32>() // value_min, value_max
    + Quaternion::SIZE // attitude_reference
    + std::mem::size_of::<u32>(); // cam_angles count

/// Size of the section added in v0.2 (shutter state).
const V0_2_DATA_SIZE: usize = std::mem::size_of::<u32>();

/// Size of the section added in v0.3 (temperatures).
const V0_3_DATA_SIZE: usize = 3 * std::mem::size_of::<f64>();

/// Size of the section added in v0.4 (thermal camera alignment).
const V0_4_DATA_SIZE: usize = Quaternion::SIZE;

/// Returns whether `buf` begins with the thermal metadata identity tag and is
/// long enough to also hold a version word.
///
/// This is a cheap admission filter: a `true` result makes no claim that the
/// rest of the buffer is well formed. Use it to distinguish "not this format"
/// from "this format but corrupt."
pub fn is_thermal_metadata(mut buf: &[u8]) -> bool {
    if buf.remaining() < UUID_SIZE + Version::SIZE {
        return false;
    }
    USER_DATA_UUID.iter().all(|&word| buf.get_u32() == word)
}

/// Per-frame thermal camera metadata.
///
/// A flat value type: construct one to encode it, or obtain one from
/// [ThermalMetadata::decode]. Fields gated by minor versions the source block
/// did not carry hold their [Default] values after decode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThermalMetadata {
    /// Format version. Set by [Self::decode]; informational only on encode
    /// (the encoder always stamps [Version::CURRENT]).
    pub version: Version,

    /// Active gain mode for this frame.
    pub gain_mode: GainMode,

    /// Radiometric calibration coefficients for this frame.
    pub calibration: Calibration,

    /// Minimum raw thermal value for this frame.
    pub value_min: u32,

    /// Maximum raw thermal value for this frame.
    pub value_max: u32,

    /// Drone attitude reference quaternion.
    pub attitude_reference: Quaternion,

    /// Camera orientation samples, at most [MAX_CAM_ANGLES].
    pub cam_angles: Vec<CamAngle>,

    /// Scaled raw thermal values encoded as an 8-bit JPEG image. Opaque to
    /// the codec; after decode this shares the input allocation rather than
    /// holding a copy.
    pub jpeg_data: Bytes,

    /// Thermal shutter state. Added in v0.2.
    pub frame_state: FrameState,

    /// Temperature of the focal plane array. Added in v0.3.
    pub fpa_temp: f64,

    /// Temperature measured by the housing thermistor. Added in v0.3.
    pub housing_temp: f64,

    /// Window reflected temperature. Added in v0.3.
    pub window_reflection: f64,

    /// Thermal camera alignment quaternion. Added in v0.4.
    pub thermal_to_visible: Quaternion,
}

impl ThermalMetadata {
    /// Exact number of bytes [Self::encode] produces for this record.
    pub fn encode_size(&self) -> usize {
        UUID_SIZE
            + Version::SIZE
            + V0_1_HEADER_SIZE
            + self.cam_angles.len() * CamAngle::SIZE
            + self.jpeg_data.len()
            + V0_2_DATA_SIZE
            + V0_3_DATA_SIZE
            + V0_4_DATA_SIZE
    }

    /// Checks the invariants the wire format cannot represent.
    fn validate(&self) -> Result<(), Error> {
        if self.cam_angles.len() > MAX_CAM_ANGLES {
            return Err(Error::LengthExceeded(self.cam_angles.len(), MAX_CAM_ANGLES));
        }
        if u32::try_from(self.jpeg_data.len()).is_err() {
            return Err(Error::Invalid("ThermalMetadata", "jpeg data exceeds u32"));
        }
        Ok(())
    }

    /// Serializes this record into a freshly allocated buffer.
    ///
    /// The emitted block always carries [Version::CURRENT], regardless of the
    /// value of this record's `version` field.
    pub fn encode(&self) -> Result<Bytes, Error> {
        let size = self.encode_size();
        let mut buf = BytesMut::with_capacity(size);
        self.encode_into(&mut buf)?;
        assert_eq!(buf.len(), size, "write() did not write expected bytes");
        Ok(buf.freeze())
    }

    /// Serializes this record into a caller-supplied buffer, returning the
    /// number of bytes written.
    ///
    /// Fails with [Error::BufferTooSmall] before writing anything if `buf`
    /// cannot hold [Self::encode_size] bytes: callers presizing with the same
    /// formula never observe a partial write.
    pub fn encode_into(&self, buf: &mut impl BufMut) -> Result<usize, Error> {
        self.validate()?;
        let size = self.encode_size();
        if buf.remaining_mut() < size {
            return Err(Error::BufferTooSmall(buf.remaining_mut(), size));
        }
        self.write(buf);
        Ok(size)
    }

    fn write(&self, buf: &mut impl BufMut) {
        for word in USER_DATA_UUID {
            buf.put_u32(word);
        }
        Version::CURRENT.write(buf);

        // v0.1 header
        self.gain_mode.write(buf);
        self.calibration.write(buf);
        buf.put_u32(self.jpeg_data.len() as u32);
        buf.put_u32(self.value_min);
        buf.put_u32(self.value_max);
        self.attitude_reference.write(buf);
        buf.put_u32(self.cam_angles.len() as u32);

        // v0.1 camera angle samples, all orientations before all timestamps
        for angle in &self.cam_angles {
            angle.orientation.write(buf);
        }
        for angle in &self.cam_angles {
            buf.put_u64(angle.timestamp_us);
        }

        // v0.1 JPEG payload
        buf.put_slice(&self.jpeg_data);

        // v0.2 shutter state
        self.frame_state.write(buf);

        // v0.3 temperatures
        buf.put_f64(self.fpa_temp);
        buf.put_f64(self.housing_temp);
        buf.put_f64(self.window_reflection);

        // v0.4 thermal camera alignment
        self.thermal_to_visible.write(buf);
    }

    /// Parses a metadata block, checking every section against the bytes
    /// remaining before reading it.
    ///
    /// The JPEG payload is taken with [Buf::copy_to_bytes], so decoding from
    /// a [Bytes] buffer shares the input allocation instead of copying.
    /// Bytes past the last section this decoder understands are left
    /// unconsumed and are not an error: producers with a newer minor version
    /// may append sections unknown to this decoder.
    pub fn decode(mut buf: impl Buf) -> Result<Self, Error> {
        // Identity tag and version must be present before anything else is
        // interpreted.
        if buf.remaining() < UUID_SIZE + Version::SIZE {
            return Err(Error::UnrecognizedFormat);
        }
        for word in USER_DATA_UUID {
            if buf.get_u32() != word {
                return Err(Error::UnrecognizedFormat);
            }
        }

        let version = Version::read(&mut buf)?;
        if version.major > Version::CURRENT.major {
            return Err(Error::UnsupportedVersion(version.major));
        }

        // v0.1 header
        let gain_mode = GainMode::read(&mut buf)?;
        let calibration = Calibration::read(&mut buf)?;
        let jpeg_data_size = read_u32(&mut buf)? as usize;
        let value_min = read_u32(&mut buf)?;
        let value_max = read_u32(&mut buf)?;
        let attitude_reference = Quaternion::read(&mut buf)?;
        let count = read_u32(&mut buf)? as usize;
        if count > MAX_CAM_ANGLES {
            return Err(Error::LengthExceeded(count, MAX_CAM_ANGLES));
        }

        // v0.1 camera angle samples
        at_least(&buf, count * CamAngle::SIZE)?;
        let mut orientations = Vec::with_capacity(count);
        for _ in 0..count {
            orientations.push(Quaternion::read(&mut buf)?);
        }
        let mut cam_angles = Vec::with_capacity(count);
        for orientation in orientations {
            cam_angles.push(CamAngle {
                orientation,
                timestamp_us: read_u64(&mut buf)?,
            });
        }

        // v0.1 JPEG payload
        at_least(&buf, jpeg_data_size)?;
        let jpeg_data = buf.copy_to_bytes(jpeg_data_size);

        // Trailing sections are gated by the block's minor version: absent
        // sections keep their default values and consume no bytes. Minor
        // versions above the current one are read as the current one.
        let mut frame_state = FrameState::default();
        let mut fpa_temp = 0.0;
        let mut housing_temp = 0.0;
        let mut window_reflection = 0.0;
        let mut thermal_to_visible = Quaternion::default();

        // v0.2 shutter state
        if version.minor >= 2 {
            frame_state = FrameState::read(&mut buf)?;
        }

        // v0.3 temperatures
        if version.minor >= 3 {
            at_least(&buf, V0_3_DATA_SIZE)?;
            fpa_temp = buf.get_f64();
            housing_temp = buf.get_f64();
            window_reflection = buf.get_f64();
        }

        // v0.4 thermal camera alignment
        if version.minor >= 4 {
            thermal_to_visible = Quaternion::read(&mut buf)?;
        }

        Ok(Self {
            version,
            gain_mode,
            calibration,
            value_min,
            value_max,
            attitude_reference,
            cam_angles,
            jpeg_data,
            frame_state,
            fpa_temp,
            housing_temp,
            window_reflection,
            thermal_to_visible,
        })
    }
}
