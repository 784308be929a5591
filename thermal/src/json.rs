//! Projection of decoded records into JSON documents.

use crate::{metadata::ThermalMetadata, types::Quaternion};
use serde_json::{json, Value};

fn quaternion_value(quat: &Quaternion) -> Value {
    json!({
        "x": quat.x,
        "y": quat.y,
        "z": quat.z,
        "w": quat.w,
    })
}

impl ThermalMetadata {
    /// Projects every field of this record into a JSON object for inspection
    /// and debugging.
    ///
    /// Pure field copies plus the enum name tables; no decoding logic. Camera
    /// angle orientations and timestamps are emitted as two arrays paired by
    /// index, in original order.
    pub fn to_json(&self) -> Value {
        json!({
            "version_major": self.version.major,
            "version_minor": self.version.minor,
            "gain_mode": self.gain_mode.name(),
            "calib_r": self.calibration.r,
            "calib_b": self.calibration.b,
            "calib_f": self.calibration.f,
            "calib_o": self.calibration.o,
            "calib_tau_win": self.calibration.tau_win,
            "calib_t_win": self.calibration.t_win,
            "calib_t_bg": self.calibration.t_bg,
            "calib_emissivity": self.calibration.emissivity,
            "jpeg_data_size": self.jpeg_data.len(),
            "value_min": self.value_min,
            "value_max": self.value_max,
            "attitude_reference_quat": quaternion_value(&self.attitude_reference),
            "cam_angles": self
                .cam_angles
                .iter()
                .map(|angle| quaternion_value(&angle.orientation))
                .collect::<Vec<_>>(),
            "cam_angles_timestamps": self
                .cam_angles
                .iter()
                .map(|angle| angle.timestamp_us)
                .collect::<Vec<_>>(),
            "frame_state": self.frame_state.name(),
            "fpa_temp": self.fpa_temp,
            "housing_temp": self.housing_temp,
            "window_reflection": self.window_reflection,
            "thermal_to_visible_quat": quaternion_value(&self.thermal_to_visible),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CamAngle, FrameState, GainMode};
    use bytes::Bytes;

    #[test]
    fn test_projects_every_field() {
        let meta = ThermalMetadata {
            gain_mode: GainMode::FlirHighGain,
            value_min: 10,
            value_max: 870,
            cam_angles: vec![CamAngle {
                orientation: Quaternion {
                    x: 0.5,
                    y: 0.0,
                    z: 0.0,
                    w: 1.0,
                },
                timestamp_us: 17,
            }],
            jpeg_data: Bytes::from_static(&[0xff, 0xd8]),
            frame_state: FrameState::ShutterInProgress,
            fpa_temp: 300.25,
            ..Default::default()
        };

        let json = meta.to_json();
        assert_eq!(json["version_major"], 0);
        assert_eq!(json["version_minor"], 4);
        assert_eq!(json["gain_mode"], "FLIR_HIGH_GAIN");
        assert_eq!(json["calib_r"], 0.0);
        assert_eq!(json["jpeg_data_size"], 2);
        assert_eq!(json["value_min"], 10);
        assert_eq!(json["value_max"], 870);
        assert_eq!(json["attitude_reference_quat"]["w"], 0.0);
        assert_eq!(json["cam_angles"][0]["x"], 0.5);
        assert_eq!(json["cam_angles_timestamps"][0], 17);
        assert_eq!(json["frame_state"], "SHUTTER_IN_PROGRESS");
        assert_eq!(json["fpa_temp"], 300.25);
        assert_eq!(json["thermal_to_visible_quat"]["z"], 0.0);
    }

    #[test]
    fn test_arrays_keep_order() {
        let meta = ThermalMetadata {
            cam_angles: (0..5)
                .map(|i| CamAngle {
                    orientation: Quaternion {
                        x: i as f32,
                        ..Default::default()
                    },
                    timestamp_us: 1000 + i,
                })
                .collect(),
            ..Default::default()
        };

        let json = meta.to_json();
        for i in 0..5usize {
            assert_eq!(json["cam_angles"][i]["x"], i as f64);
            assert_eq!(json["cam_angles_timestamps"][i], 1000 + i as u64);
        }
    }
}
