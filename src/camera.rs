use glam::{Mat4, Quat, Vec2, Vec3};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Elevation limit as |dot| of the camera direction with world up;
/// keeps the orbit away from the poles where the up vector degenerates
const MAX_UP_DOT: f32 = 0.98;

/// Orbit center: the ribbon hangs around the world origin
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;

/// Vertical field of view in degrees
pub const FOV_Y_DEGREES: f32 = 55.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

/// The camera orbits a fixed target point. Its position is determined by
/// rotating a "back" vector (0, 0, distance) by the orientation
/// quaternion.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    /// Quaternion representing the camera's orbital rotation
    pub orientation: Quat,
    /// Distance from the target point
    pub distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        // Head-on view down the -Z axis, eye at (0, 0, 15)
        Self {
            orientation: Quat::IDENTITY,
            distance: 15.0,
        }
    }
}

impl Camera {
    pub fn new(orientation: Quat, distance: f32) -> Self {
        Self {
            orientation,
            distance,
        }
    }

    /// Compute a new camera with the rotation applied, or the original
    /// camera if the rotation would push the orbit past its elevation
    /// limits.
    pub fn with_rotation(self, axis: Vec3, angle: f32) -> Camera {
        let axis = axis.normalize_or_zero();
        if axis.length_squared() < 0.5 {
            return self; // Invalid axis
        }

        let delta = Quat::from_axis_angle(axis, angle);
        let new_orientation = (delta * self.orientation).normalize();

        let new_dir = new_orientation * Vec3::Z;
        if new_dir.y.abs() <= MAX_UP_DOT {
            Camera {
                orientation: new_orientation,
                ..self
            }
        } else {
            // Allow rotations that move back toward the valid range
            let old_dir = self.orientation * Vec3::Z;
            if new_dir.y.abs() < old_dir.y.abs() {
                Camera {
                    orientation: new_orientation,
                    ..self
                }
            } else {
                self
            }
        }
    }

    /// Compute the camera eye position
    pub fn eye_position(&self) -> Vec3 {
        let offset = self.orientation * Vec3::new(0.0, 0.0, self.distance);
        CAMERA_TARGET + offset
    }

    /// Compute the camera's local right axis
    ///
    /// This is the axis to rotate around for up/down elevation changes.
    pub fn right_axis(&self) -> Vec3 {
        let eye = self.eye_position();
        let forward = (CAMERA_TARGET - eye).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        // Return X axis if degenerate (looking straight up/down)
        if right.length_squared() < 0.5 {
            Vec3::X
        } else {
            right
        }
    }

    /// Compute the view matrix
    ///
    /// Uses world up (Y axis) to ensure orbit behavior without roll.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), CAMERA_TARGET, Vec3::Y)
    }

    /// Compute the projection matrix for the given viewport aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR)
    }

    /// Unproject a normalized-device-coordinate point (x, y in [-1, 1])
    /// at mid depth back into world space. The result lies on the pointer
    /// ray through the scene; intersect it with a plane to pick a target.
    pub fn unproject_ndc(&self, ndc: Vec2, aspect: f32) -> Vec3 {
        let view_proj = self.projection_matrix(aspect) * self.view_matrix();
        view_proj
            .inverse()
            .project_point3(Vec3::new(ndc.x, ndc.y, 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_head_on() {
        let camera = Camera::default();
        let eye = camera.eye_position();
        assert!(
            eye.distance(Vec3::new(0.0, 0.0, 15.0)) < 1e-5,
            "default eye should sit at (0, 0, 15), got {:?}",
            eye
        );
    }

    #[test]
    fn test_camera_rotation_clamping() {
        let camera = Camera::default();

        // A quarter turn would put the camera at the pole; the rotation
        // must be rejected and the orbit left where it was
        let rotated = camera.with_rotation(Vec3::X, -std::f32::consts::FRAC_PI_2);
        assert_eq!(rotated.orientation, camera.orientation);

        let dir = rotated.orientation * Vec3::Z;
        assert!(
            dir.y.abs() <= MAX_UP_DOT + 1e-4,
            "camera should stay below the poles, got up_dot {}",
            dir.y
        );
    }

    #[test]
    fn test_rotation_rejects_degenerate_axis() {
        let camera = Camera::default();
        let rotated = camera.with_rotation(Vec3::ZERO, 0.5);
        assert_eq!(rotated.orientation, camera.orientation);
    }

    #[test]
    fn test_view_matrix_is_finite() {
        let camera = Camera::default();
        for val in camera.view_matrix().to_cols_array() {
            assert!(!val.is_nan(), "view matrix should not contain NaN");
        }
    }

    #[test]
    fn test_unproject_center_lies_on_view_axis() {
        let camera = Camera::default();
        let picked = camera.unproject_ndc(Vec2::ZERO, 16.0 / 9.0);

        // Screen center unprojects onto the eye->target axis
        assert!(picked.x.abs() < 1e-3, "x should be ~0, got {}", picked.x);
        assert!(picked.y.abs() < 1e-3, "y should be ~0, got {}", picked.y);
        assert!(
            picked.z < camera.eye_position().z,
            "picked point should be in front of the eye"
        );
    }

    #[test]
    fn test_unproject_respects_quadrants() {
        let camera = Camera::default();
        let picked = camera.unproject_ndc(Vec2::new(0.5, 0.5), 1.0);
        assert!(picked.x > 0.0 && picked.y > 0.0);

        let picked = camera.unproject_ndc(Vec2::new(-0.5, -0.5), 1.0);
        assert!(picked.x < 0.0 && picked.y < 0.0);
    }
}

// Orbit-control hooks for the JS host
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn update_camera(azimuth: f32, elevation: f32, distance: f32) {
    let yaw_quat = Quat::from_rotation_y(azimuth);
    let pitch_quat = Quat::from_rotation_x(elevation);
    let orientation = (yaw_quat * pitch_quat).normalize();

    crate::state::with_app_state_mut(|app| {
        app.camera = Camera {
            orientation,
            distance,
        };
    });
}

/// Apply an incremental rotation around a world-space axis, clamped to
/// the orbit's elevation limits.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn rotate_camera(axis_x: f32, axis_y: f32, axis_z: f32, angle: f32) {
    let axis = Vec3::new(axis_x, axis_y, axis_z);
    crate::state::with_app_state_mut(|app| {
        app.camera = app.camera.with_rotation(axis, angle);
    });
}

/// Get the camera's right axis (for vertical drag rotation)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn get_camera_right_axis() -> Vec<f32> {
    crate::state::with_app_state(|app| app.camera.right_axis().to_array().to_vec())
        .unwrap_or_else(|| Vec3::X.to_array().to_vec())
}
