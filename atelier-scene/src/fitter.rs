use glam::Vec3;
use atelier_core::camera::CameraPose;
use atelier_core::config::CameraConfig;
use atelier_core::math::{Aabb, BoundingSphere, Radians};

/// Turns bounding volumes into camera poses.
#[derive(Clone, Copy, Debug)]
pub struct CameraFitter {
    fov_y: Radians,
    fit_padding: f32,
    focus_closeness: f32,
}

impl CameraFitter {
    /// Direction from the target to the camera for a whole model fit, per unit distance.
    const FIT_DIRECTION: Vec3 = Vec3::new(1.0, 0.25, 1.0);
    /// Direction from the target to the camera when focusing a part.
    const FOCUS_DIRECTION: Vec3 = Vec3::new(1.0, 0.15, 1.0);

    pub fn new(fov_y: Radians, fit_padding: f32, focus_closeness: f32) -> Self {
        Self {
            fov_y,
            fit_padding,
            focus_closeness,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.fov_y(), config.fit_padding, config.focus_closeness)
    }

    pub fn fit_distance(&self, radius: f32) -> f32 {
        radius / self.fov_y.half_tan() + radius * self.fit_padding
    }

    pub fn fit_to_bounds(&self, sphere: &BoundingSphere) -> CameraPose {
        let distance = self.fit_distance(sphere.radius);
        CameraPose::new(sphere.center + Self::FIT_DIRECTION * distance, sphere.center)
    }

    pub fn focus_distance(&self, part: &Aabb) -> f32 {
        part.max_dimension() * self.focus_closeness / self.fov_y.half_tan()
    }

    pub fn focus_on_part(&self, part: &Aabb) -> CameraPose {
        let distance = self.focus_distance(part);
        CameraPose::new(part.center + Self::FOCUS_DIRECTION * distance, part.center)
    }
}
