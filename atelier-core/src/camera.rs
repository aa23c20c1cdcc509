use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use crate::math::{Degree, Radians};

// Atelier world space coordinate system (right-hand side, y up)
//
//                y
//                ^
//                |
//                |
//                ----------> x
//               /
//              z
//

/// Where the camera sits and the point it orbits around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 3.0, 5.0),
            target: Vec3::ZERO,
        }
    }
}

impl CameraPose {
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Componentwise linear interpolation of both position and target.
    pub fn lerp(&self, rhs: &CameraPose, factor: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(rhs.position, factor),
            target: self.target.lerp(rhs.target, factor),
        }
    }

    pub fn abs_diff_eq(&self, rhs: &CameraPose, max_abs_diff: f32) -> bool {
        self.position.abs_diff_eq(rhs.position, max_abs_diff)
            && self.target.abs_diff_eq(rhs.target, max_abs_diff)
    }

    /// Rotate the position around the target about the world up axis.
    pub fn orbit_yaw(&self, angle: Radians) -> CameraPose {
        let offset = self.position - self.target;
        let rotated = Quat::from_axis_angle(Camera::UP, angle.into()) * offset;
        CameraPose {
            position: self.target + rotated,
            target: self.target,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    pose: CameraPose,
    fov_y: Radians,
    aspect_ratio: f32,
    z_near: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Degree::from(75.0).into(), 16.0 / 9.0, Self::Z_NEAR)
    }
}

impl Camera {
    pub const Z_NEAR: f32 = 0.1;
    pub const UP: Vec3 = Vec3::Y;

    pub fn new(fov_y: Radians, aspect_ratio: f32, z_near: f32) -> Self {
        Self {
            pose: CameraPose::default(),
            fov_y,
            aspect_ratio,
            z_near: z_near.max(0.0001),
        }
    }

    #[inline]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    #[inline]
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }

    #[inline]
    pub fn fov_y(&self) -> Radians {
        self.fov_y
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    pub fn location(&self) -> Vec3 {
        self.pose.position
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.pose.position, self.pose.target, Self::UP)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_infinite_reverse_rh(self.fov_y.into(), self.aspect_ratio, self.z_near)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}
