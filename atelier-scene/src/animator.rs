//! Frame-driven camera animation.
//!
//! The animator is a two state machine, `Idle` and `Animating`, advanced
//! once per rendered frame. While animating, new fit and focus requests
//! are dropped. A reset always interrupts and starts from wherever the
//! camera currently is.

use log::debug;
use atelier_core::camera::CameraPose;
use atelier_core::config::CameraConfig;
use atelier_core::math::Radians;

const POSE_EPSILON: f32 = 1e-5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    /// Frame the whole model.
    Fit,
    /// Move close to a single part.
    Focus,
    /// Back to the full view. Has priority over everything else.
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraAnimation {
    Idle,
    Animating {
        from: CameraPose,
        to: CameraPose,
        progress: f32,
        kind: AnimationKind,
    },
}

/// Result of one [`CameraAnimator::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationStep {
    Idle,
    Moved { progress: f32 },
    Finished(AnimationKind),
}

#[derive(Debug, Clone)]
pub struct CameraAnimator {
    pose: CameraPose,
    state: CameraAnimation,
    focus_step: f32,
    reset_step: f32,
}

impl CameraAnimator {
    pub fn new(pose: CameraPose, focus_step: f32, reset_step: f32) -> Self {
        Self {
            pose,
            state: CameraAnimation::Idle,
            focus_step: focus_step.max(f32::EPSILON),
            reset_step: reset_step.max(f32::EPSILON),
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.default_pose(), config.focus_step, config.reset_step)
    }

    #[inline]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    #[inline]
    pub fn state(&self) -> CameraAnimation {
        self.state
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        matches!(self.state, CameraAnimation::Animating { .. })
    }

    pub fn destination(&self) -> Option<CameraPose> {
        match self.state {
            CameraAnimation::Idle => None,
            CameraAnimation::Animating { to, .. } => Some(to),
        }
    }

    fn step(&self, kind: AnimationKind) -> f32 {
        match kind {
            AnimationKind::Fit | AnimationKind::Focus => self.focus_step,
            AnimationKind::Reset => self.reset_step,
        }
    }

    /// Schedule an animation toward `to`. Returns whether it was accepted.
    pub fn request(&mut self, kind: AnimationKind, to: CameraPose) -> bool {
        match self.state {
            CameraAnimation::Animating { to: current, .. } if current.abs_diff_eq(&to, POSE_EPSILON) => {
                return false;
            }
            CameraAnimation::Animating { kind: busy, .. } if kind != AnimationKind::Reset => {
                debug!("Camera busy with {:?}, dropped {:?} request", busy, kind);
                return false;
            }
            CameraAnimation::Idle if self.pose.abs_diff_eq(&to, POSE_EPSILON) => {
                return false;
            }
            _ => {}
        }

        debug!("Camera {:?} animation toward {:?}", kind, to.target);
        self.state = CameraAnimation::Animating {
            from: self.pose,
            to,
            progress: 0.0,
            kind,
        };
        true
    }

    /// Advance one frame.
    pub fn advance(&mut self) -> AnimationStep {
        let CameraAnimation::Animating { from, to, progress, kind } = self.state else {
            return AnimationStep::Idle;
        };

        let progress = (progress + self.step(kind)).min(1.0);
        if progress >= 1.0 {
            debug!("Camera {:?} animation finished at {:?}", kind, to.target);
            self.pose = to;
            self.state = CameraAnimation::Idle;
            return AnimationStep::Finished(kind);
        }

        self.pose = from.lerp(&to, progress);
        self.state = CameraAnimation::Animating { from, to, progress, kind };
        AnimationStep::Moved { progress }
    }

    /// Move the camera directly, as orbit controls do. Refused mid-animation.
    pub fn set_pose(&mut self, pose: CameraPose) -> bool {
        if self.is_animating() {
            return false;
        }
        self.pose = pose;
        true
    }

    pub fn orbit(&mut self, angle: Radians) -> bool {
        let pose = self.pose.orbit_yaw(angle);
        self.set_pose(pose)
    }

    /// Drop any animation and jump to `pose`.
    pub fn snap(&mut self, pose: CameraPose) {
        self.state = CameraAnimation::Idle;
        self.pose = pose;
    }
}
