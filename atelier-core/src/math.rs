use std::cmp::Ordering;
use std::f32::consts::{FRAC_1_PI, PI};
use derive_more::{Add, AddAssign, Deref, DerefMut, Div, DivAssign, From, Into, Mul, MulAssign, Neg, Sub, SubAssign};
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Deref, DerefMut, From, Into, Default, Debug, Clone, Copy, PartialEq, PartialOrd, Neg, Add, Sub, Mul, Div, AddAssign, SubAssign, MulAssign, DivAssign, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degree(f32);

impl PartialEq<f32> for Degree {
    fn eq(&self, other: &f32) -> bool {
        self.0.eq(other)
    }
}

impl PartialOrd<f32> for Degree {
    fn partial_cmp(&self, other: &f32) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl Degree {
    #[inline]
    pub fn clamp(&self, min: Degree, max: Degree) -> Degree {
        self.0.clamp(min.0, max.0).into()
    }
}

#[derive(Deref, DerefMut, From, Into, Default, Debug, Clone, Copy, PartialEq, PartialOrd, Neg, Add, Sub, Mul, Div, AddAssign, SubAssign, MulAssign, DivAssign)]
pub struct Radians(f32);

impl PartialEq<f32> for Radians {
    fn eq(&self, other: &f32) -> bool {
        self.0.eq(other)
    }
}

impl PartialOrd<f32> for Radians {
    fn partial_cmp(&self, other: &f32) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl Radians {
    /// `tan(self / 2)`, the ratio used to turn a half-size into a viewing distance.
    #[inline]
    pub fn half_tan(&self) -> f32 {
        (self.0 * 0.5).tan()
    }
}

impl From<Degree> for Radians {
    fn from(value: Degree) -> Self {
        Self(value.0 / 180.0 * PI)
    }
}

impl From<Radians> for Degree {
    fn from(value: Radians) -> Self {
        Self(value.0 * FRAC_1_PI * 180.0)
    }
}

/// Axis-aligned box stored as center and half extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        let min_corner = min.min(max);
        let max_corner = min.max(max);
        Self {
            center: (min_corner + max_corner) * 0.5,
            half_extents: (max_corner - min_corner) * 0.5,
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self::from_min_max(min, max))
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    #[inline]
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::from_min_max(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// Sphere circumscribing the box.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere {
            center: self.center,
            radius: self.half_extents.length(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_radians_conversion() {
        let radians: Radians = Degree::from(90.0).into();
        assert!((*radians - PI * 0.5).abs() < 1e-6);

        let degree: Degree = radians.into();
        assert!((*degree - 90.0).abs() < 1e-4);
    }

    #[test]
    fn aabb_from_points() {
        let aabb = Aabb::from_points([
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(3.0, 4.0, -2.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]).unwrap();

        assert_eq!(aabb.min(), Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(aabb.max(), Vec3::new(3.0, 4.0, 2.0));
        assert_eq!(aabb.max_dimension(), 4.0);
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn union_and_sphere() {
        let a = Aabb::from_min_max(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_min_max(Vec3::splat(-1.0), Vec3::ZERO);
        let u = a.union(&b);

        assert_eq!(u.center, Vec3::ZERO);
        let sphere = u.bounding_sphere();
        assert!((sphere.radius - 3f32.sqrt()).abs() < 1e-6);
    }
}
