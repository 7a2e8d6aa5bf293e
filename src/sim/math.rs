use std::ops::{Add, Mul, Neg, Sub};

/// 3D vector with f32 components.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Float3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Float3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag < f32::EPSILON {
            return Self::ZERO;
        }
        self * (1.0 / mag)
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    /// Projection onto the ground plane (y dropped).
    pub fn horizontal(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    /// Removes the component along `axis` (expected to be unit length).
    pub fn reject(self, axis: Self) -> Self {
        self - axis * self.dot(axis)
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).magnitude()
    }
}

impl Add for Float3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Float3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Float3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Float3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Default for Float3 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Unit quaternion for 3D rotations.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Rotation of `angle` radians about `axis`. A zero axis yields the identity.
    pub fn from_axis_angle(axis: Float3, angle: f32) -> Self {
        let normalized = axis.normalize();
        if normalized == Float3::ZERO {
            return Self::IDENTITY;
        }
        let half_angle = angle * 0.5;
        let s = half_angle.sin();
        let c = half_angle.cos();

        Self::new(normalized.x * s, normalized.y * s, normalized.z * s, c)
    }

    pub fn mul_vec(self, v: Float3) -> Float3 {
        let qv = Float3::new(self.x, self.y, self.z);
        let uv = qv.cross(v);
        let uuv = qv.cross(uv);
        v + (uv * (2.0 * self.w)) + (uuv * 2.0)
    }

    /// Builds the rotation whose columns are `right`, `up` and `back`.
    ///
    /// The three vectors must form a right-handed orthonormal basis.
    pub fn from_basis(right: Float3, up: Float3, back: Float3) -> Self {
        let trace = right.x + up.y + back.z;
        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::new(
                (up.z - back.y) * s,
                (back.x - right.z) * s,
                (right.y - up.x) * s,
                0.25 / s,
            )
        } else if right.x > up.y && right.x > back.z {
            let s = 2.0 * (1.0 + right.x - up.y - back.z).sqrt();
            Self::new(
                0.25 * s,
                (up.x + right.y) / s,
                (back.x + right.z) / s,
                (up.z - back.y) / s,
            )
        } else if up.y > back.z {
            let s = 2.0 * (1.0 + up.y - right.x - back.z).sqrt();
            Self::new(
                (up.x + right.y) / s,
                0.25 * s,
                (back.y + up.z) / s,
                (back.x - right.z) / s,
            )
        } else {
            let s = 2.0 * (1.0 + back.z - right.x - up.y).sqrt();
            Self::new(
                (back.x + right.z) / s,
                (back.y + up.z) / s,
                0.25 * s,
                (right.y - up.x) / s,
            )
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}
