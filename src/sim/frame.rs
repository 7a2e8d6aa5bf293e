use super::constants::{
    deg_to_rad, FALLBACK_UP, PARALLEL_EPSILON, RESIDUAL_EPSILON, SEED_EPSILON, WORLD_UP,
};
use super::math::{Float3, Quaternion};

/// Local basis of a synthesized vertical loop.
///
/// `forward` is horizontal, `up` is world-up and `right = forward × up`,
/// so the three vectors form a right-handed orthonormal basis.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoopBasis {
    pub forward: Float3,
    pub up: Float3,
    pub right: Float3,
}

impl LoopBasis {
    pub const fn new(forward: Float3, up: Float3, right: Float3) -> Self {
        Self { forward, up, right }
    }

    /// Basis for a loop entered while travelling along `forward` (horizontal, unit).
    pub fn from_forward(forward: Float3) -> Self {
        let right = forward.cross(WORLD_UP).normalize();
        Self::new(forward, WORLD_UP, right)
    }

    /// Position on the ideal circle of radius `radius` at angle `theta`,
    /// relative to the loop entry.
    pub fn circle_offset(&self, theta: f32, radius: f32) -> Float3 {
        self.forward * (theta.sin() * radius) + self.up * ((1.0 - theta.cos()) * radius)
    }
}

/// Orientation of the track cross-section at one point of the curve.
///
/// - `tangent`: direction of travel
/// - `up`: track-up, perpendicular to the tangent (points to the loop centre inside a loop)
/// - `normal`: sideways, `tangent × up`
///
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub tangent: Float3,
    pub up: Float3,
    pub normal: Float3,
}

impl Frame {
    pub const fn new(tangent: Float3, up: Float3, normal: Float3) -> Self {
        Self {
            tangent,
            up,
            normal,
        }
    }

    pub fn from_tangent_up(tangent: Float3, up: Float3) -> Self {
        let normal = tangent.cross(up).normalize();
        Self::new(tangent, up, normal)
    }

    /// First frame of a curve: world-up with the tangent component removed.
    pub fn seed(tangent: Float3) -> Self {
        let mut up = WORLD_UP.reject(tangent);
        if up.magnitude() < SEED_EPSILON {
            up = FALLBACK_UP.reject(tangent);
        }
        Self::from_tangent_up(tangent, up.normalize())
    }

    /// Parallel-transports this frame onto `tangent` (unit length).
    ///
    /// `up` is rotated by the minimal rotation taking the previous tangent onto the new
    /// one, then re-orthogonalised. Near-parallel or near-antiparallel tangents keep the
    /// previous up, as does a residual too short to renormalise.
    pub fn transported(self, tangent: Float3) -> Self {
        let dot = self.tangent.dot(tangent).clamp(-1.0, 1.0);

        let rotated = if 1.0 - dot.abs() <= PARALLEL_EPSILON {
            self.up
        } else {
            let axis = self.tangent.cross(tangent);
            Quaternion::from_axis_angle(axis, dot.acos()).mul_vec(self.up)
        };

        let residual = rotated.reject(tangent);
        let up = if residual.magnitude() < RESIDUAL_EPSILON {
            self.up
        } else {
            residual.normalize()
        };

        Self::from_tangent_up(tangent, up)
    }

    /// Exact frame on an ideal vertical circle at angle `theta`.
    ///
    /// The sideways normal is the loop's constant `right`.
    pub fn on_loop(basis: &LoopBasis, theta: f32) -> Self {
        let (sin, cos) = theta.sin_cos();
        let tangent = (basis.forward * cos + basis.up * sin).normalize();
        let up = (basis.forward * -sin + basis.up * cos).normalize();
        Self::new(tangent, up, basis.right)
    }

    /// Rolls the cross-section about the tangent by `degrees` of tilt.
    ///
    /// Positive tilt raises the `normal` side.
    pub fn with_tilt(self, degrees: f32) -> Self {
        if degrees == 0.0 {
            return self;
        }
        let q = Quaternion::from_axis_angle(self.tangent, -deg_to_rad(degrees));
        let up = q.mul_vec(self.up).normalize();
        let normal = q.mul_vec(self.normal).normalize();
        Self::new(self.tangent, up, normal)
    }

    /// Heading about world-up, measured from +Z towards +X.
    pub fn yaw(self) -> f32 {
        self.tangent.x.atan2(self.tangent.z)
    }

    /// Rotation taking the local axes (+X sideways, +Y up, +Z back) onto this frame.
    pub fn orientation(self) -> Quaternion {
        Quaternion::from_basis(self.normal, self.up, -self.tangent)
    }

    pub const DEFAULT: Self = Self::new(Float3::RIGHT, Float3::UP, Float3::new(0.0, 0.0, 1.0));
}

impl Default for Frame {
    fn default() -> Self {
        Self::DEFAULT
    }
}
