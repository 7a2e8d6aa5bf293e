use crate::sim::{deg_to_rad, Float3};
use crate::track::FrameSample;

/// Samples at or below this height get no support.
pub const MIN_SUPPORT_HEIGHT: f32 = 1.0;
/// Supports taller than this get two horizontal cross-braces.
pub const CROSS_BRACE_HEIGHT: f32 = 2.0;
/// Supports taller than this get a diagonal brace.
pub const DIAGONAL_BRACE_HEIGHT: f32 = 3.0;
/// Legs stand this far inside the rails.
pub const LEG_INSET: f32 = 0.15;

/// Vertical post from the ground up to one rail.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Leg {
    /// Centre of the post (half way up).
    pub center: Float3,
    pub height: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Brace {
    pub center: Float3,
    pub yaw: f32,
    /// Rotation about the brace's sideways axis; zero for horizontal braces.
    pub pitch: f32,
    pub length: f32,
}

/// Wooden support bent under one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Support {
    pub sample: usize,
    pub position: Float3,
    pub height: f32,
    pub yaw: f32,
    /// Bank in degrees.
    pub tilt: f32,
    pub legs: [Leg; 2],
    pub cross_braces: Vec<Brace>,
    pub diagonal: Option<Brace>,
}

/// Horizontal unit vector to the right of `tangent`; zero for a vertical tangent.
pub fn horizontal_normal(tangent: Float3) -> Float3 {
    Float3::new(-tangent.z, 0.0, tangent.x).normalize()
}

fn support_at(sample: usize, s: &FrameSample, rail_offset: f32) -> Support {
    let pos = s.position;
    let height = pos.y;
    let yaw = s.frame().yaw();
    let side = horizontal_normal(s.tangent);
    let (sin, cos) = deg_to_rad(s.tilt).sin_cos();

    let leg_reach = side * ((rail_offset - LEG_INSET) * cos);
    let left_height = pos.y + rail_offset * sin;
    let right_height = pos.y - rail_offset * sin;
    let legs = [
        Leg {
            center: Float3::new(pos.x + leg_reach.x, left_height / 2.0, pos.z + leg_reach.z),
            height: left_height,
        },
        Leg {
            center: Float3::new(pos.x - leg_reach.x, right_height / 2.0, pos.z - leg_reach.z),
            height: right_height,
        },
    ];

    let cross_braces = if height > CROSS_BRACE_HEIGHT {
        [0.3, 0.6]
            .iter()
            .map(|&fraction| Brace {
                center: Float3::new(pos.x, height * fraction, pos.z),
                yaw,
                pitch: 0.0,
                length: rail_offset * 2.2,
            })
            .collect()
    } else {
        Vec::new()
    };

    let diagonal = (height > DIAGONAL_BRACE_HEIGHT).then(|| {
        let span = rail_offset * 2.0;
        let rise = height * 0.6;
        Brace {
            center: Float3::new(pos.x, height * 0.45, pos.z),
            yaw,
            pitch: rise.atan2(span),
            length: (span * span + rise * rise).sqrt() * 0.5,
        }
    });

    Support {
        sample,
        position: pos,
        height,
        yaw,
        tilt: s.tilt,
        legs,
        cross_braces,
        diagonal,
    }
}

/// Supports under every `interval`-th sample that is higher than [`MIN_SUPPORT_HEIGHT`].
pub fn supports(samples: &[FrameSample], interval: usize, rail_offset: f32) -> Vec<Support> {
    samples
        .iter()
        .enumerate()
        .step_by(interval.max(1))
        .filter(|(_, s)| s.position.y > MIN_SUPPORT_HEIGHT)
        .map(|(i, s)| support_at(i, s, rail_offset))
        .collect()
}
