// Initial parameters for the 3D backgrounds. The render engine owns the frame loop;
// this module only decides counts, colors and placements from a host-supplied seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Hero particle palette (linear RGB, 0-1).
const HERO_PALETTE: [[f32; 3]; 4] = [
    [1.0, 0.420, 0.208],   // #ff6b35
    [0.969, 0.773, 0.624], // #f7c59f
    [1.0, 1.0, 1.0],       // #ffffff
    [0.180, 0.769, 0.714], // #2ec4b6
];

const TORUS_ORANGE: u32 = 0xff6b35;
const TORUS_TEAL: u32 = 0x2ec4b6;

/// Everything the render engine needs to build one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneSpec {
    ParticleField(ParticleField),
    TorusField(TorusField),
}

impl SceneSpec {
    /// JSON handed to the page's scene factory.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Additive point cloud that drifts and leans toward the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleField {
    /// Flattened xyz triples.
    pub positions: Vec<f32>,
    /// Flattened rgb triples.
    pub colors: Vec<f32>,
    pub point_size: f32,
    pub opacity: f32,
    pub camera_z: f32,
    /// Constant rotation added per frame (x, y).
    pub drift: [f32; 2],
    /// Fraction of the remaining distance to the pointer target covered per frame.
    pub follow: f32,
    /// Pointer offset (-0.5..0.5) is scaled by this before becoming a target rotation.
    pub pointer_tilt: f32,
}

impl ParticleField {
    pub fn count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Bobbing rings on the curiosity page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorusField {
    pub tori: Vec<Torus>,
    pub radius: f32,
    pub tube: f32,
    pub camera_z: f32,
    /// Scene time advanced per frame.
    pub time_step: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Torus {
    pub position: [f32; 3],
    pub color: u32,
    pub opacity: f32,
    pub speed: f32,
    pub amplitude: f32,
}

/// Particles spread uniformly through a cube of side 10 around the origin.
pub fn particle_field(count: usize, seed: u64) -> ParticleField {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut positions = Vec::with_capacity(count * 3);
    let mut colors = Vec::with_capacity(count * 3);

    for _ in 0..count {
        for _ in 0..3 {
            positions.push((rng.gen::<f32>() - 0.5) * 10.0);
        }
        let color = HERO_PALETTE[rng.gen_range(0..HERO_PALETTE.len())];
        colors.extend_from_slice(&color);
    }

    ParticleField {
        positions,
        colors,
        point_size: 0.02,
        opacity: 0.8,
        camera_z: 5.0,
        drift: [0.0005, 0.001],
        follow: 0.05,
        pointer_tilt: 0.5,
    }
}

pub fn torus_field(count: usize, seed: u64) -> TorusField {
    let mut rng = SmallRng::seed_from_u64(seed);
    let tori = (0..count)
        .map(|_| Torus {
            position: [
                (rng.gen::<f32>() - 0.5) * 15.0,
                (rng.gen::<f32>() - 0.5) * 15.0,
                (rng.gen::<f32>() - 0.5) * 10.0,
            ],
            color: if rng.gen_bool(0.5) {
                TORUS_ORANGE
            } else {
                TORUS_TEAL
            },
            opacity: rng.gen_range(0.3..0.8),
            speed: rng.gen_range(0.01..0.03),
            amplitude: rng.gen_range(0.5..1.0),
        })
        .collect();

    TorusField {
        tori,
        radius: 0.1,
        tube: 0.03,
        camera_z: 8.0,
        time_step: 0.01,
    }
}
