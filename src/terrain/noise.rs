use noise::{NoiseFn, Simplex};
use serde::{Deserialize, Serialize};

/// Source of spatially coherent noise in `[-1, 1]`.
///
/// The map samples terrain through this trait so tests can swap in a fixed
/// or synthetic source.
pub trait NoiseSampler {
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<T: NoiseSampler + ?Sized> NoiseSampler for &T {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

/// Seeded simplex noise.
#[derive(Clone)]
pub struct SimplexSampler {
    seed: u32,
    simplex: Simplex,
}

impl SimplexSampler {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            simplex: Simplex::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSampler for SimplexSampler {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.simplex.get([x, y]).clamp(-1.0, 1.0)
    }
}

/// One layer of an elevation stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    /// Multiplier applied to coordinates before sampling.
    pub frequency: f64,
    /// Contribution of this layer to the elevation.
    pub weight: f64,
}

impl Octave {
    pub const fn new(frequency: f64, weight: f64) -> Self {
        Self { frequency, weight }
    }
}

/// Weighted sum of noise layers, each remapped to `[0, 1]` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationOctaves {
    pub octaves: Vec<Octave>,
}

impl ElevationOctaves {
    /// Layers used for the point field: broad continents, hills, detail.
    pub fn point_field() -> Self {
        Self {
            octaves: vec![
                Octave::new(1.0 / 200.0, 0.5),
                Octave::new(1.0 / 100.0, 0.3),
                Octave::new(1.0 / 50.0, 0.2),
            ],
        }
    }

    /// Layers used for the coarse lattice of smooth mode, sampled at lattice indices.
    pub fn smooth_lattice() -> Self {
        Self {
            octaves: vec![
                Octave::new(1.0 / 3.0, 0.5),
                Octave::new(1.5, 0.25),
                Octave::new(3.0, 0.125),
            ],
        }
    }

    /// Sum of all weights, i.e. the largest value [`Self::elevation`] can return.
    pub fn max_elevation(&self) -> f64 {
        self.octaves.iter().map(|o| o.weight).sum()
    }

    pub fn elevation<N: NoiseSampler + ?Sized>(&self, noise: &N, x: f64, y: f64) -> f64 {
        self.octaves
            .iter()
            .map(|o| (noise.sample(x * o.frequency, y * o.frequency) + 1.0) / 2.0 * o.weight)
            .sum()
    }
}
