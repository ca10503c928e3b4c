//! Multi-octave Perlin noise field.
//!
//! Each octave doubles the frequency of the last (by default) and scales
//! its amplitude by the persistence.

use noise::{NoiseFn, Perlin};

/// Configuration for a multi-octave Perlin field.
#[derive(Clone, Debug)]
pub(crate) struct PerlinFieldParams {
    /// Seed for the permutation table.
    pub seed: u32,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency of the first octave.
    pub base_frequency: f64,
    /// Amplitude of the first octave.
    pub amplitude: f64,
}

impl Default for PerlinFieldParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 1.0,
            amplitude: 1.0,
        }
    }
}

/// A 2D fractal Perlin noise field.
pub(crate) struct PerlinField {
    noise: Perlin,
    params: PerlinFieldParams,
}

impl PerlinField {
    pub fn new(params: PerlinFieldParams) -> Self {
        Self {
            noise: Perlin::new(params.seed),
            params,
        }
    }

    /// `(frequency, amplitude)` of every octave, lowest frequency first.
    fn octaves(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let p = &self.params;
        std::iter::successors(Some((p.base_frequency, p.amplitude)), |&(f, a)| {
            Some((f * p.lacunarity, a * p.persistence))
        })
        .take(p.octaves as usize)
    }

    /// Sample the field at `(x, y)`, within `±max_amplitude()`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.octaves()
            .map(|(f, a)| self.noise.get([x * f, y * f]) * a)
            .sum()
    }

    /// Upper bound on `|sample|`: the sum of the octave amplitudes.
    pub fn max_amplitude(&self) -> f64 {
        self.octaves().map(|(_, a)| a.abs()).sum()
    }
}
