use fastnoise_lite::{FastNoiseLite, NoiseType};
use std::fmt;

const SEED_MODULUS: i128 = 2_147_483_647;
const MASTER_MULTIPLIER: i128 = 1_000_003;
const SYSTEM_MULTIPLIER: i128 = 2_654_435_761;

/// Tags mixed into the master seed so each generation system samples its own field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NoiseSystem {
    Terrain,
    Grimstone,
    Marble,
    Dirt,
    Caves,
    Lava,
    Temperature,
    Humidity,
    Plants,
    Trees,
    /// One independent field per configured ore species, by declaration index.
    Ore(u32),
}

impl NoiseSystem {
    pub fn id(self) -> u32 {
        match self {
            NoiseSystem::Terrain => 1,
            NoiseSystem::Grimstone => 2,
            NoiseSystem::Marble => 3,
            NoiseSystem::Dirt => 4,
            NoiseSystem::Caves => 5,
            NoiseSystem::Lava => 6,
            NoiseSystem::Temperature => 7,
            NoiseSystem::Humidity => 8,
            NoiseSystem::Plants => 9,
            NoiseSystem::Trees => 10,
            NoiseSystem::Ore(i) => 100 + i,
        }
    }
}

/// `(master·1_000_003 + system·2_654_435_761) mod (2³¹ − 1)`.
///
/// The modulus is prime and the system multiplier is not a multiple of it, so
/// distinct system ids below the modulus always map to distinct seeds.
pub fn derive_seed(master: i64, system: u32) -> i32 {
    let mixed = master as i128 * MASTER_MULTIPLIER + system as i128 * SYSTEM_MULTIPLIER;
    mixed.rem_euclid(SEED_MODULUS) as i32
}

/// Seeded gradient-noise generator with fractal octave stacking.
///
/// Each generation system owns one of these; the kernel tables are built once
/// in `new` and never touched again, so sampling takes `&self`.
pub struct NoiseField {
    seed: i32,
    kernel: FastNoiseLite,
}

impl NoiseField {
    pub fn new(seed: i32) -> Self {
        let mut kernel = FastNoiseLite::with_seed(seed);
        kernel.set_noise_type(Some(NoiseType::OpenSimplex2));
        kernel.set_frequency(Some(1.0));
        Self { seed, kernel }
    }

    pub fn for_system(master: i64, system: NoiseSystem) -> Self {
        Self::new(derive_seed(master, system.id()))
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// fBm over 2D noise, normalised into `[0, 1]`.
    pub fn sample2(&self, x: f32, y: f32, scale: f32, octaves: u32) -> f32 {
        let (x, y) = (x / scale, y / scale);
        fbm(octaves, |f| self.kernel.get_noise_2d(x * f, y * f))
    }

    /// fBm over 3D noise, normalised into `[0, 1]`.
    pub fn sample3(&self, x: f32, y: f32, z: f32, scale: f32, octaves: u32) -> f32 {
        let (x, y, z) = (x / scale, y / scale, z / scale);
        fbm(octaves, |f| self.kernel.get_noise_3d(x * f, y * f, z * f))
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

#[inline]
fn fbm(octaves: u32, mut octave: impl FnMut(f32) -> f32) -> f32 {
    let mut sum = 0.0f32;
    let mut norm = 0.0f32;
    let mut amp = 1.0f32;
    let mut freq = 1.0f32;
    for _ in 0..octaves.max(1) {
        sum += octave(freq) * amp;
        norm += amp;
        amp *= 0.5;
        freq *= 2.0;
    }
    (sum / norm * 0.5 + 0.5).clamp(0.0, 1.0)
}

/// One-shot 2D sample; builds a field per call. Hot paths hold a `NoiseField`.
pub fn noise2d(x: f32, y: f32, seed: i32, scale: f32, octaves: u32) -> f32 {
    NoiseField::new(seed).sample2(x, y, scale, octaves)
}

/// One-shot 3D sample; builds a field per call.
pub fn noise3d(x: f32, y: f32, z: f32, seed: i32, scale: f32, octaves: u32) -> f32 {
    NoiseField::new(seed).sample3(x, y, z, scale, octaves)
}
