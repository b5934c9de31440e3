use strata_hex::axial_to_pixel;

use super::hash::rand01;
use crate::gen_ctx::GenCtx;
use crate::worldgen::PlantRule;

const CLIMATE_OCTAVES: u32 = 2;

#[inline]
fn rule_salt(index: usize) -> u32 {
    (index as u32).wrapping_mul(0x632B_E5AB) ^ 0x5bd1_e995
}

impl GenCtx {
    /// `[0, 1]`, cooled by elevation above sea level.
    pub fn biome_temperature(&self, q: i32, r: i32, surface: i32) -> f32 {
        let p = &*self.params;
        let (x, y) = axial_to_pixel(q, r, 1.0);
        let n = self
            .temperature
            .sample2(x as f32, y as f32, p.temperature_scale, CLIMATE_OCTAVES);
        let lapse = (surface - p.sea_level).max(0) as f32 * p.lapse_rate;
        (n - lapse).clamp(0.0, 1.0)
    }

    pub fn biome_humidity(&self, q: i32, r: i32) -> f32 {
        let (x, y) = axial_to_pixel(q, r, 1.0);
        self.humidity.sample2(
            x as f32,
            y as f32,
            self.params.humidity_scale,
            CLIMATE_OCTAVES,
        )
    }

    /// First plant rule whose climate window holds this column and whose
    /// rarity roll passes. The roll is an integer hash, not noise.
    pub fn plant_spec(&self, q: i32, r: i32, surface: i32) -> Option<(usize, &PlantRule)> {
        let rules = &self.params.plants;
        if rules.is_empty() {
            return None;
        }
        let temperature = self.biome_temperature(q, r, surface);
        let humidity = self.biome_humidity(q, r);
        rules.iter().enumerate().find(|(i, rule)| {
            rule.accepts(temperature, humidity)
                && rand01(self.plant_seed, q, r, rule_salt(*i)) < rule.rarity
        })
    }
}
