use crate::types::Heading;

/// Small seeded generator for headless runs. The same seed always yields the
/// same sequence, so simulated rounds can be replayed frame for frame.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        (t ^ (t >> 14)) as f64 / 4_294_967_296.0
    }

    /// Uniform integer in `min..=max`.
    pub fn int(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = (max - min + 1) as f64;
        min + ((self.next_f64() * span).floor() as u32).min(max - min)
    }

    pub fn heading(&mut self) -> Heading {
        let headings = Heading::RESOLVE_ORDER;
        headings[self.int(0, headings.len() as u32 - 1) as usize]
    }
}
