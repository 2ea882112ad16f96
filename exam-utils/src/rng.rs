/// Replaces a zero seed, which xorshift can never leave.
const ZERO_SEED_REPLACEMENT: u32 = 0x9E37_79B9;

/// Seeded xorshift-32 generator.
///
/// The same seed yields the same sequence on every platform, so a generated
/// exam can be reproduced from its seed alone.
#[derive(Clone, Debug)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Only the low 32 bits of `seed` are used.
    pub fn new(seed: u64) -> Self {
        let state = seed as u32;
        let state = if state == 0 {
            ZERO_SEED_REPLACEMENT
        } else {
            state
        };
        Self { state }
    }

    /// Seeds from the thread RNG. Output is not reproducible.
    pub fn from_entropy() -> Self {
        Self::new(u64::from(rand::random::<u32>()))
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        let index = (self.next_f64() * bound as f64) as usize;
        index.min(bound - 1)
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}
