//! ISAAC-32 pseudo-random generator.
//!
//! Bob Jenkins' ISAAC with the standard `randinit(flag = true)` key schedule.
//! Words are handed out in index order from each 256-word result block.

use rand::RngCore;

use crate::types::SeedError;

/// Number of 32-bit words in a seed (and in the generator's state).
pub const SEED_SIZE: usize = 256;

const GOLDEN_RATIO: u32 = 0x9e37_79b9;

/// Seeded ISAAC-32 generator.
///
/// # Examples
///
/// ```rust
/// use valuegen_core::rng::{IsaacRng, SEED_SIZE};
///
/// let seed = vec![7; SEED_SIZE];
/// let mut rng1 = IsaacRng::new(&seed).unwrap();
/// let mut rng2 = IsaacRng::new(&seed).unwrap();
///
/// for _ in 0..1000 {
///     assert_eq!(rng1.next_word(), rng2.next_word());
/// }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct IsaacRng {
    /// Current result block.
    results: [u32; SEED_SIZE],
    /// Internal state.
    memory: [u32; SEED_SIZE],
    a: u32,
    b: u32,
    c: u32,
    /// Position of the next unread word in `results`.
    index: usize,
}

impl IsaacRng {
    /// Creates a generator from a seed of exactly [`SEED_SIZE`] words.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::InvalidLength`] if `seed.len() != SEED_SIZE`.
    pub fn new(seed: &[i32]) -> Result<Self, SeedError> {
        if seed.len() != SEED_SIZE {
            return Err(SeedError::InvalidLength {
                expected: SEED_SIZE,
                actual: seed.len(),
            });
        }
        let mut words = [0i32; SEED_SIZE];
        words.copy_from_slice(seed);
        Ok(Self::from_words(&words))
    }

    /// Creates a generator from a seed whose length is fixed by its type.
    pub fn from_words(seed: &[i32; SEED_SIZE]) -> Self {
        let mut results = [0u32; SEED_SIZE];
        for (slot, &word) in results.iter_mut().zip(seed) {
            *slot = word as u32;
        }
        let mut rng = Self {
            results,
            memory: [0; SEED_SIZE],
            a: 0,
            b: 0,
            c: 0,
            index: 0,
        };
        rng.init();
        rng
    }

    /// Advances the state and returns the next pseudorandom word.
    #[inline]
    pub fn next_word(&mut self) -> i32 {
        if self.index == SEED_SIZE {
            self.refill();
            self.index = 0;
        }
        let word = self.results[self.index];
        self.index += 1;
        word as i32
    }

    fn init(&mut self) {
        let mut s = [GOLDEN_RATIO; 8];
        for _ in 0..4 {
            mix(&mut s);
        }
        for pass in 0..2 {
            for i in (0..SEED_SIZE).step_by(8) {
                let source = if pass == 0 {
                    &self.results[i..i + 8]
                } else {
                    &self.memory[i..i + 8]
                };
                for (value, &word) in s.iter_mut().zip(source) {
                    *value = value.wrapping_add(word);
                }
                mix(&mut s);
                self.memory[i..i + 8].copy_from_slice(&s);
            }
        }
        self.refill();
        self.index = 0;
    }

    fn refill(&mut self) {
        self.c = self.c.wrapping_add(1);
        self.b = self.b.wrapping_add(self.c);
        let mut a = self.a;
        let mut b = self.b;
        for i in 0..SEED_SIZE {
            let x = self.memory[i];
            a ^= match i % 4 {
                0 => a << 13,
                1 => a >> 6,
                2 => a << 2,
                _ => a >> 16,
            };
            a = self.memory[(i + SEED_SIZE / 2) % SEED_SIZE].wrapping_add(a);
            let y = self.memory[((x >> 2) as usize) % SEED_SIZE]
                .wrapping_add(a)
                .wrapping_add(b);
            self.memory[i] = y;
            b = self.memory[((y >> 10) as usize) % SEED_SIZE].wrapping_add(x);
            self.results[i] = b;
        }
        self.a = a;
        self.b = b;
    }
}

fn mix(s: &mut [u32; 8]) {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *s;
    a ^= b << 11;
    d = d.wrapping_add(a);
    b = b.wrapping_add(c);
    b ^= c >> 2;
    e = e.wrapping_add(b);
    c = c.wrapping_add(d);
    c ^= d << 8;
    f = f.wrapping_add(c);
    d = d.wrapping_add(e);
    d ^= e >> 16;
    g = g.wrapping_add(d);
    e = e.wrapping_add(f);
    e ^= f << 10;
    h = h.wrapping_add(e);
    f = f.wrapping_add(g);
    f ^= g >> 4;
    a = a.wrapping_add(f);
    g = g.wrapping_add(h);
    g ^= h << 8;
    b = b.wrapping_add(g);
    h = h.wrapping_add(a);
    h ^= a >> 9;
    c = c.wrapping_add(h);
    a = a.wrapping_add(b);
    *s = [a, b, c, d, e, f, g, h];
}

impl std::fmt::Debug for IsaacRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IsaacRng")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl RngCore for IsaacRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.next_word() as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::EXAMPLE_SEED;

    #[test]
    fn test_rejects_wrong_seed_length() {
        assert_eq!(
            IsaacRng::new(&[0; 255]).unwrap_err(),
            SeedError::InvalidLength {
                expected: 256,
                actual: 255
            }
        );
        assert!(IsaacRng::new(&[0; 257]).is_err());
        assert!(IsaacRng::new(&[]).is_err());
    }

    /// Second result block of the all-zero seed matches Jenkins' `randvect.txt`.
    #[test]
    fn test_reference_vector() {
        let mut rng = IsaacRng::new(&[0; SEED_SIZE]).unwrap();
        for _ in 0..SEED_SIZE {
            rng.next_word();
        }
        let expected: [u32; 4] = [0xf650_e4c8, 0xe448_e96d, 0x98db_2fb4, 0xf5fa_d54f];
        for &word in &expected {
            assert_eq!(rng.next_word() as u32, word);
        }
    }

    #[test]
    fn test_first_words_of_zero_seed() {
        let mut rng = IsaacRng::new(&[0; SEED_SIZE]).unwrap();
        assert_eq!(rng.next_word() as u32, 0xe76d_d339);
        assert_eq!(rng.next_word() as u32, 0xd91a_a738);
    }

    #[test]
    fn test_clone_is_independent_fork() {
        let mut original = IsaacRng::new(&EXAMPLE_SEED).unwrap();
        for _ in 0..10 {
            original.next_word();
        }
        let mut fork = original.clone();
        let a: Vec<i32> = (0..600).map(|_| original.next_word()).collect();
        let b: Vec<i32> = (0..600).map(|_| fork.next_word()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut seed = EXAMPLE_SEED;
        seed[17] ^= 1;
        let mut a = IsaacRng::new(&EXAMPLE_SEED).unwrap();
        let mut b = IsaacRng::new(&seed).unwrap();
        let same = (0..256).filter(|_| a.next_word() == b.next_word()).count();
        assert!(same < 4);
    }

    #[test]
    fn test_rng_core_words() {
        let mut a = IsaacRng::new(&EXAMPLE_SEED).unwrap();
        let mut b = IsaacRng::new(&EXAMPLE_SEED).unwrap();
        let low = b.next_word() as u32 as u64;
        let high = b.next_word() as u32 as u64;
        assert_eq!(a.next_u64(), (high << 32) | low);

        let mut bytes = [0u8; 6];
        a.fill_bytes(&mut bytes);
        let first = (b.next_word() as u32).to_le_bytes();
        let second = (b.next_word() as u32).to_le_bytes();
        assert_eq!(&bytes[..4], &first);
        assert_eq!(&bytes[4..], &second[..2]);
    }
}
