//! Locally seeded cryptographic generator.

use alloc::string::ToString;
use alloc::vec::Vec;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng, TryRngCore};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

use super::{RandomSource, shuffled_indices};
use crate::error::RandomError;
use crate::options::RandomOptions;

/// Supplies fresh seed material.
pub trait Entropy {
    /// Fills `buf` with unpredictable bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RandomError::Entropy`] if no entropy is available.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), RandomError>;
}

/// Entropy from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl Entropy for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|err| RandomError::Entropy(err.to_string()))
    }
}

/// ChaCha20 generator seeded from OS entropy and a personalization string.
///
/// With prediction resistance on, fresh entropy is mixed in before every
/// permutation; otherwise every `reseed_interval` permutations. If a reseed
/// fails after construction the generator keeps running on its current
/// state, falls back to periodic reseeding and logs a warning once. The
/// next successful reseed restores the configured prediction resistance.
#[derive(Debug)]
pub struct LocalSource<E = OsEntropy> {
    rng: ChaCha20Rng,
    entropy: E,
    personalization: Vec<u8>,
    reseed_interval: u64,
    configured_resistance: bool,
    prediction_resistance: bool,
    since_reseed: u64,
    counter: u64,
    degraded: bool,
}

impl LocalSource<OsEntropy> {
    /// Creates a generator seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`RandomError::Entropy`] if the operating system cannot
    /// supply a seed.
    pub fn new(options: &RandomOptions) -> Result<Self, RandomError> {
        Self::with_entropy(options, OsEntropy)
    }
}

impl<E: Entropy> LocalSource<E> {
    /// Creates a generator seeded from `entropy`.
    ///
    /// # Errors
    ///
    /// Returns [`RandomError::Entropy`] if the initial seed cannot be drawn.
    pub fn with_entropy(options: &RandomOptions, mut entropy: E) -> Result<Self, RandomError> {
        let mut fresh = [0u8; 32];
        entropy.fill(&mut fresh)?;
        let seed = mix(&fresh, &options.personalization, 0);

        Ok(Self {
            rng: ChaCha20Rng::from_seed(seed),
            entropy,
            personalization: options.personalization.clone(),
            reseed_interval: options.reseed_interval.max(1),
            configured_resistance: options.prediction_resistance,
            prediction_resistance: options.prediction_resistance,
            since_reseed: 0,
            counter: 1,
            degraded: false,
        })
    }

    /// Returns whether the generator lost access to fresh entropy.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Returns whether fresh entropy is drawn before every permutation.
    #[must_use]
    pub const fn prediction_resistance(&self) -> bool {
        self.prediction_resistance
    }

    /// Mixes fresh entropy into the generator state.
    ///
    /// # Errors
    ///
    /// Returns [`RandomError::Entropy`] if no fresh entropy is available;
    /// the generator state is unchanged.
    pub fn reseed(&mut self) -> Result<(), RandomError> {
        let mut fresh = [0u8; 64];
        self.entropy.fill(&mut fresh[32..])?;
        self.rng.fill_bytes(&mut fresh[..32]);
        let seed = mix(&fresh, &self.personalization, self.counter);
        self.rng = ChaCha20Rng::from_seed(seed);
        self.counter += 1;
        self.since_reseed = 0;
        Ok(())
    }

    fn maybe_reseed(&mut self) {
        if !self.prediction_resistance && self.since_reseed < self.reseed_interval {
            return;
        }
        match self.reseed() {
            Ok(()) => {
                if self.degraded {
                    log::info!("local generator reseeded, leaving degraded mode");
                }
                self.degraded = false;
                self.prediction_resistance = self.configured_resistance;
            }
            Err(err) => {
                if !self.degraded {
                    log::warn!(
                        "local generator reseed failed, continuing without prediction resistance: {err}"
                    );
                }
                self.degraded = true;
                self.prediction_resistance = false;
                self.since_reseed = 0;
            }
        }
    }
}

impl<E: Entropy> RandomSource for LocalSource<E> {
    fn permutation(&mut self, len: usize) -> Result<Vec<usize>, RandomError> {
        self.maybe_reseed();
        self.since_reseed += 1;
        Ok(shuffled_indices(&mut self.rng, len))
    }
}

fn clock_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
}

fn mix(fresh: &[u8], personalization: &[u8], counter: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(fresh);
    hasher.update(personalization);
    hasher.update(clock_nanos().to_le_bytes());
    hasher.update(counter.to_le_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use core::ops::Range;

    use super::*;
    use crate::random::validate_permutation;

    /// Entropy that fails on the calls numbered in `failing`.
    #[derive(Debug)]
    struct Scripted {
        failing: Range<usize>,
        calls: usize,
    }

    impl Scripted {
        const fn failing(failing: Range<usize>) -> Self {
            Self { failing, calls: 0 }
        }
    }

    impl Entropy for Scripted {
        fn fill(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
            let call = self.calls;
            self.calls += 1;
            if self.failing.contains(&call) {
                return Err(RandomError::Entropy("drained".to_string()));
            }
            buf.fill(0xA5);
            Ok(())
        }
    }

    #[test]
    fn construction_fails_without_entropy() {
        let entropy = Scripted::failing(0..usize::MAX);
        let err = LocalSource::with_entropy(&RandomOptions::default(), entropy).unwrap_err();
        assert!(matches!(err, RandomError::Entropy(_)));
    }

    #[test]
    fn prediction_resistance_reseeds_every_permutation() {
        let entropy = Scripted::failing(0..0);
        let mut source = LocalSource::with_entropy(&RandomOptions::default(), entropy).unwrap();
        for _ in 0..3 {
            source.permutation(52).unwrap();
        }
        assert_eq!(source.entropy.calls, 4);
        assert!(!source.is_degraded());
    }

    #[test]
    fn periodic_reseed_without_prediction_resistance() {
        let options = RandomOptions::default()
            .with_prediction_resistance(false)
            .with_reseed_interval(2);
        let entropy = Scripted::failing(0..0);
        let mut source = LocalSource::with_entropy(&options, entropy).unwrap();
        for _ in 0..5 {
            source.permutation(10).unwrap();
        }
        // initial seed, then before the 3rd and 5th permutations
        assert_eq!(source.entropy.calls, 3);
    }

    #[test]
    fn failed_reseed_degrades_but_keeps_shuffling() {
        let entropy = Scripted::failing(1..usize::MAX);
        let mut source = LocalSource::with_entropy(&RandomOptions::default(), entropy).unwrap();
        let perm = source.permutation(52).unwrap();
        validate_permutation(&perm, 52).unwrap();
        assert!(source.is_degraded());
        assert!(!source.prediction_resistance());
    }

    #[test]
    fn recovered_reseed_restores_prediction_resistance() {
        let options = RandomOptions::default().with_reseed_interval(2);
        let mut source = LocalSource::with_entropy(&options, Scripted::failing(1..2)).unwrap();

        source.permutation(52).unwrap();
        assert!(source.is_degraded());
        assert!(!source.prediction_resistance());

        // periodic reseed once the interval is used up
        source.permutation(52).unwrap();
        assert_eq!(source.entropy.calls, 2);
        source.permutation(52).unwrap();
        assert_eq!(source.entropy.calls, 3);
        assert!(!source.is_degraded());
        assert!(source.prediction_resistance());

        source.permutation(52).unwrap();
        assert_eq!(source.entropy.calls, 4);
    }

    #[test]
    fn os_entropy_seeds_a_working_generator() {
        let mut source = LocalSource::new(&RandomOptions::default()).unwrap();
        let first = source.permutation(52).unwrap();
        let second = source.permutation(52).unwrap();
        validate_permutation(&first, 52).unwrap();
        validate_permutation(&second, 52).unwrap();
        assert_ne!(first, second);
    }
}
