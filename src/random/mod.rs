//! Randomness sources used to shuffle the deck.
//!
//! A source hands out a permutation of `0..len`. Every permutation is
//! checked with [`validate_permutation`] before a deck trusts it.

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::error::RandomError;

#[cfg(feature = "std")]
pub mod local;
#[cfg(feature = "net")]
pub mod remote;

#[cfg(feature = "std")]
pub use local::LocalSource;
#[cfg(feature = "net")]
pub use remote::RandomOrg;

/// A source of uniformly random permutations.
pub trait RandomSource {
    /// Returns a permutation of `0..len`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot produce randomness.
    fn permutation(&mut self, len: usize) -> Result<Vec<usize>, RandomError>;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn permutation(&mut self, len: usize) -> Result<Vec<usize>, RandomError> {
        (**self).permutation(len)
    }
}

/// Checks that `perm` holds every index in `0..len` exactly once.
///
/// # Errors
///
/// Returns [`RandomError::BadPermutation`] otherwise.
pub fn validate_permutation(perm: &[usize], len: usize) -> Result<(), RandomError> {
    if perm.len() != len {
        return Err(RandomError::BadPermutation(len));
    }
    let mut seen = vec![false; len];
    for &index in perm {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(RandomError::BadPermutation(len)),
        }
    }
    Ok(())
}

/// Fisher-Yates shuffle of `0..len` driven by `rng`.
pub(crate) fn shuffled_indices<R: rand::Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(rng);
    indices
}

/// Deterministic ChaCha8 stream for replays and tests.
///
/// The same seed always yields the same sequence of permutations. It is
/// never used unless a caller constructs it explicitly.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Creates a source from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn permutation(&mut self, len: usize) -> Result<Vec<usize>, RandomError> {
        Ok(shuffled_indices(&mut self.rng, len))
    }
}

/// Tries a primary source and falls back to a second one when it fails.
///
/// A failing primary is logged at warn level. A failing fallback is
/// reported as [`RandomError::Exhausted`]; there is no third option.
#[derive(Debug)]
pub struct FallbackSource<P, F> {
    primary: P,
    fallback: F,
}

impl<P: RandomSource, F: RandomSource> FallbackSource<P, F> {
    /// Creates a source that prefers `primary`.
    #[must_use]
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// Returns the fallback source.
    #[must_use]
    pub const fn fallback(&self) -> &F {
        &self.fallback
    }
}

impl<P: RandomSource, F: RandomSource> RandomSource for FallbackSource<P, F> {
    fn permutation(&mut self, len: usize) -> Result<Vec<usize>, RandomError> {
        let primary = self
            .primary
            .permutation(len)
            .and_then(|perm| validate_permutation(&perm, len).map(|()| perm));
        match primary {
            Ok(perm) => Ok(perm),
            Err(err) => {
                log::warn!("primary random source failed, using fallback: {err}");
                let perm = self
                    .fallback
                    .permutation(len)
                    .map_err(|err| RandomError::Exhausted(format!("{err}")))?;
                validate_permutation(&perm, len)
                    .map_err(|err| RandomError::Exhausted(format!("{err}")))?;
                Ok(perm)
            }
        }
    }
}

/// Builds the preferred source: the random.org service, backed by a
/// local generator.
///
/// # Errors
///
/// Returns [`RandomError::Entropy`] if the local generator cannot be seeded.
#[cfg(feature = "net")]
pub fn preferred(
    options: &crate::options::RandomOptions,
) -> Result<FallbackSource<RandomOrg, LocalSource>, RandomError> {
    Ok(FallbackSource::new(
        RandomOrg::new(options),
        LocalSource::new(options)?,
    ))
}
