//! Randomness source tests.

use patience::random::validate_permutation;
use patience::{
    DECK_SIZE, DealError, Deck, FallbackSource, Klondike, KlondikeOptions, LocalSource,
    RandomError, RandomOptions, RandomSource, SeededSource,
};

struct Failing;

impl RandomSource for Failing {
    fn permutation(&mut self, _len: usize) -> Result<Vec<usize>, RandomError> {
        Err(RandomError::Service("unreachable".to_string()))
    }
}

struct Identity;

impl RandomSource for Identity {
    fn permutation(&mut self, len: usize) -> Result<Vec<usize>, RandomError> {
        Ok((0..len).collect())
    }
}

struct Garbage;

impl RandomSource for Garbage {
    fn permutation(&mut self, len: usize) -> Result<Vec<usize>, RandomError> {
        Ok(vec![len; len])
    }
}

#[test]
fn fallback_used_when_primary_fails() {
    let mut source = FallbackSource::new(Failing, Identity);
    assert_eq!(source.permutation(5).unwrap(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn fallback_used_when_primary_returns_garbage() {
    let mut source = FallbackSource::new(Garbage, Identity);
    let deck = Deck::shuffled(&mut source).unwrap();
    assert_eq!(deck, Deck::fresh());
}

#[test]
fn primary_preferred_when_it_works() {
    let mut source = FallbackSource::new(SeededSource::new(8), Identity);
    let deck = Deck::shuffled(&mut source).unwrap();
    assert_eq!(deck, Deck::shuffled(&mut SeededSource::new(8)).unwrap());
}

#[test]
fn both_sources_failing_is_fatal() {
    let mut source = FallbackSource::new(Failing, Failing);
    assert!(matches!(
        source.permutation(DECK_SIZE),
        Err(RandomError::Exhausted(_))
    ));

    let mut source = FallbackSource::new(Failing, Garbage);
    let mut game = Klondike::new(KlondikeOptions::default());
    assert!(matches!(
        game.deal_from(&mut source),
        Err(DealError::Random(RandomError::Exhausted(_)))
    ));
}

#[test]
fn local_source_backs_an_unreachable_service() {
    let local = LocalSource::new(&RandomOptions::default()).unwrap();
    let mut source = FallbackSource::new(Failing, local);
    let perm = source.permutation(DECK_SIZE).unwrap();
    validate_permutation(&perm, DECK_SIZE).unwrap();
    assert!(!source.fallback().is_degraded());
}

#[cfg(feature = "net")]
#[test]
fn preferred_source_survives_an_unreachable_service() {
    let options = RandomOptions::default()
        .with_service_url("http://127.0.0.1:9/sequences/")
        .with_timeout(std::time::Duration::from_millis(200));
    let mut source = patience::random::preferred(&options).unwrap();
    let perm = source.permutation(DECK_SIZE).unwrap();
    validate_permutation(&perm, DECK_SIZE).unwrap();

    let mut game = Klondike::new(KlondikeOptions::default());
    game.deal_from(&mut source).unwrap();
    game.verify_closure().unwrap();
}

#[test]
fn validate_permutation_catches_bad_output() {
    assert!(validate_permutation(&[2, 0, 1], 3).is_ok());
    assert!(validate_permutation(&[0, 0, 1], 3).is_err());
    assert!(validate_permutation(&[0, 1, 3], 3).is_err());
    assert!(validate_permutation(&[0, 1], 3).is_err());
    assert!(validate_permutation(&[], 0).is_ok());
}

/// Chi-square statistic of card-by-position counts against a uniform
/// distribution.
fn positional_chi_square<R: RandomSource>(source: &mut R, trials: usize) -> f64 {
    let mut counts = vec![[0u32; DECK_SIZE]; DECK_SIZE];
    for _ in 0..trials {
        let deck = Deck::shuffled(source).unwrap();
        for (position, card) in deck.cards().iter().enumerate() {
            counts[card.index()][position] += 1;
        }
    }

    let expected = trials as f64 / DECK_SIZE as f64;
    counts
        .iter()
        .flatten()
        .map(|&observed| {
            let diff = f64::from(observed) - expected;
            diff * diff / expected
        })
        .sum()
}

#[test]
fn seeded_shuffles_show_no_positional_bias() {
    // 52 * 51 degrees of freedom: mean 2652, standard deviation about 73.
    let chi_square = positional_chi_square(&mut SeededSource::new(2024), 20_000);
    assert!(chi_square < 3100.0, "chi-square {chi_square}");
    assert!(chi_square > 2200.0, "chi-square {chi_square}");
}

#[test]
fn local_shuffles_show_no_positional_bias() {
    let options = RandomOptions::default().with_prediction_resistance(false);
    let mut source = LocalSource::new(&options).unwrap();
    let chi_square = positional_chi_square(&mut source, 10_000);
    assert!(chi_square < 3100.0, "chi-square {chi_square}");
}

#[test]
fn identity_source_is_maximally_biased() {
    let chi_square = positional_chi_square(&mut Identity, 1_000);
    assert!(chi_square > 10_000.0);
}
