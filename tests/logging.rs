//! Randomness downgrades must show up as warnings.
//!
//! The logger is process-wide, so this file holds a single test.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use patience::random::local::Entropy;
use patience::{DECK_SIZE, FallbackSource, LocalSource, RandomError, RandomOptions, RandomSource};

struct Capture {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    records: Mutex::new(Vec::new()),
};

fn take_warnings() -> Vec<String> {
    CAPTURE
        .records
        .lock()
        .unwrap()
        .drain(..)
        .filter(|(level, _)| *level == Level::Warn)
        .map(|(_, message)| message)
        .collect()
}

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

/// Seeds once, then runs dry.
#[derive(Debug)]
struct SeedOnce {
    used: bool,
}

impl Entropy for SeedOnce {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        if self.used {
            return Err(RandomError::Entropy("drained".to_string()));
        }
        self.used = true;
        buf.fill(0x5A);
        Ok(())
    }
}

#[test]
fn downgrades_are_logged_as_warnings() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut fallback = FallbackSource::new(Failing, Identity);
    fallback.permutation(4).unwrap();
    let warnings = take_warnings();
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("fallback"), "{warnings:?}");

    // every permutation retries the reseed, but only the first failure warns
    let options = RandomOptions::default().with_reseed_interval(1);
    let mut local = LocalSource::with_entropy(&options, SeedOnce { used: false }).unwrap();
    for _ in 0..3 {
        local.permutation(DECK_SIZE).unwrap();
    }
    assert!(local.is_degraded());
    let warnings = take_warnings();
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("reseed failed"), "{warnings:?}");
}
