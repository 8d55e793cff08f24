//! Game and randomness configuration options.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

/// How many stock cards a single draw turns onto the talon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum DrawMode {
    /// Turn one card at a time.
    #[default]
    One,
    /// Turn up to three cards at a time.
    Three,
}

impl DrawMode {
    /// Returns the number of cards turned per draw.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::One => 1,
            Self::Three => 3,
        }
    }
}

/// Configuration options for a Klondike game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use patience::{DrawMode, KlondikeOptions};
///
/// let options = KlondikeOptions::default()
///     .with_draw(DrawMode::Three)
///     .with_redeal_limit(Some(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KlondikeOptions {
    /// Cards turned per draw.
    pub draw: DrawMode,
    /// Maximum number of times the talon may be recycled into the stock.
    /// `None` allows unlimited redeals.
    pub redeal_limit: Option<u32>,
}

impl KlondikeOptions {
    /// Sets the draw mode.
    ///
    /// # Example
    ///
    /// ```
    /// use patience::{DrawMode, KlondikeOptions};
    ///
    /// let options = KlondikeOptions::default().with_draw(DrawMode::Three);
    /// assert_eq!(options.draw.count(), 3);
    /// ```
    #[must_use]
    pub const fn with_draw(mut self, draw: DrawMode) -> Self {
        self.draw = draw;
        self
    }

    /// Sets the redeal limit.
    ///
    /// # Example
    ///
    /// ```
    /// use patience::KlondikeOptions;
    ///
    /// let options = KlondikeOptions::default().with_redeal_limit(Some(0));
    /// assert_eq!(options.redeal_limit, Some(0));
    /// ```
    #[must_use]
    pub const fn with_redeal_limit(mut self, limit: Option<u32>) -> Self {
        self.redeal_limit = limit;
        self
    }
}

/// Default endpoint of the random.org sequence generator.
pub const RANDOM_ORG_SEQUENCES: &str = "https://www.random.org/sequences/";

/// Configuration for the randomness sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomOptions {
    /// Sequence service endpoint, queried with `min`, `max`, `col`, `format`
    /// and `rnd` parameters.
    pub service_url: String,
    /// Upper bound on a service request.
    pub timeout: Duration,
    /// Permutations between forced reseeds of the local generator.
    pub reseed_interval: u64,
    /// Reseed the local generator before every permutation.
    pub prediction_resistance: bool,
    /// Extra bytes mixed into every local seed.
    pub personalization: Vec<u8>,
}

impl Default for RandomOptions {
    fn default() -> Self {
        Self {
            service_url: String::from(RANDOM_ORG_SEQUENCES),
            timeout: Duration::from_secs(5),
            reseed_interval: 16,
            prediction_resistance: true,
            personalization: Vec::from(*b"patience"),
        }
    }
}

impl RandomOptions {
    /// Sets the service endpoint.
    #[must_use]
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    /// Sets the service request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of permutations between forced reseeds.
    ///
    /// # Example
    ///
    /// ```
    /// use patience::RandomOptions;
    ///
    /// let options = RandomOptions::default().with_reseed_interval(4);
    /// assert_eq!(options.reseed_interval, 4);
    /// ```
    #[must_use]
    pub fn with_reseed_interval(mut self, interval: u64) -> Self {
        self.reseed_interval = interval;
        self
    }

    /// Sets whether the local generator reseeds before every permutation.
    #[must_use]
    pub fn with_prediction_resistance(mut self, enabled: bool) -> Self {
        self.prediction_resistance = enabled;
        self
    }

    /// Sets the personalization bytes.
    #[must_use]
    pub fn with_personalization(mut self, personalization: impl Into<Vec<u8>>) -> Self {
        self.personalization = personalization.into();
        self
    }
}
