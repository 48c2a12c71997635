//! Construction parameters for `ChainedHashTable`.

/// Bucket count used when none is given.
pub const DEFAULT_CAPACITY: usize = 101;

/// Load factor at which an insert first grows the table.
pub const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 0.75;

/// Initial size and growth threshold of a table.
///
/// Values are used as given. A capacity of 0 or a threshold of 0.0 or less
/// makes the next insert resize unconditionally.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableConfig {
    /// Number of bucket slots allocated up front.
    pub initial_capacity: usize,

    /// Ratio of keys to slots that triggers a rehash on the next insert.
    pub load_factor_threshold: f64,
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_load_factor_threshold(mut self, load_factor_threshold: f64) -> Self {
        self.load_factor_threshold = load_factor_threshold;
        self
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
        }
    }
}
