//! Configuration Module - GC Tuning Parameters
//!
//! Manages all configuration parameters for MSGC.
//! The defaults give the classic interpreter setup: first collection at 10
//! live objects, a 256-entry root stack, and a threshold of twice the
//! survivors after every cycle.

/// Main configuration for the mark-sweep collector
///
/// # Examples
///
/// ```rust
/// use msgc::GcConfig;
///
/// // Use default configuration
/// let config = GcConfig::default();
/// assert_eq!(config.initial_threshold, 10);
///
/// // Collect on every allocation, small stack
/// let config = GcConfig {
///     initial_threshold: 0,
///     stack_max: 16,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcConfig {
    /// Live-object count that triggers the first collection
    ///
    /// Default: 10
    pub initial_threshold: usize,

    /// Root stack capacity
    ///
    /// Pushing beyond this fails with `StackOverflow`.
    /// Default: 256
    pub stack_max: usize,

    /// Multiplier applied to the survivor count after each collection
    ///
    /// `threshold = live_after * growth_factor`. An empty heap therefore
    /// always gets threshold 0.
    /// Default: 2
    pub growth_factor: usize,

    /// Hard cap on live objects
    ///
    /// If the heap is still at this size after the triggered collection,
    /// allocation fails with `AllocationFailure`. `None` means bounded only
    /// by process memory.
    /// Default: None
    pub max_objects: Option<usize>,

    /// Report GC events to the global GC logger
    ///
    /// Default: false
    pub verbose: bool,

    /// Enable GC statistics collection
    ///
    /// Default: true
    pub stats_enabled: bool,
}

impl Default for GcConfig {
    fn default() -> Self {
        GcConfig {
            initial_threshold: DEFAULT_INITIAL_THRESHOLD,
            stack_max: DEFAULT_STACK_MAX,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            max_objects: None,
            verbose: false,
            stats_enabled: true,
        }
    }
}

impl GcConfig {
    /// Validate configuration
    ///
    /// ```rust
    /// use msgc::GcConfig;
    ///
    /// let config = GcConfig {
    ///     stack_max: 0,  // Invalid!
    ///     ..Default::default()
    /// };
    ///
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stack_max == 0 {
            return Err(ConfigError::InvalidStackSize(
                "stack_max must be > 0".to_string(),
            ));
        }

        if self.growth_factor == 0 {
            return Err(ConfigError::InvalidGrowthFactor(
                "growth_factor must be >= 1".to_string(),
            ));
        }

        if let Some(max) = self.max_objects {
            if max == 0 {
                return Err(ConfigError::InvalidCapacity(
                    "max_objects must be > 0 when set".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Build configuration from environment variables
    ///
    /// Overrides defaults with environment variables:
    /// - MSGC_INITIAL_THRESHOLD
    /// - MSGC_STACK_MAX
    /// - MSGC_GROWTH_FACTOR
    /// - MSGC_MAX_OBJECTS
    /// - MSGC_VERBOSE
    ///
    /// Values that fail to parse are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("MSGC_INITIAL_THRESHOLD") {
            if let Ok(n) = val.parse::<usize>() {
                config.initial_threshold = n;
            }
        }

        if let Some(val) = lookup("MSGC_STACK_MAX") {
            if let Ok(n) = val.parse::<usize>() {
                config.stack_max = n;
            }
        }

        if let Some(val) = lookup("MSGC_GROWTH_FACTOR") {
            if let Ok(n) = val.parse::<usize>() {
                config.growth_factor = n;
            }
        }

        if let Some(val) = lookup("MSGC_MAX_OBJECTS") {
            if let Ok(n) = val.parse::<usize>() {
                config.max_objects = Some(n);
            }
        }

        if let Some(val) = lookup("MSGC_VERBOSE") {
            config.verbose = val == "1" || val.eq_ignore_ascii_case("true");
        }

        config
    }
}

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid stack size: {0}")]
    InvalidStackSize(String),

    #[error("Invalid growth factor: {0}")]
    InvalidGrowthFactor(String),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),
}

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default initial collection trigger
pub const DEFAULT_INITIAL_THRESHOLD: usize = 10;

/// Default root stack depth
pub const DEFAULT_STACK_MAX: usize = 256;

/// Default threshold multiplier
pub const DEFAULT_GROWTH_FACTOR: usize = 2;
