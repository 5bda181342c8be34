//! Logging initialization
//!
//! One global subscriber per process, chosen by [`Profile`]. Events are
//! written to stderr so that documents printed on stdout stay clean.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug level
    Development,
    /// JSON lines, info level
    Production,
    /// Bare registry; tests install the capture layer themselves
    Test,
}

impl Profile {
    /// Filter directive used when `RUST_LOG` is not set
    pub const fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "foxconf=debug",
            Profile::Production | Profile::Test => "foxconf=info",
        }
    }

    fn env_filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has an effect. If another subscriber
/// was installed beforehand (for example by
/// [`init_test_capture`](super::test_capture::init_test_capture)) that one
/// is kept.
///
/// # Example
///
/// ```
/// use foxconf_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.env_filter())
                .try_init()
                .is_ok(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.env_filter())
                .try_init()
                .is_ok(),
            Profile::Test => tracing_subscriber::registry().try_init().is_ok(),
        };
        if installed {
            tracing::debug!(profile = ?profile, "logging initialised");
        }
    });
}
