//! Logging for the light renderer
//!
//! Modules log through the macros re-exported here. The crate never installs
//! a logger on its own; hosts without one can call [`init`] or [`try_init`].

pub use log::{debug, error, info, trace, warn};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "light_renderer=warn";

fn builder() -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
}

/// Install env_logger, honouring `RUST_LOG`
///
/// # Panics
///
/// Panics if a global logger is already installed.
pub fn init() {
    builder().init();
}

/// Install env_logger unless a logger is already present
///
/// Returns whether this call installed it.
pub fn try_init() -> bool {
    builder().try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_installs_once() {
        let _ = try_init();
        assert!(!try_init());
        debug!("logger installed for light renderer tests");
    }
}
