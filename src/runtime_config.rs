//! Environment-driven runtime configuration.
//!
//! These knobs belong to the host application embedding the crate, not to
//! the routing core itself; they tune the `may` coroutine runtime the server
//! module runs on.
//!
//! - `OPROUTE_STACK_SIZE` - coroutine stack size in bytes, decimal or `0x`
//!   hex. Default `0x4000` (16 KB). Larger stacks support deeper call
//!   chains; smaller stacks keep memory down under high concurrency.

use std::env;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Stack size for serving coroutines in bytes.
    pub stack_size: usize,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        let stack_size = match env::var("OPROUTE_STACK_SIZE") {
            Ok(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).unwrap_or(0x4000)
                } else {
                    val.parse().unwrap_or(0x4000)
                }
            }
            Err(_) => 0x4000,
        };
        RuntimeConfig { stack_size }
    }

    /// Apply the configuration to the `may` runtime. Call once at startup,
    /// before the server starts.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stack_size() {
        // no env var set in the test environment
        if env::var("OPROUTE_STACK_SIZE").is_err() {
            assert_eq!(RuntimeConfig::from_env().stack_size, 0x4000);
        }
    }
}
