//! Runtime abstraction for process-level operations.
//!
//! Configuration loading goes through this trait instead of reading the
//! process environment directly, so tests can supply variables without
//! touching global state.

mod env;

use std::env as std_env;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }
}
