//! Ordered scope fallback: the first scope that defines a value wins.
//!
//! Levels are read lazily and strictly in the order they were added. Once a
//! level answers, later levels are never read. The terminal level must always
//! produce a value, so resolution never reports "unset" to its caller.

use stockconf_core::ConfigResult;

use crate::parameter::Parameter;
use crate::scope::Scope;
use crate::value::{ConfigValue, FromConfigValue};

type LevelRead<'a> = Box<dyn FnOnce() -> ConfigResult<Option<ConfigValue>> + 'a>;

/// Builder for one parameter's fallback chain.
pub struct ScopeFallbackResolver<'a> {
    parameter: Parameter,
    levels: Vec<(Scope, LevelRead<'a>)>,
}

impl<'a> ScopeFallbackResolver<'a> {
    pub fn new(parameter: Parameter) -> Self {
        Self {
            parameter,
            levels: Vec::new(),
        }
    }

    /// Append an optional level.
    pub fn level<F>(mut self, scope: Scope, read: F) -> Self
    where
        F: FnOnce() -> ConfigResult<Option<ConfigValue>> + 'a,
    {
        self.levels.push((scope, Box::new(read)));
        self
    }

    /// Walk the levels, ending at `terminal` if none defines the parameter.
    pub fn resolve_raw<F>(self, terminal_scope: Scope, terminal: F) -> ConfigResult<ConfigValue>
    where
        F: FnOnce() -> ConfigResult<ConfigValue>,
    {
        for (scope, read) in self.levels {
            match read()? {
                Some(value) => {
                    tracing::debug!(parameter = %self.parameter, scope = %scope, "resolved");
                    return Ok(value);
                }
                None => tracing::trace!(parameter = %self.parameter, scope = %scope, "unset"),
            }
        }

        let value = terminal()?;
        tracing::debug!(parameter = %self.parameter, scope = %terminal_scope, "resolved");
        Ok(value)
    }

    /// Same as [`Self::resolve_raw`], cast to `T`.
    pub fn resolve<T, F>(self, terminal_scope: Scope, terminal: F) -> ConfigResult<T>
    where
        T: FromConfigValue,
        F: FnOnce() -> ConfigResult<ConfigValue>,
    {
        let raw = self.resolve_raw(terminal_scope, terminal)?;
        Ok(T::from_config_value(&raw))
    }
}
