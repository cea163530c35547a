//! Named action inputs.
//!
//! The runner exposes each input declared in `action.yml` as an environment
//! variable `INPUT_<NAME>`, where `<NAME>` is the input name upper-cased with
//! spaces replaced by underscores.

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;

use crate::error::{ActionError, Result};

const INPUT_PREFIX: &str = "INPUT_";

/// Options for reading a single input.
#[derive(Debug, Clone, Copy)]
pub struct InputOptions {
    /// Fail when the input is missing or empty.
    pub required: bool,
    /// Strip leading and trailing whitespace from the value.
    pub trim_whitespace: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            required: false,
            trim_whitespace: true,
        }
    }
}

/// Source of action inputs.
pub trait InputProvider {
    /// Reads an input, returning the empty string when it is not set.
    fn get_input_with(&self, name: &str, options: &InputOptions) -> Result<String>;

    fn get_input(&self, name: &str) -> Result<String> {
        self.get_input_with(name, &InputOptions::default())
    }

    /// Reads an input as a flag. See [`is_truthy`].
    fn get_bool_input(&self, name: &str) -> Result<bool> {
        Ok(is_truthy(&self.get_input(name)?))
    }
}

/// Only `true`, in any case, enables a flag input. Anything else is off.
pub fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Environment variable name carrying the input `name`.
pub fn input_env_name(name: &str) -> String {
    format!("{INPUT_PREFIX}{}", name.replace(' ', "_").to_uppercase())
}

/// Inputs captured from the process environment at startup.
#[derive(Debug, Clone, Default)]
pub struct EnvInputs {
    vars: HashMap<String, String>,
    /// `INPUT_*` variables whose value is not valid UTF-8.
    invalid: HashSet<String>,
}

impl EnvInputs {
    /// Snapshots every `INPUT_*` variable of the current process.
    ///
    /// Variables that are not valid UTF-8 never abort the snapshot: unrelated
    /// ones are skipped, and an input holding one fails when it is read.
    pub fn from_env() -> Self {
        Self::from_vars_os(std::env::vars_os())
    }

    /// Builds inputs from raw `(variable, value)` pairs, keeping `INPUT_*` ones.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.starts_with(INPUT_PREFIX))
            .collect::<HashMap<_, _>>();
        tracing::debug!(count = vars.len(), "captured action inputs");
        Self {
            vars,
            invalid: HashSet::new(),
        }
    }

    /// Like [`EnvInputs::from_vars`], for OS strings that may not be UTF-8.
    pub fn from_vars_os<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut inputs = Self::default();
        for (key, value) in vars {
            let Ok(key) = key.into_string() else {
                continue;
            };
            if !key.starts_with(INPUT_PREFIX) {
                continue;
            }
            match value.into_string() {
                Ok(value) => {
                    inputs.vars.insert(key, value);
                }
                Err(_) => {
                    tracing::warn!(variable = %key, "input is not valid UTF-8");
                    inputs.invalid.insert(key);
                }
            }
        }
        tracing::debug!(
            count = inputs.vars.len(),
            invalid = inputs.invalid.len(),
            "captured action inputs"
        );
        inputs
    }
}

impl InputProvider for EnvInputs {
    fn get_input_with(&self, name: &str, options: &InputOptions) -> Result<String> {
        let env_name = input_env_name(name);
        if self.invalid.contains(&env_name) {
            return Err(ActionError::InputNotUnicode(name.to_string()));
        }

        let raw = self
            .vars
            .get(&env_name)
            .map(String::as_str)
            .unwrap_or_default();

        if options.required && raw.is_empty() {
            return Err(ActionError::InputRequired(name.to_string()));
        }

        let value = if options.trim_whitespace {
            raw.trim()
        } else {
            raw
        };
        Ok(value.to_string())
    }
}
