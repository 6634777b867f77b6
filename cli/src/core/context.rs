//! # rootgen Generation Context
//!
//! File: cli/src/core/context.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! The generation context maps parameter names to values. It is a nested TOML
//! table so that dotted parameters such as `_user.email_` resolve by walking
//! `user` then `email`, the same shape a `[context.user]` section produces in a
//! config file or descriptor.
//!
//! ## Sources
//!
//! A run assembles one context, lowest precedence first:
//! 1. `[context]` from the configuration files (`core::config`).
//! 2. Environment variables named `ROOTGEN_VAR_<KEY>`. The key is lowercased
//!    and `__` becomes a dot, so `ROOTGEN_VAR_USER__EMAIL` sets `user.email`.
//! 3. `--var KEY=VALUE` flags. Dotted keys create nested tables.
//!
//! Each template root then layers this run context over its own descriptor
//! defaults (`GenerationContext::layered_over`), so the run always wins.
//!
//! The context is built once and never mutated during a generation pass.
//!
use toml::{Table, Value};

/// Prefix of environment variables that contribute to the context.
pub const ENV_PREFIX: &str = "ROOTGEN_VAR_";

/// Parameter values available to the substitution engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationContext {
    values: Table,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(values: Table) -> Self {
        Self { values }
    }

    /// Sets `key` (possibly dotted) to `value`, creating intermediate tables.
    ///
    /// An intermediate segment that currently holds a scalar is replaced by a
    /// table, so `--var user=x --var user.email=y` ends with a `user` table.
    pub fn insert_dotted(&mut self, key: &str, value: impl Into<Value>) {
        let segments: Vec<&str> = key.split('.').filter(|s| !s.is_empty()).collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut table = &mut self.values;
        for segment in parents {
            let slot = table
                .entry(segment.to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            if !slot.is_table() {
                *slot = Value::Table(Table::new());
            }
            table = match slot {
                Value::Table(inner) => inner,
                _ => unreachable!("slot was just made a table"),
            };
        }
        table.insert(last.to_string(), value.into());
    }

    /// Walks nested tables along `path`.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.values.get(*first)?;
        for segment in rest {
            current = current.as_table()?.get(*segment)?;
        }
        Some(current)
    }

    /// Returns a copy of this context sitting on top of `defaults`.
    pub fn layered_over(&self, defaults: &Table) -> GenerationContext {
        let mut layered = defaults.clone();
        merge_tables(&mut layered, &self.values);
        GenerationContext { values: layered }
    }

    /// Applies every `ROOTGEN_VAR_*` variable from `vars`.
    pub fn apply_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(key) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let key = key.to_lowercase().replace("__", ".");
            if !key.is_empty() {
                self.insert_dotted(&key, value);
            }
        }
    }
}

/// Recursively merges `overrides` into `base`. Tables merge key by key, any
/// other value is replaced.
pub fn merge_tables(base: &mut Table, overrides: &Table) {
    for (key, value) in overrides {
        match (base.get_mut(key), value) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Renders a value for substitution, or `None` when it does not count as found.
///
/// Empty strings, `0`, `0.0`, NaN and `false` are treated as missing so the
/// lookup falls through to the next casing. Tables and arrays have no text
/// form and are missing as well.
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Integer(0) => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) if *f == 0.0 || f.is_nan() => None,
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(false) => None,
        Value::Boolean(true) => Some("true".to_string()),
        Value::Datetime(d) => Some(d.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}
