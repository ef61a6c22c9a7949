use crate::model::{Gender, MultiplierConfig, Role};
use fxhash::FxHashMap;
use std::hash::Hash;

/// Multiplier used for keys absent from a table.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Looks up `key` in `table`, falling back to [`DEFAULT_MULTIPLIER`].
pub fn resolve<K: Eq + Hash>(table: &FxHashMap<K, f64>, key: &K) -> f64 {
    table.get(key).copied().unwrap_or(DEFAULT_MULTIPLIER)
}

/// Resolves gender and role multipliers against one immutable configuration.
#[derive(Clone, Copy)]
pub struct MultiplierResolver<'a> {
    config: &'a MultiplierConfig,
}

impl<'a> MultiplierResolver<'a> {
    pub fn new(config: &'a MultiplierConfig) -> Self {
        Self { config }
    }

    pub fn gender(&self, gender: Gender) -> f64 {
        resolve(&self.config.gender, &gender)
    }

    pub fn role(&self, role: Role) -> f64 {
        resolve(&self.config.role, &role)
    }
}
