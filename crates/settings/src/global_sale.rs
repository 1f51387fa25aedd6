//! Configuration accessor for the global sale.
//!
//! Both values are re-read from the store on every call; nothing is cached here.
//! Malformed or unreadable values never fail a pricing decision, they coerce to
//! "no discount".

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use sitewide_core::Percentage;

use crate::store::SettingsStore;

/// Store key holding the discount percentage (raw, as submitted).
pub const PERCENTAGE_KEY: &str = "global_sale_percentage";

/// Store key holding the enable checkbox value.
pub const ENABLED_KEY: &str = "global_sale_enabled";

/// Value the enable checkbox stores when ticked.
pub const AFFIRMATIVE: &str = "yes";

/// One snapshot of the global sale configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalSaleConfig {
    pub enabled: bool,
    pub percentage: Percentage,
}

impl GlobalSaleConfig {
    /// Active only when both enabled and non-zero.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.percentage.is_zero()
    }
}

/// Coerce a raw stored percentage into `[0, 100]`.
///
/// Numbers and numeric strings become `min(100, floor(abs(value)))`; everything else
/// (missing, null, booleans, arrays, non-numeric text, NaN) becomes zero.
pub fn coerce_percentage(raw: Option<&Value>) -> Percentage {
    let number = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Percentage::clamped(n.abs().trunc().min(100.0) as u64),
        _ => Percentage::ZERO,
    }
}

/// Reads the global sale configuration from an injected settings store.
#[derive(Debug, Clone)]
pub struct GlobalSaleSettings<S> {
    store: S,
}

impl<S> GlobalSaleSettings<S>
where
    S: SettingsStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored discount percentage, always within `[0, 100]`.
    pub fn discount_percentage(&self) -> Percentage {
        coerce_percentage(self.read(PERCENTAGE_KEY).as_ref())
    }

    /// True iff the checkbox is ticked and the percentage is above zero.
    pub fn is_enabled(&self) -> bool {
        self.flag_set() && !self.discount_percentage().is_zero()
    }

    /// Both values read together.
    pub fn config(&self) -> GlobalSaleConfig {
        let percentage = self.discount_percentage();
        GlobalSaleConfig {
            enabled: self.flag_set() && !percentage.is_zero(),
            percentage,
        }
    }

    fn flag_set(&self) -> bool {
        matches!(self.read(ENABLED_KEY), Some(Value::String(s)) if s == AFFIRMATIVE)
    }

    fn read(&self, key: &str) -> Option<Value> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "settings read failed; treating as unset");
                None
            }
        }
    }
}
