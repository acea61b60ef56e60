use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::PricingPolicy;
use crate::search::SuggestionLimits;

pub const ENV_DATA_FILE: &str = "STOREFRONT_DATA_FILE";
pub const ENV_STATUS_INTERVAL_MS: &str = "STOREFRONT_STATUS_INTERVAL_MS";
pub const ENV_CHANNEL_BUFFER: &str = "STOREFRONT_CHANNEL_BUFFER";
pub const ENV_DELIVERY_FEE: &str = "STOREFRONT_DELIVERY_FEE";
pub const ENV_TAX_RATE: &str = "STOREFRONT_TAX_RATE";
pub const ENV_MAX_RESTAURANT_SUGGESTIONS: &str = "STOREFRONT_MAX_RESTAURANT_SUGGESTIONS";
pub const ENV_MAX_DISH_SUGGESTIONS: &str = "STOREFRONT_MAX_DISH_SUGGESTIONS";

/// Runtime settings for [`StorefrontSystem`](super::StorefrontSystem).
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// JSON file backing the store. `None` keeps everything in memory.
    pub data_file: Option<PathBuf>,
    pub status_interval: Duration,
    pub channel_buffer: usize,
    pub pricing: PricingPolicy,
    pub suggestion_limits: SuggestionLimits,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            status_interval: Duration::from_millis(5000),
            channel_buffer: 32,
            pricing: PricingPolicy::default(),
            suggestion_limits: SuggestionLimits::default(),
        }
    }
}

impl StorefrontConfig {
    /// Reads overrides from `STOREFRONT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any name-to-value lookup. Unset names keep their
    /// defaults; unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_file = lookup(ENV_DATA_FILE)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let interval_ms = parse_or(
            &lookup,
            ENV_STATUS_INTERVAL_MS,
            defaults.status_interval.as_millis() as u64,
        );

        Self {
            data_file,
            status_interval: Duration::from_millis(interval_ms.max(1)),
            channel_buffer: parse_or(&lookup, ENV_CHANNEL_BUFFER, defaults.channel_buffer).max(1),
            pricing: PricingPolicy {
                delivery_fee: parse_or::<Decimal>(&lookup, ENV_DELIVERY_FEE, defaults.pricing.delivery_fee),
                tax_rate: parse_or::<Decimal>(&lookup, ENV_TAX_RATE, defaults.pricing.tax_rate),
            },
            suggestion_limits: SuggestionLimits {
                restaurants: parse_or(
                    &lookup,
                    ENV_MAX_RESTAURANT_SUGGESTIONS,
                    defaults.suggestion_limits.restaurants,
                ),
                dishes: parse_or(&lookup, ENV_MAX_DISH_SUGGESTIONS, defaults.suggestion_limits.dishes),
            },
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match lookup(name) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(variable = name, value = %raw, "Ignoring unparseable setting");
                default
            }
        },
    }
}
