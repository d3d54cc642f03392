//! Checkout price summary

use rigsmith_core::config::PricingConfig;
use rigsmith_core::{Build, ConfiguratorConfig};
use serde::{Deserialize, Serialize};

/// Totals shown at checkout
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    /// Sum of list prices
    pub subtotal: f64,
    /// Sum of lowest prices, list price where none is known
    pub lowest_price_subtotal: f64,
    /// `subtotal - lowest_price_subtotal`
    pub savings: f64,
    /// Tax on the list subtotal
    pub tax: f64,
    /// Flat fee unless the subtotal clears the free-shipping threshold
    pub shipping: f64,
    /// `subtotal + tax + shipping`
    pub total: f64,
}

/// Computes price summaries from pricing constants
#[derive(Debug, Clone, Default)]
pub struct PriceCalculator {
    pricing: PricingConfig,
}

impl PriceCalculator {
    /// Calculator with the given constants
    pub fn new(pricing: PricingConfig) -> Self {
        Self { pricing }
    }

    /// Calculator using the pricing section of `config`
    pub fn with_config(config: &ConfiguratorConfig) -> Self {
        Self::new(config.pricing.clone())
    }

    /// Summarize the selected components of a build
    pub fn summarize(&self, build: &Build) -> PriceSummary {
        let (subtotal, lowest_price_subtotal) = build
            .iter()
            .fold((0.0, 0.0), |(list, lowest), (_, component)| {
                (list + component.price, lowest + component.effective_price())
            });
        let tax = subtotal * self.pricing.tax_rate;
        let shipping = if subtotal > self.pricing.free_shipping_threshold {
            0.0
        } else {
            self.pricing.flat_shipping
        };

        PriceSummary {
            subtotal,
            lowest_price_subtotal,
            savings: subtotal - lowest_price_subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }
}

/// Summarize a build with the default pricing constants
pub fn summarize_price(build: &Build) -> PriceSummary {
    PriceCalculator::default().summarize(build)
}
