//! Fare estimation for a planned ride.

use serde::{Deserialize, Serialize};

/// Base fare in whole currency units.
pub const BASE_FARE: f64 = 30.0;

/// Per-kilometer rate in whole currency units.
pub const RATE_PER_KM: f64 = 12.0;

/// Pricing policy handed to the route estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub base_fare: f64,
    pub rate_per_km: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_fare: BASE_FARE,
            rate_per_km: RATE_PER_KM,
        }
    }
}

impl PricingConfig {
    /// Formula: `round(distance_km * rate_per_km + base_fare)`, halves rounded up.
    pub fn recommended_fare(&self, distance_km: f64) -> u32 {
        round_fare(distance_km * self.rate_per_km + self.base_fare)
    }

    pub fn quote(&self, distance_km: f64) -> FareQuote {
        FareQuote::new(self.recommended_fare(distance_km))
    }
}

/// Recommended fare under the default pricing policy.
pub fn calculate_recommended_fare(distance_km: f64) -> u32 {
    PricingConfig::default().recommended_fare(distance_km)
}

fn round_fare(amount: f64) -> u32 {
    if !amount.is_finite() || amount <= 0.0 {
        return 0;
    }
    // Non-negative, so `round` (half away from zero) is half-up.
    amount.round().min(f64::from(u32::MAX)) as u32
}

/// Recommended fare plus the host's manual adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareQuote {
    recommended_fare: u32,
    extra_fare: u32,
}

impl FareQuote {
    pub fn new(recommended_fare: u32) -> Self {
        Self {
            recommended_fare,
            extra_fare: 0,
        }
    }

    pub fn recommended_fare(&self) -> u32 {
        self.recommended_fare
    }

    pub fn extra_fare(&self) -> u32 {
        self.extra_fare
    }

    pub fn total(&self) -> u32 {
        self.recommended_fare.saturating_add(self.extra_fare)
    }

    pub fn set_extra_fare(&mut self, extra_fare: u32) {
        self.extra_fare = extra_fare;
    }

    pub fn raise_extra_fare(&mut self, step: u32) {
        self.extra_fare = self.extra_fare.saturating_add(step);
    }

    /// Lower the adjustment, flooring at zero.
    pub fn lower_extra_fare(&mut self, step: u32) {
        self.extra_fare = self.extra_fare.saturating_sub(step);
    }

    pub fn reset_extra_fare(&mut self) {
        self.extra_fare = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fare_includes_base_and_distance() {
        assert_eq!(calculate_recommended_fare(10.0), 150);
        assert_eq!(calculate_recommended_fare(0.0), 30);
    }

    #[test]
    fn fare_rounds_half_up() {
        // 0.125 km * 12 + 30 = 31.5
        assert_eq!(calculate_recommended_fare(0.125), 32);
        // 25.3 km * 12 + 30 = 333.6
        assert_eq!(calculate_recommended_fare(25.3), 334);
        // 0.1 km * 12 + 30 = 31.2
        assert_eq!(calculate_recommended_fare(0.1), 31);
    }

    #[test]
    fn custom_pricing_policy_is_respected() {
        let pricing = PricingConfig {
            base_fare: 50.0,
            rate_per_km: 8.0,
        };
        assert_eq!(pricing.recommended_fare(10.0), 130);
        assert_eq!(pricing.quote(10.0).total(), 130);
    }

    #[test]
    fn degenerate_amounts_floor_at_zero() {
        let pricing = PricingConfig {
            base_fare: -100.0,
            rate_per_km: 1.0,
        };
        assert_eq!(pricing.recommended_fare(5.0), 0);
        assert_eq!(calculate_recommended_fare(f64::NAN), 0);
    }

    #[test]
    fn extra_fare_adjustments_saturate() {
        let mut quote = FareQuote::new(150);
        quote.raise_extra_fare(20);
        assert_eq!(quote.total(), 170);
        quote.lower_extra_fare(50);
        assert_eq!(quote.extra_fare(), 0);
        quote.set_extra_fare(100);
        quote.reset_extra_fare();
        assert_eq!(quote.total(), 150);
    }
}
