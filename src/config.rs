//! Engine Configuration

use rust_decimal::Decimal;

/// Identifier reserved for the loyalty points payment method.
pub const DEFAULT_POINTS_METHOD_ID: &str = "PUNKTY";

/// Tunable parameters for a batch run.
///
/// `EngineConfig::default()` reproduces the reference rules: a fixed 10%
/// discount once at least 10% of the order value can be paid with points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Identifier of the points payment method
    pub points_method_id: String,

    /// Discount granted by a partial points payment, and the share of the order paid with points
    pub partial_points_discount: Decimal,

    /// Minimum points balance, relative to the order value, required for a partial points payment
    pub partial_points_threshold: Decimal,

    /// Decimal places kept when truncating the points-to-value ratio
    pub threshold_ratio_scale: u32,
}

impl EngineConfig {
    /// Create a configuration with the default rates and a custom points method identifier.
    pub fn with_points_method(points_method_id: impl Into<String>) -> Self {
        Self {
            points_method_id: points_method_id.into(),
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            points_method_id: DEFAULT_POINTS_METHOD_ID.to_string(),
            partial_points_discount: Decimal::new(10, 2),
            partial_points_threshold: Decimal::new(10, 2),
            threshold_ratio_scale: 2,
        }
    }
}
