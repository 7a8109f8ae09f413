/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Substitute name when a record references a category that no longer exists
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Fallback icon identifier for unresolved categories
pub const DEFAULT_CATEGORY_ICON: &str = "Circle";

/// Fallback color for unresolved categories
pub const DEFAULT_CATEGORY_COLOR: &str = "#64748b";

/// Number of months covered by the trend report
pub const TREND_MONTHS: u32 = 6;
