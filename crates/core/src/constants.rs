/// Pivot currency used by exchange-rate tables when none is configured
pub const DEFAULT_PIVOT_CURRENCY: &str = "USD";

/// Maximum number of ranked siblings per hierarchy level
pub const DEFAULT_MAX_TAGS: usize = 5;

/// Display name of the synthetic bucket holding tags outside the top N
pub const OTHER_TAGS_LABEL: &str = "other tags";

/// Display name of the synthetic root bucket for tag-less transactions
pub const UNTAGGED_LABEL: &str = "untagged";
