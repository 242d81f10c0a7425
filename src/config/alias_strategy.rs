use serde::{Deserialize, Serialize};

/// How generated aliases get their uniqueness suffix.
///
/// - `Random`: `<seed>_<random>` built from a UUID v4.
/// - `Sequential`: `<seed>_<n>` from a per-pass counter. Deterministic, used by tests
///   and by callers that want stable SQL text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasStrategy {
    /// Random suffixes (default).
    #[default]
    Random,
    /// Counter suffixes.
    Sequential,
}
