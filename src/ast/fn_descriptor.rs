use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Date/time part extracted by an `extractFn` projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractFn {
    Year,
    Month,
    Week,
    Day,
    Weekday,
    Hour,
    Minute,
    Second,
}

impl ExtractFn {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractFn::Year => "year",
            ExtractFn::Month => "month",
            ExtractFn::Week => "week",
            ExtractFn::Day => "day",
            ExtractFn::Weekday => "weekday",
            ExtractFn::Hour => "hour",
            ExtractFn::Minute => "minute",
            ExtractFn::Second => "second",
        }
    }
}

/// Aggregation over a json/array column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayFn {
    Count,
}

impl ArrayFn {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayFn::Count => "count",
        }
    }
}

/// Function applied to a single column of the current collection.
///
/// The result is still one scalar column, so a `fn` node always produces exactly
/// one select entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum FnDescriptor {
    #[serde(rename = "extractFn")]
    Extract {
        #[serde(rename = "fn")]
        function: ExtractFn,
    },
    #[serde(rename = "arrayFn")]
    Array {
        #[serde(rename = "fn")]
        function: ArrayFn,
    },
}

impl FnDescriptor {
    pub fn extract(function: ExtractFn) -> Self {
        Self::Extract { function }
    }

    pub fn array(function: ArrayFn) -> Self {
        Self::Array { function }
    }

    /// Discriminant used as the readable prefix of generated aliases (`month`, `count`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            FnDescriptor::Extract { function } => function.as_str(),
            FnDescriptor::Array { function } => function.as_str(),
        }
    }

    /// Seed handed to the alias generator for `field`: `<fn>_<field>`.
    pub fn alias_seed(&self, field: &str) -> String {
        format!("{}_{}", self.name(), field)
    }
}

impl Display for FnDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
