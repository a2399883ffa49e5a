use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The metrics a repository can be scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MetricKind {
    /// Onboarding ease, measured by README length.
    RampUp,

    /// Negated count of static analysis findings.
    Correctness,

    /// Distinct commit authors over the last year.
    BusFactor,

    /// Negated average age of open issues plus dependency count.
    Responsiveness,

    /// Whether the license is compatible with the target license family.
    License,

    /// Reciprocal of the declared dependency count.
    Dependency,
}

impl MetricKind {
    /// The column name reports use for this metric unless configured otherwise.
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::RampUp => "RAMP_UP_SCORE",
            Self::Correctness => "CORRECTNESS_SCORE",
            Self::BusFactor => "BUS_FACTOR_SCORE",
            Self::Responsiveness => "RESPONSIVE_MAINTAINER_SCORE",
            Self::License => "LICENSE_SCORE",
            Self::Dependency => "DEPENDENCY_SCORE",
        }
    }

    /// The weight this metric carries in structured score records.
    ///
    /// This scheme is fixed and independent of the weights used for ranking.
    #[must_use]
    pub const fn record_weight(self) -> f64 {
        match self {
            Self::RampUp | Self::Correctness | Self::Dependency => 0.2,
            Self::BusFactor => 0.3,
            Self::Responsiveness | Self::License => 0.1,
        }
    }
}
