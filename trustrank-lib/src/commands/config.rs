use crate::Result;
use crate::analysis::{AnalysisSettings, RuleFailurePolicy};
use crate::metrics::{Metric, MetricKind, MetricSet};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use strum::IntoEnumIterator;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// The configuration file looked for in the current directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "trustrank.toml";

/// One entry of the `metrics` list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MetricConfig {
    pub kind: MetricKind,

    /// Report column name, defaults to the kind's standard name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Metrics to score, in report column order
    #[serde(default = "default_metrics")]
    pub metrics: Vec<MetricConfig>,

    /// Semgrep rule configurations run by the correctness metric
    #[serde(default)]
    pub correctness_rules: Vec<String>,

    /// Maximum time a single rule may run against one repository
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub rule_timeout: Duration,

    /// Maximum time cloning one repository may take
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub checkout_timeout: Duration,

    /// Whether failed rules abort the run or count as zero issues
    #[serde(default)]
    pub rule_failure_policy: RuleFailurePolicy,

    /// Number of repositories scored at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_metrics() -> Vec<MetricConfig> {
    MetricKind::iter()
        .map(|kind| MetricConfig {
            kind,
            name: None,
            weight: kind.record_weight(),
        })
        .collect()
}

const fn default_timeout() -> Duration {
    Duration::from_secs(5 * 60)
}

const fn default_concurrency() -> usize {
    4
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `trustrank.toml` in `base_dir` is used when it exists.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading trustrank configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading trustrank configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config
            .validate()
            .map_err(|e| e.enrich_with(|| format!("validating configuration file '{final_path}'")))?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Build the validated metric list.
    pub fn metric_set(&self) -> Result<MetricSet> {
        MetricSet::new(self.metrics.iter().map(|metric| match &metric.name {
            Some(name) => Metric::named(metric.kind, name, metric.weight),
            None => Metric::new(metric.kind, metric.weight),
        }))
    }

    #[must_use]
    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings::new(self.correctness_rules.iter().cloned(), self.rule_timeout)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let _ = self.metric_set()?;

        if let Some(name) = self.metrics.iter().filter_map(|m| m.name.as_deref()).find(|name| name.trim().is_empty()) {
            return Err(app_err!("metric names must not be blank, got '{name}'"));
        }

        if self.correctness_rules.iter().any(|rule| rule.trim().is_empty()) {
            return Err(app_err!("correctness_rules must not contain blank entries"));
        }

        if self.rule_timeout.is_zero() {
            return Err(app_err!("rule_timeout must be greater than zero"));
        }

        if self.checkout_timeout.is_zero() {
            return Err(app_err!("checkout_timeout must be greater than zero"));
        }

        if self.concurrency == 0 {
            return Err(app_err!("concurrency must be at least 1"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.rule_failure_policy, RuleFailurePolicy::Abort);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.rule_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_default_config_matches_standard_metrics() {
        let metrics = Config::default().metric_set().unwrap();
        assert_eq!(metrics, MetricSet::standard());
    }

    #[test]
    fn test_omitted_metrics_use_standard_set() {
        let config: Config = toml::from_str("correctness_rules = []").unwrap();
        assert_eq!(config.metric_set().unwrap(), MetricSet::standard());
        assert!(config.analysis_settings().rules.is_empty());
    }

    #[test]
    fn test_custom_metrics() {
        let config: Config = toml::from_str(
            r#"
[[metrics]]
kind = "license"
weight = 0.5

[[metrics]]
kind = "bus_factor"
name = "AUTHORS"
weight = 1.5
"#,
        )
        .unwrap();

        let metrics = config.metric_set().unwrap();
        let names: Vec<_> = metrics.iter().map(|m| m.name.to_string()).collect();
        assert_eq!(names, ["LICENSE_SCORE", "AUTHORS"]);
        assert_eq!(metrics.weights(), [0.5, 1.5]);
    }

    #[test]
    fn test_validate_empty_metrics() {
        let config = Config {
            metrics: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_finite_weight() {
        let config = Config {
            metrics: vec![MetricConfig {
                kind: MetricKind::RampUp,
                name: None,
                weight: f64::NAN,
            }],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_blank_metric_name() {
        let config = Config {
            metrics: vec![MetricConfig {
                kind: MetricKind::RampUp,
                name: Some("  ".into()),
                weight: 1.0,
            }],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_blank_rule() {
        let config = Config {
            correctness_rules: vec![String::new()],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_timeouts() {
        let config = Config {
            rule_timeout: Duration::ZERO,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            checkout_timeout: Duration::ZERO,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_concurrency() {
        let config = Config {
            concurrency: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_metric_kind() {
        let result = toml::from_str::<Config>(
            r#"
[[metrics]]
kind = "popularity"
weight = 1.0
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let output_path = base_dir.join(DEFAULT_CONFIG_FILE);
        Config::save_default(&output_path).unwrap();

        let explicit = Config::load(&base_dir, Some(&output_path)).unwrap();
        let discovered = Config::load(&base_dir, None).unwrap();
        assert_eq!(explicit, Config::default());
        assert_eq!(discovered, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::load(&base_dir, None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_reports_invalid_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("bad.toml")).unwrap();
        fs::write(&path, "concurrency = 0\n").unwrap();

        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let err = Config::load(&base_dir, Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("concurrency must be at least 1"), "{err:#}");
    }
}
