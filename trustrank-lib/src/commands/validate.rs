use super::Host;
use super::config::Config;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `trustrank.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let config_path = args.config.as_ref();

    match Config::load(Utf8Path::new("."), config_path) {
        Ok(config) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file specified)");
            }

            for metric in &config.metric_set()? {
                let _ = writeln!(host.output(), "  {} ({}) weight {}", metric.name, metric.kind, metric.weight);
            }

            if config.correctness_rules.is_empty() {
                let _ = writeln!(host.output(), "No correctness rules, code analysis is skipped");
            } else {
                let _ = writeln!(host.output(), "Correctness rules: {}", config.correctness_rules.join(", "));
            }

            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::TestHost;
    use crate::commands::init::{InitArgs, init_config};

    fn write_config(dir: &tempfile::TempDir, name: &str, text: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(name)).unwrap();
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_generated_config_is_valid() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().join("trustrank.toml")).unwrap();

        let mut init_host = TestHost::new();
        init_config(&mut init_host, &InitArgs { output: Some(config_path.clone()) }).unwrap();
        assert!(String::from_utf8(init_host.output_buf).unwrap().contains("Generated default configuration file"));

        let mut host = TestHost::new();
        validate_config(&mut host, &ValidateArgs { config: Some(config_path) }).unwrap();

        let output = String::from_utf8(host.output_buf).unwrap();
        assert!(output.contains("Configuration file is valid"), "{output}");
        assert!(output.contains("BUS_FACTOR_SCORE (bus_factor) weight 0.3"), "{output}");
        assert!(output.contains("Correctness rules: p/javascript"), "{output}");
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = write_config(&temp_dir, "invalid.toml", "[[metrics]\nkind = \"license\"\n");

        let mut host = TestHost::new();
        let result = validate_config(&mut host, &ValidateArgs { config: Some(config_path) });

        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
        assert!(String::from_utf8(host.error_buf).unwrap().contains("Configuration validation failed"));
    }

    #[test]
    fn test_unknown_field() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = write_config(&temp_dir, "unknown.toml", "unknown_field = \"value\"\n");

        let mut host = TestHost::new();
        let result = validate_config(&mut host, &ValidateArgs { config: Some(config_path) });
        assert!(result.is_err(), "unknown fields should be rejected");
    }

    #[test]
    fn test_invalid_duration_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = write_config(&temp_dir, "duration.toml", "rule_timeout = \"not a valid duration\"\n");

        let mut host = TestHost::new();
        assert!(validate_config(&mut host, &ValidateArgs { config: Some(config_path) }).is_err());
    }

    #[test]
    fn test_duplicate_metric_names() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = write_config(
            &temp_dir,
            "duplicate.toml",
            r#"
[[metrics]]
kind = "license"
weight = 0.5

[[metrics]]
kind = "ramp_up"
name = "LICENSE_SCORE"
weight = 0.5
"#,
        );

        let mut host = TestHost::new();
        let result = validate_config(&mut host, &ValidateArgs { config: Some(config_path) });
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("LICENSE_SCORE"), "{message}");
    }

    #[test]
    fn test_empty_config_is_valid() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = write_config(&temp_dir, "empty.toml", "# Empty config file\n");

        let mut host = TestHost::new();
        validate_config(&mut host, &ValidateArgs { config: Some(config_path) }).unwrap();

        let output = String::from_utf8(host.output_buf).unwrap();
        assert!(output.contains("No correctness rules"), "{output}");
        assert!(output.contains("DEPENDENCY_SCORE (dependency) weight 0.2"), "{output}");
    }
}
