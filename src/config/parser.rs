use crate::config::types::Config;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Validates a parsed configuration
///
/// A max depth of zero is allowed: such a crawl admits no work and returns
/// an empty summary. Zero concurrency would stall every fetch forever, so it
/// is rejected here.
fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.crawler.max_concurrent_fetches == 0 {
        return Err(ConfigError::Validation(
            "crawler.max-concurrent-fetches must be at least 1".to_string(),
        ));
    }
    if config.crawler.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "crawler.request-timeout-secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[server]
bind-addr = "0.0.0.0:8080"
static-dir = "./web"

[crawler]
max-depth = 5
max-concurrent-fetches = 20
request-timeout-secs = 10
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.server.static_dir, "./web");
        assert_eq!(config.crawler.max_depth, 5);
        assert_eq!(config.crawler.max_concurrent_fetches, 20);
        assert_eq!(config.crawler.request_timeout_secs, 10);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.server.bind_addr, "127.0.0.1:7250");
        assert_eq!(config.crawler.max_depth, 3);
        assert_eq!(config.crawler.max_concurrent_fetches, 15);
    }

    #[test]
    fn test_zero_depth_is_legal() {
        let config_content = r#"
[crawler]
max-depth = 0
"#;
        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.crawler.max_depth, 0);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config_content = r#"
[crawler]
max-concurrent-fetches = 0
"#;
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }
}
