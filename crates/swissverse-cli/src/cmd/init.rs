use anyhow::bail;
use std::path::Path;
use swissverse_core::config::{config_path, Config};

pub fn run(root: &Path, url: &str, api_key: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::new(url);
    config.backend.api_key = api_key.unwrap_or_default();
    if !config.save_if_missing(root)? {
        bail!("already initialized: {}", config_path(root).display());
    }

    println!("Initialized Swissverse config at {}", config_path(root).display());
    if config.backend.api_key.is_empty() {
        println!("No API key stored; set {}.", swissverse_core::config::API_KEY_ENV);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_writes_config_once() {
        let dir = TempDir::new().unwrap();
        run(dir.path(), "https://content.swissverse.org", Some("k".into())).unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.backend.url, "https://content.swissverse.org");

        assert!(run(dir.path(), "https://elsewhere", None).is_err());
    }

    #[test]
    fn rerun_keeps_original_config() {
        let dir = TempDir::new().unwrap();
        run(dir.path(), "https://content.swissverse.org", Some("k".into())).unwrap();

        let err = run(dir.path(), "https://elsewhere", None).unwrap_err();
        assert!(err.to_string().contains("already initialized"));
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.backend.url, "https://content.swissverse.org");
        assert_eq!(config.backend.api_key, "k");
    }
}
