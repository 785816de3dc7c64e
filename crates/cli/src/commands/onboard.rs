//! `localagent onboard` — First-time setup.

use localagent_config::AppConfig;
use std::path::Path;

pub fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_path();

    println!("🤖 LocalAgent — First-Time Setup");
    println!("================================\n");

    if write_default(&config_path, force)? {
        println!("✅ Wrote default config: {}", config_path.display());
    } else {
        println!("  Config file exists: {}", config_path.display());
        println!("  (use --force to overwrite)");
    }

    println!();
    println!("Next steps:");
    println!("  1. Start Ollama:          ollama serve");
    println!("  2. Pull the model:        ollama pull {}", AppConfig::default().model);
    println!("  3. Check everything:      localagent doctor");
    println!("  4. Start chatting:        localagent chat");

    Ok(())
}

/// Write the default config to `path`. Returns `false` if a file was
/// already there and `force` is off.
pub fn write_default(path: &Path, force: bool) -> Result<bool, Box<dyn std::error::Error>> {
    if path.exists() && !force {
        return Ok(false);
    }
    AppConfig::default().save_to(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".localagent").join("config.toml");

        assert!(write_default(&path, false).unwrap());
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.context_window, 6);
    }

    #[test]
    fn existing_file_is_kept_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "model = \"mine\"\n").unwrap();

        assert!(!write_default(&path, false).unwrap());
        assert_eq!(AppConfig::load_from(&path).unwrap().model, "mine");

        assert!(write_default(&path, true).unwrap());
        assert_eq!(AppConfig::load_from(&path).unwrap().model, "gpt-oss:20b");
    }
}
