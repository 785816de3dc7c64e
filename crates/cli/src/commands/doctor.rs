//! `localagent doctor` — Diagnose configuration and endpoint health.

use localagent_config::AppConfig;

use super::{Overrides, load_config};

pub async fn run(overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 LocalAgent Doctor — System Diagnostics");
    println!("========================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_path();
    if config_path.exists() {
        println!("  ✅ Config file found: {}", config_path.display());
    } else {
        println!("  ⚠️  No config file — using defaults (run `localagent onboard`)");
    }

    let config = match load_config(overrides) {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            println!("     model:          {}", config.model);
            println!("     endpoint:       {}", config.base_url);
            println!("     context window: {} turns", config.context_window);
            println!("     timeout:        {}s", config.request_timeout_secs);
            config
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            println!("\n  ⚠️  1 issue found. See above for details.");
            return Ok(());
        }
    };

    let gateway = localagent_providers::build_from_config(&config);
    match gateway.health_check().await {
        Ok(true) => println!("  ✅ Model endpoint reachable"),
        Ok(false) => {
            println!("  ❌ Model endpoint answered with an error status");
            issues += 1;
        }
        Err(e) => {
            println!("  ❌ {e}");
            println!("     Is Ollama running? Try `ollama serve`.");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
