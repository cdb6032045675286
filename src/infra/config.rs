use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};

/// Target framework of the scaffolded project.
///
/// `next` projects route by filesystem convention, so the router-file
/// engine is skipped for them and only the component file is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    React,
    Next,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Project root all page/router paths are resolved against
    pub base_dir: String,

    /// Target framework (react routes via the generated router file)
    pub project_type: ProjectType,

    /// Emit .tsx sources when true, .jsx otherwise
    pub typescript: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: ".".to_string(),
            project_type: ProjectType::React,
            typescript: true,
        }
    }
}

impl Config {
    /// Source extension for generated files, per the typescript flag.
    pub fn extension(&self) -> &'static str {
        if self.typescript { "tsx" } else { "jsx" }
    }
}

pub fn load_config() -> Result<Config> {
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["pagewright.toml", "pagewright.json", ".pagewright.toml"];

    for path in &config_paths {
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Add environment variables with PAGEWRIGHT_ prefix
    builder = builder.add_source(config::Environment::with_prefix("PAGEWRIGHT").separator("__"));

    let cfg = builder.build().context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(args: InitArgs, ctx: &AppContext) -> Result<()> {
    let config_path = args.path.join("pagewright.toml");

    if config_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run {
        if !ctx.quiet {
            println!("DRY RUN: Would write {}", config_path.display());
        }
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
