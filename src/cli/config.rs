//! `imagebuilder config init`

use crate::cli::ConfigInitArgs;
use crate::config::BuilderConfig;
use std::fs;

const TEMPLATE: &str = include_str!("../../imagebuilder.example.toml");

/// The commented template, with `build.base_url` replaced when one is given.
///
/// The result is parsed back and validated so a bad URL is refused before
/// anything is written.
fn render_config(base_url: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let rendered = match base_url {
        Some(url) => TEMPLATE
            .lines()
            .map(|line| {
                if line.trim_start().starts_with("base_url =") {
                    format!("base_url = {}", toml::Value::String(url.to_string()))
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
            + "\n",
        None => TEMPLATE.to_string(),
    };

    let config: BuilderConfig = toml::from_str(&rendered)?;
    config.validate()?;
    Ok(rendered)
}

pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "{} already exists; pass --force to replace it",
            args.output.display()
        )
        .into());
    }

    let rendered = render_config(args.base_url.as_deref())?;
    fs::write(&args.output, rendered)?;

    println!("✓ Wrote {}", args.output.display());
    if args.base_url.is_none() {
        println!("  build.base_url still points at localhost; edit it or pass --base-url.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn init_args(output: PathBuf, force: bool, base_url: Option<&str>) -> ConfigInitArgs {
        ConfigInitArgs {
            output,
            force,
            base_url: base_url.map(str::to_string),
        }
    }

    #[test]
    fn test_template_is_loadable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("imagebuilder.toml");

        handle_config_init(&init_args(output_path.clone(), false, None)).unwrap();

        let content = fs::read_to_string(&output_path).unwrap();
        assert_eq!(content, TEMPLATE);
        let config = BuilderConfig::load(Some(&output_path)).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_is_written() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("imagebuilder.toml");

        handle_config_init(&init_args(
            output_path.clone(),
            false,
            Some("https://mybinder.example.org"),
        ))
        .unwrap();

        let config = BuilderConfig::load(Some(&output_path)).unwrap();
        assert_eq!(config.build.base_url, "https://mybinder.example.org");
        assert_eq!(config.build.provider, "gh");
        let content = fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("# Origin hosting the BinderHub build service"));
    }

    #[test]
    fn test_invalid_base_url_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("imagebuilder.toml");

        assert!(handle_config_init(&init_args(output_path.clone(), false, Some("not a url"))).is_err());
        assert!(!output_path.exists());
    }

    #[test]
    fn test_existing_file_needs_force() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("imagebuilder.toml");
        fs::write(&output_path, "existing").unwrap();

        let err = handle_config_init(&init_args(output_path.clone(), false, None)).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "existing");

        handle_config_init(&init_args(output_path.clone(), true, None)).unwrap();
        assert!(fs::read_to_string(&output_path).unwrap().contains("[terminal]"));
    }
}
