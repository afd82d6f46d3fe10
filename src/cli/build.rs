//! Build command implementation

use crate::build::BuildDriver;
use crate::cli::BuildArgs;
use crate::config::BuilderConfig;
use crate::form::{ImageBuilder, StartBuild};
use crate::sink::WriterSink;
use colored::Colorize;

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &BuildArgs,
) -> Result<BuilderConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        BuilderConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        BuilderConfig::default()
    };

    config = config.with_env_overrides();

    // CLI overrides (highest priority)
    if let Some(ref base_url) = args.base_url {
        config.build.base_url = base_url.clone();
    }
    if let Some(ref token) = args.token {
        config.build.build_token = Some(token.clone());
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Handle `imagebuilder build`: stream the log to stdout and print the image name.
pub async fn run_build(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args)?;
    crate::logging::init_tracing(&config.logging)?;

    let driver = BuildDriver::from_config(&config.build, &config.terminal)?;
    let mut sink = WriterSink::stdout();

    let mut session = ImageBuilder::new("image", config.build.default_ref.clone());
    session.set_active(true);
    session.prefill(&args.repository, args.git_ref.as_deref());

    match session.start_build(&driver, &mut sink).await {
        StartBuild::Built(image) => {
            println!();
            println!("{} {}", "✓ Image built:".green(), image.green().bold());
            Ok(())
        }
        StartBuild::Invalid => Err(invalid_message(&session).into()),
        StartBuild::Failed => Err("Error building image.".into()),
        StartBuild::Busy => Err("A build is already running".into()),
    }
}

fn invalid_message(session: &ImageBuilder) -> String {
    session
        .repository()
        .display_error()
        .or_else(|| session.git_ref().error())
        .unwrap_or_else(|| "Invalid build request".to_string())
}
