//! inline-static - print static assets ready to inline into HTML.

use std::fs;
use std::io::{Write, stdout};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use inline_static::{
    cli::{Cli, Commands},
    config::{InlineConfig, init_config},
    debug,
    inline::{StaticInliner, wrap_script, wrap_style},
    logger,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let mut config = InlineConfig::load(&cli.config)?;
    if let Commands::Rewrite {
        base_url: Some(base_url),
        ..
    } = &cli.command
    {
        config.static_files.base_url = Some(base_url.clone());
    }
    debug!("config"; "base url {}, static url {}", config.base_url(), config.static_url());
    init_config(config);

    let inliner = StaticInliner::from_global();
    let output = match &cli.command {
        Commands::Style { name, wrap } => {
            let css = inliner.inline_style(name)?;
            if *wrap { wrap_style(&css) } else { css }
        }
        Commands::Script { name, wrap } => {
            let js = inliner.inline_javascript(name)?;
            if *wrap { wrap_script(&js) } else { js }
        }
        Commands::Rewrite { file, name, .. } => rewrite_file(&inliner, file, name.as_deref())?,
    };

    let mut stdout = stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Rewrite a CSS file given on the command line.
fn rewrite_file(inliner: &StaticInliner, file: &Path, name: Option<&str>) -> Result<String> {
    let content =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;

    let name = match name {
        Some(name) => name.to_string(),
        None => derive_name(inliner, file),
    };
    debug!("rewrite"; "{} as {}", file.display(), name);

    let css = inliner.rewrite_stylesheet(&name, file, &content)?;
    Ok(css)
}

/// Logical name for a file: relative to a static dir, else its file name.
fn derive_name(inliner: &StaticInliner, file: &Path) -> String {
    let absolute = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());
    inliner.finder().name_for(&absolute).unwrap_or_else(|| {
        file.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}
