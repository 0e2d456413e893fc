//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_FILE;

/// Inline static stylesheets and scripts with relocated URLs
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (searched upward from the current directory)
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print resolved imports and asset paths
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print a stylesheet with URLs rewritten and imports inlined
    #[command(visible_alias = "s")]
    Style {
        /// Logical asset name (e.g. css/app.css)
        name: String,

        /// Wrap the output in a <style> tag
        #[arg(short, long)]
        wrap: bool,
    },

    /// Print a script verbatim
    #[command(visible_alias = "j")]
    Script {
        /// Logical asset name (e.g. js/app.js)
        name: String,

        /// Wrap the output in a <script> tag
        #[arg(short, long)]
        wrap: bool,
    },

    /// Rewrite an arbitrary CSS file as if it lived under the static dirs
    #[command(visible_alias = "r")]
    Rewrite {
        /// CSS file to rewrite
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Logical name to resolve against (default: derived from the static dirs, else the file name)
        #[arg(short, long)]
        name: Option<String>,

        /// Override the configured base URL
        #[arg(short, long)]
        base_url: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style() {
        let cli = Cli::parse_from(["inline-static", "style", "css/app.css", "--wrap"]);
        assert!(matches!(
            cli.command,
            Commands::Style { ref name, wrap: true } if name == "css/app.css"
        ));
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE));
    }

    #[test]
    fn test_parse_rewrite_with_global_flags() {
        let cli = Cli::parse_from([
            "inline-static",
            "rewrite",
            "page.css",
            "-b",
            "https://cdn.example.com/",
            "-v",
            "-C",
            "site/inline.toml",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("site/inline.toml"));
        let Commands::Rewrite { file, name, base_url } = cli.command else {
            panic!("expected rewrite command");
        };
        assert_eq!(file, PathBuf::from("page.css"));
        assert_eq!(name, None);
        assert_eq!(base_url.as_deref(), Some("https://cdn.example.com/"));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
