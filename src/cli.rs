use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for the library console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TOML config file (defaults to ./library.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log filter, overriding the config file (e.g. "info" or "library_circulation=debug")
    #[arg(long)]
    pub log_level: Option<String>,

    /// How listings and search results are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

/// Rendering of listings and search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable detail blocks
    #[default]
    Text,
    /// Pretty-printed JSON arrays
    Json,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Args, OutputFormat};

    #[test]
    fn defaults_without_flags() {
        let args = Args::try_parse_from(["library"]);
        assert!(matches!(
            args,
            Ok(ref a) if a.config.is_none() && a.format == OutputFormat::Text && !a.no_color
        ));
    }

    #[test]
    fn all_flags_parse() {
        let args = Args::try_parse_from([
            "library",
            "--config",
            "desk.toml",
            "--log-level",
            "debug",
            "--format",
            "json",
            "--no-color",
        ]);
        assert!(matches!(
            args,
            Ok(ref a) if a.config.as_deref().is_some_and(|p| p.ends_with("desk.toml"))
                && a.log_level.as_deref() == Some("debug")
                && a.format == OutputFormat::Json
                && a.no_color
        ));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["library", "--format", "xml"]).is_err());
    }
}
