use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Skin {
    #[default]
    Tui,
    Plain,
}

#[derive(Parser, Debug)]
#[command(
    name = "screener",
    version,
    about = "DASS-42 screening questionnaire client"
)]
pub(crate) struct Args {
    /// Optional TOML file with a [service] section.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Base URL of the prediction service (overrides SCREENING_API_URL).
    #[arg(long)]
    pub(crate) api_url: Option<String>,
    #[arg(long)]
    pub(crate) timeout_secs: Option<u64>,
    #[arg(long, value_enum, default_value_t = Skin::Tui)]
    pub(crate) skin: Skin,
    /// Query the service health endpoint and exit.
    #[arg(long, default_value_t = false)]
    pub(crate) check_health: bool,
    #[arg(long, default_value = "logs")]
    pub(crate) log_dir: PathBuf,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_tui() {
        let args = Args::try_parse_from(["screener"]).expect("args");
        assert_eq!(args.skin, Skin::Tui);
        assert!(args.api_url.is_none());
        assert_eq!(args.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn parses_overrides() {
        let args = Args::try_parse_from([
            "screener",
            "--skin",
            "plain",
            "--api-url",
            "http://10.0.0.2:8000",
            "--timeout-secs",
            "3",
            "--check-health",
        ])
        .expect("args");
        assert_eq!(args.skin, Skin::Plain);
        assert_eq!(args.api_url.as_deref(), Some("http://10.0.0.2:8000"));
        assert_eq!(args.timeout_secs, Some(3));
        assert!(args.check_health);
    }
}
