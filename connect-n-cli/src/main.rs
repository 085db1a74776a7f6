use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;

/// Ask the connect-N engine for moves, or watch it play itself
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: commands::Command,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    args.command.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_analyze_with_moves() {
        let args =
            Args::try_parse_from(["connect-n", "analyze", "--moves", "3,3,4", "--time-ms", "50"])
                .unwrap();

        assert!(matches!(args.command, commands::Command::Analyze(_)));
    }

    #[test]
    fn test_position_and_moves_conflict() {
        let result = Args::try_parse_from([
            "connect-n",
            "analyze",
            "--moves",
            "3",
            "--position",
            "game.json",
        ]);

        assert!(result.is_err());
    }
}
