use std::path::PathBuf;

use clap::Parser;

/// Consolidates per-subject glucose and insulin readings into pre/post diet
/// averages and HOMA indices per patient.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "homa-report")]
#[command(author, version, about)]
pub struct Cli {
    /// Settings file (JSON). Defaults to ./homa-report.json when present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input workbook (.xlsx, .xls, .ods) or .csv file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (.xlsx or .csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Worksheet to read instead of the first one
    #[arg(long)]
    pub worksheet: Option<String>,

    /// Also write the consolidated structure as JSON to this path
    #[arg(long)]
    pub debug_dump: Option<PathBuf>,

    /// Skip rows with malformed subject ids instead of aborting
    #[arg(long)]
    pub skip_malformed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from([
            "homa-report",
            "-i",
            "data.csv",
            "--debug-dump",
            "dump.json",
            "--skip-malformed",
        ]);
        assert_eq!(cli.input, Some(PathBuf::from("data.csv")));
        assert_eq!(cli.debug_dump, Some(PathBuf::from("dump.json")));
        assert!(cli.skip_malformed);
        assert!(cli.output.is_none());
    }
}
