use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `adv` binary.
#[derive(Debug, Parser)]
#[command(name = "adv", version, about = "Advocate - anti-doping case records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (overrides `database.path` from config)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{CaseCommands, PartyCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "adv",
            "--format",
            "raw",
            "--limit",
            "10",
            "--verbose",
            "party",
            "get",
            "usr-00000001",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Party {
                action: PartyCommands::Get { .. }
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["adv", "case", "get", "cas-1", "--quiet", "--db", "x.db"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.db.as_deref(), Some("x.db"));
        assert!(matches!(
            cli.command,
            Commands::Case {
                action: CaseCommands::Get { .. }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["adv", "--format", "table", "case", "get", "cas-1"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn case_create_parses_dates() {
        let cli = Cli::try_parse_from([
            "adv",
            "case",
            "create",
            "--as",
            "usr-admin",
            "--athlete",
            "usr-athlete",
            "--violation",
            "Article 2.1",
            "--sample-date",
            "2026-03-14",
            "--test-result",
            "positive",
        ])
        .expect("cli should parse");

        let Commands::Case {
            action: CaseCommands::Create(args),
        } = cli.command
        else {
            panic!("expected case create");
        };
        assert_eq!(args.sample_date.to_string(), "2026-03-14");
        assert!(args.lawyer.is_none());
    }

    #[test]
    fn case_create_rejects_malformed_date() {
        let parsed = Cli::try_parse_from([
            "adv",
            "case",
            "create",
            "--as",
            "usr-admin",
            "--athlete",
            "usr-athlete",
            "--violation",
            "x",
            "--sample-date",
            "14/03/2026",
            "--test-result",
            "positive",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["adv", "--db", "/tmp/demo.db", "party", "get", "usr-1"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/demo.db"));
    }
}
