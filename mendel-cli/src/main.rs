mod genotype;
mod io;
mod progress;
mod traits;

use anyhow::Result;
use clap::{Command, arg};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "mendel";
    pub const DEFAULT_LOG_DIRECTIVE: &str = "mendel=info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Validate Mendelian trait drafts, build API payloads and reconcile course progress.")
        .subcommand_required(true)
        .arg(arg!(--config <CONFIG> "Editor config (TOML)").global(true))
        .arg(arg!(-o --output <OUTPUT> "Output JSON path (default: stdout)").global(true))
        .subcommand(genotype::cli::create_sanitize_cli())
        .subcommand(genotype::cli::create_pairs_cli())
        .subcommand(traits::cli::create_validate_cli())
        .subcommand(traits::cli::create_suggest_cli())
        .subcommand(traits::cli::create_payload_cli())
        .subcommand(traits::cli::create_placeholder_cli())
        .subcommand(traits::cli::create_normalize_cli())
        .subcommand(progress::cli::create_reconcile_cli())
}

fn main() -> Result<()> {
    // logs go to stderr, stdout is for JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(consts::DEFAULT_LOG_DIRECTIVE.parse()?),
        )
        .init();

    let app = build_parser();
    let matches = app.get_matches();

    let passed = match matches.subcommand() {
        //
        // GENOTYPE STRINGS
        //
        Some((genotype::cli::SANITIZE_CMD, matches)) => {
            genotype::handlers::run_sanitize(matches)?;
            true
        }
        Some((genotype::cli::PAIRS_CMD, matches)) => {
            genotype::handlers::run_pairs(matches)?;
            true
        }

        //
        // TRAIT DRAFTS
        //
        Some((traits::cli::VALIDATE_CMD, matches)) => traits::handlers::run_validate(matches)?,
        Some((traits::cli::SUGGEST_CMD, matches)) => {
            traits::handlers::run_suggest(matches)?;
            true
        }
        Some((traits::cli::PAYLOAD_CMD, matches)) => traits::handlers::run_payload(matches)?,
        Some((traits::cli::PLACEHOLDER_CMD, matches)) => {
            traits::handlers::run_placeholder(matches)?;
            true
        }
        Some((traits::cli::NORMALIZE_CMD, matches)) => {
            traits::handlers::run_normalize(matches)?;
            true
        }

        //
        // PROGRESS
        //
        Some((progress::cli::RECONCILE_CMD, matches)) => {
            progress::handlers::run_reconcile(matches)?;
            true
        }

        _ => unreachable!("Subcommand not found"),
    };

    if !passed {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_is_well_formed() {
        build_parser().debug_assert();
    }

    #[test]
    fn test_help_metadata() {
        let parser = build_parser();
        assert_eq!(parser.get_name(), consts::BIN_NAME);
        assert_eq!(parser.get_version(), Some(consts::VERSION));
        assert_eq!(parser.get_author(), None);
    }

    #[test]
    fn test_global_args_reach_subcommands() {
        let matches = build_parser()
            .try_get_matches_from(["mendel", "pairs", "--alleles", "A,a", "--config", "editor.toml"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, genotype::cli::PAIRS_CMD);
        assert_eq!(sub.get_one::<String>("config").map(String::as_str), Some("editor.toml"));
    }
}
