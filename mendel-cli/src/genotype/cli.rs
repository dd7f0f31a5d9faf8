use clap::{Arg, Command, arg};

pub const SANITIZE_CMD: &str = "sanitize";
pub const PAIRS_CMD: &str = "pairs";

pub fn create_sanitize_cli() -> Command {
    Command::new(SANITIZE_CMD)
        .about("Clean up a genotype as typed into the editor.")
        .arg(Arg::new("raw").required(true).help("The genotype text as typed"))
        .arg(
            arg!(--alleles <ALLELES>)
                .required(false)
                .help("Comma-separated allele tokens, for multi-character alleles"),
        )
}

pub fn create_pairs_cli() -> Command {
    Command::new(PAIRS_CMD)
        .about("List every genotype an allele set implies.")
        .arg(
            arg!(--alleles <ALLELES>)
                .required(true)
                .help("Comma-separated allele tokens"),
        )
}
