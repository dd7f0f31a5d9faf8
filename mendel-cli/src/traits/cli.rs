use clap::{Command, arg};

pub const VALIDATE_CMD: &str = "validate";
pub const SUGGEST_CMD: &str = "suggest";
pub const PAYLOAD_CMD: &str = "payload";
pub const PLACEHOLDER_CMD: &str = "placeholder";
pub const NORMALIZE_CMD: &str = "normalize";

fn draft_arg() -> clap::Arg {
    arg!(--draft <DRAFT>)
        .required(true)
        .help("Path to a trait draft (JSON: rows and metadata)")
}

pub fn create_validate_cli() -> Command {
    Command::new(VALIDATE_CMD)
        .about("Validate the genotype rows of a draft. Exits with status 1 when anything is wrong.")
        .arg(draft_arg())
}

pub fn create_suggest_cli() -> Command {
    Command::new(SUGGEST_CMD)
        .about("Append a blank row for every genotype the draft is missing.")
        .arg(draft_arg())
}

pub fn create_payload_cli() -> Command {
    Command::new(PAYLOAD_CMD)
        .about("Build the POST or PUT request body for a draft, after validating it.")
        .arg(draft_arg())
        .arg(
            arg!(--original <ORIGINAL>)
                .required(false)
                .help("The trait being edited (JSON, as returned by the API); makes this an update"),
        )
}

pub fn create_placeholder_cli() -> Command {
    Command::new(PLACEHOLDER_CMD)
        .about("Generate placeholder drafts. Requires development_mode in the config.")
        .arg(
            arg!(--count <COUNT>)
                .required(false)
                .default_value("1")
                .help("Number of drafts to generate"),
        )
}

pub fn create_normalize_cli() -> Command {
    Command::new(NORMALIZE_CMD)
        .about("Normalize a trait list response into canonical traits.")
        .arg(
            arg!(--traits <TRAITS>)
                .required(true)
                .help("Path to a {traits: [...]} response"),
        )
}
