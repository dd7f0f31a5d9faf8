use clap::{Command, arg};

pub const RECONCILE_CMD: &str = "reconcile";

pub fn create_reconcile_cli() -> Command {
    Command::new(RECONCILE_CMD)
        .about("Merge a course's dashboard summary with its detail response.")
        .arg(
            arg!(--summary <SUMMARY>)
                .required(true)
                .help("Path to the dashboard summary response"),
        )
        .arg(
            arg!(--detail <DETAIL>)
                .required(true)
                .help("Path to the course detail response, or a bare module list"),
        )
        .arg(
            arg!(--course <COURSE>)
                .required(false)
                .help("Course slug; required when the detail is a bare module list"),
        )
        .arg(
            arg!(--freshness <RULE>)
                .required(false)
                .value_parser(["timestamp", "source_identity"])
                .default_value("timestamp")
                .help("Which side's scalars win: detail unless the summary is newer, or always detail"),
        )
        .arg(arg!(--recalculate "Recompute completion and status from item state after merging"))
}
