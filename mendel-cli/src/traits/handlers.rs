use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};
use serde::Serialize;

use mendel_core::GenotypeError;
use mendel_core::models::{RawTrait, Submission, Trait, TraitDraft, TraitListResponse};
use mendel_core::ValidationReport;
use mendel_genotype::{PhenotypeMapValidator, PlaceholderGenerator, TraitFormCodec, validate_payload};

use crate::io::{load_config, read_json, write_json};

#[derive(Serialize)]
struct ReportOutput<'a> {
    passed: bool,
    messages: Vec<String>,
    errors: &'a [GenotypeError],
}

impl<'a> From<&'a ValidationReport> for ReportOutput<'a> {
    fn from(report: &'a ValidationReport) -> Self {
        ReportOutput {
            passed: report.passed(),
            messages: report.messages(),
            errors: &report.errors,
        }
    }
}

fn load_draft(matches: &ArgMatches) -> Result<TraitDraft> {
    let path = matches
        .get_one::<String>("draft")
        .expect("A path to a draft is required.");
    read_json(path)
}

// prints the report and returns whether it passed
fn emit_report(report: &ValidationReport, matches: &ArgMatches) -> Result<bool> {
    if !report.passed() {
        warn!("Validation found {} problem(s)", report.len());
    }
    write_json(&ReportOutput::from(report), matches)?;
    Ok(report.passed())
}

pub fn run_validate(matches: &ArgMatches) -> Result<bool> {
    let config = load_config(matches)?;
    let draft = load_draft(matches)?;

    let report = PhenotypeMapValidator::from(&config).validate(&draft.rows);
    emit_report(&report, matches)
}

pub fn run_suggest(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let mut draft = load_draft(matches)?;

    let added = PhenotypeMapValidator::from(&config).append_missing(&mut draft.rows);
    info!("Added {} missing genotype row(s)", added);

    write_json(&draft, matches)
}

pub fn run_payload(matches: &ArgMatches) -> Result<bool> {
    let config = load_config(matches)?;
    let draft = load_draft(matches)?;

    let report = PhenotypeMapValidator::from(&config).validate(&draft.rows);
    if !report.passed() {
        return emit_report(&report, matches);
    }

    let original: Option<Trait> = match matches.get_one::<String>("original") {
        Some(path) => Some(read_json::<RawTrait>(path)?.normalize()),
        None => None,
    };

    let submission = TraitFormCodec::from(&config).submission(&draft, original.as_ref());
    if let Submission::Post(payload) = &submission {
        let report = validate_payload(payload);
        if !report.passed() {
            return emit_report(&report, matches);
        }
    }

    write_json(&submission, matches)?;
    Ok(true)
}

pub fn run_placeholder(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let count: usize = matches
        .get_one::<String>("count")
        .expect("count has a default")
        .parse()
        .context("--count must be a number")?;

    let mut generator = PlaceholderGenerator::new(&config)?;
    let drafts: Vec<TraitDraft> = (0..count).map(|_| generator.generate()).collect();

    write_json(&drafts, matches)
}

pub fn run_normalize(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<String>("traits")
        .expect("A path to a trait list is required.");

    let traits = read_json::<TraitListResponse>(path)?.normalize();
    info!("Normalized {} trait(s)", traits.len());

    write_json(&traits, matches)
}
