use std::path::Path;

use anyhow::{Result, bail};
use clap::ArgMatches;
use log::{info, warn};

use mendel_progress::{
    CourseProgress, DashboardSummary, DetailResponse, FreshnessRule, ResponseReconciler, recalculate,
};

use crate::io::write_json;

fn freshness_arg(matches: &ArgMatches) -> FreshnessRule {
    match matches.get_one::<String>("freshness").map(String::as_str) {
        Some("source_identity") => FreshnessRule::SourceIdentity,
        _ => FreshnessRule::Timestamp,
    }
}

pub fn run_reconcile(matches: &ArgMatches) -> Result<()> {
    let summary = matches
        .get_one::<String>("summary")
        .expect("A path to the dashboard summary is required.");
    let detail = matches
        .get_one::<String>("detail")
        .expect("A path to the course detail is required.");
    let course = matches.get_one::<String>("course");

    let dashboard = DashboardSummary::try_from(Path::new(summary))?;
    let detail = match (DetailResponse::try_from(Path::new(detail))?, course) {
        (DetailResponse::Modules(_), None) => {
            bail!("--course is required when the detail file is a bare module list")
        }
        (detail, course) => detail.into_course(course.map(String::as_str).unwrap_or_default()),
    };
    let slug = course.cloned().unwrap_or_else(|| detail.course_slug.clone());

    let reconciler = ResponseReconciler::new(freshness_arg(matches));
    let mut merged = match dashboard.course(&slug) {
        Some(entry) => reconciler.merge_dashboard_course(entry, &detail),
        None => {
            warn!("Course '{}' is not on the dashboard, using the detail only", slug);
            reconciler.merge(&CourseProgress::new(slug.as_str()), &detail)
        }
    };

    if matches.get_flag("recalculate") {
        recalculate(&mut merged);
    }
    info!(
        "Reconciled '{}' into {} module(s)",
        merged.course_slug,
        merged.modules.len()
    );

    write_json(&merged, matches)
}
