//! Course progress as the API sends it, from the per-course detail endpoint and the
//! dashboard summary endpoint.
use std::fs::read_to_string;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ProgressError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleStatus {
    Locked,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    NotStarted,
    Attempted,
    Passed,
}

/// A lesson or exercise inside a module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleItem {
    #[serde(default, alias = "module_item_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl ModuleItem {
    pub fn new(id: impl Into<String>, completed: bool) -> Self {
        ModuleItem {
            id: Some(id.into()),
            title: None,
            completed,
        }
    }
}

///
/// Progress for one module. Every scalar is optional: the summary endpoint sends a
/// compact subset and absent means "no information", not zero.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ModuleStatus>,
    /// Percentage, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_status: Option<AssessmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_count: Option<u32>,
    #[serde(default)]
    pub items: Vec<ModuleItem>,
}

impl ModuleProgress {
    pub fn new(module_id: impl Into<String>) -> Self {
        ModuleProgress {
            module_id: Some(module_id.into()),
            ..Default::default()
        }
    }

    pub fn completed_items(&self) -> usize {
        self.items.iter().filter(|i| i.completed).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_spent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcq_attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
}

///
/// One user's progress through one course: the merged view handed to rendering.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseProgress {
    #[serde(alias = "slug")]
    pub course_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrolled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modules: Vec<ModuleProgress>,
    /// Overall percentage, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ProgressMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_session: Option<String>,
}

impl CourseProgress {
    pub fn new(course_slug: impl Into<String>) -> Self {
        CourseProgress {
            course_slug: course_slug.into(),
            ..Default::default()
        }
    }
}

///
/// What the detail endpoint returns, in any of the shapes it has had: wrapped in
/// `{course: ...}`, the bare course object, or only the module list.
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DetailResponse {
    Wrapped { course: CourseProgress },
    Course(CourseProgress),
    Modules(Vec<ModuleProgress>),
}

impl DetailResponse {
    /// `slug` is only used for the bare module list, which does not carry one.
    pub fn into_course(self, slug: &str) -> CourseProgress {
        match self {
            DetailResponse::Wrapped { course } | DetailResponse::Course(course) => course,
            DetailResponse::Modules(modules) => CourseProgress {
                modules,
                ..CourseProgress::new(slug)
            },
        }
    }
}

/// One course entry on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    #[serde(alias = "course_slug")]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_session: Option<String>,
    /// Compact module progress, usually without items.
    #[serde(default)]
    pub modules: Vec<ModuleProgress>,
}

impl From<&CourseSummary> for CourseProgress {
    fn from(value: &CourseSummary) -> Self {
        CourseProgress {
            course_slug: value.slug.clone(),
            updated_at: value.updated_at,
            modules: value.modules.clone(),
            progress: value.progress,
            next_session: value.next_session.clone(),
            ..Default::default()
        }
    }
}

///
/// The dashboard summary response. Only `courses` is interpreted; the other sections
/// are passed through untouched.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub profile: Value,
    #[serde(default)]
    pub courses: Vec<CourseSummary>,
    #[serde(default)]
    pub stats: Value,
    #[serde(default)]
    pub insights: Value,
    #[serde(default)]
    pub resources: Value,
    #[serde(default)]
    pub schedule: Value,
}

impl DashboardSummary {
    pub fn course(&self, slug: &str) -> Option<&CourseSummary> {
        self.courses.iter().find(|c| c.slug == slug)
    }
}

impl TryFrom<&Path> for DashboardSummary {
    type Error = ProgressError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let json = read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl TryFrom<&Path> for DetailResponse {
    type Error = ProgressError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let json = read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
