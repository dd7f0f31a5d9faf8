//! # mendel-progress
//!
//! Course progress arrives from two places: a compact entry on the dashboard summary and
//! the full course detail. This crate reconciles the two into the single
//! [`CourseProgress`] a page renders, and can recompute completion from item state.
//!
//! ```rust
//! use mendel_progress::{CourseProgress, ModuleItem, ModuleProgress, ResponseReconciler};
//!
//! let summary = CourseProgress {
//!     modules: vec![ModuleProgress::new("m1"), ModuleProgress::new("m2")],
//!     ..CourseProgress::new("genetics-101")
//! };
//! let detail = CourseProgress {
//!     modules: vec![ModuleProgress {
//!         items: vec![ModuleItem::new("l1", true)],
//!         ..ModuleProgress::new("m1")
//!     }],
//!     ..CourseProgress::new("genetics-101")
//! };
//!
//! let merged = ResponseReconciler::default().merge(&summary, &detail);
//! assert_eq!(merged.modules.len(), 2);
//! assert_eq!(merged.modules[0].items.len(), 1);
//! ```
pub mod errors;
pub mod models;
pub mod recalculate;
pub mod reconcile;

pub use errors::{ProgressError, ProgressResult};
pub use models::{
    AssessmentStatus, CourseProgress, CourseSummary, DashboardSummary, DetailResponse,
    ModuleItem, ModuleProgress, ModuleStatus, ProgressMetrics,
};
pub use recalculate::recalculate;
pub use reconcile::{Authority, FreshnessRule, ResponseReconciler};
