//! Merging a possibly-stale summary with a fresher detail response.
//!
//! Modules and items are matched by id, falling back to an exact title match when one
//! side has no id. Entities found on only one side are kept. Item completion is
//! OR-merged so a stale read never un-completes anything. Merging is idempotent:
//! merging the result again with either input gives the same result.
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::models::{CourseProgress, CourseSummary, ModuleItem, ModuleProgress};

///
/// Which source supplies scalar fields when both have them.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessRule {
    /// The detail response always wins.
    SourceIdentity,
    /// The detail response wins unless both carry `updated_at` and the summary is
    /// strictly newer.
    #[default]
    Timestamp,
}

/// The side whose scalar fields win for one merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    Summary,
    Detail,
}

trait Identified {
    fn id(&self) -> Option<&str>;
    fn title(&self) -> Option<&str>;

    /// Neither an id nor a title to match on.
    fn anonymous(&self) -> bool {
        self.id().is_none() && self.title().is_none()
    }

    fn same_entity(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            _ => matches!((self.title(), other.title()), (Some(a), Some(b)) if a == b),
        }
    }
}

impl Identified for ModuleProgress {
    fn id(&self) -> Option<&str> {
        self.module_id.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl Identified for ModuleItem {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

fn pick<T: Clone>(primary: &Option<T>, fallback: &Option<T>) -> Option<T> {
    primary.as_ref().or(fallback.as_ref()).cloned()
}

// detail order first, then whatever only the summary had. Anonymous entries pair up
// by their position among the anonymous entries of each list.
fn union_by<T, F>(summary: &[T], detail: &[T], merge: F) -> Vec<T>
where
    T: Identified + Clone,
    F: Fn(&T, &T) -> T,
{
    let mut used = vec![false; summary.len()];
    let mut merged = Vec::with_capacity(summary.len().max(detail.len()));

    let mut stale_anonymous = summary
        .iter()
        .enumerate()
        .filter(|(_, stale)| stale.anonymous());

    for fresh in detail {
        let found = if fresh.anonymous() {
            stale_anonymous.next()
        } else {
            summary
                .iter()
                .enumerate()
                .find(|(idx, stale)| !used[*idx] && stale.same_entity(fresh))
        };
        match found {
            Some((idx, stale)) => {
                used[idx] = true;
                merged.push(merge(stale, fresh));
            }
            None => merged.push(fresh.clone()),
        }
    }

    merged.extend(
        summary
            .iter()
            .zip(&used)
            .filter(|(_, used)| !**used)
            .map(|(stale, _)| stale.clone()),
    );
    merged
}

fn merge_item(summary: &ModuleItem, detail: &ModuleItem) -> ModuleItem {
    ModuleItem {
        id: pick(&detail.id, &summary.id),
        title: pick(&detail.title, &summary.title),
        completed: summary.completed || detail.completed,
    }
}

fn merge_module(summary: &ModuleProgress, detail: &ModuleProgress, authority: Authority) -> ModuleProgress {
    let (primary, fallback) = match authority {
        Authority::Detail => (detail, summary),
        Authority::Summary => (summary, detail),
    };

    ModuleProgress {
        module_id: pick(&detail.module_id, &summary.module_id),
        title: pick(&detail.title, &summary.title),
        status: pick(&primary.status, &fallback.status),
        completion: pick(&primary.completion, &fallback.completion),
        duration: pick(&primary.duration, &fallback.duration),
        assessment_status: pick(&primary.assessment_status, &fallback.assessment_status),
        best_score: pick(&primary.best_score, &fallback.best_score),
        attempt_count: pick(&primary.attempt_count, &fallback.attempt_count),
        items: union_by(&summary.items, &detail.items, merge_item),
    }
}

///
/// Merges course progress from the dashboard summary and the course detail endpoint.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseReconciler {
    freshness: FreshnessRule,
}

impl ResponseReconciler {
    pub fn new(freshness: FreshnessRule) -> Self {
        ResponseReconciler { freshness }
    }

    pub fn freshness(&self) -> FreshnessRule {
        self.freshness
    }

    pub fn authority(
        &self,
        summary_updated: Option<DateTime<Utc>>,
        detail_updated: Option<DateTime<Utc>>,
    ) -> Authority {
        match (self.freshness, summary_updated, detail_updated) {
            (FreshnessRule::Timestamp, Some(summary), Some(detail)) if summary > detail => {
                Authority::Summary
            }
            _ => Authority::Detail,
        }
    }

    ///
    /// Union two module lists.
    ///
    /// # Arguments
    /// * `summary` - modules from the bulk summary, possibly without items
    /// * `detail` - modules from the detail endpoint
    /// * `authority` - which side supplies status, completion and the other scalars
    ///
    pub fn merge_modules(
        &self,
        summary: &[ModuleProgress],
        detail: &[ModuleProgress],
        authority: Authority,
    ) -> Vec<ModuleProgress> {
        union_by(summary, detail, |stale, fresh| merge_module(stale, fresh, authority))
    }

    ///
    /// Merge two snapshots of the same course. Never fails; absent fields on either side
    /// are treated as "no information". The result carries the later `updated_at`.
    ///
    pub fn merge(&self, summary: &CourseProgress, detail: &CourseProgress) -> CourseProgress {
        if !summary.course_slug.is_empty()
            && !detail.course_slug.is_empty()
            && summary.course_slug != detail.course_slug
        {
            warn!(
                "Merging progress for different courses '{}' and '{}'",
                summary.course_slug, detail.course_slug
            );
        }

        let authority = self.authority(summary.updated_at, detail.updated_at);
        debug!(
            "Merging {} summary and {} detail modules, {:?} authoritative",
            summary.modules.len(),
            detail.modules.len(),
            authority
        );

        let (primary, fallback) = match authority {
            Authority::Detail => (detail, summary),
            Authority::Summary => (summary, detail),
        };

        let course_slug = if detail.course_slug.is_empty() {
            summary.course_slug.clone()
        } else {
            detail.course_slug.clone()
        };

        CourseProgress {
            course_slug,
            user_id: pick(&primary.user_id, &fallback.user_id),
            enrolled_at: pick(&primary.enrolled_at, &fallback.enrolled_at),
            updated_at: summary.updated_at.max(detail.updated_at),
            modules: self.merge_modules(&summary.modules, &detail.modules, authority),
            progress: pick(&primary.progress, &fallback.progress),
            metrics: pick(&primary.metrics, &fallback.metrics),
            next_session: pick(&primary.next_session, &fallback.next_session),
        }
    }

    ///
    /// Merge a dashboard course entry with the course detail.
    ///
    pub fn merge_dashboard_course(&self, summary: &CourseSummary, detail: &CourseProgress) -> CourseProgress {
        self.merge(&CourseProgress::from(summary), detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use crate::models::ModuleStatus;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 24, hour, 0, 0).unwrap()
    }

    fn titled(title: &str) -> ModuleProgress {
        ModuleProgress {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[fixture]
    fn summary() -> CourseProgress {
        CourseProgress {
            modules: vec![
                ModuleProgress {
                    status: Some(ModuleStatus::InProgress),
                    completion: Some(50.0),
                    ..ModuleProgress::new("m1")
                },
                ModuleProgress {
                    status: Some(ModuleStatus::Locked),
                    duration: Some("1 week".to_string()),
                    ..ModuleProgress::new("m2")
                },
            ],
            progress: Some(25),
            ..CourseProgress::new("genetics-101")
        }
    }

    #[fixture]
    fn detail() -> CourseProgress {
        CourseProgress {
            modules: vec![
                ModuleProgress {
                    status: Some(ModuleStatus::Completed),
                    completion: Some(100.0),
                    items: vec![ModuleItem::new("l1", true), ModuleItem::new("l2", true)],
                    ..ModuleProgress::new("m1")
                },
                ModuleProgress {
                    status: Some(ModuleStatus::InProgress),
                    ..ModuleProgress::new("m3")
                },
            ],
            ..CourseProgress::new("genetics-101")
        }
    }

    #[rstest]
    fn test_detail_wins_and_union_is_kept(summary: CourseProgress, detail: CourseProgress) {
        let merged = ResponseReconciler::default().merge(&summary, &detail);

        let ids: Vec<_> = merged.modules.iter().filter_map(|m| m.module_id.as_deref()).collect();
        assert_eq!(ids, vec!["m1", "m3", "m2"]);

        assert_eq!(merged.modules[0].status, Some(ModuleStatus::Completed));
        assert_eq!(merged.modules[0].completion, Some(100.0));
        assert_eq!(merged.modules[0].items.len(), 2);
        assert_eq!(merged.modules[2].duration.as_deref(), Some("1 week"));

        // detail has no overall progress, so the summary's fills in
        assert_eq!(merged.progress, Some(25));
    }

    #[rstest]
    fn test_merge_is_idempotent(summary: CourseProgress, detail: CourseProgress) {
        let reconciler = ResponseReconciler::default();
        let merged = reconciler.merge(&summary, &detail);

        assert_eq!(reconciler.merge(&merged, &detail), merged);
        assert_eq!(reconciler.merge(&summary, &merged), merged);
    }

    #[rstest]
    fn test_completed_item_is_never_uncompleted() {
        let summary = vec![ModuleProgress {
            items: vec![ModuleItem::new("l1", true), ModuleItem::new("l2", false)],
            ..ModuleProgress::new("m1")
        }];
        let detail = vec![ModuleProgress {
            items: vec![ModuleItem::new("l1", false)],
            ..ModuleProgress::new("m1")
        }];

        let merged = ResponseReconciler::default().merge_modules(&summary, &detail, Authority::Detail);
        assert_eq!(
            merged[0].items,
            vec![ModuleItem::new("l1", true), ModuleItem::new("l2", false)]
        );
    }

    #[rstest]
    fn test_title_fallback_when_id_missing() {
        let summary = vec![ModuleProgress {
            completion: Some(10.0),
            ..titled("Punnett Squares")
        }];
        let detail = vec![ModuleProgress {
            title: Some("Punnett Squares".to_string()),
            ..ModuleProgress::new("m7")
        }];

        let merged = ResponseReconciler::default().merge_modules(&summary, &detail, Authority::Detail);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].module_id.as_deref(), Some("m7"));
        assert_eq!(merged[0].completion, Some(10.0));
    }

    #[rstest]
    fn test_different_ids_never_match_by_title() {
        let summary = vec![ModuleProgress {
            title: Some("Intro".to_string()),
            ..ModuleProgress::new("a")
        }];
        let detail = vec![ModuleProgress {
            title: Some("Intro".to_string()),
            ..ModuleProgress::new("b")
        }];

        let merged = ResponseReconciler::default().merge_modules(&summary, &detail, Authority::Detail);
        assert_eq!(merged.len(), 2);
    }

    #[rstest]
    fn test_untitled_items_pair_by_position() {
        let untitled = |completed| ModuleItem {
            completed,
            ..Default::default()
        };
        let summary = CourseProgress {
            modules: vec![ModuleProgress::new("m1")],
            ..CourseProgress::new("genetics-101")
        };
        let detail = CourseProgress {
            modules: vec![ModuleProgress {
                items: vec![untitled(true), untitled(false)],
                ..ModuleProgress::new("m1")
            }],
            ..CourseProgress::new("genetics-101")
        };

        let reconciler = ResponseReconciler::default();
        let merged = reconciler.merge(&summary, &detail);
        assert_eq!(merged.modules[0].items, vec![untitled(true), untitled(false)]);

        assert_eq!(reconciler.merge(&merged, &detail), merged);
        assert_eq!(reconciler.merge(&summary, &merged), merged);
        assert_eq!(reconciler.merge(&merged, &merged), merged);
    }

    #[rstest]
    fn test_untitled_modules_are_not_duplicated() {
        let summary = vec![ModuleProgress {
            completion: Some(20.0),
            ..Default::default()
        }];
        let detail = vec![ModuleProgress {
            items: vec![ModuleItem::new("l1", true)],
            ..Default::default()
        }];

        let reconciler = ResponseReconciler::default();
        let merged = reconciler.merge_modules(&summary, &detail, Authority::Detail);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].completion, Some(20.0));
        assert_eq!(
            reconciler.merge_modules(&merged, &detail, Authority::Detail),
            merged
        );
    }

    #[rstest]
    #[case(FreshnessRule::Timestamp, Some(12), Some(9), Authority::Summary)]
    #[case(FreshnessRule::Timestamp, Some(9), Some(9), Authority::Detail)]
    #[case(FreshnessRule::Timestamp, Some(12), None, Authority::Detail)]
    #[case(FreshnessRule::SourceIdentity, Some(12), Some(9), Authority::Detail)]
    fn test_authority(
        #[case] rule: FreshnessRule,
        #[case] summary: Option<u32>,
        #[case] detail: Option<u32>,
        #[case] expected: Authority,
    ) {
        let reconciler = ResponseReconciler::new(rule);
        assert_eq!(reconciler.authority(summary.map(at), detail.map(at)), expected);
    }

    #[rstest]
    fn test_newer_summary_wins_scalars(mut summary: CourseProgress, mut detail: CourseProgress) {
        summary.updated_at = Some(at(12));
        detail.updated_at = Some(at(9));

        let reconciler = ResponseReconciler::default();
        let merged = reconciler.merge(&summary, &detail);

        assert_eq!(merged.updated_at, Some(at(12)));
        assert_eq!(merged.modules[0].status, Some(ModuleStatus::InProgress));
        // items still come from wherever they exist
        assert_eq!(merged.modules[0].items.len(), 2);

        assert_eq!(reconciler.merge(&merged, &detail), merged);
        assert_eq!(reconciler.merge(&summary, &merged), merged);
    }

    #[rstest]
    fn test_dashboard_course_entry(detail: CourseProgress) {
        let entry = CourseSummary {
            slug: "genetics-101".to_string(),
            progress: Some(40),
            modules: vec![ModuleProgress::new("m9")],
            ..Default::default()
        };

        let merged = ResponseReconciler::default().merge_dashboard_course(&entry, &detail);
        assert_eq!(merged.course_slug, "genetics-101");
        assert_eq!(merged.progress, Some(40));
        assert_eq!(merged.modules.len(), 3);
    }
}
