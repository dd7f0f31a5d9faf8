use log::debug;

use crate::models::{CourseProgress, ModuleStatus};

fn percent(done: usize, total: usize) -> u32 {
    (done * 100 / total) as u32
}

///
/// Recompute module completion and status from item completion, and the course's
/// overall progress weighted by item count.
///
/// Percentages are floored. A module is `completed` at 100, `in-progress` once any item
/// is done and `locked` otherwise. Modules without items are left untouched, and so is
/// the overall progress when the course has no items at all.
///
pub fn recalculate(course: &mut CourseProgress) {
    let mut total_items = 0;
    let mut completed_items = 0;

    for module in course.modules.iter_mut() {
        if module.items.is_empty() {
            continue;
        }

        let total = module.items.len();
        let done = module.completed_items();
        let completion = percent(done, total);

        module.completion = Some(f64::from(completion));
        module.status = Some(if completion == 100 {
            ModuleStatus::Completed
        } else if done > 0 {
            ModuleStatus::InProgress
        } else {
            ModuleStatus::Locked
        });

        total_items += total;
        completed_items += done;
    }

    if total_items > 0 {
        course.progress = Some(percent(completed_items, total_items));
    }
    debug!(
        "Recalculated '{}': {}/{} items complete",
        course.course_slug, completed_items, total_items
    );
}
