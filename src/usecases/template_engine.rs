//! Deterministic weekly schedule from the static template catalogs.
//!
//! Day `i` gets weekday label `i` (Monday first) and template
//! `catalog[i % catalog.len()]`, so every template is used once before any repeats.

use crate::domain::{GeneratedSchedule, PlanParameters, ScheduledDay, WEEKDAYS, catalog_for};
use tracing::{debug, warn};

/// Pure template-based schedule generator. Total over valid [`PlanParameters`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanTemplateEngine;

impl PlanTemplateEngine {
    pub fn new() -> Self {
        Self
    }

    /// Build the schedule for `params`.
    ///
    /// Produces `params.weekly_days()` entries: the requested frequency,
    /// clamped to seven. Fitness level, equipment and goal weight do not
    /// affect the output.
    pub fn generate(&self, params: &PlanParameters) -> GeneratedSchedule {
        let catalog = catalog_for(params.goal);
        let days = params.weekly_days();
        if days < params.frequency as usize {
            warn!(
                requested = params.frequency,
                days, "frequency exceeds days in a week, clamping"
            );
        }

        let days = (0..days)
            .map(|i| {
                let template = &catalog[i % catalog.len()];
                ScheduledDay {
                    day: WEEKDAYS[i].to_string(),
                    title: template.title.to_string(),
                    activities: template.activities.iter().map(|a| a.to_string()).collect(),
                }
            })
            .collect::<Vec<_>>();

        debug!(goal = %params.goal, days = days.len(), "template schedule built");
        GeneratedSchedule { days }
    }
}
