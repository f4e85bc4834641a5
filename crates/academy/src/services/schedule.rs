use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::models::{ClassDefinition, ScheduledInstance};

/// Weekday index used by class definitions: 0 = Sunday through 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub struct ScheduleProjector;

impl ScheduleProjector {
    /// Pins every active definition that runs on `today` to that date.
    ///
    /// Yields at most one instance per class. A class whose end time is not
    /// after its start time finishes on the following day.
    pub fn project_today(
        definitions: &[ClassDefinition],
        today: NaiveDate,
    ) -> Vec<ScheduledInstance> {
        let instances = Self::project_on(definitions, today);

        debug!(
            "Projected {} of {} class definitions onto {}",
            instances.len(),
            definitions.len(),
            today
        );

        instances
    }

    /// Instances that started on the day before `today` and run past midnight.
    pub fn project_carryover(
        definitions: &[ClassDefinition],
        today: NaiveDate,
    ) -> Vec<ScheduledInstance> {
        let Some(yesterday) = today.pred_opt() else {
            return Vec::new();
        };

        Self::project_on(definitions, yesterday)
            .into_iter()
            .filter(ScheduledInstance::is_overnight)
            .collect()
    }

    fn project_on(definitions: &[ClassDefinition], date: NaiveDate) -> Vec<ScheduledInstance> {
        let weekday = weekday_index(date);

        let mut instances: Vec<ScheduledInstance> = definitions
            .iter()
            .filter(|definition| definition.is_active() && definition.runs_on(weekday))
            .map(|definition| {
                let start_at = date.and_time(definition.start_time);
                let mut end_at = date.and_time(definition.end_time);
                if end_at <= start_at {
                    end_at += Duration::days(1);
                }

                ScheduledInstance {
                    class_id: definition.class_id,
                    class_name: definition.name.clone(),
                    date,
                    start_at,
                    end_at,
                    max_students: definition.max_students,
                }
            })
            .collect();

        instances.sort_by(|a, b| a.start_at.cmp(&b.start_at).then(a.class_name.cmp(&b.class_name)));
        instances.dedup_by_key(|instance| instance.class_id);
        instances
    }
}
