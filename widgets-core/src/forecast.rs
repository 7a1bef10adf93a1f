use chrono::TimeZone;

use crate::model::{DailySummary, ForecastSample};

pub const MAX_FORECAST_DAYS: usize = 5;

/// Collapse 3-hourly samples into per-day summaries.
///
/// Samples are bucketed by their calendar date in `tz` and buckets are emitted in the order
/// their dates first appear. Min/max widen over every sample of a day; description and icon
/// come from the first sample of that day. At most [`MAX_FORECAST_DAYS`] entries are returned.
pub fn aggregate_daily<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DailySummary> {
    let mut days: Vec<DailySummary> = Vec::new();

    for sample in samples {
        let date = sample.at.with_timezone(tz).date_naive();

        match days.iter_mut().find(|day| day.date == date) {
            Some(day) => {
                day.temp_min_c = day.temp_min_c.min(sample.temp_min_c);
                day.temp_max_c = day.temp_max_c.max(sample.temp_max_c);
            }
            None => days.push(DailySummary {
                date,
                temp_min_c: sample.temp_min_c,
                temp_max_c: sample.temp_max_c,
                description: sample.description.clone(),
                icon: sample.icon.clone(),
            }),
        }
    }

    days.truncate(MAX_FORECAST_DAYS);
    days
}
