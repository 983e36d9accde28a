//! Quick filter presets and filter-state ownership
//!
//! A preset is a named, bundled configuration of criteria. At most one preset
//! is active at a time, and any direct manual edit disowns it: the state is a
//! tagged union, never a flag reconstructed from criteria values, so a manual
//! edit that happens to coincide with a preset's values still counts as
//! manual.

use crate::core::criteria::FilterCriteria;
use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// The fixed set of quick filter shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickFilter {
    Today,
    ThisWeek,
    ThisMonth,
    HighScore,
    LowScore,
}

impl QuickFilter {
    /// All presets, in display order
    pub fn all() -> &'static [QuickFilter] {
        &[
            QuickFilter::Today,
            QuickFilter::ThisWeek,
            QuickFilter::ThisMonth,
            QuickFilter::HighScore,
            QuickFilter::LowScore,
        ]
    }

    /// Stable identifier, matching the serde representation
    pub fn id(&self) -> &'static str {
        match self {
            QuickFilter::Today => "today",
            QuickFilter::ThisWeek => "this-week",
            QuickFilter::ThisMonth => "this-month",
            QuickFilter::HighScore => "high-score",
            QuickFilter::LowScore => "low-score",
        }
    }

    /// Build the criteria fragment this preset stands for, anchored at `now`
    pub fn criteria(&self, now: DateTime<Utc>) -> FilterCriteria {
        let today = now.date_naive();
        match self {
            QuickFilter::Today => day_range(today, today),
            QuickFilter::ThisWeek => {
                let week = today.week(Weekday::Mon);
                day_range(week.first_day(), week.last_day())
            }
            QuickFilter::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|d| d.checked_sub_days(Days::new(1)))
                    .unwrap_or(today);
                day_range(first, last)
            }
            QuickFilter::HighScore => FilterCriteria {
                score_range: Some((4, 5)),
                ..Default::default()
            },
            QuickFilter::LowScore => FilterCriteria {
                score_range: Some((1, 2)),
                ..Default::default()
            },
        }
    }
}

fn day_range(from: NaiveDate, to: NaiveDate) -> FilterCriteria {
    // Inclusive upper bound at the last instant of the day, so full-timestamp
    // comparison still covers records from the final second
    let end_of_day = to
        .checked_add_days(Days::new(1))
        .unwrap_or(to)
        .and_time(NaiveTime::MIN)
        .and_utc()
        - Duration::nanoseconds(1);
    FilterCriteria {
        date_from: Some(from.and_time(NaiveTime::MIN).and_utc()),
        date_to: Some(end_of_day),
        ..Default::default()
    }
}

/// Who owns the current criteria: a preset, or manual edits
#[derive(Debug, Clone, PartialEq)]
pub enum FilterState {
    Manual(FilterCriteria),
    Preset {
        id: QuickFilter,
        criteria: FilterCriteria,
    },
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState::Manual(FilterCriteria::default())
    }
}

impl FilterState {
    /// The criteria currently in effect
    pub fn criteria(&self) -> &FilterCriteria {
        match self {
            FilterState::Manual(criteria) => criteria,
            FilterState::Preset { criteria, .. } => criteria,
        }
    }

    /// The active preset, if the criteria are still preset-owned
    pub fn active_preset(&self) -> Option<QuickFilter> {
        match self {
            FilterState::Manual(_) => None,
            FilterState::Preset { id, .. } => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn wednesday() -> DateTime<Utc> {
        // 2024-01-10 was a Wednesday
        Utc.with_ymd_and_hms(2024, 1, 10, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_today_preset_bounds() {
        let criteria = QuickFilter::Today.criteria(wednesday());
        assert_eq!(
            criteria.date_from.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
        assert_eq!(
            criteria.date_to.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
        assert!(criteria.score_range.is_none());
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_today_covers_the_final_second_of_the_day() {
        // Full-timestamp comparison must not drop records from 23:59:59.xxx
        let criteria = QuickFilter::Today.criteria(wednesday());
        let late = Utc.with_ymd_and_hms(2024, 1, 10, 23, 59, 59).unwrap()
            + Duration::milliseconds(500);
        let midnight = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();

        assert!(criteria.date_to.unwrap() >= late);
        assert!(criteria.date_to.unwrap() < midnight);
    }

    #[test]
    fn test_this_week_starts_monday() {
        let criteria = QuickFilter::ThisWeek.criteria(wednesday());
        assert_eq!(
            criteria.date_from.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
        );
        assert_eq!(
            criteria.date_to.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 14).unwrap()
        );
    }

    #[test]
    fn test_this_month_covers_whole_month() {
        let criteria = QuickFilter::ThisMonth.criteria(wednesday());
        assert_eq!(
            criteria.date_from.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            criteria.date_to.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_this_month_handles_february() {
        let leap = Utc.with_ymd_and_hms(2024, 2, 15, 9, 0, 0).unwrap();
        let criteria = QuickFilter::ThisMonth.criteria(leap);
        assert_eq!(
            criteria.date_to.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_score_presets() {
        assert_eq!(
            QuickFilter::HighScore.criteria(wednesday()).score_range,
            Some((4, 5))
        );
        assert_eq!(
            QuickFilter::LowScore.criteria(wednesday()).score_range,
            Some((1, 2))
        );
        assert!(QuickFilter::HighScore.criteria(wednesday()).date_from.is_none());
    }

    #[test]
    fn test_preset_ids_match_serde() {
        for preset in QuickFilter::all() {
            let json = serde_json::to_string(preset).unwrap();
            assert_eq!(json, format!("\"{}\"", preset.id()));
        }
    }

    #[test]
    fn test_filter_state_ownership() {
        let state = FilterState::default();
        assert_eq!(state.active_preset(), None);
        assert!(state.criteria().is_empty());

        let state = FilterState::Preset {
            id: QuickFilter::Today,
            criteria: QuickFilter::Today.criteria(wednesday()),
        };
        assert_eq!(state.active_preset(), Some(QuickFilter::Today));
        assert!(state.criteria().date_from.is_some());
    }

    #[test]
    fn test_manual_state_with_preset_values_is_still_manual() {
        let criteria = QuickFilter::HighScore.criteria(wednesday());
        let state = FilterState::Manual(criteria);
        assert_eq!(state.active_preset(), None);
    }
}
