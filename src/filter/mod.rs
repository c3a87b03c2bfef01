//! Relative-date preset filtering: a fixed vocabulary of shorthands, a
//! text matcher over it, and the single-selection state of the date
//! filter widget.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// One fixed relative-date shorthand offered by the date filter.
///
/// The vocabulary is closed and its order is part of the interface —
/// presets are always presented in [`DatePreset::ALL`] order, never
/// alphabetized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePreset {
    #[serde(rename = "Today")]
    Today,
    #[serde(rename = "Tomorrow")]
    Tomorrow,
    #[serde(rename = "1 day")]
    OneDay,
    #[serde(rename = "2 days")]
    TwoDays,
    #[serde(rename = "3 days")]
    ThreeDays,
    #[serde(rename = "1 week")]
    OneWeek,
    #[serde(rename = "2 weeks")]
    TwoWeeks,
    #[serde(rename = "1 month")]
    OneMonth,
}

impl DatePreset {
    /// The full vocabulary, in presentation order.
    pub const ALL: [DatePreset; 8] = [
        DatePreset::Today,
        DatePreset::Tomorrow,
        DatePreset::OneDay,
        DatePreset::TwoDays,
        DatePreset::ThreeDays,
        DatePreset::OneWeek,
        DatePreset::TwoWeeks,
        DatePreset::OneMonth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::Tomorrow => "Tomorrow",
            DatePreset::OneDay => "1 day",
            DatePreset::TwoDays => "2 days",
            DatePreset::ThreeDays => "3 days",
            DatePreset::OneWeek => "1 week",
            DatePreset::TwoWeeks => "2 weeks",
            DatePreset::OneMonth => "1 month",
        }
    }

    /// Parse a label, case-insensitively.
    pub fn parse(s: &str) -> Option<DatePreset> {
        let s = s.trim();
        DatePreset::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s))
    }

    /// The concrete date this preset points at, relative to `today`.
    ///
    /// "Tomorrow" and "1 day" resolve identically; "1 month" is a
    /// calendar-month add, clamped at month ends.
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            DatePreset::Today => today,
            DatePreset::Tomorrow | DatePreset::OneDay => plus_days(today, 1),
            DatePreset::TwoDays => plus_days(today, 2),
            DatePreset::ThreeDays => plus_days(today, 3),
            DatePreset::OneWeek => plus_days(today, 7),
            DatePreset::TwoWeeks => plus_days(today, 14),
            DatePreset::OneMonth => today
                .checked_add_months(Months::new(1))
                .unwrap_or(NaiveDate::MAX),
        }
    }
}

fn plus_days(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_add_days(Days::new(n)).unwrap_or(NaiveDate::MAX)
}

impl std::fmt::Display for DatePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Narrow the vocabulary by free-text input.
///
/// A blank query returns every preset; otherwise the match is a literal
/// case-insensitive substring test on the label. Order is always the
/// vocabulary order.
pub fn filter_presets(query: &str) -> Vec<DatePreset> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return DatePreset::ALL.to_vec();
    }
    DatePreset::ALL
        .into_iter()
        .filter(|p| p.label().to_lowercase().contains(&query))
        .collect()
}

/// Single-selection toggle over the preset vocabulary: `candidate` equal
/// to the current selection deselects, anything else selects it. At most
/// one preset is ever active.
pub fn toggle_preset(current: Option<DatePreset>, candidate: DatePreset) -> Option<DatePreset> {
    if current == Some(candidate) {
        None
    } else {
        Some(candidate)
    }
}

/// State of the date filter widget: whether the filter applies, which
/// preset is selected, and whether the selection popover is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub active: bool,
    pub selection: Option<DatePreset>,
    pub picker_open: bool,
}

impl DateFilter {
    pub fn new() -> Self {
        DateFilter::default()
    }

    /// Select `candidate`, or deselect if it is already selected. Either
    /// way the picker closes.
    pub fn toggle_preset(&mut self, candidate: DatePreset) {
        self.selection = toggle_preset(self.selection, candidate);
        self.picker_open = false;
    }

    /// Drop any selection and close the picker.
    pub fn clear(&mut self) {
        self.selection = None;
        self.picker_open = false;
    }

    /// Turn the whole filter on or off. Deactivating force-closes the
    /// picker but keeps the stored selection — it only stops being
    /// applied.
    pub fn set_active(&mut self, enabled: bool) {
        self.active = enabled;
        if !enabled {
            self.picker_open = false;
        }
    }

    /// The selection currently in effect (none while inactive).
    pub fn effective_selection(&self) -> Option<DatePreset> {
        if self.active { self.selection } else { None }
    }

    /// Whether a task due on `due_date` falls inside the filter window
    /// ending at the resolved preset date. Tasks without a due date never
    /// match an active selection.
    pub fn matches_due(&self, due_date: Option<NaiveDate>, today: NaiveDate) -> bool {
        match self.effective_selection() {
            None => true,
            Some(preset) => match due_date {
                Some(due) => due <= preset.resolve(today),
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(presets: &[DatePreset]) -> Vec<&'static str> {
        presets.iter().map(|p| p.label()).collect()
    }

    #[test]
    fn blank_query_returns_full_vocabulary_in_order() {
        assert_eq!(
            labels(&filter_presets("")),
            vec![
                "Today", "Tomorrow", "1 day", "2 days", "3 days", "1 week", "2 weeks", "1 month"
            ]
        );
        assert_eq!(filter_presets("   "), filter_presets(""));
    }

    #[test]
    fn query_matches_case_insensitive_substring() {
        assert_eq!(labels(&filter_presets("WEEK")), vec!["1 week", "2 weeks"]);
        assert_eq!(labels(&filter_presets("tom")), vec!["Tomorrow"]);
        assert_eq!(labels(&filter_presets("xyz")), Vec::<&str>::new());
    }

    #[test]
    fn day_query_follows_literal_substring_rule() {
        // "Today" lowercases to "today", which contains "day" — the match
        // is a literal substring test, so it is included along with the
        // numbered day presets, in vocabulary order.
        assert_eq!(
            labels(&filter_presets("day")),
            vec!["Today", "1 day", "2 days", "3 days"]
        );
    }

    #[test]
    fn toggle_same_preset_deselects() {
        assert_eq!(
            toggle_preset(Some(DatePreset::Tomorrow), DatePreset::Tomorrow),
            None
        );
    }

    #[test]
    fn toggle_other_preset_replaces_selection() {
        assert_eq!(
            toggle_preset(Some(DatePreset::Tomorrow), DatePreset::OneWeek),
            Some(DatePreset::OneWeek)
        );
        assert_eq!(
            toggle_preset(None, DatePreset::Today),
            Some(DatePreset::Today)
        );
    }

    #[test]
    fn widget_toggle_closes_picker() {
        let mut filter = DateFilter::new();
        filter.set_active(true);
        filter.picker_open = true;
        filter.toggle_preset(DatePreset::TwoWeeks);
        assert_eq!(filter.selection, Some(DatePreset::TwoWeeks));
        assert!(!filter.picker_open);
    }

    #[test]
    fn clear_drops_selection_unconditionally() {
        let mut filter = DateFilter {
            active: true,
            selection: Some(DatePreset::OneMonth),
            picker_open: true,
        };
        filter.clear();
        assert_eq!(filter.selection, None);
        assert!(!filter.picker_open);
    }

    #[test]
    fn deactivating_closes_picker_but_keeps_selection() {
        let mut filter = DateFilter {
            active: true,
            selection: Some(DatePreset::ThreeDays),
            picker_open: true,
        };
        filter.set_active(false);
        assert!(!filter.picker_open);
        assert_eq!(filter.selection, Some(DatePreset::ThreeDays));
        assert_eq!(filter.effective_selection(), None);

        filter.set_active(true);
        assert_eq!(filter.effective_selection(), Some(DatePreset::ThreeDays));
    }

    #[test]
    fn presets_resolve_relative_to_today() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let d = |m: u32, d: u32| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
        assert_eq!(DatePreset::Today.resolve(today), today);
        assert_eq!(DatePreset::Tomorrow.resolve(today), d(6, 16));
        assert_eq!(DatePreset::OneDay.resolve(today), d(6, 16));
        assert_eq!(DatePreset::ThreeDays.resolve(today), d(6, 18));
        assert_eq!(DatePreset::TwoWeeks.resolve(today), d(6, 29));
        assert_eq!(DatePreset::OneMonth.resolve(today), d(7, 15));
    }

    #[test]
    fn one_month_clamps_at_month_end() {
        let jan31 = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(
            DatePreset::OneMonth.resolve(jan31),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }

    #[test]
    fn matches_due_uses_window_up_to_resolved_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let filter = DateFilter {
            active: true,
            selection: Some(DatePreset::OneWeek),
            picker_open: false,
        };
        assert!(filter.matches_due(NaiveDate::from_ymd_opt(2025, 6, 20), today));
        assert!(filter.matches_due(NaiveDate::from_ymd_opt(2025, 6, 22), today));
        assert!(!filter.matches_due(NaiveDate::from_ymd_opt(2025, 6, 23), today));
        assert!(!filter.matches_due(None, today));

        // Inactive filter matches everything.
        let inactive = DateFilter::default();
        assert!(inactive.matches_due(None, today));
    }

    #[test]
    fn serializes_to_wire_labels() {
        let json =
            serde_json::to_string(&[DatePreset::Today, DatePreset::OneWeek]).unwrap();
        assert_eq!(json, r#"["Today","1 week"]"#);
        let back: DatePreset = serde_json::from_str("\"2 weeks\"").unwrap();
        assert_eq!(back, DatePreset::TwoWeeks);
    }

    #[test]
    fn parse_round_trips_labels() {
        for preset in DatePreset::ALL {
            assert_eq!(DatePreset::parse(preset.label()), Some(preset));
        }
        assert_eq!(DatePreset::parse("2 WEEKS"), Some(DatePreset::TwoWeeks));
        assert_eq!(DatePreset::parse("next year"), None);
    }
}
