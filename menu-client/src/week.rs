//! Week navigation
//!
//! Weeks start on Sunday and week 1 is the week containing January 1st.
//! A week number picks a week inside the week-year of `today`; the menu
//! shows its Monday through Friday.

use chrono::{Datelike, Days, NaiveDate};

/// Highest week number a route may name
pub const MAX_WEEK: u32 = 53;

/// Sunday starting the week that contains `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// Week number of `date` (1-based)
pub fn week_of(date: NaiveDate) -> u32 {
    // The Saturday decides the week-year: a week holding Jan 1 is week 1
    // even when it starts in December.
    let saturday = week_start(date) + Days::new(6);
    let ordinal0 = saturday.ordinal0() as i64;
    let jan1_offset = (6 - ordinal0).rem_euclid(7);
    ((ordinal0 + jan1_offset) / 7 + 1) as u32
}

/// One displayed week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuWeek {
    week: u32,
    today: NaiveDate,
    monday: NaiveDate,
}

impl MenuWeek {
    /// Week `week` relative to the week-year of `today`
    pub fn new(week: u32, today: NaiveDate) -> Self {
        let current = i64::from(week_of(today));
        let shift_days = (i64::from(week) - current) * 7;
        let sunday = week_start(today);
        let sunday = if shift_days >= 0 {
            sunday + Days::new(shift_days as u64)
        } else {
            sunday - Days::new(shift_days.unsigned_abs())
        };
        Self {
            week,
            today,
            monday: sunday + Days::new(1),
        }
    }

    /// The week containing `today`
    pub fn current(today: NaiveDate) -> Self {
        Self::new(week_of(today), today)
    }

    /// Week from a `/menu/<week>` route parameter.
    ///
    /// A missing or unusable parameter falls back to the current week.
    pub fn from_route(param: Option<&str>, today: NaiveDate) -> Self {
        match param.and_then(|p| p.trim().parse::<u32>().ok()) {
            Some(week) if (1..=MAX_WEEK).contains(&week) => Self::new(week, today),
            Some(week) => {
                tracing::debug!(week, "Week out of range, showing current week");
                Self::current(today)
            }
            None => Self::current(today),
        }
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    pub fn friday(&self) -> NaiveDate {
        self.monday + Days::new(4)
    }

    /// Monday through Friday
    pub fn days(&self) -> Vec<NaiveDate> {
        self.monday.iter_days().take(5).collect()
    }

    pub fn is_current(&self) -> bool {
        self.week == week_of(self.today)
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }

    /// Initial date-picker value: today in the current week, Monday otherwise
    pub fn picker_default(&self) -> NaiveDate {
        if self.is_current() {
            self.today
        } else {
            self.monday
        }
    }

    pub fn route(&self) -> String {
        format!("/menu/{}", self.week)
    }

    /// Route to navigate to after picking `date`; `None` when it is in this week
    pub fn route_for(&self, date: NaiveDate) -> Option<String> {
        let week = week_of(date);
        (week != self.week).then(|| format!("/menu/{week}"))
    }

    /// `"Menu for Jan 1 - Jan 5, 2024"`
    pub fn title(&self) -> String {
        format!("Menu for {}", self.range_label())
    }

    /// `"Special Menu for Jan 1 - Jan 5, 2024"`
    pub fn special_title(&self) -> String {
        format!("Special Menu for {}", self.range_label())
    }

    fn range_label(&self) -> String {
        format!(
            "{} - {}",
            self.monday.format("%b %-d"),
            self.friday().format("%b %-d, %Y")
        )
    }
}

/// Column header: `"Monday (Jan 1)"`
pub fn day_header(date: NaiveDate) -> String {
    date.format("%A (%b %-d)").to_string()
}
