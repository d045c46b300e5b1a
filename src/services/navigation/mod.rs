//! Caller-owned calendar cursor.
//!
//! Replaces a shared year/month/day store: the hosting view keeps a
//! `CalendarCursor` value and passes its date into the layout calls.

use chrono::{Datelike, Duration, Months, NaiveDate};
use chrono_tz::Tz;

use crate::models::ui::ViewType;
use crate::utils::date::today_in;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    date: NaiveDate,
}

impl CalendarCursor {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Cursor on today's date in `tz`.
    pub fn today(tz: Tz) -> Self {
        Self::new(today_in(tz))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// 1-based month.
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Advance by one unit of `view`: a day, a week or a month.
    pub fn next(&mut self, view: ViewType) {
        self.date = match view {
            ViewType::Day => shift_days(self.date, 1),
            ViewType::Week => shift_days(self.date, 7),
            ViewType::Month => shift_month_preserving_day(self.date, 1),
        };
    }

    pub fn previous(&mut self, view: ViewType) {
        self.date = match view {
            ViewType::Day => shift_days(self.date, -1),
            ViewType::Week => shift_days(self.date, -7),
            ViewType::Month => shift_month_preserving_day(self.date, -1),
        };
    }

    pub fn next_month(&mut self) {
        self.date = shift_month_preserving_day(self.date, 1);
    }

    pub fn previous_month(&mut self) {
        self.date = shift_month_preserving_day(self.date, -1);
    }

    pub fn next_year(&mut self) {
        self.date = shift_month_preserving_day(self.date, 12);
    }

    pub fn previous_year(&mut self) {
        self.date = shift_month_preserving_day(self.date, -12);
    }
}

fn shift_days(current: NaiveDate, days: i64) -> NaiveDate {
    current
        .checked_add_signed(Duration::days(days))
        .unwrap_or(current)
}

/// Move by whole months, clamping the day to the target month's length.
fn shift_month_preserving_day(current: NaiveDate, delta_months: i32) -> NaiveDate {
    let months = Months::new(delta_months.unsigned_abs());
    let shifted = if delta_months >= 0 {
        current.checked_add_months(months)
    } else {
        current.checked_sub_months(months)
    };
    shifted.unwrap_or(current)
}
