use chrono::Duration;
use chrono::NaiveDate;

/// The calendar covered by a timetable: `days` consecutive days from `start_date`, each split
/// into `slots_per_day` time slots.
///
/// Slot `s` lies on day `s / slots_per_day`; day `d` lies in week `d / days_per_week`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanningHorizon {
    pub start_date: NaiveDate,
    pub days: usize,
    pub slots_per_day: usize,
    pub days_per_week: usize,
}

impl PlanningHorizon {
    pub fn num_slots(&self) -> usize {
        self.days * self.slots_per_day
    }

    /// The number of (possibly partial) weeks in the horizon.
    pub fn num_weeks(&self) -> usize {
        self.days.div_ceil(self.days_per_week)
    }

    pub fn day_of_slot(&self, slot: usize) -> usize {
        slot / self.slots_per_day
    }

    /// The position of the slot within its day, starting at 0.
    pub fn slot_in_day(&self, slot: usize) -> usize {
        slot % self.slots_per_day
    }

    pub fn week_of_day(&self, day: usize) -> usize {
        day / self.days_per_week
    }

    /// The days of week `week` which lie inside the horizon.
    pub fn days_of_week(&self, week: usize) -> std::ops::Range<usize> {
        let start = week * self.days_per_week;
        start.min(self.days)..(start + self.days_per_week).min(self.days)
    }

    pub fn date_of_day(&self, day: usize) -> NaiveDate {
        self.start_date + Duration::days(day as i64)
    }

    /// The day index of `date`, or `None` when the date lies outside the horizon.
    pub fn day_of_date(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.start_date).num_days();
        usize::try_from(offset).ok().filter(|&day| day < self.days)
    }

    /// The days of the inclusive range `[first, last]` which lie inside the horizon.
    pub fn days_between(&self, first: NaiveDate, last: NaiveDate) -> std::ops::Range<usize> {
        let from = (first - self.start_date).num_days().max(0);
        let to = ((last - self.start_date).num_days() + 1).clamp(0, self.days as i64);
        let from = (from as usize).min(to as usize);
        from..to as usize
    }
}

/// Parses a date written as `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn horizon() -> PlanningHorizon {
        PlanningHorizon {
            start_date: date(2024, 1, 8),
            days: 10,
            slots_per_day: 4,
            days_per_week: 7,
        }
    }

    #[test]
    fn slots_map_to_days_and_weeks() {
        let horizon = horizon();

        assert_eq!(40, horizon.num_slots());
        assert_eq!(2, horizon.num_weeks());
        assert_eq!(2, horizon.day_of_slot(9));
        assert_eq!(1, horizon.slot_in_day(9));
        assert_eq!(1, horizon.week_of_day(7));
        assert_eq!(7..10, horizon.days_of_week(1));
    }

    #[test]
    fn dates_outside_the_horizon_have_no_day() {
        let horizon = horizon();

        assert_eq!(Some(0), horizon.day_of_date(date(2024, 1, 8)));
        assert_eq!(Some(9), horizon.day_of_date(date(2024, 1, 17)));
        assert_eq!(None, horizon.day_of_date(date(2024, 1, 18)));
        assert_eq!(None, horizon.day_of_date(date(2024, 1, 7)));
        assert_eq!(date(2024, 1, 10), horizon.date_of_day(2));
    }

    #[test]
    fn ranges_are_clamped_to_the_horizon() {
        let horizon = horizon();

        assert_eq!(0..3, horizon.days_between(date(2024, 1, 1), date(2024, 1, 10)));
        assert_eq!(8..10, horizon.days_between(date(2024, 1, 16), date(2024, 2, 1)));
        assert!(horizon
            .days_between(date(2024, 2, 1), date(2024, 2, 3))
            .is_empty());
        assert!(horizon
            .days_between(date(2023, 12, 1), date(2023, 12, 3))
            .is_empty());
    }

    #[test]
    fn both_date_notations_are_accepted() {
        assert_eq!(Some(date(2024, 3, 5)), parse_date("2024-03-05"));
        assert_eq!(Some(date(2024, 3, 5)), parse_date(" 05/03/2024"));
        assert_eq!(None, parse_date("2024/03/05"));
    }
}
