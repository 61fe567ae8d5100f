//! Field accessors the chain uses on a calendar event.
//!
//! A record is a decoded `VEVENT`. Stages never see the raw properties,
//! only the label (`SUMMARY`) and the time range (`DTSTART`/`DTEND`).

use chrono::Duration;
use icalendar::{CalendarDateTime, Component, DatePerhapsTime, Event, EventLike};

/// Accessors over the fields of an event that stages read and write.
pub trait EventRecord {
    /// The event label (`SUMMARY`), if any.
    fn label(&self) -> Option<&str>;

    /// Replace the event label.
    fn set_label(&mut self, label: &str);

    /// Move `DTSTART` and `DTEND` by the same offset.
    ///
    /// Timezone and floating values keep their kind. All-day dates only move
    /// by whole days, so a sub-day offset leaves them untouched.
    /// Returns false, leaving both times as they were, when the shifted
    /// value falls outside the representable range.
    fn shift_times(&mut self, by: Duration) -> bool;
}

impl EventRecord for Event {
    fn label(&self) -> Option<&str> {
        self.get_summary()
    }

    fn set_label(&mut self, label: &str) {
        self.summary(label);
    }

    fn shift_times(&mut self, by: Duration) -> bool {
        let start = self.get_start().map(|start| shift(start, by));
        let end = self.get_end().map(|end| shift(end, by));

        if matches!(start, Some(None)) || matches!(end, Some(None)) {
            tracing::warn!(
                "Shifting {:?} by {} overflows; times left unchanged",
                self.get_uid().unwrap_or_default(),
                by
            );
            return false;
        }

        if let Some(Some(start)) = start {
            self.starts(start);
        }
        if let Some(Some(end)) = end {
            self.ends(end);
        }
        true
    }
}

fn shift(time: DatePerhapsTime, by: Duration) -> Option<DatePerhapsTime> {
    Some(match time {
        DatePerhapsTime::Date(date) => {
            DatePerhapsTime::Date(date.checked_add_signed(Duration::days(by.num_days()))?)
        }
        DatePerhapsTime::DateTime(dt) => DatePerhapsTime::DateTime(match dt {
            CalendarDateTime::Floating(naive) => {
                CalendarDateTime::Floating(naive.checked_add_signed(by)?)
            }
            CalendarDateTime::Utc(utc) => CalendarDateTime::Utc(utc.checked_add_signed(by)?),
            CalendarDateTime::WithTimezone { date_time, tzid } => CalendarDateTime::WithTimezone {
                date_time: date_time.checked_add_signed(by)?,
                tzid,
            },
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_label_roundtrip() {
        let mut event = Event::new().summary("Graphes").done();
        assert_eq!(event.label(), Some("Graphes"));

        event.set_label("Petri");
        assert_eq!(event.label(), Some("Petri"));
    }

    #[test]
    fn test_label_missing() {
        let event = Event::new().uid("no-summary").done();
        assert_eq!(event.label(), None);
    }

    #[test]
    fn test_shift_utc_times() {
        let mut event = Event::new()
            .starts(Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap())
            .ends(Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap())
            .done();

        assert!(event.shift_times(Duration::hours(2)));

        assert_eq!(
            event.get_start(),
            Some(DatePerhapsTime::DateTime(CalendarDateTime::Utc(
                Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap()
            )))
        );
        assert_eq!(
            event.get_end(),
            Some(DatePerhapsTime::DateTime(CalendarDateTime::Utc(
                Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap()
            )))
        );
    }

    #[test]
    fn test_shift_keeps_tzid() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let mut event = Event::new()
            .starts(CalendarDateTime::WithTimezone {
                date_time: start,
                tzid: "Europe/Brussels".to_string(),
            })
            .done();

        event.shift_times(Duration::minutes(-30));

        match event.get_start() {
            Some(DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid })) => {
                assert_eq!(tzid, "Europe/Brussels");
                assert_eq!(date_time, start - Duration::minutes(30));
            }
            other => panic!("Expected zoned start, got {:?}", other),
        }
        assert_eq!(event.get_end(), None, "Shift must not invent a DTEND");
    }

    #[test]
    fn test_shift_all_day_by_hours_is_noop() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut event = Event::new().all_day(day).done();

        event.shift_times(Duration::hours(2));
        assert_eq!(event.get_start(), Some(DatePerhapsTime::Date(day)));

        event.shift_times(Duration::days(1));
        assert_eq!(
            event.get_start(),
            Some(DatePerhapsTime::Date(day + Duration::days(1)))
        );
    }

    #[test]
    fn test_shift_out_of_range_leaves_times() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
        let mut event = Event::new().uid("far").starts(start).ends(end).done();

        assert!(!event.shift_times(Duration::days(1_000_000_000)));

        assert_eq!(
            event.get_start(),
            Some(DatePerhapsTime::DateTime(CalendarDateTime::Utc(start)))
        );
        assert_eq!(
            event.get_end(),
            Some(DatePerhapsTime::DateTime(CalendarDateTime::Utc(end)))
        );
    }

    #[test]
    fn test_shift_all_day_out_of_range_leaves_date() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut event = Event::new().all_day(day).done();

        assert!(!event.shift_times(Duration::days(-1_000_000_000)));
        assert_eq!(event.get_start(), Some(DatePerhapsTime::Date(day)));
    }
}
