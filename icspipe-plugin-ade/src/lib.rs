//! Built-in plugin for timetables exported from ADE.
//!
//! ADE exports label remote sessions with an "A DISTANCE - " prefix, use long
//! course titles and write local times as UTC. This plugin cleans that up and
//! keeps only the followed courses.

use chrono::Duration;
use icalendar::Event;
use icspipe_core::{Descriptor, EventRecord, Export, Filter, Pipe, Plugin, SummaryMapPipe};

pub const NAME: &str = "ade";

const REMOTE_PREFIX: &str = "A DISTANCE - ";

/// Offset between what ADE writes and the actual local time
const TIMEZONE_FIX_HOURS: i64 = 2;

const FOLLOWED_COURSES: [&str; 3] = ["Laboratoire", "Ingénierie", "Graphes"];

const SHORT_TITLES: [(&str, &str); 2] = [
    ("Théorie des graphes et réseaux de Petri", "Graphes"),
    ("Ingénierie du logiciel", "Ingénierie"),
];

pub struct AdePlugin;

impl Plugin for AdePlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "ADE timetable: trim remote prefix, shorten titles, shift times, keep followed courses"
    }

    fn exports(&self) -> Vec<Export> {
        vec![
            Export::new(
                "trim_a_distance",
                Pipe::new(trim_a_distance).with_descriptor(Descriptor::new().with_priority(0)),
            ),
            Export::new(
                "shortens",
                SummaryMapPipe::new(SHORT_TITLES)
                    .with_descriptor(Descriptor::new().with_priority(1)),
            ),
            Export::new("followed_courses", Filter::new(is_followed_course)),
            Export::new("fix_timezone", Pipe::new(fix_timezone)),
        ]
    }
}

/// Factory for [`icspipe_core::PluginRegistry::register`].
pub fn plugin() -> Box<dyn Plugin> {
    Box::new(AdePlugin)
}

fn trim_a_distance(event: &mut Event) {
    let trimmed = event
        .label()
        .filter(|label| label.contains(REMOTE_PREFIX))
        .map(|label| label.replace(REMOTE_PREFIX, ""));

    if let Some(label) = trimmed {
        event.set_label(&label);
    }
}

fn is_followed_course(event: &Event) -> bool {
    event
        .label()
        .is_some_and(|label| FOLLOWED_COURSES.iter().any(|course| *course == label))
}

fn fix_timezone(event: &mut Event) {
    event.shift_times(Duration::hours(TIMEZONE_FIX_HOURS));
}
