//! Pipe that renames events through a lookup table.

use std::collections::BTreeMap;

use icalendar::Event;

use crate::descriptor::Descriptor;
use crate::record::EventRecord;

/// Renames an event's summary according to `map`.
///
/// Only applies to events whose current summary is a key of `map`, so
/// running it again on its own output changes nothing.
pub struct SummaryMapPipe {
    pub descriptor: Descriptor,
    map: BTreeMap<String, String>,
}

impl SummaryMapPipe {
    pub fn new<K, V>(map: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        SummaryMapPipe {
            descriptor: Descriptor::new(),
            map: map
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    pub fn with_descriptor(self, descriptor: Descriptor) -> Self {
        SummaryMapPipe { descriptor, ..self }
    }

    pub fn map(&self) -> &BTreeMap<String, String> {
        &self.map
    }

    /// Replaces the descriptor's own predicate: true only for mapped summaries.
    pub fn applies(&self, event: &Event) -> bool {
        event.label().is_some_and(|label| self.map.contains_key(label))
    }

    pub fn transforms(&self, event: &mut Event) {
        let Some(renamed) = event.label().and_then(|label| self.map.get(label)) else {
            return;
        };
        tracing::debug!("{:?} -> {:?}", event.label().unwrap_or_default(), renamed);
        let renamed = renamed.clone();
        event.set_label(&renamed);
    }
}
