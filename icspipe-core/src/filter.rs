//! Filter stage: keeps or rejects an event.

use icalendar::Event;

use crate::descriptor::{Descriptor, Predicate};

/// Stage that decides whether an event stays in the calendar.
///
/// `accepts` returning false rejects the event and stops the chain for it.
pub struct Filter {
    pub descriptor: Descriptor,
    accepts: Predicate,
}

impl Filter {
    pub fn new(accepts: impl Fn(&Event) -> bool + 'static) -> Self {
        Filter {
            descriptor: Descriptor::new(),
            accepts: Box::new(accepts),
        }
    }

    pub fn with_descriptor(self, descriptor: Descriptor) -> Self {
        Filter { descriptor, ..self }
    }

    pub fn accepts(&self, event: &Event) -> bool {
        (self.accepts)(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icalendar::Component;

    #[test]
    fn test_accepts_delegates() {
        let filter = Filter::new(|event| event.get_summary() != Some("Z"));
        assert!(filter.accepts(&Event::new().summary("A").done()));
        assert!(!filter.accepts(&Event::new().summary("Z").done()));
    }

    #[test]
    fn test_with_descriptor() {
        let filter =
            Filter::new(|_| true).with_descriptor(Descriptor::new().with_name("keep").with_priority(2));
        assert_eq!(filter.descriptor.name(), "keep");
    }
}
