//! Pipe stage: mutates an event in place.

use icalendar::Event;

use crate::descriptor::Descriptor;

pub type Transform = Box<dyn Fn(&mut Event)>;

/// Stage that rewrites an event. A pipe never removes an event.
pub struct Pipe {
    pub descriptor: Descriptor,
    transforms: Transform,
}

impl Pipe {
    pub fn new(transforms: impl Fn(&mut Event) + 'static) -> Self {
        Pipe {
            descriptor: Descriptor::new(),
            transforms: Box::new(transforms),
        }
    }

    pub fn with_descriptor(self, descriptor: Descriptor) -> Self {
        Pipe { descriptor, ..self }
    }

    pub fn transforms(&self, event: &mut Event) {
        (self.transforms)(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EventRecord;
    use icalendar::Component;

    #[test]
    fn test_transforms_in_place() {
        let pipe = Pipe::new(|event| {
            let trimmed = event.label().map(|s| s.replace("A DISTANCE - ", ""));
            if let Some(label) = trimmed {
                event.set_label(&label);
            }
        });

        let mut event = Event::new().summary("A DISTANCE - Graphes").done();
        pipe.transforms(&mut event);
        assert_eq!(event.label(), Some("Graphes"));
    }
}
