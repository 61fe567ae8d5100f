//! Applies a chain to every event of a calendar.

use icalendar::{Calendar, CalendarComponent, Component, Event};

use crate::chain::Chain;
use crate::stage::Stage;

/// Final state of one event after the chain ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Included,
    Rejected { stage: String },
}

/// Counts for one run over a calendar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub included: usize,
    pub rejected: usize,
    /// Non-event components copied through untouched
    pub passthrough: usize,
}

impl Chain {
    /// Run `event` through every stage in order.
    ///
    /// A filter rejecting the event stops the scan. Mutations made by pipes
    /// before the rejection stay on the event; they are not rolled back.
    pub fn process(&self, event: &mut Event) -> Verdict {
        for stage in self.stages() {
            tracing::debug!("considering {}", stage);
            if !stage.applies(event) {
                continue;
            }

            tracing::debug!("applying {}", stage);
            match stage {
                Stage::Filter(filter) => {
                    if !filter.accepts(event) {
                        return Verdict::Rejected {
                            stage: stage.name().to_string(),
                        };
                    }
                }
                Stage::Pipe(pipe) => pipe.transforms(event),
                Stage::SummaryMap(map) => map.transforms(event),
            }
        }

        Verdict::Included
    }
}

/// Run `chain` over the events of `calendar`.
///
/// Rejected events are removed. Everything else keeps its position, so the
/// surviving events come out in input order. Calendar properties and
/// non-event components are not touched.
pub fn execute(chain: &Chain, mut calendar: Calendar) -> (Calendar, RunReport) {
    let mut report = RunReport::default();

    for mut component in std::mem::take(&mut calendar.components) {
        if let CalendarComponent::Event(event) = &mut component {
            match chain.process(event) {
                Verdict::Included => {
                    tracing::info!("adding event {:?}", event.get_summary().unwrap_or_default());
                    report.included += 1;
                }
                Verdict::Rejected { stage } => {
                    tracing::info!(
                        "removing event {:?} (rejected by '{}')",
                        event.get_summary().unwrap_or_default(),
                        stage
                    );
                    report.rejected += 1;
                    continue;
                }
            }
        } else {
            report.passthrough += 1;
        }

        calendar.components.push(component);
    }

    (calendar, report)
}
