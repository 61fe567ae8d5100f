//! The ordered, immutable list of stages for one run.

use std::cmp::Ordering;

use crate::descriptor::compare;
use crate::stage::Stage;

/// Stages sorted ascending by `(priority, name)`.
///
/// Stages sharing both priority and name keep the order they were given in.
/// That order is not part of the contract and a warning is logged.
pub struct Chain {
    stages: Vec<Stage>,
}

impl Chain {
    pub fn new(mut stages: Vec<Stage>) -> Self {
        // Stable: equal keys stay in export order
        stages.sort_by(|a, b| compare(a.descriptor(), b.descriptor()));

        for pair in stages.windows(2) {
            if compare(pair[0].descriptor(), pair[1].descriptor()) == Ordering::Equal {
                tracing::warn!(
                    "Ambiguous order between {} and {}: same priority and name",
                    pair[0],
                    pair[1]
                );
            }
        }

        Chain { stages }
    }

    /// A chain with no stages: every event passes through unchanged.
    pub fn empty() -> Self {
        Chain { stages: Vec::new() }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(Stage::name).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use std::io;
    use std::sync::{Arc, Mutex};
    use crate::filter::Filter;
    use crate::pipe::Pipe;

    fn pipe(name: &str, priority: Option<i64>) -> Stage {
        let descriptor = Descriptor::new().with_name(name);
        let descriptor = match priority {
            Some(p) => descriptor.with_priority(p),
            None => descriptor,
        };
        Pipe::new(|_| {}).with_descriptor(descriptor).into()
    }

    #[test]
    fn test_sorts_by_priority_then_name() {
        let chain = Chain::new(vec![
            pipe("followed_courses", None),
            pipe("shortens", Some(1)),
            pipe("fix_timezone", None),
            pipe("trim_a_distance", Some(0)),
        ]);

        assert_eq!(
            chain.names(),
            vec!["trim_a_distance", "shortens", "fix_timezone", "followed_courses"]
        );
    }

    #[test]
    fn test_equal_priority_is_lexicographic() {
        let chain = Chain::new(vec![pipe("beta", Some(5)), pipe("alpha", Some(5))]);
        assert_eq!(chain.names(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_duplicate_keys_keep_given_order() {
        let first: Stage = Filter::new(|_| true)
            .with_descriptor(Descriptor::new().with_name("dup"))
            .into();
        let second = pipe("dup", None);

        let chain = Chain::new(vec![first, second]);
        let kinds: Vec<_> = chain.stages().iter().map(Stage::kind).collect();
        assert_eq!(kinds, vec!["filter", "pipe"]);
    }

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    fn logs_while(build: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, build);
        captured.text()
    }

    #[test]
    fn test_duplicate_keys_log_warning() {
        let logs = logs_while(|| {
            let first: Stage = Filter::new(|_| true)
                .with_descriptor(Descriptor::new().with_name("dup").with_priority(3))
                .into();
            Chain::new(vec![first, pipe("dup", Some(3))]);
        });

        assert!(logs.contains("WARN"), "got: {}", logs);
        assert!(logs.contains("Ambiguous order"), "got: {}", logs);
        assert!(logs.contains("<filter 'dup' @3>"), "got: {}", logs);
        assert!(logs.contains("<pipe 'dup' @3>"), "got: {}", logs);
    }

    #[test]
    fn test_distinct_keys_log_nothing() {
        let logs = logs_while(|| {
            Chain::new(vec![pipe("dup", Some(3)), pipe("dup", Some(4)), pipe("other", Some(3))]);
        });

        assert!(!logs.contains("Ambiguous order"), "got: {}", logs);
    }

    #[test]
    fn test_empty() {
        assert!(Chain::empty().is_empty());
        assert_eq!(Chain::new(Vec::new()).len(), 0);
    }
}
