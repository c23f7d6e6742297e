use crate::collector::{CollectError, FactCollector, Facts};
use driftguard_domain::model::SystemSnapshot;
use driftguard_types::Observed;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use time::OffsetDateTime;

/// Run every collector concurrently and merge their partial snapshots.
///
/// The merge waits for all collectors or for `timeout`, whichever comes
/// first. After the deadline, each policy selector covered by an unfinished
/// or failed collector is recorded as a collector-error marker; the run
/// never blocks indefinitely on a stuck fact source. Earlier collectors win
/// on selector collisions, so the merge is deterministic in collector order.
pub fn gather(
    collectors: Vec<Box<dyn FactCollector + 'static>>,
    policy_selectors: &[String],
    timeout: Duration,
) -> SystemSnapshot {
    // Coverage must be captured before the collectors move to their threads.
    let coverage: Vec<(String, Vec<String>)> = collectors
        .iter()
        .map(|c| {
            let covered = policy_selectors
                .iter()
                .filter(|s| c.covers(s))
                .cloned()
                .collect();
            (c.name().to_string(), covered)
        })
        .collect();

    let (tx, rx) = mpsc::channel::<(usize, Result<Facts, CollectError>)>();
    for (index, collector) in collectors.into_iter().enumerate() {
        let tx = tx.clone();
        std::thread::spawn(move || {
            let result = collector.collect();
            // The receiver may have given up on us; that is fine.
            let _ = tx.send((index, result));
        });
    }
    drop(tx);

    let deadline = Instant::now() + timeout;
    let mut results: Vec<Option<Result<Facts, CollectError>>> = Vec::new();
    results.resize_with(coverage.len(), || None);
    let mut pending = coverage.len();

    while pending > 0 {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok((index, result)) => {
                results[index] = Some(result);
                pending -= 1;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => break,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    let captured_at = OffsetDateTime::now_utc();
    let mut merged = Facts::new();

    // Resolved facts first, in collector order, so values always win over
    // error markers and collisions resolve deterministically.
    for (index, (name, _)) in coverage.iter().enumerate() {
        if let Some(Ok(facts)) = &results[index] {
            tracing::debug!(collector = name.as_str(), facts = facts.len(), "collector finished");
            for (selector, cell) in facts {
                merged.entry(selector.clone()).or_insert_with(|| cell.clone());
            }
        }
    }

    for (index, (name, covered)) in coverage.iter().enumerate() {
        match &results[index] {
            Some(Ok(_)) => {}
            Some(Err(err)) => {
                tracing::warn!(collector = name.as_str(), reason = %err.reason, "collector failed");
                mark_errors(&mut merged, covered, &err.to_string());
            }
            None => {
                tracing::warn!(
                    collector = name.as_str(),
                    timeout_ms = timeout.as_millis() as u64,
                    "collector timed out"
                );
                let reason = format!(
                    "collector '{name}' timed out after {}ms",
                    timeout.as_millis()
                );
                mark_errors(&mut merged, covered, &reason);
            }
        }
    }

    SystemSnapshot::new(captured_at, merged)
}

fn mark_errors(merged: &mut Facts, covered: &[String], reason: &str) {
    for selector in covered {
        merged
            .entry(selector.clone())
            .or_insert_with(|| Observed::CollectorError {
                reason: reason.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftguard_types::Value;

    struct StaticCollector {
        name: &'static str,
        prefix: &'static str,
        facts: Facts,
        delay: Duration,
        fail: Option<&'static str>,
    }

    impl StaticCollector {
        fn ok(name: &'static str, prefix: &'static str, facts: Vec<(&str, Value)>) -> Self {
            Self {
                name,
                prefix,
                facts: facts
                    .into_iter()
                    .map(|(s, v)| (s.to_string(), Observed::Value(v)))
                    .collect(),
                delay: Duration::ZERO,
                fail: None,
            }
        }

        fn failing(name: &'static str, prefix: &'static str, reason: &'static str) -> Self {
            Self {
                name,
                prefix,
                facts: Facts::new(),
                delay: Duration::ZERO,
                fail: Some(reason),
            }
        }

        fn slow(name: &'static str, prefix: &'static str, delay: Duration) -> Self {
            Self {
                name,
                prefix,
                facts: Facts::new(),
                delay,
                fail: None,
            }
        }
    }

    impl FactCollector for StaticCollector {
        fn name(&self) -> &str {
            self.name
        }

        fn covers(&self, selector: &str) -> bool {
            selector.starts_with(self.prefix)
        }

        fn collect(&self) -> Result<Facts, CollectError> {
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
            match self.fail {
                Some(reason) => Err(CollectError::new(self.name, reason)),
                None => Ok(self.facts.clone()),
            }
        }
    }

    fn selectors(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merges_partial_snapshots_from_all_collectors() {
        let collectors: Vec<Box<dyn FactCollector>> = vec![
            Box::new(StaticCollector::ok(
                "proc",
                "process.",
                vec![("process.sshd.running", Value::Bool(true))],
            )),
            Box::new(StaticCollector::ok(
                "net",
                "network.",
                vec![("network.sshd.port", Value::Int(22))],
            )),
        ];
        let snapshot = gather(
            collectors,
            &selectors(&["process.sshd.running", "network.sshd.port"]),
            Duration::from_secs(5),
        );
        assert_eq!(
            snapshot.lookup("process.sshd.running"),
            Observed::Value(Value::Bool(true))
        );
        assert_eq!(
            snapshot.lookup("network.sshd.port"),
            Observed::Value(Value::Int(22))
        );
        assert_eq!(snapshot.resolved_facts(), 2);
    }

    #[test]
    fn failed_collector_marks_only_its_covered_selectors() {
        let collectors: Vec<Box<dyn FactCollector>> = vec![
            Box::new(StaticCollector::ok(
                "proc",
                "process.",
                vec![("process.sshd.running", Value::Bool(true))],
            )),
            Box::new(StaticCollector::failing("net", "network.", "netstat unavailable")),
        ];
        let snapshot = gather(
            collectors,
            &selectors(&["process.sshd.running", "network.sshd.port"]),
            Duration::from_secs(5),
        );
        assert_eq!(
            snapshot.lookup("process.sshd.running"),
            Observed::Value(Value::Bool(true))
        );
        match snapshot.lookup("network.sshd.port") {
            Observed::CollectorError { reason } => {
                assert!(reason.contains("netstat unavailable"), "{reason}");
            }
            other => panic!("expected error marker, got {other:?}"),
        }
    }

    #[test]
    fn timed_out_collector_degrades_to_error_markers() {
        let collectors: Vec<Box<dyn FactCollector>> = vec![
            Box::new(StaticCollector::ok(
                "proc",
                "process.",
                vec![("process.sshd.running", Value::Bool(true))],
            )),
            Box::new(StaticCollector::slow(
                "stuck",
                "network.",
                Duration::from_secs(30),
            )),
        ];
        let snapshot = gather(
            collectors,
            &selectors(&["process.sshd.running", "network.sshd.port"]),
            Duration::from_millis(50),
        );
        assert_eq!(
            snapshot.lookup("process.sshd.running"),
            Observed::Value(Value::Bool(true))
        );
        match snapshot.lookup("network.sshd.port") {
            Observed::CollectorError { reason } => {
                assert!(reason.contains("timed out"), "{reason}");
            }
            other => panic!("expected error marker, got {other:?}"),
        }
    }

    #[test]
    fn earlier_collector_wins_selector_collisions() {
        let collectors: Vec<Box<dyn FactCollector>> = vec![
            Box::new(StaticCollector::ok(
                "first",
                "host.",
                vec![("host.name", Value::String("alpha".to_string()))],
            )),
            Box::new(StaticCollector::ok(
                "second",
                "host.",
                vec![("host.name", Value::String("beta".to_string()))],
            )),
        ];
        let snapshot = gather(collectors, &selectors(&["host.name"]), Duration::from_secs(5));
        assert_eq!(
            snapshot.lookup("host.name"),
            Observed::Value(Value::String("alpha".to_string()))
        );
    }
}
