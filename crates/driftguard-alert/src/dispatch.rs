use crate::sink::{AlertSink, DeliveryOutcome, DeliveryResult};
use driftguard_types::DriftReport;

/// When sinks fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertMode {
    /// Only when the report is non-compliant.
    #[default]
    OnDrift,
    Always,
}

pub fn should_dispatch(mode: AlertMode, compliant: bool) -> bool {
    match mode {
        AlertMode::OnDrift => !compliant,
        AlertMode::Always => true,
    }
}

/// Attempt delivery to every sink concurrently and wait for all attempts.
///
/// The scoped threads are joined on every path out of this function, so a
/// caller deciding the process exit code sees every delivery outcome before
/// the process can terminate. Results come back in sink order.
pub fn dispatch_all(sinks: &[Box<dyn AlertSink>], report: &DriftReport) -> Vec<DeliveryResult> {
    let results = std::thread::scope(|scope| {
        let handles: Vec<_> = sinks
            .iter()
            .map(|sink| {
                let name = sink.name().to_string();
                let handle = scope.spawn(move || match sink.deliver(report) {
                    Ok(()) => DeliveryOutcome::Delivered,
                    Err(err) => DeliveryOutcome::Failed {
                        reason: err.to_string(),
                    },
                });
                (name, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(sink, handle)| {
                let outcome = handle.join().unwrap_or_else(|_| DeliveryOutcome::Failed {
                    reason: "sink panicked during delivery".to_string(),
                });
                DeliveryResult { sink, outcome }
            })
            .collect::<Vec<_>>()
    });

    for result in &results {
        match &result.outcome {
            DeliveryOutcome::Delivered => {
                tracing::info!(sink = result.sink.as_str(), "alert delivered");
            }
            DeliveryOutcome::Failed { reason } => {
                tracing::warn!(sink = result.sink.as_str(), reason = reason.as_str(), "alert delivery failed");
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{AlertDeliveryError, FileSink};
    use driftguard_types::{
        DriftReport, ReportSummary, ToolMeta, SCHEMA_REPORT_V1,
    };
    use std::sync::atomic::{AtomicU32, Ordering};
    use time::macros::datetime;

    fn report(compliant: bool) -> DriftReport {
        DriftReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "driftguard".to_string(),
                version: "0.0.0".to_string(),
            },
            policy_id: "baseline".to_string(),
            policy_version: "1.0".to_string(),
            snapshot_timestamp: datetime!(2026-01-15 12:00 UTC),
            generated_at: datetime!(2026-01-15 12:00:01 UTC),
            compliant,
            summary: ReportSummary::default(),
            findings: Vec::new(),
        }
    }

    struct CountingSink {
        name: &'static str,
        deliveries: AtomicU32,
        fail: bool,
    }

    impl CountingSink {
        fn new(name: &'static str, fail: bool) -> Self {
            Self {
                name,
                deliveries: AtomicU32::new(0),
                fail,
            }
        }
    }

    impl AlertSink for CountingSink {
        fn name(&self) -> &str {
            self.name
        }

        fn deliver(&self, _report: &DriftReport) -> Result<(), AlertDeliveryError> {
            self.deliveries.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AlertDeliveryError("endpoint unreachable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn dispatch_modes() {
        assert!(should_dispatch(AlertMode::OnDrift, false));
        assert!(!should_dispatch(AlertMode::OnDrift, true));
        assert!(should_dispatch(AlertMode::Always, true));
        assert!(should_dispatch(AlertMode::Always, false));
    }

    #[test]
    fn every_sink_is_attempted_even_when_one_fails() {
        let sinks: Vec<Box<dyn AlertSink>> = vec![
            Box::new(CountingSink::new("failing", true)),
            Box::new(CountingSink::new("working", false)),
        ];
        let report = report(false);

        let results = dispatch_all(&sinks, &report);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].sink, "failing");
        assert!(matches!(
            results[0].outcome,
            DeliveryOutcome::Failed { ref reason } if reason.contains("unreachable")
        ));
        assert_eq!(results[1].sink, "working");
        assert_eq!(results[1].outcome, DeliveryOutcome::Delivered);

        // The report itself is untouched by delivery outcomes.
        assert!(!report.compliant);
    }

    #[test]
    fn file_sink_writes_the_report_json() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = camino::Utf8PathBuf::from_path_buf(tmp.path().join("alerts/drift.json"))
            .expect("utf8");
        let sink = FileSink::new(path.clone());

        sink.deliver(&report(false)).expect("deliver");

        let written = std::fs::read_to_string(&path).expect("read back");
        let parsed: DriftReport = serde_json::from_str(&written).expect("valid report json");
        assert_eq!(parsed.policy_id, "baseline");
        assert!(!parsed.compliant);
    }
}
