use crate::client::ReadingSink;
use crate::probe::ProbeBinding;
use chrono::Utc;
use europa_core::{timestamp, SensorDataMessage};
use std::time::Duration;
use tracing::{error, info};

/// Outcome of a single polling cycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub submitted: usize,
    pub read_failures: usize,
    pub submit_failures: usize,
}

/// Reads every probe, then reports the values one after another.
/// No failure ends the loop, a failed reading is simply missing in that cycle.
pub struct PollingAgent<S> {
    probes: Vec<ProbeBinding>,
    sink: S,
    interval: Duration,
}

impl<S: ReadingSink> PollingAgent<S> {
    pub fn new(probes: Vec<ProbeBinding>, sink: S, interval: Duration) -> Self {
        PollingAgent {
            probes,
            sink,
            interval,
        }
    }

    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();

        let mut readings = Vec::with_capacity(self.probes.len());
        for binding in self.probes.iter() {
            match binding.probe.read().await {
                Ok(value) => readings.push((binding, value)),
                Err(err) => {
                    error!(sensor = binding.probe.name(), error = %err, "Failed to read sensor");
                    report.read_failures += 1;
                }
            }
        }

        // one capture time for the whole cycle
        let captured = timestamp::truncate(Utc::now().naive_utc());
        for (binding, value) in readings {
            let name = binding.probe.name();
            info!(sensor_id = binding.api_id, "Submitting {} for sensor {}", value, name);
            let message = SensorDataMessage::new(value, Some(captured));
            match self.sink.submit(binding.api_id, &message).await {
                Ok(()) => report.submitted += 1,
                Err(err) => {
                    error!(sensor = name, error = %err, "Failed to POST sensor data");
                    report.submit_failures += 1;
                }
            }
        }
        report
    }

    /// Polls until the process is terminated
    pub async fn run(&self) {
        info!("Entering polling loop");
        loop {
            let report = self.run_cycle().await;
            info!(
                submitted = report.submitted,
                read_failures = report.read_failures,
                submit_failures = report.submit_failures,
                "Sleeping {}s before the next poll",
                self.interval.as_secs()
            );
            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{ProbeError, SubmitError};
    use crate::probe::SensorProbe;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashSet;

    struct FixedProbe(&'static str, f64);

    #[async_trait]
    impl SensorProbe for FixedProbe {
        fn name(&self) -> &str {
            self.0
        }

        async fn read(&self) -> Result<f64, ProbeError> {
            Ok(self.1)
        }
    }

    struct BrokenProbe;

    #[async_trait]
    impl SensorProbe for BrokenProbe {
        fn name(&self) -> &str {
            "Broken"
        }

        async fn read(&self) -> Result<f64, ProbeError> {
            Err(ProbeError::Crc("crc=00 NO".to_owned()))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        received: Mutex<Vec<(i64, SensorDataMessage)>>,
        refused: HashSet<i64>,
    }

    #[async_trait]
    impl ReadingSink for RecordingSink {
        async fn submit(&self, api_id: i64, message: &SensorDataMessage) -> Result<(), SubmitError> {
            if self.refused.contains(&api_id) {
                return Err(SubmitError::Status {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: String::new(),
                });
            }
            self.received.lock().push((api_id, message.clone()));
            Ok(())
        }
    }

    fn build_agent(probes: Vec<ProbeBinding>, sink: RecordingSink) -> PollingAgent<RecordingSink> {
        PollingAgent::new(probes, sink, Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_cycle_shares_capture_time() {
        let agent = build_agent(
            vec![
                ProbeBinding::new(1, FixedProbe("Soil Moisture", 1.0)),
                ProbeBinding::new(2, FixedProbe("Soil Temperature", 18.5)),
                ProbeBinding::new(5, FixedProbe("Light", 0.0)),
            ],
            RecordingSink::default(),
        );

        let report = agent.run_cycle().await;

        assert_eq!(
            CycleReport {
                submitted: 3,
                ..Default::default()
            },
            report
        );
        let received = agent.sink.received.lock();
        let ids: Vec<i64> = received.iter().map(|(id, _)| *id).collect();
        assert_eq!(vec![1, 2, 5], ids);
        assert_eq!(18.5, received[1].1.value);
        let created = received[0].1.created;
        assert!(created.is_some());
        assert!(received.iter().all(|(_, m)| m.created == created));
    }

    #[tokio::test]
    async fn test_cycle_skips_failures() {
        let sink = RecordingSink {
            refused: HashSet::from([3]),
            ..Default::default()
        };
        let agent = build_agent(
            vec![
                ProbeBinding::new(1, FixedProbe("Soil Moisture", 0.0)),
                ProbeBinding::new(2, BrokenProbe),
                ProbeBinding::new(3, FixedProbe("Ambient Humidity", 45.3)),
                ProbeBinding::new(4, FixedProbe("Ambient Temperature", 21.7)),
            ],
            sink,
        );

        let report = agent.run_cycle().await;

        assert_eq!(
            CycleReport {
                submitted: 2,
                read_failures: 1,
                submit_failures: 1,
            },
            report
        );
        let ids: Vec<i64> = agent.sink.received.lock().iter().map(|(id, _)| *id).collect();
        assert_eq!(vec![1, 4], ids);
    }
}
