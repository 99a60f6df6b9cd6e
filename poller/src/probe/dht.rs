use super::SensorProbe;
use crate::error::ProbeError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

pub const READ_ATTEMPTS: usize = 15;
pub const READ_DELAY: Duration = Duration::from_secs(2);

/// DHT22/AM2302 channel exposed by the Linux `dht11` IIO driver.
/// The sensor misses reads regularly, every read is retried.
pub struct DhtProbe {
    name: String,
    channel: PathBuf,
    attempts: usize,
    delay: Duration,
}

impl DhtProbe {
    pub fn humidity(name: &str, device: &Path) -> Self {
        DhtProbe::new(name, device.join("in_humidityrelative_input"))
    }

    pub fn temperature(name: &str, device: &Path) -> Self {
        DhtProbe::new(name, device.join("in_temp_input"))
    }

    fn new(name: &str, channel: PathBuf) -> Self {
        DhtProbe {
            name: name.to_owned(),
            channel,
            attempts: READ_ATTEMPTS,
            delay: READ_DELAY,
        }
    }

    pub fn with_retry(mut self, attempts: usize, delay: Duration) -> Self {
        self.attempts = attempts.max(1);
        self.delay = delay;
        self
    }

    async fn read_once(&self) -> Result<f64, ProbeError> {
        let raw = fs::read_to_string(&self.channel)
            .await
            .map_err(ProbeError::io(&self.channel))?;
        let millis: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ProbeError::Parse(raw.trim().to_owned()))?;
        Ok(millis as f64 / 1000.0)
    }
}

#[async_trait]
impl SensorProbe for DhtProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> Result<f64, ProbeError> {
        let mut attempt = 1;
        loop {
            match self.read_once().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.attempts => {
                    debug!(sensor = %self.name, attempt, error = %err, "DHT read failed, retrying");
                    attempt += 1;
                    tokio::time::sleep(self.delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
