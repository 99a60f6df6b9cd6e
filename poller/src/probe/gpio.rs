use super::SensorProbe;
use crate::error::ProbeError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::debug;

const SYSFS_GPIO: &str = "/sys/class/gpio";
const EXPORT_ATTEMPTS: usize = 10;

/// Digital soil moisture sensor on a sysfs GPIO input.
/// The sensor pulls the line high while the soil is dry.
pub struct GpioProbe {
    name: String,
    pin: u32,
    base: PathBuf,
}

impl GpioProbe {
    pub fn new(name: &str, pin: u32) -> Self {
        GpioProbe::with_base(name, pin, SYSFS_GPIO)
    }

    pub fn with_base(name: &str, pin: u32, base: impl Into<PathBuf>) -> Self {
        GpioProbe {
            name: name.to_owned(),
            pin,
            base: base.into(),
        }
    }

    fn pin_dir(&self) -> PathBuf {
        self.base.join(format!("gpio{}", self.pin))
    }

    /// Exports the pin and configures it as input, unless already done
    async fn ensure_exported(&self) -> Result<(), ProbeError> {
        let pin_dir = self.pin_dir();
        if fs::metadata(&pin_dir).await.is_ok() {
            return Ok(());
        }

        let export = self.base.join("export");
        debug!(pin = self.pin, "Exporting GPIO pin");
        fs::write(&export, self.pin.to_string())
            .await
            .map_err(ProbeError::io(&export))?;

        // the kernel creates the pin directory asynchronously
        let direction = pin_dir.join("direction");
        for _ in 0..EXPORT_ATTEMPTS {
            if fs::metadata(&direction).await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        fs::write(&direction, "in")
            .await
            .map_err(ProbeError::io(&direction))
    }
}

#[async_trait]
impl SensorProbe for GpioProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> Result<f64, ProbeError> {
        self.ensure_exported().await?;
        let value = self.pin_dir().join("value");
        let raw = fs::read_to_string(&value)
            .await
            .map_err(ProbeError::io(&value))?;
        parse_level(&raw)
    }
}

/// high (dry) is `0.0`, low (wet) is `1.0`
fn parse_level(raw: &str) -> Result<f64, ProbeError> {
    match raw.trim() {
        "1" => Ok(0.0),
        "0" => Ok(1.0),
        other => Err(ProbeError::Parse(other.to_owned())),
    }
}
