use super::SensorProbe;
use crate::error::ProbeError;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Family code of DS18B20 style thermometers
const THERM_FAMILY: &str = "28-";

/// One-wire thermometer read through the `w1_therm` sysfs interface.
/// Uses the first thermometer found below the device directory.
pub struct W1ThermProbe {
    name: String,
    device_dir: PathBuf,
}

impl W1ThermProbe {
    pub fn new(name: &str, device_dir: impl Into<PathBuf>) -> Self {
        W1ThermProbe {
            name: name.to_owned(),
            device_dir: device_dir.into(),
        }
    }

    async fn slave_file(&self) -> Result<PathBuf, ProbeError> {
        let mut entries = fs::read_dir(&self.device_dir)
            .await
            .map_err(ProbeError::io(&self.device_dir))?;
        let mut devices = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(ProbeError::io(&self.device_dir))?
        {
            if entry.file_name().to_string_lossy().starts_with(THERM_FAMILY) {
                devices.push(entry.path());
            }
        }
        devices.sort();
        devices
            .into_iter()
            .next()
            .map(|device| device.join("w1_slave"))
            .ok_or_else(|| ProbeError::NoDevice(self.device_dir.clone()))
    }
}

#[async_trait]
impl SensorProbe for W1ThermProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> Result<f64, ProbeError> {
        let slave = self.slave_file().await?;
        let raw = fs::read_to_string(&slave)
            .await
            .map_err(ProbeError::io(&slave))?;
        parse_slave(&raw)
    }
}

/// Parses the two line `w1_slave` output into degrees celsius:
///
/// ```text
/// 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
/// 72 01 4b 46 7f ff 0e 10 57 t=23125
/// ```
fn parse_slave(raw: &str) -> Result<f64, ProbeError> {
    let mut lines = raw.lines();
    let crc = lines.next().unwrap_or_default().trim();
    if !crc.ends_with("YES") {
        return Err(ProbeError::Crc(crc.to_owned()));
    }

    let data = lines.next().unwrap_or_default().trim();
    let millis = data
        .rsplit_once("t=")
        .and_then(|(_, t)| t.trim().parse::<i64>().ok())
        .ok_or_else(|| ProbeError::Parse(data.to_owned()))?;
    Ok(millis as f64 / 1000.0)
}
