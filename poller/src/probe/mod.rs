use crate::config::Config;
use crate::error::ProbeError;
use async_trait::async_trait;

mod dht;
mod gpio;
mod smartplug;
mod w1;

pub use dht::DhtProbe;
pub use gpio::GpioProbe;
pub use smartplug::SmartPlugProbe;
pub use w1::W1ThermProbe;

/// A single value source, read once per polling cycle
#[async_trait]
pub trait SensorProbe: Send + Sync {
    fn name(&self) -> &str;

    async fn read(&self) -> Result<f64, ProbeError>;
}

/// Ties a probe to the API sensor id its readings are submitted under
pub struct ProbeBinding {
    pub api_id: i64,
    pub probe: Box<dyn SensorProbe>,
}

impl ProbeBinding {
    pub fn new(api_id: i64, probe: impl SensorProbe + 'static) -> Self {
        ProbeBinding {
            api_id,
            probe: Box::new(probe),
        }
    }
}

/// The greenhouse wiring: soil moisture and temperature, ambient humidity and
/// temperature, and the grow light when a smart plug is configured.
pub fn default_probes(config: &Config) -> Vec<ProbeBinding> {
    let ids = config.api_ids();
    let mut probes = vec![
        ProbeBinding::new(
            ids.soil_moisture,
            GpioProbe::new("Soil Moisture", config.sensor_pin_soil()),
        ),
        ProbeBinding::new(
            ids.soil_temperature,
            W1ThermProbe::new("Soil Temperature", config.w1_device_dir()),
        ),
        ProbeBinding::new(
            ids.ambient_humidity,
            DhtProbe::humidity("Ambient Humidity", config.dht_iio_device()),
        ),
        ProbeBinding::new(
            ids.ambient_temperature,
            DhtProbe::temperature("Ambient Temperature", config.dht_iio_device()),
        ),
    ];
    if let Some(addr) = config.smartplug_addr() {
        probes.push(ProbeBinding::new(ids.light, SmartPlugProbe::new("Light", addr)));
    }
    probes
}
