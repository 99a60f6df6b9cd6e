use once_cell::sync::Lazy;
use std::env;
use std::fmt::Debug;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub struct Config {
    api_base_uri: String,
    poll_interval: Duration,
    sensor_pin_soil: u32,
    sensor_pin_ambient: u32,
    w1_device_dir: PathBuf,
    dht_iio_device: PathBuf,
    smartplug_addr: Option<String>,
    api_ids: ApiIds,
}

/// Sensor ids the readings are reported under
#[derive(Debug, Clone, Copy)]
pub struct ApiIds {
    pub soil_moisture: i64,
    pub soil_temperature: i64,
    pub ambient_humidity: i64,
    pub ambient_temperature: i64,
    pub light: i64,
}

impl Config {
    pub fn api_base_uri(&self) -> &str {
        &self.api_base_uri
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn sensor_pin_soil(&self) -> u32 {
        self.sensor_pin_soil
    }

    pub fn sensor_pin_ambient(&self) -> u32 {
        self.sensor_pin_ambient
    }

    pub fn w1_device_dir(&self) -> &PathBuf {
        &self.w1_device_dir
    }

    pub fn dht_iio_device(&self) -> &PathBuf {
        &self.dht_iio_device
    }

    pub fn smartplug_addr(&self) -> Option<&str> {
        self.smartplug_addr.as_deref()
    }

    pub fn api_ids(&self) -> ApiIds {
        self.api_ids
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{} is malformed: {:?}", key, e)),
        Err(_) => default,
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv::dotenv().ok();

    let api_base_uri = env_or(
        "API_BASE_URI",
        "http://127.0.0.1:5000/api/v1".to_owned(),
    );
    let poll_interval = Duration::from_secs(env_or("POLL_INTERVAL_SECS", 300));
    let w1_device_dir = env_or("W1_DEVICE_DIR", PathBuf::from("/sys/bus/w1/devices"));
    let dht_iio_device = env_or(
        "DHT_IIO_DEVICE",
        PathBuf::from("/sys/bus/iio/devices/iio:device0"),
    );
    let smartplug_addr = env::var("SMARTPLUG_ADDR").ok().filter(|a| !a.is_empty());

    Config {
        api_base_uri,
        poll_interval,
        sensor_pin_soil: env_or("SENSOR_PIN_SOIL", 2),
        sensor_pin_ambient: env_or("SENSOR_PIN_AMBIENT", 3),
        w1_device_dir,
        dht_iio_device,
        smartplug_addr,
        api_ids: ApiIds {
            soil_moisture: env_or("API_SOIL_MOISTURE", 1),
            soil_temperature: env_or("API_SOIL_TEMPERATURE", 2),
            ambient_humidity: env_or("API_AMBIENT_HUMIDITY", 3),
            ambient_temperature: env_or("API_AMBIENT_TEMPERATURE", 4),
            light: env_or("API_LIGHT", 5),
        },
    }
});
