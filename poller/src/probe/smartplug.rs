use super::SensorProbe;
use crate::error::ProbeError;
use crate::tddp;
use async_trait::async_trait;
use serde_json::Value;
use std::net::{IpAddr, SocketAddr};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

pub const DEFAULT_PORT: u16 = 9999;
const GET_SYSINFO: &[u8] = br#"{"system":{"get_sysinfo":{}}}"#;

/// Grow light state, taken from the relay of a TP-Link style smart plug
pub struct SmartPlugProbe {
    name: String,
    addr: String,
}

impl SmartPlugProbe {
    /// `addr` is `host`, `host:port`, an IP literal or `[v6]:port`
    pub fn new(name: &str, addr: &str) -> Self {
        SmartPlugProbe {
            name: name.to_owned(),
            addr: with_default_port(addr),
        }
    }

    async fn query(&self, request: &[u8]) -> Result<Vec<u8>, ProbeError> {
        let mut stream = TcpStream::connect(&self.addr).await?;
        stream.write_all(&tddp::frame(request)).await?;

        let len = stream.read_u32().await? as usize;
        if len > tddp::MAX_FRAME_LEN {
            return Err(ProbeError::Protocol(format!("reply of {} bytes", len)));
        }
        let mut reply = vec![0; len];
        stream.read_exact(&mut reply).await?;
        Ok(tddp::decrypt(&reply))
    }
}

#[async_trait]
impl SensorProbe for SmartPlugProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> Result<f64, ProbeError> {
        let reply = self.query(GET_SYSINFO).await?;
        relay_state(&reply)
    }
}

fn with_default_port(addr: &str) -> String {
    if addr.parse::<SocketAddr>().is_ok() {
        return addr.to_owned();
    }
    if let Ok(ip) = addr.parse::<IpAddr>() {
        return SocketAddr::new(ip, DEFAULT_PORT).to_string();
    }
    match addr.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') && port.parse::<u16>().is_ok() => {
            addr.to_owned()
        }
        _ => format!("{}:{}", addr, DEFAULT_PORT),
    }
}

/// `1.0` while the relay is closed, `0.0` otherwise
fn relay_state(reply: &[u8]) -> Result<f64, ProbeError> {
    let reply: Value = serde_json::from_slice(reply)
        .map_err(|e| ProbeError::Protocol(format!("invalid sysinfo: {}", e)))?;
    match reply["system"]["get_sysinfo"]["relay_state"].as_i64() {
        Some(1) => Ok(1.0),
        Some(0) => Ok(0.0),
        _ => Err(ProbeError::Protocol(format!(
            "no relay_state in {}",
            reply
        ))),
    }
}
