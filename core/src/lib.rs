mod messaging;
pub mod timestamp;

pub use messaging::*;

pub static CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
