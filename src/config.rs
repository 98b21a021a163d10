use std::net::SocketAddr;
use std::path::PathBuf;

use crate::controls::PAYLOAD_STEP;

/// Dataset path used when nothing else is given, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "spacex_launch_dash.csv";

/// Runtime settings shared by the desktop and web dashboards.
#[derive(Debug, Clone)]
pub struct DashConfig {
    pub data_path: PathBuf,
    /// Address the web dashboard listens on.
    pub bind_addr: SocketAddr,
    pub payload_step: f64,
    /// Initial desktop window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8050)),
            payload_step: PAYLOAD_STEP,
            window_size: [1200.0, 900.0],
        }
    }
}
