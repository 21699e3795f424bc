pub mod config;

pub use config::{PhysicsConfig, PreviewConfig, PreviewOptions, WindowConfig};
