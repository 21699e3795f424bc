pub mod app;
pub mod core;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use crate::app::preview::PreviewPlugin;
pub use crate::core::assets::{select_asset, AssetModel, AssetStore, PolygonModel, SelectionChanged};
pub use crate::core::components::PX_PER_METER;
pub use crate::core::config::{PreviewConfig, PreviewOptions};
pub use crate::interaction::bridge::editor_bridge::{ClearWorld, FireBall, PreviewState, RebuildShapeBody};
pub use crate::physics::registry::registry::{DynamicObject, DynamicObjectRegistry};
pub use crate::rendering::camera::camera::{PreviewCamera, ZOOM_LEVELS};
