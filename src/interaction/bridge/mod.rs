pub mod editor_bridge;
