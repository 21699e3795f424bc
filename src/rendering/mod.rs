pub mod background;
pub mod camera;
pub mod grid;
pub mod hud;
