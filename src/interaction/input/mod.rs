pub mod ball_throw;
pub mod pan_zoom;
