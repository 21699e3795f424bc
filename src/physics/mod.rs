pub mod fixtures;
pub mod rapier;
pub mod registry;
pub mod sync;
