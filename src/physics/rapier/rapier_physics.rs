use std::num::NonZeroUsize;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::PreviewConfig;
use crate::core::system::system_order::ProjectSet;

/// Solver tuning. Engine constants, not user configuration.
pub const VELOCITY_ITERATIONS: usize = 10;
pub const POSITION_ITERATIONS: usize = 10;

/// Rapier in meters, stepped by the frame time and tuned once at startup.
pub struct PhysicsSetupPlugin;

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        let max_dt = app
            .world()
            .get_resource::<PreviewConfig>()
            .map(|cfg| cfg.physics.max_step_secs)
            .filter(|dt| *dt > 0.0)
            .unwrap_or(0.1);
        // Bodies live in meters; sprites are placed in pixels by the sync step.
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
            // Step by the real frame time, clamped after hitches.
            .insert_resource(TimestepMode::Variable {
                max_dt,
                time_scale: 1.0,
                substeps: 1,
            })
            .configure_sets(PostUpdate, ProjectSet.after(PhysicsSet::Writeback))
            // The default context entity is spawned in `PreStartup`.
            .add_systems(PostStartup, configure_simulation);
    }
}

/// Applies gravity and solver iteration counts to the default Rapier context.
pub fn configure_simulation(
    mut contexts: Query<(&mut RapierConfiguration, &mut RapierContextSimulation)>,
    cfg: Option<Res<PreviewConfig>>,
) {
    let Some((mut rapier_cfg, mut simulation)) = contexts.iter_mut().next() else {
        warn!("no rapier context at startup; simulation left at engine defaults");
        return;
    };
    let (gx, gy) = cfg.map(|c| c.physics.gravity).unwrap_or((0.0, 0.0));
    rapier_cfg.gravity = Vect::new(gx, gy);
    let params = &mut simulation.integration_parameters;
    params.num_solver_iterations =
        NonZeroUsize::new(VELOCITY_ITERATIONS).unwrap_or(NonZeroUsize::MIN);
    params.num_internal_stabilization_iterations = POSITION_ITERATIONS;
    info!(
        velocity_iterations = VELOCITY_ITERATIONS,
        position_iterations = POSITION_ITERATIONS,
        gravity_x = gx,
        gravity_y = gy,
        "physics simulation configured"
    );
}
