use bevy::prelude::*;
use std::{collections::HashMap, fs, path::PathBuf, time::SystemTime};

use crate::core::config::PreviewConfig;

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/preview.ron";
pub const LOCAL_CONFIG_PATH: &str = "assets/config/preview.local.ron";

#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}

impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from(DEFAULT_CONFIG_PATH),
                PathBuf::from(LOCAL_CONFIG_PATH),
            ],
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}

impl Default for ConfigReloadState {
    fn default() -> Self {
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(0.5, TimerMode::Repeating),
        }
    }
}

/// Polls the config files and swaps in the new options when they change.
/// Window and physics sections are read at startup only.
pub struct ConfigHotReloadPlugin;

impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<ConfigReloadSettings>()
                .init_resource::<ConfigReloadState>()
                .add_systems(Startup, prime_modification_times)
                .add_systems(Update, poll_and_reload_config);
        }
    }
}

/// Returns true when any watched file is newer than last seen.
fn refresh_mod_times(paths: &[PathBuf], last_mod: &mut HashMap<PathBuf, SystemTime>) -> bool {
    let mut dirty = false;
    for path in paths {
        let Ok(mod_time) = fs::metadata(path).and_then(|m| m.modified()) else {
            continue;
        };
        let entry = last_mod
            .entry(path.clone())
            .or_insert(SystemTime::UNIX_EPOCH);
        if mod_time > *entry {
            *entry = mod_time;
            dirty = true;
        }
    }
    dirty
}

fn prime_modification_times(settings: Res<ConfigReloadSettings>, mut state: ResMut<ConfigReloadState>) {
    refresh_mod_times(&settings.paths, &mut state.last_mod);
}

fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg: ResMut<PreviewConfig>,
) {
    let interval = settings.interval_secs.max(0.05);
    if (state.timer.duration().as_secs_f32() - interval).abs() > f32::EPSILON {
        state
            .timer
            .set_duration(std::time::Duration::from_secs_f32(interval));
    }
    if !state.timer.tick(time.delta()).finished() {
        return;
    }
    let ConfigReloadState { last_mod, .. } = &mut *state;
    if !refresh_mod_times(&settings.paths, last_mod) {
        return;
    }
    let (new_cfg, _used, errors) = PreviewConfig::load_layered(settings.paths.iter());
    for e in errors {
        warn!("config hot-reload issue: {e}");
    }
    for w in new_cfg.validate() {
        warn!("config: {w}");
    }
    if cfg.options != new_cfg.options {
        cfg.options = new_cfg.options;
        info!("preview options reloaded");
    }
}
