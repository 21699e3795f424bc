use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Shape Preview".into(),
        }
    }
}

/// Read-only flags consumed by the preview (the "options store").
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PreviewOptions {
    pub snap_to_grid: bool,
    /// Grid spacing in editor-world pixels. Values <= 0 disable snapping and the grid overlay.
    pub grid_gap: f32,
    pub grid_shown: bool,
    pub asset_drawn: bool,
    pub asset_drawn_with_opacity_50: bool,
    pub background_light: bool,
}
impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            snap_to_grid: false,
            grid_gap: 10.0,
            grid_shown: false,
            asset_drawn: true,
            asset_drawn_with_opacity_50: false,
            background_light: true,
        }
    }
}

impl PreviewOptions {
    /// Snap gap when snapping is enabled and the gap is usable.
    pub fn active_snap_gap(&self) -> Option<f32> {
        if self.snap_to_grid && self.grid_gap.is_finite() && self.grid_gap > 0.0 {
            Some(self.grid_gap)
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Upper bound for a single physics step; long frames are clamped to this.
    pub max_step_secs: f32,
    /// Gravity in m/s². The preview runs without gravity by default.
    pub gravity: (f32, f32),
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_step_secs: 0.1,
            gravity: (0.0, 0.0),
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    pub window: WindowConfig,
    pub options: PreviewOptions,
    pub physics: PhysicsConfig,
    pub rapier_debug: bool,
}
impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            options: Default::default(),
            physics: Default::default(),
            rapier_debug: false,
        }
    }
}

impl PreviewConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Loads every readable file in order, merging later maps over earlier ones.
    /// Returns the config, the paths actually used, and any read/parse errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        match &mut merged {
                            Some(cur) => merge_value(cur, val),
                            None => merged = Some(val),
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (Self::default(), used, errors);
        };
        match val.into_rust::<PreviewConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (Self::default(), used, errors)
            }
        }
    }

    /// Rapier wireframes on request, or always with the `debug` feature.
    pub fn debug_render_enabled(&self) -> bool {
        self.rapier_debug || cfg!(feature = "debug")
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if !self.options.grid_gap.is_finite() || self.options.grid_gap <= 0.0 {
            w.push(format!(
                "options.grid_gap {} must be > 0; grid snapping and overlay disabled",
                self.options.grid_gap
            ));
        }
        if self.physics.max_step_secs <= 0.0 {
            w.push(format!(
                "physics.max_step_secs {} must be > 0; simulation would not advance",
                self.physics.max_step_secs
            ));
        } else if self.physics.max_step_secs > 0.5 {
            w.push(format!(
                "physics.max_step_secs {} very large; tunnelling likely after frame hitches",
                self.physics.max_step_secs
            ));
        }
        w
    }
}

fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
    use ron::value::Value;
    match (base, overlay) {
        (Value::Map(bm), Value::Map(om)) => {
            for (k, v) in om.into_iter() {
                let mut incoming = Some(v);
                for (ek, ev) in bm.iter_mut() {
                    if *ek == k {
                        if let Some(val) = incoming.take() {
                            merge_value(ev, val);
                        }
                        break;
                    }
                }
                if let Some(val) = incoming {
                    bm.insert(k, val);
                }
            }
        }
        (b, o) => *b = o,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_render_follows_config_flag() {
        let mut cfg = PreviewConfig::default();
        assert_eq!(cfg.debug_render_enabled(), cfg!(feature = "debug"));
        cfg.rapier_debug = true;
        assert!(cfg.debug_render_enabled());
    }

    #[test]
    fn defaults_validate_clean() {
        let cfg = PreviewConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn non_positive_gap_disables_snapping() {
        let mut opts = PreviewOptions {
            snap_to_grid: true,
            ..Default::default()
        };
        assert_eq!(opts.active_snap_gap(), Some(10.0));
        opts.grid_gap = 0.0;
        assert_eq!(opts.active_snap_gap(), None);
        opts.grid_gap = -4.0;
        assert_eq!(opts.active_snap_gap(), None);
        opts.grid_gap = f32::NAN;
        assert_eq!(opts.active_snap_gap(), None);
    }

    #[test]
    fn zero_gap_reported_by_validate() {
        let mut cfg = PreviewConfig::default();
        cfg.options.grid_gap = 0.0;
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("grid_gap")));
    }

    #[test]
    fn partial_ron_fills_defaults() {
        let cfg: PreviewConfig = ron::from_str("(options: (snap_to_grid: true))").unwrap();
        assert!(cfg.options.snap_to_grid);
        assert_eq!(cfg.options.grid_gap, 10.0);
        assert_eq!(cfg.window, WindowConfig::default());
    }
}
