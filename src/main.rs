use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;

use shape_preview::core::assets::{select_asset_command, AssetModel};
use shape_preview::interaction::session::config_hot_reload::{
    ConfigReloadSettings, DEFAULT_CONFIG_PATH, LOCAL_CONFIG_PATH,
};
use shape_preview::{PreviewConfig, PreviewPlugin};

#[derive(Parser, Debug)]
#[command(about = "Live physics preview of an asset's collision shape", version)]
struct Args {
    /// Config files merged in order (later wins). Defaults to the bundled preview.ron + local override.
    #[arg(long = "config")]
    configs: Vec<PathBuf>,
    /// Select a built-in sample asset at startup.
    #[arg(long)]
    demo: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let explicit = !args.configs.is_empty();
    let paths = if explicit {
        args.configs.clone()
    } else {
        vec![PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from(LOCAL_CONFIG_PATH)]
    };
    let (cfg, used, errors) = PreviewConfig::load_layered(&paths);
    if explicit && used.is_empty() {
        anyhow::bail!("no readable config among {:?}: {}", paths, errors.join("; "));
    }

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: cfg.window.title.clone(),
            resolution: (cfg.window.width, cfg.window.height).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }));

    // Logging is live once DefaultPlugins is built.
    for path in &used {
        info!("config loaded: {path}");
    }
    for e in &errors {
        // The local override is optional.
        if explicit || !e.contains("preview.local.ron") {
            warn!("config: {e}");
        }
    }
    for w in cfg.validate() {
        warn!("config: {w}");
    }

    // Wireframes are drawn in physics units (meters).
    if cfg.debug_render_enabled() {
        app.add_plugins(bevy_rapier2d::prelude::RapierDebugRenderPlugin::default());
    }

    // Hot reload watches the same layers that were loaded.
    app.insert_resource(ConfigReloadSettings {
        paths,
        ..default()
    })
    .insert_resource(cfg)
    .add_plugins(PreviewPlugin);
    if args.demo {
        app.add_systems(PostStartup, select_demo_asset);
    }
    app.run();
    Ok(())
}

fn select_demo_asset(mut commands: Commands, server: Res<AssetServer>) {
    let asset = AssetModel::new(
        "demo",
        server.load("textures/demo_asset.png"),
        Vec2::new(256.0, 256.0),
    )
    // floor slab
    .with_polygon(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(256.0, 0.0),
        Vec2::new(256.0, 24.0),
        Vec2::new(0.0, 24.0),
    ])
    // sliver, ignored by the fixture builder
    .with_polygon(vec![Vec2::new(40.0, 30.0), Vec2::new(41.0, 30.0), Vec2::new(40.0, 31.0)])
    // ramp
    .with_polygon(vec![
        Vec2::new(140.0, 24.0),
        Vec2::new(256.0, 24.0),
        Vec2::new(256.0, 120.0),
    ]);
    commands.queue(select_asset_command(Some(asset)));
}
