use bevy::prelude::*;

use crate::core::components::AssetPreview;
use crate::core::config::{PreviewConfig, PreviewOptions};

pub const BACKGROUND_LIGHT: Color = Color::srgb(0.93, 0.93, 0.93);
pub const BACKGROUND_DARK: Color = Color::srgb(0.22, 0.22, 0.24);

/// Background style and asset preview visibility/opacity, driven by the options.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND_LIGHT))
            .add_systems(Update, (apply_background_style, style_asset_preview));
    }
}

pub fn background_color(options: &PreviewOptions) -> Color {
    if options.background_light {
        BACKGROUND_LIGHT
    } else {
        BACKGROUND_DARK
    }
}

pub fn asset_alpha(options: &PreviewOptions) -> f32 {
    if options.asset_drawn_with_opacity_50 {
        0.5
    } else {
        1.0
    }
}

fn apply_background_style(cfg: Res<PreviewConfig>, mut clear: ResMut<ClearColor>) {
    let color = background_color(&cfg.options);
    if clear.0 != color {
        clear.0 = color;
    }
}

/// Applies opacity and visibility every frame so option changes and freshly
/// spawned previews are both covered.
pub fn style_asset_preview(
    cfg: Res<PreviewConfig>,
    mut q: Query<(&mut Sprite, &mut Visibility), With<AssetPreview>>,
) {
    let alpha = asset_alpha(&cfg.options);
    let visibility = if cfg.options.asset_drawn {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for (mut sprite, mut vis) in &mut q {
        if sprite.color.alpha() != alpha {
            sprite.color.set_alpha(alpha);
        }
        vis.set_if_neq(visibility);
    }
}
