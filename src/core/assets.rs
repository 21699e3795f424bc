//! Editor-side asset model and the store publishing selection changes.
use bevy::prelude::*;

/// One simple polygon of an asset's collision shape, in editor pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonModel {
    pub vertices: Vec<Vec2>,
}

impl PolygonModel {
    pub fn new(vertices: impl Into<Vec<Vec2>>) -> Self {
        Self {
            vertices: vertices.into(),
        }
    }
}

/// An editable asset: the texture drawn underneath plus its polygon soup.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetModel {
    pub name: String,
    pub texture: Handle<Image>,
    /// Region size of the texture in pixels; used to place the preview and recenter the camera.
    pub texture_size: Vec2,
    pub polygons: Vec<PolygonModel>,
}

impl AssetModel {
    pub fn new(name: impl Into<String>, texture: Handle<Image>, texture_size: Vec2) -> Self {
        Self {
            name: name.into(),
            texture,
            texture_size,
            polygons: Vec::new(),
        }
    }

    pub fn with_polygon(mut self, vertices: impl Into<Vec<Vec2>>) -> Self {
        self.polygons.push(PolygonModel::new(vertices));
        self
    }

    pub fn texture_center(&self) -> Vec2 {
        self.texture_size * 0.5
    }
}

/// Currently selected asset. `None` is the empty selection.
#[derive(Resource, Debug, Default)]
pub struct AssetStore {
    selected: Option<AssetModel>,
}

impl AssetStore {
    pub fn selected(&self) -> Option<&AssetModel> {
        self.selected.as_ref()
    }

    /// Mutable access for polygon edits. Callers follow up with
    /// [`RebuildShapeBody`](crate::interaction::bridge::editor_bridge::RebuildShapeBody).
    pub fn selected_mut(&mut self) -> Option<&mut AssetModel> {
        self.selected.as_mut()
    }

    /// Replaces the selection without notifying; prefer [`select_asset`].
    pub fn set_selected(&mut self, asset: Option<AssetModel>) {
        self.selected = asset;
    }
}

/// Published whenever the selected asset changes. Observers run synchronously
/// inside the trigger, before the next frame.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SelectionChanged;

/// Selects `asset` (or clears the selection) and notifies subscribers.
pub fn select_asset(world: &mut World, asset: Option<AssetModel>) {
    world
        .get_resource_or_insert_with(AssetStore::default)
        .set_selected(asset);
    world.trigger(SelectionChanged);
}

/// Command form of [`select_asset`] for use inside systems.
pub fn select_asset_command(asset: Option<AssetModel>) -> impl FnOnce(&mut World) + Send + 'static {
    move |world: &mut World| select_asset(world, asset)
}
