//! Central system ordering labels to make the frame sequence explicit.
//! Stages (high-level):
//! 1. Input (throw / pan / zoom, runs in `Update`)
//! 2. Rapier step + writeback (`PostUpdate`, handled by the plugin)
//! 3. Project (body transforms -> sprite draw transforms)
//! 4. ApplyDraw (draw transforms -> renderable `Transform`, before propagation)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputSet; // pointer/wheel handling that may spawn or move things

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ProjectSet; // physics state -> sprite placement, strictly after the step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ApplyDrawSet; // sprite placement -> Transform
