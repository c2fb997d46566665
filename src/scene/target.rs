use std::collections::BTreeMap;

use crate::{
    foundation::core::{Affine, Rgba8Premul, Size, Vec2},
    scene::registry::TargetId,
};

/// Logical role of an animated element in the hero scene.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Role {
    Heading,
    Subtext,
    Cta,
    IslandLeft,
    IslandRight,
    Boat,
    /// Fish slot by lane index.
    Fish(usize),
}

/// Mutable visual state the animations write into.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TargetState {
    pub translate: Vec2,
    pub rotation_deg: f64,
    pub scale: f64,
    pub opacity: f64,
    pub blur_px: f64,
    pub glow_px: f64,
    pub glow_color: Rgba8Premul,
    /// Transform origin as a fraction of the element size.
    pub pivot: Vec2,
}

impl Default for TargetState {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: 1.0,
            opacity: 1.0,
            blur_px: 0.0,
            glow_px: 0.0,
            glow_color: Rgba8Premul::transparent(),
            pivot: Vec2::new(0.5, 0.5),
        }
    }
}

impl TargetState {
    /// Element transform for an element of the given size.
    pub fn to_affine(&self, size: Size) -> Affine {
        let anchor = Vec2::new(self.pivot.x * size.width, self.pivot.y * size.height);
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(anchor);
        let t_unanchor = Affine::translate(-anchor);
        let t_rotate = Affine::rotate(self.rotation_deg.to_radians());
        let t_scale = Affine::scale(self.scale);

        // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

/// Role -> handle map supplied by the rendering layer at mount time.
#[derive(Clone, Debug, Default)]
pub struct SceneTargets {
    map: BTreeMap<Role, TargetId>,
}

impl SceneTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: Role, id: TargetId) -> Self {
        self.map.insert(role, id);
        self
    }

    pub fn insert(&mut self, role: Role, id: TargetId) {
        self.map.insert(role, id);
    }

    pub fn get(&self, role: Role) -> Option<TargetId> {
        self.map.get(&role).copied()
    }

    /// Fish slots `0..count`, `None` where the element is not mounted.
    pub fn fish_slots(&self, count: usize) -> Vec<Option<TargetId>> {
        (0..count).map(|i| self.get(Role::Fish(i))).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, TargetId)> + '_ {
        self.map.iter().map(|(r, id)| (*r, *id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/target.rs"]
mod tests;
