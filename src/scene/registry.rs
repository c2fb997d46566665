use slotmap::{SlotMap, new_key_type};

use crate::{
    animation::prop::Prop,
    foundation::core::Size,
    scene::target::{Role, TargetState},
};

new_key_type! {
    /// Non-owning, generation-checked handle to a registered target.
    pub struct TargetId;
}

#[derive(Clone, Debug)]
struct Entry {
    role: Role,
    size: Size,
    state: TargetState,
    revision: u64,
}

/// Arena of animation targets. Handles go stale when their target is destroyed
/// or the registry is cleared, and stale handles never resolve again.
#[derive(Clone, Debug, Default)]
pub struct TargetRegistry {
    targets: SlotMap<TargetId, Entry>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self {
            targets: SlotMap::with_key(),
        }
    }

    /// Register a freshly mounted element.
    pub fn spawn(&mut self, role: Role, size: Size) -> TargetId {
        self.targets.insert(Entry {
            role,
            size,
            state: TargetState::default(),
            revision: 0,
        })
    }

    /// Remove a target. Returns `false` for an already-stale handle.
    pub fn destroy(&mut self, id: TargetId) -> bool {
        self.targets.remove(id).is_some()
    }

    /// Destroy every target.
    pub fn clear(&mut self) -> usize {
        let destroyed = self.targets.len();
        self.targets.clear();
        destroyed
    }

    pub fn is_alive(&self, id: TargetId) -> bool {
        self.targets.contains_key(id)
    }

    pub fn get(&self, id: TargetId) -> Option<&TargetState> {
        self.targets.get(id).map(|e| &e.state)
    }

    /// Mutable access; every call counts as one mutation.
    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut TargetState> {
        let e = self.targets.get_mut(id)?;
        e.revision += 1;
        Some(&mut e.state)
    }

    pub fn role(&self, id: TargetId) -> Option<Role> {
        self.targets.get(id).map(|e| e.role)
    }

    pub fn size(&self, id: TargetId) -> Option<Size> {
        self.targets.get(id).map(|e| e.size)
    }

    /// Number of mutations applied to the target so far.
    pub fn revision(&self, id: TargetId) -> Option<u64> {
        self.targets.get(id).map(|e| e.revision)
    }

    /// Instantly write property values (no animation). Returns `false` if the
    /// handle is stale.
    pub fn set(&mut self, id: TargetId, values: &[(Prop, f64)]) -> bool {
        let Some(state) = self.get_mut(id) else {
            return false;
        };
        for &(prop, v) in values {
            prop.write(state, v);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Live targets in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (TargetId, Role, &TargetState)> + '_ {
        self.targets.iter().map(|(id, e)| (id, e.role, &e.state))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;
