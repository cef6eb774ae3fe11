use ahash::AHashMap;

use crate::Vec2;
use crate::id::Id;

/// Geometry persisted per window name between runs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSettings {
    pub name: String,
    pub id: Id,
    pub pos: Vec2,
    pub size: Vec2,
    pub collapsed: bool,
}

/// Where window layout goes between runs. Loading happens when a window is
/// created; saving when it is swept or when the driver flushes.
pub trait SettingsStore {
    fn load(&self, id: Id) -> Option<WindowSettings>;
    fn save(&mut self, settings: WindowSettings);
}

/// In-process store, keyed by window id.
#[derive(Clone, Debug, Default)]
pub struct MemorySettings {
    entries: AHashMap<Id, WindowSettings>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowSettings> {
        self.entries.values()
    }
}

impl SettingsStore for MemorySettings {
    fn load(&self, id: Id) -> Option<WindowSettings> {
        self.entries.get(&id).cloned()
    }

    fn save(&mut self, settings: WindowSettings) {
        self.entries.insert(settings.id, settings);
    }
}
