use serde::{Deserialize, Serialize};

/// Stable identifier used across WorldDef references.
pub type Id = String;

/// Top-level world data loaded by the engine.
///
/// Paths (backgrounds, item images) are relative to the game's data root.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldDef {
    pub start_room: Id,
    #[serde(default)]
    pub rooms: Vec<RoomDef>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
}

/// Room definition used by the engine at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDef {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    pub background: String,
    #[serde(default)]
    pub exit_left: Option<ExitDef>,
    #[serde(default)]
    pub exit_right: Option<ExitDef>,
}

/// Edge arrow leading to another room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitDef {
    pub to: Id,
    pub label: String,
}

/// Interactive object definition.
///
/// Behavior hooks can't be expressed as data; they are bound to the built
/// item by id from game code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: Id,
    pub name: String,
    pub image: String,
    pub topleft: (f32, f32),
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_take_allow")]
    pub take_allow: bool,
    #[serde(default)]
    pub take_attempt: Option<String>,
    #[serde(default)]
    pub manipulate_allow: bool,
    #[serde(default)]
    pub manipulate_attempt: Option<String>,
    #[serde(default)]
    pub enter: Option<Id>,
    #[serde(default)]
    pub location: LocationDef,
}

fn default_take_allow() -> bool {
    true
}

/// Where an item starts the game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationDef {
    /// Not placed yet; a hook brings it in later (e.g. the open door).
    #[default]
    Nowhere,
    Room(Id),
    Inventory,
}
