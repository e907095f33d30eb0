//! Inventory introspection.

use super::ActorHandle;

/// Kind of inventory a craft happens in.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InventoryKind {
    /// The actor's own 2x2 crafting grid.
    Crafting,
    Workbench,
    Furnace,
    Chest,
    Dispenser,
    Dropper,
    Hopper,
    Anvil,
    Brewing,
    Enchanting,
    Beacon,
    Merchant,
    EnderChest,
    Player,
    Creative,
}

/// What the crafting session currently has open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryView {
    pub kind: InventoryKind,
    pub title: String,
}

impl InventoryView {
    pub fn new(kind: InventoryKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
        }
    }
}

/// Reports the inventory of an actor's current crafting session.
pub trait InventoryOracle {
    fn open_inventory(&self, actor: &ActorHandle) -> Option<InventoryView>;
}
