//! Actor/session lookup.

/// Live reference to a connected actor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorHandle {
    pub id: u64,
    pub name: String,
}

impl ActorHandle {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A point in a named world.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    pub fn block_x(&self) -> i64 {
        self.x.floor() as i64
    }

    pub fn block_y(&self) -> i64 {
        self.y.floor() as i64
    }

    pub fn block_z(&self) -> i64 {
        self.z.floor() as i64
    }

    /// Center of the block containing this location.
    pub fn block_center(&self) -> Location {
        Location::new(
            self.world.clone(),
            self.x.floor() + 0.5,
            self.y.floor() + 0.5,
            self.z.floor() + 0.5,
        )
    }

    /// Squared distance, or `None` across worlds.
    pub fn distance_squared(&self, other: &Location) -> Option<f64> {
        if self.world != other.world {
            return None;
        }
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        Some(dx * dx + dy * dy + dz * dz)
    }
}

/// Read access to connected actors.
pub trait ActorOracle {
    /// Resolves a stored name to a live actor, if still connected.
    fn find_actor(&self, name: &str) -> Option<ActorHandle>;

    fn location(&self, actor: &ActorHandle) -> Option<Location>;

    fn display_name(&self, actor: &ActorHandle) -> Option<String>;

    fn has_permission(&self, actor: &ActorHandle, node: &str) -> bool;

    fn experience(&self, actor: &ActorHandle) -> i64;
}
