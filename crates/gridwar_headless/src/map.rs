//! Map catalog: built-in layouts plus RON files.
//!
//! A map identifier resolves to a built-in layout first; anything ending
//! in `.ron` is loaded from disk instead, so custom maps can be dropped
//! next to the binary without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for map resolution.
#[derive(Error, Debug)]
pub enum MapError {
    /// Identifier matches no built-in map and is not a RON path.
    #[error("Unknown map id: {0}")]
    Unknown(String),
    /// Failed to read a map file.
    #[error("Failed to read map file '{path}': {source}")]
    Read {
        /// Path that failed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Failed to parse a map file.
    #[error("Failed to parse map file '{path}': {source}")]
    Parse {
        /// Path that failed.
        path: String,
        /// Underlying RON error.
        #[source]
        source: ron::error::SpannedError,
    },
    /// A spawn or wall cell lies outside the map.
    #[error("Map '{name}': cell ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds {
        /// Map name.
        name: String,
        /// Offending x coordinate.
        x: i32,
        /// Offending y coordinate.
        y: i32,
        /// Map side length.
        size: u32,
    },
}

/// Starting layout for one side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideSpawn {
    /// Base position.
    pub base: (i32, i32),
    /// Starting worker positions.
    pub workers: Vec<(i32, i32)>,
}

/// A complete map definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSpec {
    /// Map name.
    pub name: String,
    /// Square side length in cells.
    pub size: u32,
    /// Impassable cells.
    pub walls: Vec<(i32, i32)>,
    /// Starting resources per side.
    pub starting_resources: u32,
    /// Starting layout per side index.
    pub spawns: [SideSpawn; 2],
}

impl MapSpec {
    /// Identifiers of all built-in maps.
    pub const BUILTIN_IDS: &'static [&'static str] = &["duel8", "skirmish16", "open24"];

    /// Resolve an identifier: built-in name, or a `.ron` file path.
    pub fn resolve(id: &str) -> Result<Self, MapError> {
        if let Some(map) = Self::builtin(id) {
            return Ok(map);
        }
        if id.ends_with(".ron") {
            return Self::load(id);
        }
        Err(MapError::Unknown(id.to_string()))
    }

    /// Look up a built-in map by identifier.
    #[must_use]
    pub fn builtin(id: &str) -> Option<Self> {
        match id {
            "duel8" => Some(Self::duel8()),
            "skirmish16" => Some(Self::skirmish16()),
            "open24" => Some(Self::open24()),
            _ => None,
        }
    }

    /// Load a map from a RON file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| MapError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let map: Self = ron::from_str(&contents).map_err(|source| MapError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        map.validate()?;
        Ok(map)
    }

    /// Cramped 8x8 duel: bases in opposite corners, one worker each.
    #[must_use]
    pub fn duel8() -> Self {
        Self {
            name: "duel8".to_string(),
            size: 8,
            walls: Vec::new(),
            starting_resources: 10,
            spawns: [
                SideSpawn {
                    base: (1, 1),
                    workers: vec![(2, 1)],
                },
                SideSpawn {
                    base: (6, 6),
                    workers: vec![(5, 6)],
                },
            ],
        }
    }

    /// Standard 16x16 skirmish with a short wall across the middle.
    #[must_use]
    pub fn skirmish16() -> Self {
        Self {
            name: "skirmish16".to_string(),
            size: 16,
            walls: vec![(7, 6), (7, 7), (7, 8), (8, 6), (8, 7), (8, 8)],
            starting_resources: 20,
            spawns: [
                SideSpawn {
                    base: (2, 2),
                    workers: vec![(3, 2), (2, 3)],
                },
                SideSpawn {
                    base: (13, 13),
                    workers: vec![(12, 13), (13, 12)],
                },
            ],
        }
    }

    /// Open 24x24 map favoring long games and barracks play.
    #[must_use]
    pub fn open24() -> Self {
        Self {
            name: "open24".to_string(),
            size: 24,
            walls: Vec::new(),
            starting_resources: 30,
            spawns: [
                SideSpawn {
                    base: (3, 3),
                    workers: vec![(4, 3), (3, 4)],
                },
                SideSpawn {
                    base: (20, 20),
                    workers: vec![(19, 20), (20, 19)],
                },
            ],
        }
    }

    /// Check that every referenced cell is inside the grid.
    pub fn validate(&self) -> Result<(), MapError> {
        let cells = self
            .walls
            .iter()
            .chain(self.spawns.iter().flat_map(|s| {
                std::iter::once(&s.base).chain(s.workers.iter())
            }));
        for &(x, y) in cells {
            let inside =
                x >= 0 && y >= 0 && (x as u32) < self.size && (y as u32) < self.size;
            if !inside {
                return Err(MapError::OutOfBounds {
                    name: self.name.clone(),
                    x,
                    y,
                    size: self.size,
                });
            }
        }
        Ok(())
    }
}
