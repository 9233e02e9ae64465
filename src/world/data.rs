//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;

/// Directory scanned for level files, in file name order.
pub const LEVELS_DIR: &str = "assets/data/levels";

/// Levels compiled into the binary, used when the directory is unusable.
const BUILTIN_LEVELS: [(&str, &str); 3] = [
    ("level1", include_str!("../../assets/data/levels/level1.ron")),
    ("level2", include_str!("../../assets/data/levels/level2.ron")),
    ("level3", include_str!("../../assets/data/levels/level3.ron")),
];

// === Bricks ===

/// Whether a brick takes part in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum BrickKind {
    /// Brown, dynamic, mass 2
    Movable,
    /// Grey, static
    Immovable,
}

impl BrickKind {
    /// Rigid-body mass; zero means static.
    pub fn mass(&self) -> f32 {
        match self {
            BrickKind::Movable => 2.0,
            BrickKind::Immovable => 0.0,
        }
    }
}

/// Which way a brick is laid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickOrientation {
    /// Long side along X
    Horizontal,
    /// Long side up
    Vertical,
}

impl BrickOrientation {
    /// Interpret a rotation in degrees; only 0 and 90 are valid.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(BrickOrientation::Horizontal),
            90 => Some(BrickOrientation::Vertical),
            _ => None,
        }
    }

    /// Full size of the brick in world axes.
    pub fn size(&self) -> Vec3 {
        match self {
            BrickOrientation::Horizontal => Vec3::new(1.2, 0.6, 0.6),
            BrickOrientation::Vertical => Vec3::new(0.6, 1.2, 0.6),
        }
    }
}

/// One brick as written in a level file.
#[derive(Debug, Clone, Deserialize)]
pub struct BrickDef {
    pub kind: BrickKind,
    pub pos: (f32, f32, f32),
    /// Degrees, 0 or 90.
    #[serde(default)]
    pub rotation: u32,
}

impl BrickDef {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.pos.0, self.pos.1, self.pos.2)
    }

    /// Orientation, treating anything unrecognised as horizontal.
    pub fn orientation(&self) -> BrickOrientation {
        BrickOrientation::from_degrees(self.rotation).unwrap_or(BrickOrientation::Horizontal)
    }
}

// === Enemies and ammo ===

/// Spawn point of one enemy figure.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemyDef {
    pub pos: (f32, f32, f32),
}

impl EnemyDef {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.pos.0, self.pos.1, self.pos.2)
    }
}

/// Starting ammunition for a level.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct AmmoDef {
    pub rock: u32,
    pub bomb: u32,
}

// === Level Definition ===

/// A complete level as loaded from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    /// File stem the level was loaded from.
    #[serde(skip)]
    pub name: String,
    /// Label shown in the HUD, e.g. "Easy".
    pub difficulty: String,
    #[serde(default)]
    pub description: String,
    pub bricks: Vec<BrickDef>,
    pub enemies: Vec<EnemyDef>,
    pub ammo: AmmoDef,
}

impl LevelDefinition {
    /// Parse and validate a level. `name` is used for errors and logs.
    pub fn from_ron_str(name: &str, contents: &str) -> Result<Self, DataLoadError> {
        let mut level: LevelDefinition =
            ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
                path: name.to_string(),
                details: e.to_string(),
            })?;
        level.name = name.to_string();
        level.validate()?;
        Ok(level)
    }

    /// Reject levels that could never be won.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        let invalid = |reason: String| DataLoadError::InvalidLevel {
            name: self.name.clone(),
            reason,
        };

        if self.enemies.is_empty() {
            return Err(invalid("level has no enemies".to_string()));
        }
        if self.ammo.rock == 0 && self.ammo.bomb == 0 {
            return Err(invalid("level has no ammunition".to_string()));
        }
        if let Some(brick) = self
            .bricks
            .iter()
            .find(|b| BrickOrientation::from_degrees(b.rotation).is_none())
        {
            return Err(invalid(format!(
                "brick at {:?} has rotation {}, expected 0 or 90",
                brick.pos, brick.rotation
            )));
        }
        Ok(())
    }

    pub fn movable_bricks(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| b.kind == BrickKind::Movable)
            .count()
    }
}

// === Registry ===

/// Resource storing all loaded levels in play order.
#[derive(Resource, Default, Debug)]
pub struct LevelRegistry {
    pub levels: Vec<LevelDefinition>,
}

impl LevelRegistry {
    pub fn get(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the level after `index`, wrapping to the first.
    pub fn next_index(&self, index: usize) -> usize {
        if self.levels.is_empty() {
            0
        } else {
            (index + 1) % self.levels.len()
        }
    }

    /// Load every `.ron` file in `dir`, ordered by file name.
    ///
    /// Files that fail to parse are logged and skipped.
    pub fn load_from_dir(dir: &Path) -> Result<Self, DataLoadError> {
        let entries = fs::read_dir(dir).map_err(|e| {
            if dir.exists() {
                DataLoadError::ReadError {
                    path: dir.display().to_string(),
                    details: e.to_string(),
                }
            } else {
                DataLoadError::FileNotFound(dir.display().to_string())
            }
        })?;

        let mut paths: Vec<_> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
            .collect();
        paths.sort();

        let mut registry = LevelRegistry::default();
        for path in paths {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();

            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    error!("Failed to read level file {:?}: {}", path, e);
                    continue;
                }
            };

            match LevelDefinition::from_ron_str(&name, &contents) {
                Ok(level) => {
                    info!(
                        "Loaded level: {} ({}, {} bricks, {} enemies)",
                        name,
                        level.difficulty,
                        level.bricks.len(),
                        level.enemies.len()
                    );
                    registry.levels.push(level);
                }
                Err(e) => error!("{}", e),
            }
        }

        if registry.is_empty() {
            return Err(DataLoadError::NoLevels(dir.display().to_string()));
        }
        Ok(registry)
    }

    /// The levels shipped inside the binary.
    pub fn builtin() -> Self {
        let levels = BUILTIN_LEVELS
            .iter()
            .filter_map(|(name, contents)| match LevelDefinition::from_ron_str(name, contents) {
                Ok(level) => Some(level),
                Err(e) => {
                    error!("Built-in level is broken: {}", e);
                    None
                }
            })
            .collect();
        Self { levels }
    }
}

/// Index of the level being played.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CurrentLevel {
    pub index: usize,
}

/// Load level definitions, falling back to the built-in set.
pub fn load_level_definitions(mut commands: Commands) {
    let registry = match LevelRegistry::load_from_dir(Path::new(LEVELS_DIR)) {
        Ok(registry) => registry,
        Err(e) => {
            warn!("{}. Using built-in levels.", e);
            LevelRegistry::builtin()
        }
    };

    if registry.is_empty() {
        error!("No playable levels available");
    }
    info!("Loaded {} level(s)", registry.len());
    commands.insert_resource(registry);
    commands.insert_resource(CurrentLevel::default());
}
