//! Level files on disk against the levels compiled into the binary.

use std::fs;
use std::path::{Path, PathBuf};

use cannon_siege::world::{BrickKind, DataLoadError, LevelRegistry, LEVELS_DIR};

/// Scratch directory removed when dropped.
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("cannon_siege_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("create scratch dir");
        Self(path)
    }

    fn write(&self, file: &str, contents: &str) {
        fs::write(self.0.join(file), contents).expect("write scratch file");
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

const TINY_LEVEL: &str = "(
    difficulty: \"Tiny\",
    description: \"One brick, one enemy\",
    bricks: [(kind: Movable, pos: (0.0, 0.3, 0.0))],
    enemies: [(pos: (0.0, 1.0, 0.0))],
    ammo: (rock: 1, bomb: 0),
)";

#[test]
fn shipped_levels_match_builtin_set() {
    let from_disk = LevelRegistry::load_from_dir(Path::new(LEVELS_DIR)).expect("levels load");
    let builtin = LevelRegistry::builtin();

    assert_eq!(from_disk.len(), 3);
    assert_eq!(builtin.len(), 3);
    for (disk, embedded) in from_disk.levels.iter().zip(&builtin.levels) {
        assert_eq!(disk.name, embedded.name);
        assert_eq!(disk.bricks.len(), embedded.bricks.len());
        assert_eq!(disk.enemies.len(), embedded.enemies.len());
    }

    let difficulties: Vec<&str> = from_disk.levels.iter().map(|l| l.difficulty.as_str()).collect();
    assert_eq!(difficulties, ["Easy", "Medium", "Hard"]);
}

#[test]
fn every_level_has_fixed_and_movable_bricks() {
    for level in &LevelRegistry::builtin().levels {
        let movable = level.movable_bricks();
        let fixed = level
            .bricks
            .iter()
            .filter(|b| b.kind == BrickKind::Immovable)
            .count();
        assert!(movable > 0, "{} has no movable bricks", level.name);
        assert!(fixed > 0, "{} has no immovable bricks", level.name);
        assert!(level.enemies.iter().all(|e| e.position().y > 0.0));
    }
}

#[test]
fn broken_files_are_skipped_and_order_follows_names() {
    let dir = ScratchDir::new("mixed");
    dir.write("b_second.ron", TINY_LEVEL);
    dir.write("a_first.ron", &TINY_LEVEL.replace("Tiny", "First"));
    dir.write("c_broken.ron", "(difficulty: ");
    dir.write("notes.txt", "not a level");

    let registry = LevelRegistry::load_from_dir(&dir.0).expect("two good levels");
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.levels[0].name, "a_first");
    assert_eq!(registry.levels[0].difficulty, "First");
    assert_eq!(registry.levels[1].name, "b_second");
}

#[test]
fn directory_without_usable_levels_is_an_error() {
    let dir = ScratchDir::new("empty");
    dir.write("broken.ron", "(difficulty: ");

    let result = LevelRegistry::load_from_dir(&dir.0);
    assert!(matches!(result, Err(DataLoadError::NoLevels(_))));
}
