//! Artillery components and resources.

use bevy::prelude::*;

/// The two kinds of ammunition the cannon can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectileKind {
    #[default]
    Rock,
    Bomb,
}

impl ProjectileKind {
    /// Radius of the visual sphere and of the physics ball.
    pub fn radius(&self) -> f32 {
        match self {
            ProjectileKind::Rock => 0.35,
            ProjectileKind::Bomb => 0.4,
        }
    }

    pub fn mass(&self) -> f32 {
        match self {
            ProjectileKind::Rock => 1.2,
            ProjectileKind::Bomb => 0.8,
        }
    }

    /// The other kind, for the F key toggle.
    pub fn toggled(&self) -> Self {
        match self {
            ProjectileKind::Rock => ProjectileKind::Bomb,
            ProjectileKind::Bomb => ProjectileKind::Rock,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectileKind::Rock => "Rock",
            ProjectileKind::Bomb => "Bomb",
        }
    }
}

/// A fired rock or bomb.
#[derive(Component, Debug)]
pub struct Projectile {
    pub kind: ProjectileKind,
}

/// Fuse state carried by every bomb.
///
/// A bomb arms once (on the ground or on contact) and detonates when the
/// timer finishes. The bomb entity is despawned on detonation, so it can
/// never explode twice.
#[derive(Component, Debug, Default)]
pub struct BombFuse {
    pub timer: Option<Timer>,
}

impl BombFuse {
    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Start the fuse. Returns false if it was already burning.
    pub fn arm(&mut self, seconds: f32) -> bool {
        if self.is_armed() {
            return false;
        }
        self.timer = Some(Timer::from_seconds(seconds, TimerMode::Once));
        true
    }

    /// Advance the fuse; true exactly on the tick it runs out.
    pub fn tick(&mut self, delta: std::time::Duration) -> bool {
        match self.timer.as_mut() {
            Some(timer) => timer.tick(delta).just_finished(),
            None => false,
        }
    }
}

/// Shells left for the current level.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ammo {
    pub rock: u32,
    pub bomb: u32,
}

impl Ammo {
    pub fn new(rock: u32, bomb: u32) -> Self {
        Self { rock, bomb }
    }

    pub fn remaining(&self, kind: ProjectileKind) -> u32 {
        match kind {
            ProjectileKind::Rock => self.rock,
            ProjectileKind::Bomb => self.bomb,
        }
    }

    /// Spend one shell of `kind`. Returns false when none are left.
    pub fn take(&mut self, kind: ProjectileKind) -> bool {
        let count = match kind {
            ProjectileKind::Rock => &mut self.rock,
            ProjectileKind::Bomb => &mut self.bomb,
        };
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    pub fn is_exhausted(&self) -> bool {
        self.rock == 0 && self.bomb == 0
    }
}

/// Shells fired so far in the current level.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmmoUsed {
    pub rock: u32,
    pub bomb: u32,
}

impl AmmoUsed {
    pub fn record(&mut self, kind: ProjectileKind) {
        match kind {
            ProjectileKind::Rock => self.rock += 1,
            ProjectileKind::Bomb => self.bomb += 1,
        }
    }
}

/// When the current level started, in elapsed game seconds.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LevelClock {
    pub started_at: f32,
}

impl LevelClock {
    pub fn elapsed(&self, now: f32) -> f32 {
        (now - self.started_at).max(0.0)
    }
}

/// Countdown to losing a level once every shell has been fired.
#[derive(Resource, Debug, Default)]
pub struct OutOfAmmoWatch {
    pub timer: Option<Timer>,
}

/// Mesh and material handles shared by every projectile.
#[derive(Resource, Default, Clone)]
pub struct ProjectileAssets {
    pub rock_mesh: Handle<Mesh>,
    pub bomb_mesh: Handle<Mesh>,
    pub rock_material: Handle<StandardMaterial>,
    pub bomb_material: Handle<StandardMaterial>,
}

impl ProjectileAssets {
    pub fn mesh(&self, kind: ProjectileKind) -> Handle<Mesh> {
        match kind {
            ProjectileKind::Rock => self.rock_mesh.clone(),
            ProjectileKind::Bomb => self.bomb_mesh.clone(),
        }
    }

    pub fn material(&self, kind: ProjectileKind) -> Handle<StandardMaterial> {
        match kind {
            ProjectileKind::Rock => self.rock_material.clone(),
            ProjectileKind::Bomb => self.bomb_material.clone(),
        }
    }
}
