//! Audio plugin - plays short cues in reaction to gameplay events.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioPlugin as KiraAudioPlugin, AudioSource as KiraSource};

use crate::core::{BombDetonatedEvent, EnemyKilledEvent, FireEvent};

const CUE_VOLUME: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Launch,
    Explosion,
    Hit,
}

impl SoundCue {
    pub fn path(&self) -> &'static str {
        match self {
            SoundCue::Launch => "audio/launch.ogg",
            SoundCue::Explosion => "audio/explosion.ogg",
            SoundCue::Hit => "audio/hit.ogg",
        }
    }
}

/// Handles for every cue. Missing files only produce an asset load error.
#[derive(Resource)]
pub struct SoundCues {
    pub launch: Handle<KiraSource>,
    pub explosion: Handle<KiraSource>,
    pub hit: Handle<KiraSource>,
}

impl SoundCues {
    pub fn handle(&self, cue: SoundCue) -> Handle<KiraSource> {
        match cue {
            SoundCue::Launch => self.launch.clone(),
            SoundCue::Explosion => self.explosion.clone(),
            SoundCue::Hit => self.hit.clone(),
        }
    }
}

/// Audio plugin - sound effects through kira.
pub struct SfxPlugin;

impl Plugin for SfxPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(KiraAudioPlugin)
            .add_systems(Startup, load_sound_cues)
            .add_systems(Update, play_event_cues.run_if(resource_exists::<SoundCues>));
    }
}

fn load_sound_cues(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SoundCues {
        launch: asset_server.load(SoundCue::Launch.path()),
        explosion: asset_server.load(SoundCue::Explosion.path()),
        hit: asset_server.load(SoundCue::Hit.path()),
    });
}

/// Cues to play for one frame's events.
///
/// Every shot and every blast gets its own cue. Kills in the same frame
/// share one hit cue.
pub fn frame_cues(shots: usize, blasts: usize, kills: usize) -> Vec<SoundCue> {
    let mut cues = Vec::with_capacity(shots + blasts + 1);
    cues.extend(std::iter::repeat(SoundCue::Launch).take(shots));
    cues.extend(std::iter::repeat(SoundCue::Explosion).take(blasts));
    if kills > 0 {
        cues.push(SoundCue::Hit);
    }
    cues
}

fn play_event_cues(
    audio: Res<Audio>,
    cues: Res<SoundCues>,
    mut fire_events: EventReader<FireEvent>,
    mut detonations: EventReader<BombDetonatedEvent>,
    mut kills: EventReader<EnemyKilledEvent>,
) {
    let to_play = frame_cues(
        fire_events.read().count(),
        detonations.read().count(),
        kills.read().count(),
    );

    for cue in to_play {
        audio.play(cues.handle(cue)).with_volume(CUE_VOLUME);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kills_in_one_frame_share_a_cue() {
        assert_eq!(frame_cues(0, 0, 3), vec![SoundCue::Hit]);
        assert_eq!(
            frame_cues(1, 2, 0),
            vec![SoundCue::Launch, SoundCue::Explosion, SoundCue::Explosion]
        );
        assert!(frame_cues(0, 0, 0).is_empty());
    }
}
