//! Sound effects for shots, blasts and kills.

mod plugin;

pub use plugin::{frame_cues, SfxPlugin, SoundCue, SoundCues};
