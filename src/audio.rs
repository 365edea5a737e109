//! Audio cues
//!
//! The host owns the actual mixer; this only decides what plays when and
//! keeps track of the looping track so it is never restarted needlessly.

use crate::consts::MENU_MUSIC;
use crate::platform::AudioOutput;

/// Sound resources the game asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Looping menu / game-over music
    MenuMusic,
}

impl SoundCue {
    /// Asset name handed to the host
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundCue::MenuMusic => MENU_MUSIC,
        }
    }

    pub fn looping(&self) -> bool {
        match self {
            SoundCue::MenuMusic => true,
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Clone, Default)]
pub struct AudioManager {
    muted: bool,
    /// Looping cue currently playing on the host
    current: Option<SoundCue>,
}

impl AudioManager {
    pub fn new(music_enabled: bool) -> Self {
        Self {
            muted: !music_enabled,
            current: None,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn current(&self) -> Option<SoundCue> {
        self.current
    }

    /// Mute/unmute; muting stops whatever is playing
    pub fn set_muted(&mut self, muted: bool, output: &mut impl AudioOutput) {
        self.muted = muted;
        if muted {
            self.stop(output);
        }
    }

    /// Play a cue. A looping cue that is already playing is left alone.
    pub fn play(&mut self, cue: SoundCue, output: &mut impl AudioOutput) {
        if self.muted {
            return;
        }
        if cue.looping() && self.current == Some(cue) {
            return;
        }
        output.play_sound(cue.file_name(), cue.looping());
        if cue.looping() {
            self.current = Some(cue);
        }
    }

    pub fn stop(&mut self, output: &mut impl AudioOutput) {
        if self.current.take().is_some() {
            output.stop_sound();
        }
    }
}
