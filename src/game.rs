//! Host-facing game driver
//!
//! Lifecycle is two-phase: `Game::create` builds pure data, then
//! `Game::activate` binds resources once the host's graphics context exists.
//! After that the host calls `update` (or `tick`) once per frame from its game
//! loop thread and reads the results through the accessors or a
//! `FrameSnapshot`.

use glam::Vec2;

use crate::audio::{AudioManager, SoundCue};
use crate::consts::*;
use crate::platform::{AudioOutput, Display, Host, TextureHandle, TextureLoader};
use crate::renderer::FrameSnapshot;
use crate::settings::Settings;
use crate::sim::{Camera, GameEvent, GameObject, GamePhase, GameState, SpriteTextures, TickInput, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    settings: Settings,
    audio: AudioManager,
    accumulator: f32,
    activated: bool,
}

impl Game {
    /// Build the game without touching any host resource
    pub fn create(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let tuning = settings.apply_to(tuning);
        Self {
            state: GameState::new(seed, tuning),
            audio: AudioManager::new(settings.music_enabled),
            settings,
            accumulator: 0.0,
            activated: false,
        }
    }

    /// Bind textures and the initial viewport. Safe to call again after the
    /// host recreates its graphics context.
    pub fn activate<C: TextureLoader + Display>(&mut self, host: &mut C) {
        let textures = SpriteTextures {
            player: load_or_warn(host, PLAYER_TEXTURE),
            platform: load_or_warn(host, PLATFORM_TEXTURE),
            background: load_or_warn(host, BACKGROUND_TEXTURE),
        };
        self.state.bind_textures(textures);
        self.state.set_viewport(host.viewport_size());
        self.activated = true;
        log::info!("Game activated");
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    // === Commands ===

    /// Start → Playing (first session or after returning to the menu)
    pub fn start_game<H: Host>(&mut self, host: &mut H) {
        self.require_activated();
        self.state.set_viewport(host.viewport_size());
        self.state.start_game();
        self.dispatch_events(host);
    }

    /// GameOver → Playing
    pub fn restart_game<H: Host>(&mut self, host: &mut H) {
        self.require_activated();
        self.state.set_viewport(host.viewport_size());
        self.state.restart_game();
        self.dispatch_events(host);
    }

    /// Whichever of start/restart applies
    pub fn start_or_restart_session<H: Host>(&mut self, host: &mut H) {
        match self.state.phase {
            GamePhase::GameOver => self.restart_game(host),
            _ => self.start_game(host),
        }
    }

    /// GameOver → Start
    pub fn return_to_menu(&mut self) {
        self.state.return_to_menu();
    }

    pub fn play_menu_music(&mut self, output: &mut impl AudioOutput) {
        self.audio.play(SoundCue::MenuMusic, output);
    }

    pub fn set_music_enabled(&mut self, enabled: bool, output: &mut impl AudioOutput) {
        self.settings.music_enabled = enabled;
        self.audio.set_muted(!enabled, output);
    }

    // === Frame driving ===

    /// Advance exactly one simulation step of `dt` seconds
    pub fn tick<H: Host>(&mut self, dt: f32, host: &mut H) {
        // One snapshot per tick; nothing re-reads the sensor mid-step
        let input = TickInput {
            tilt: self.settings.effective_tilt(host.tilt_input()),
        };
        if self.state.is_initialized() {
            self.state.set_viewport(host.viewport_size());
        }
        tick(&mut self.state, &input, dt);
        self.dispatch_events(host);
    }

    /// Feed a variable frame delta through the fixed-step accumulator.
    /// Returns the number of simulation steps taken.
    pub fn update<H: Host>(&mut self, frame_dt: f32, host: &mut H) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.tick(SIM_DT, host);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Hitting the cap means we fell behind; drop the backlog instead of
        // fast-forwarding through it on later frames
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    fn dispatch_events<H: Host>(&mut self, host: &mut H) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::SessionStarted => self.audio.stop(host),
                GameEvent::Jumped { flip } => log::trace!("jump (flip: {flip})"),
                GameEvent::Score(score) => host.notify_score(score),
                GameEvent::GameOver(score) => {
                    host.notify_game_over(score);
                    self.audio.play(SoundCue::MenuMusic, host);
                }
            }
        }
    }

    fn require_activated(&self) {
        assert!(self.activated, "session started before Game::activate");
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn entities(&self) -> &[GameObject] {
        self.state.entities()
    }

    /// # Panics
    /// Before the first session starts.
    pub fn player(&self) -> &GameObject {
        self.state.player()
    }

    /// # Panics
    /// Before the first session starts.
    pub fn background(&self) -> &GameObject {
        self.state.background()
    }

    pub fn current_state(&self) -> GamePhase {
        self.state.phase
    }

    pub fn current_score(&self) -> f32 {
        self.state.score
    }

    /// Camera copy for the render boundary
    pub fn camera(&self) -> Camera {
        self.state.camera
    }

    pub fn frame(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state)
    }

    pub fn viewport(&self) -> Vec2 {
        self.state.camera.scale
    }
}

fn load_or_warn(loader: &mut impl TextureLoader, name: &str) -> Option<TextureHandle> {
    let handle = loader.load_texture(name);
    if handle.is_none() {
        log::warn!("Texture {name} unavailable, using placeholder");
    }
    handle
}
