//! Game state and session lifecycle
//!
//! `GameState` exclusively owns every entity. The player and background are
//! spawned once, before any platform, and are never removed; only platforms
//! come and go. Their positions in the entity list are cached so lookups
//! never search.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::entity::{GameObject, Role};
use crate::platform::TextureHandle;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu; nothing simulates
    Start,
    /// Active gameplay
    Playing,
    /// Player fell out of view; waiting for restart
    GameOver,
}

/// Things the host needs to hear about, collected during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A session (re)started
    SessionStarted,
    /// Player bounced; `flip` is true when the somersault was armed
    Jumped { flip: bool },
    /// Integer score, sent every playing tick
    Score(i32),
    /// Final integer score
    GameOver(i32),
}

/// Texture handles bound at activation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpriteTextures {
    pub player: Option<TextureHandle>,
    pub platform: Option<TextureHandle>,
    pub background: Option<TextureHandle>,
}

/// Complete simulation state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub camera: Camera,
    /// Best height reached this session, in score units
    pub score: f32,
    /// Player position at session start (score origin)
    pub base_position: Vec2,
    /// World Y of the next procedural platform
    pub next_platform_spawn_y: f32,
    pub textures: SpriteTextures,
    rng: Pcg32,
    entities: Vec<GameObject>,
    player_index: Option<usize>,
    background_index: Option<usize>,
    /// Outgoing events; one `Score` per playing tick, so owners must drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an empty state. Entities appear on the first `start_game`.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        assert!(
            tuning.platform.spacing > 0.0,
            "platform spacing must be positive, got {}",
            tuning.platform.spacing
        );
        Self {
            seed,
            tuning,
            phase: GamePhase::Start,
            camera: Camera::new(Vec2::ZERO),
            score: 0.0,
            base_position: tuning.player.spawn,
            next_platform_spawn_y: tuning.player.spawn.y + tuning.platform.spawn_offset,
            textures: SpriteTextures::default(),
            rng: Pcg32::seed_from_u64(seed),
            entities: Vec::new(),
            player_index: None,
            background_index: None,
            events: Vec::new(),
        }
    }

    // === Accessors ===

    /// All entities in storage order. Borrow ends before the next tick.
    pub fn entities(&self) -> &[GameObject] {
        &self.entities
    }

    pub fn platforms(&self) -> impl Iterator<Item = &GameObject> {
        self.entities.iter().filter(|e| e.is_platform())
    }

    pub fn platform_count(&self) -> usize {
        self.platforms().count()
    }

    /// Whether the session entities exist yet
    pub fn is_initialized(&self) -> bool {
        self.player_index.is_some()
    }

    /// The player.
    ///
    /// # Panics
    /// If no session has been started yet.
    pub fn player(&self) -> &GameObject {
        &self.entities[self.player_index()]
    }

    pub(crate) fn player_mut(&mut self) -> &mut GameObject {
        let index = self.player_index();
        &mut self.entities[index]
    }

    /// The scrolling background.
    ///
    /// # Panics
    /// If no session has been started yet.
    pub fn background(&self) -> &GameObject {
        &self.entities[self.background_index()]
    }

    pub(crate) fn background_mut(&mut self) -> &mut GameObject {
        let index = self.background_index();
        &mut self.entities[index]
    }

    fn player_index(&self) -> usize {
        self.player_index
            .unwrap_or_else(|| panic!("player accessed before the session spawned it"))
    }

    fn background_index(&self) -> usize {
        self.background_index
            .unwrap_or_else(|| panic!("background accessed before the session spawned it"))
    }

    /// Events produced since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the events produced since the last call. Anything driving
    /// `sim::tick` directly must call this every frame or the queue grows.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    // === Host commands ===

    /// Update the viewport size from the render boundary
    pub fn set_viewport(&mut self, size: Vec2) {
        debug_assert!(
            size.x > 0.0 && size.y > 0.0,
            "viewport must be non-empty, got {size}"
        );
        self.camera.scale = size;
        // The backdrop tile always spans one viewport
        if let Some(index) = self.background_index {
            self.entities[index].scale = size;
        }
    }

    /// Bind texture handles to current and future entities
    pub fn bind_textures(&mut self, textures: SpriteTextures) {
        self.textures = textures;
        for entity in &mut self.entities {
            entity.texture = match entity.role {
                Role::Player { .. } => textures.player,
                Role::Platform => textures.platform,
                Role::Background => textures.background,
            };
        }
    }

    /// Start → Playing. The first call spawns the session entities; later
    /// calls (after returning to the menu) reuse them through a reset.
    pub fn start_game(&mut self) {
        if self.phase != GamePhase::Start {
            log::debug!("start ignored in phase {:?}", self.phase);
            return;
        }
        if self.is_initialized() {
            self.reset();
        } else {
            self.initialize();
        }
    }

    /// GameOver → Playing
    pub fn restart_game(&mut self) {
        if self.phase != GamePhase::GameOver {
            log::debug!("restart ignored in phase {:?}", self.phase);
            return;
        }
        self.reset();
    }

    /// Start or restart, whichever applies to the current phase
    pub fn start_or_restart(&mut self) {
        match self.phase {
            GamePhase::Start => self.start_game(),
            GamePhase::GameOver => self.restart_game(),
            GamePhase::Playing => log::debug!("session already running"),
        }
    }

    /// GameOver → Start (back to the menu); entities are kept for reuse
    pub fn return_to_menu(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.phase = GamePhase::Start;
        }
    }

    // === Session lifecycle ===

    /// First-ever session: spawn the persistent entities, then reset
    fn initialize(&mut self) {
        debug_assert!(self.entities.is_empty());

        let background = GameObject::background(Vec2::ZERO, self.camera.scale)
            .with_texture(self.textures.background);
        self.background_index = Some(self.entities.len());
        self.entities.push(background);

        let player = GameObject::player(self.tuning.player.spawn, self.tuning.player.size)
            .with_texture(self.textures.player);
        self.player_index = Some(self.entities.len());
        self.entities.push(player);

        self.reset();
    }

    /// Put every piece back to the opening layout and start playing
    fn reset(&mut self) {
        debug_assert!(
            self.camera.scale.x > 0.0 && self.camera.scale.y > 0.0,
            "session started without a viewport"
        );
        let tuning = self.tuning;

        self.next_platform_spawn_y = tuning.platform.spawn_offset;
        self.camera.position = Vec2::ZERO;
        self.entities.retain(|e| !e.is_platform());
        self.reindex();

        let player = self.player_mut();
        player.position = tuning.player.spawn;
        player.velocity = Vec2::ZERO;
        player.rotation = 0.0;
        player.role = Role::Player {
            previous_position: tuning.player.spawn,
            rotation_timer: 0.0,
        };
        self.jump();

        let viewport = self.camera.scale;
        let background = self.background_mut();
        background.position = Vec2::ZERO;
        background.scale = viewport;

        // Full-width floor at the bottom of the new viewport
        let floor = Vec2::new(
            self.camera.position.x,
            self.camera.bottom() + tuning.platform.size.y / 2.0,
        );
        self.spawn_platform(floor, Vec2::new(viewport.x, tuning.platform.size.y));

        let player_y = self.player().position.y;
        self.next_platform_spawn_y = player_y + tuning.platform.spawn_offset;
        self.score = 0.0;
        self.base_position = self.player().position;
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::SessionStarted);

        log::info!(
            "Session started (seed {}, viewport {}x{})",
            self.seed,
            viewport.x,
            viewport.y
        );
    }

    /// Recompute cached indices after platforms were removed
    fn reindex(&mut self) {
        self.player_index = self.entities.iter().position(|e| e.is_player());
        self.background_index = self.entities.iter().position(|e| e.is_background());
    }

    // === Gameplay operations ===

    /// Launch the player upward; may arm the flip animation
    pub(crate) fn jump(&mut self) {
        let jump_velocity = self.tuning.player.jump_velocity;
        let max_rotation_time = self.tuning.player.max_rotation_time;
        let roll: u32 = self.rng.random_range(0..=100);
        let flip = roll <= self.tuning.player.rotation_chance;

        let player = self.player_mut();
        player.velocity.y = jump_velocity;
        if flip {
            if let Role::Player { rotation_timer, .. } = &mut player.role {
                *rotation_timer = max_rotation_time;
            }
        }
        self.push_event(GameEvent::Jumped { flip });
    }

    pub(crate) fn spawn_platform(&mut self, position: Vec2, size: Vec2) {
        let platform = GameObject::platform(position, size)
            .with_color(self.tuning.platform.color)
            .with_texture(self.textures.platform);
        self.entities.push(platform);
    }

    /// Spawn platforms on the fixed schedule up to the top of the viewport
    pub(crate) fn spawn_platforms(&mut self) {
        let size = self.tuning.platform.size;
        let spacing = self.tuning.platform.spacing;
        let range = (self.camera.scale.x / 2.0 - size.x / 2.0).max(0.0);
        let top = self.camera.top();

        let mut spawned = 0;
        while self.next_platform_spawn_y <= top {
            let x = if range > 0.0 {
                self.rng.random_range(-range..=range)
            } else {
                0.0
            };
            self.spawn_platform(Vec2::new(x, self.next_platform_spawn_y), size);
            self.next_platform_spawn_y += spacing;
            spawned += 1;
        }
        if spawned > 0 {
            log::debug!("spawned {spawned} platforms, next at {}", self.next_platform_spawn_y);
        }
    }

    /// Remove platforms whose top edge dropped below the viewport
    pub(crate) fn despawn_platforms(&mut self) {
        let bottom = self.camera.bottom();
        let before = self.entities.len();
        self.entities
            .retain(|e| !(e.is_platform() && e.top() < bottom));
        let removed = before - self.entities.len();
        if removed > 0 {
            self.reindex();
            log::debug!("despawned {removed} platforms");
        }
    }

    /// Shift the background up a tile once it scrolled out below the view
    pub(crate) fn wrap_background(&mut self) {
        let bottom = self.camera.bottom();
        let background = self.background_mut();
        if background.scale.y <= 0.0 {
            return;
        }
        while background.top() < bottom {
            background.position.y += background.scale.y;
        }
    }

    /// Raise the score to the player's best height this session
    pub(crate) fn update_score(&mut self) {
        let height = (self.player().position.y - self.base_position.y) * self.tuning.score_scale;
        self.score = self.score.max(height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_state() -> GameState {
        let mut state = GameState::new(7, Tuning::default());
        state.set_viewport(Vec2::new(400.0, 800.0));
        state.start_game();
        state
    }

    #[test]
    fn test_new_state_is_idle_and_empty() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, GamePhase::Start);
        assert!(!state.is_initialized());
        assert!(state.entities().is_empty());
    }

    #[test]
    #[should_panic(expected = "player accessed before")]
    fn test_player_before_spawn_panics() {
        let state = GameState::new(1, Tuning::default());
        let _ = state.player();
    }

    #[test]
    fn test_start_spawns_opening_layout() {
        let mut state = started_state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.platform_count(), 1);

        let player = state.player();
        assert_eq!(player.position, Vec2::new(0.0, -280.0));
        assert_eq!(player.velocity, Vec2::new(0.0, 1750.0));
        assert_eq!(state.base_position, Vec2::new(0.0, -280.0));
        assert!((state.next_platform_spawn_y - 120.0).abs() < 1e-4);

        let floor = state.platforms().next().expect("starting platform");
        assert_eq!(floor.scale.x, 400.0);
        assert_eq!(floor.bottom(), -400.0);

        assert_eq!(state.background().position, Vec2::ZERO);
        assert_eq!(state.background().scale, Vec2::new(400.0, 800.0));

        let events = state.drain_events();
        assert!(matches!(events.first(), Some(GameEvent::Jumped { .. })));
        assert_eq!(events.last(), Some(&GameEvent::SessionStarted));
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut state = started_state();
        state.player_mut().position.y = 500.0;
        state.start_game();
        assert_eq!(state.player().position.y, 500.0);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut state = started_state();
        state.player_mut().position.y = 500.0;
        state.restart_game();
        assert_eq!(state.player().position.y, 500.0);

        state.phase = GamePhase::GameOver;
        state.restart_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player().position.y, -280.0);
    }

    #[test]
    fn test_reset_clears_platforms_and_camera() {
        let mut state = started_state();
        state.camera.position.y = 900.0;
        state.spawn_platform(Vec2::new(0.0, 1000.0), Vec2::new(200.0, 50.0));
        state.spawn_platform(Vec2::new(0.0, 1150.0), Vec2::new(200.0, 50.0));
        state.score = 42.0;
        state.phase = GamePhase::GameOver;

        state.restart_game();

        assert_eq!(state.camera.position, Vec2::ZERO);
        assert_eq!(state.camera.scale, Vec2::new(400.0, 800.0));
        assert_eq!(state.platform_count(), 1);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.entities().len(), 3);
    }

    #[test]
    fn test_return_to_menu_then_start_reuses_entities() {
        let mut state = started_state();
        state.phase = GamePhase::GameOver;
        state.return_to_menu();
        assert_eq!(state.phase, GamePhase::Start);

        state.start_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.entities().iter().filter(|e| e.is_player()).count(), 1);
        assert_eq!(state.entities().iter().filter(|e| e.is_background()).count(), 1);
    }

    #[test]
    fn test_jump_rolls_flip_deterministically() {
        let mut always = Tuning::default();
        always.player.rotation_chance = 100;
        let mut state = GameState::new(3, always);
        state.set_viewport(Vec2::new(400.0, 800.0));
        state.start_game();
        assert_eq!(state.player().rotation_timer(), always.player.max_rotation_time);
    }

    #[test]
    fn test_spawn_schedule_fills_viewport() {
        let mut state = started_state();
        state.spawn_platforms();

        let heights: Vec<f32> = state.platforms().skip(1).map(|p| p.position.y).collect();
        assert_eq!(heights.len(), 2);
        assert!((heights[0] - 120.0).abs() < 1e-4);
        assert!((heights[1] - 270.0).abs() < 1e-4);
        assert!((state.next_platform_spawn_y - 420.0).abs() < 1e-4);

        for platform in state.platforms().skip(1) {
            assert!(platform.position.x.abs() <= 100.0);
        }
    }

    #[test]
    fn test_resize_keeps_background_covering_view() {
        let mut state = started_state();
        state.set_viewport(Vec2::new(400.0, 1600.0));
        state.wrap_background();

        let background = state.background();
        assert_eq!(background.scale, Vec2::new(400.0, 1600.0));
        // The tile plus the copy drawn above it span the whole view
        assert!(background.bottom() <= state.camera.bottom());
        assert!(background.top() + background.scale.y >= state.camera.top());
    }

    #[test]
    fn test_despawn_keeps_cached_indices_valid() {
        let mut state = started_state();
        state.spawn_platforms();
        state.camera.position.y = 2000.0;
        state.despawn_platforms();

        assert_eq!(state.platform_count(), 0);
        assert!(state.player().is_player());
        assert!(state.background().is_background());
    }

    #[test]
    fn test_background_wraps_by_its_height() {
        let mut state = started_state();
        state.camera.position.y = 850.0; // bottom at 450, tile top at 400
        state.wrap_background();
        assert_eq!(state.background().position.y, 800.0);

        state.camera.position.y = 1000.0;
        state.wrap_background();
        assert_eq!(state.background().position.y, 800.0);
    }

    #[test]
    fn test_bind_textures_updates_existing_entities() {
        let mut state = started_state();
        let textures = SpriteTextures {
            player: Some(TextureHandle(1)),
            platform: None,
            background: Some(TextureHandle(3)),
        };
        state.bind_textures(textures);
        assert_eq!(state.player().texture, Some(TextureHandle(1)));
        assert_eq!(state.background().texture, Some(TextureHandle(3)));
        assert!(state.platforms().all(|p| p.texture.is_none()));

        state.spawn_platform(Vec2::ZERO, Vec2::ONE);
        assert!(state.platforms().all(|p| p.texture.is_none()));
    }
}
