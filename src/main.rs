//! Sky Hop headless runner
//!
//! Drives a full session against a scripted host: the tilt sweeps left and
//! right, frames arrive at 60 Hz, and the run ends at game over or after the
//! time limit. Useful for checking tuning changes without a device.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use sky_hop::platform::{AudioOutput, Display, HostNotifier, TextureHandle, TextureLoader, TiltSensor};
use sky_hop::sim::GamePhase;
use sky_hop::{Game, Settings, Tuning};

const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "sky-hop")]
#[command(about = "Play one scripted Sky Hop session and report the score")]
struct Cli {
    /// Run seed; the same seed replays the same platform layout
    #[arg(default_value_t = 12345)]
    seed: u64,
    /// JSON file with tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Give up after this many simulated seconds
    #[arg(long, default_value_t = 120.0)]
    max_seconds: f32,
    #[arg(long, default_value_t = 1080.0)]
    width: f32,
    #[arg(long, default_value_t = 2400.0)]
    height: f32,
}

fn load_tuning(path: Option<&PathBuf>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => Tuning::from_json_or_default(&json),
        Err(e) => {
            log::warn!("Cannot read tuning {} ({e}), using defaults", path.display());
            Tuning::default()
        }
    }
}

/// Scripted stand-in for a phone
struct HeadlessHost {
    viewport: Vec2,
    time: f32,
    textures: HashMap<String, TextureHandle>,
    last_score: i32,
    final_score: Option<i32>,
}

impl HeadlessHost {
    fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            time: 0.0,
            textures: HashMap::new(),
            last_score: 0,
            final_score: None,
        }
    }
}

impl TextureLoader for HeadlessHost {
    fn load_texture(&mut self, name: &str) -> Option<TextureHandle> {
        let next = TextureHandle(self.textures.len() as u32 + 1);
        Some(*self.textures.entry(name.to_string()).or_insert(next))
    }
}

impl Display for HeadlessHost {
    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }
}

impl TiltSensor for HeadlessHost {
    fn tilt_input(&self) -> Vec2 {
        Vec2::new((self.time * 0.7).sin() * 3.0, 0.0)
    }
}

impl AudioOutput for HeadlessHost {
    fn play_sound(&mut self, name: &str, looping: bool) {
        log::debug!("play {name} (looping: {looping})");
    }

    fn stop_sound(&mut self) {
        log::debug!("stop sound");
    }
}

impl HostNotifier for HeadlessHost {
    fn notify_score(&mut self, score: i32) {
        if score / 100 > self.last_score / 100 {
            log::info!("Score {score}");
        }
        self.last_score = score;
    }

    fn notify_game_over(&mut self, score: i32) {
        self.final_score = Some(score);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let tuning = load_tuning(cli.tuning.as_ref());
    log::info!("Seed {}", cli.seed);

    let mut host = HeadlessHost::new(Vec2::new(cli.width, cli.height));
    let mut game = Game::create(cli.seed, tuning, Settings::default());
    game.activate(&mut host);
    game.play_menu_music(&mut host);
    game.start_game(&mut host);

    let mut frames = 0u32;
    while game.current_state() == GamePhase::Playing && host.time < cli.max_seconds {
        host.time += FRAME_DT;
        game.update(FRAME_DT, &mut host);
        frames += 1;

        if frames % 600 == 0 {
            let frame = game.frame();
            log::info!(
                "t={:.0}s height={:.0} sprites={}",
                host.time,
                game.player().position.y,
                frame.sprites.len()
            );
        }
    }

    match host.final_score {
        Some(score) => log::info!("Fell after {:.1}s, final score {score}", host.time),
        None => log::info!("Still airborne after {:.1}s, score {}", host.time, game.current_score() as i32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["sky-hop"]).expect("defaults parse");
        assert_eq!(cli.seed, 12345);
        assert!(cli.tuning.is_none());
        assert_eq!(cli.max_seconds, 120.0);
    }

    #[test]
    fn test_cli_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["sky-hop", "not-a-seed"]).is_err());
        let cli = Cli::try_parse_from(["sky-hop", "77", "--max-seconds", "5"]).expect("valid args");
        assert_eq!(cli.seed, 77);
        assert_eq!(cli.max_seconds, 5.0);
    }

    #[test]
    fn test_missing_tuning_file_falls_back() {
        let path = PathBuf::from("/nonexistent/sky-hop-tuning.json");
        assert_eq!(load_tuning(Some(&path)), Tuning::default());
    }
}
