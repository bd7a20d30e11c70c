use crate::input::ScriptEvent;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::Path;
use thiserror::Error;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Span(pub f32, pub f32);

impl Span {
    pub fn min(&self) -> f32 {
        self.0
    }

    pub fn max(&self) -> f32 {
        self.1
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.0..=self.1).contains(&value)
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub run: RunConfig,
    pub day: DayConfig,
    pub weather: WeatherConfig,
    pub scene: SceneConfig,
    pub camera: CameraConfig,
    pub script: Vec<ScriptEvent>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub frames: u32,
    pub fps: f32,
    pub seed: u64,
    /// Log a status line every this many frames, 0 disables it.
    pub log_every: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            fps: 60.0,
            seed: 42,
            log_every: 60,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DayConfig {
    pub duration: f32,
    pub start_phase: f32,
}

impl Default for DayConfig {
    fn default() -> Self {
        Self {
            duration: 600.0,
            start_phase: 0.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WeatherConfig {
    pub rain_enabled: bool,
    pub lightning_enabled: bool,
    pub fog_density: f32,
    pub fog_toggle_density: f32,
    pub spawn_x: Span,
    pub spawn_y: Span,
    pub spawn_z: Span,
    pub fall_speed: Span,
    pub batch_size: usize,
    pub max_particles: usize,
    pub strike_chance: f64,
    pub strike_intensity: Span,
    pub strike_duration: Span,
    pub cooldown: Span,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            rain_enabled: false,
            lightning_enabled: false,
            fog_density: 0.0,
            fog_toggle_density: 0.02,
            spawn_x: Span(-20.0, 20.0),
            spawn_y: Span(10.0, 20.0),
            spawn_z: Span(-20.0, 20.0),
            fall_speed: Span(9.0, 12.0),
            batch_size: 10,
            max_particles: 1000,
            strike_chance: 0.1,
            strike_intensity: Span(0.5, 1.0),
            strike_duration: Span(0.05, 0.2),
            cooldown: Span(5.0, 15.0),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SceneConfig {
    pub ground_extent: f32,
    pub num_trees: usize,
    pub spawn_radius: f32,
    pub tent_buffer: f32,
    pub pit_buffer: f32,
    pub tree_height: Span,
    pub smoke_interval: f32,
    pub smoke_batch: usize,
    pub smoke_lifetime: f32,
    pub smoke_rise_speed: f32,
    pub smoke_spread: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ground_extent: 50.0,
            num_trees: 1000,
            spawn_radius: 60.0,
            tent_buffer: 1.0,
            pit_buffer: 0.5,
            tree_height: Span(2.0, 4.0),
            smoke_interval: 0.1,
            smoke_batch: 4,
            smoke_lifetime: 3.0,
            smoke_rise_speed: 1.0,
            smoke_spread: 0.1,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub move_speed: f32,
    pub sensitivity: f32,
    pub zoom_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, 10.0],
            yaw: -90.0,
            pitch: 0.0,
            move_speed: 5.0,
            sensitivity: 0.05,
            zoom_step: 1.0,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string_lossy().into_owned(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg.into()));

        if !(self.run.fps > 0.0 && self.run.fps.is_finite()) {
            return invalid(format!("run.fps must be positive and finite, got {}", self.run.fps));
        }

        if !(self.day.duration > 0.0 && self.day.duration.is_finite()) {
            return invalid(format!(
                "day.duration must be positive and finite, got {}",
                self.day.duration
            ));
        }

        if !self.day.start_phase.is_finite() {
            return invalid(format!("day.start_phase must be finite, got {}", self.day.start_phase));
        }

        let weather = &self.weather;

        let spans = [
            ("weather.spawn_x", weather.spawn_x),
            ("weather.spawn_y", weather.spawn_y),
            ("weather.spawn_z", weather.spawn_z),
            ("weather.fall_speed", weather.fall_speed),
            ("weather.strike_intensity", weather.strike_intensity),
            ("weather.strike_duration", weather.strike_duration),
            ("weather.cooldown", weather.cooldown),
            ("scene.tree_height", self.scene.tree_height),
        ];

        for (name, span) in spans {
            if !(span.min().is_finite() && span.max().is_finite()) {
                return invalid(format!("{name} must have finite bounds, got [{}, {}]", span.0, span.1));
            }

            if !(span.min() <= span.max()) {
                return invalid(format!("{name} must be ordered as [min, max], got [{}, {}]", span.0, span.1));
            }
        }

        if !(0.0..=1.0).contains(&weather.strike_chance) {
            return invalid(format!(
                "weather.strike_chance must be within [0, 1], got {}",
                weather.strike_chance
            ));
        }

        if weather.batch_size > weather.max_particles {
            return invalid(format!(
                "weather.batch_size ({}) exceeds weather.max_particles ({})",
                weather.batch_size, weather.max_particles
            ));
        }

        if weather.fog_density < 0.0 || weather.fog_toggle_density < 0.0 {
            return invalid("fog densities cannot be negative".to_owned());
        }

        if !(self.scene.spawn_radius > 0.0 && self.scene.spawn_radius.is_finite()) {
            return invalid(format!(
                "scene.spawn_radius must be positive and finite, got {}",
                self.scene.spawn_radius
            ));
        }

        if !(self.scene.smoke_spread >= 0.0 && self.scene.smoke_spread.is_finite()) {
            return invalid(format!(
                "scene.smoke_spread must be finite and not negative, got {}",
                self.scene.smoke_spread
            ));
        }

        if !(self.scene.smoke_lifetime > 0.0) {
            return invalid(format!(
                "scene.smoke_lifetime must be positive, got {}",
                self.scene.smoke_lifetime
            ));
        }

        if let Some(event) = self.script.iter().find(|e| !(e.at() >= 0.0)) {
            return invalid(format!("script event at {} s is before the start", event.at()));
        }

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("Error parsing config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(Cow<'static, str>),
}
