use crate::config::{Span, WeatherConfig};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainParticle {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub fall_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightningStrike {
    pub intensity: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Lightning {
    Idle { cooldown: f32 },
    Active { intensity: f32, remaining: f32 },
}

pub struct WeatherState<R: Rng = StdRng> {
    config: WeatherConfig,
    rng: R,
    rain_enabled: bool,
    lightning_enabled: bool,
    fog_density: f32,
    particles: Vec<RainParticle>,
    lightning: Lightning,
}

impl WeatherState<StdRng> {
    pub fn seeded(config: WeatherConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> WeatherState<R> {
    pub fn new(config: WeatherConfig, rng: R) -> Self {
        Self {
            rain_enabled: config.rain_enabled,
            lightning_enabled: config.lightning_enabled,
            fog_density: config.fog_density.max(0.0),
            particles: Vec::with_capacity(config.max_particles),
            lightning: Lightning::Idle { cooldown: 0.0 },
            config,
            rng,
        }
    }

    /// Steps rain and lightning by `delta_seconds`. Returns the strike that
    /// started on this tick, if any.
    pub fn advance(&mut self, delta_seconds: f32) -> Option<LightningStrike> {
        self.update_rain(delta_seconds);

        if self.rain_enabled && self.lightning_enabled {
            self.update_lightning(delta_seconds)
        } else {
            if let Lightning::Active { .. } = self.lightning {
                debug!("lightning cut off while active");
                self.lightning = Lightning::Idle { cooldown: 0.0 };
            }
            None
        }
    }

    fn update_rain(&mut self, delta_seconds: f32) {
        if !self.rain_enabled {
            self.particles.clear();
            return;
        }

        self.spawn_batch();

        self.particles.retain_mut(|p| {
            p.y -= p.fall_speed * delta_seconds;
            p.y > 0.0
        });
    }

    fn update_lightning(&mut self, delta_seconds: f32) -> Option<LightningStrike> {
        match self.lightning {
            Lightning::Active { intensity, remaining } => {
                let remaining = remaining - delta_seconds;

                if remaining <= 0.0 {
                    let cooldown = sample(&mut self.rng, self.config.cooldown);
                    trace!("lightning over, next chance in {cooldown:.2} s");
                    self.lightning = Lightning::Idle { cooldown };
                } else {
                    self.lightning = Lightning::Active { intensity, remaining };
                }

                None
            }
            Lightning::Idle { cooldown } => {
                let cooldown = cooldown - delta_seconds;

                if cooldown <= 0.0 && self.rng.random_bool(self.config.strike_chance) {
                    let strike = LightningStrike {
                        intensity: sample(&mut self.rng, self.config.strike_intensity),
                        duration: sample(&mut self.rng, self.config.strike_duration),
                    };

                    self.lightning = Lightning::Active {
                        intensity: strike.intensity,
                        remaining: strike.duration,
                    };

                    Some(strike)
                } else {
                    self.lightning = Lightning::Idle { cooldown };
                    None
                }
            }
        }
    }

    pub fn seed_rain(&mut self) {
        self.spawn_batch();
    }

    fn spawn_batch(&mut self) {
        let room = self.config.max_particles.saturating_sub(self.particles.len());
        let count = self.config.batch_size.min(room);

        for _ in 0..count {
            let particle = RainParticle {
                x: sample(&mut self.rng, self.config.spawn_x),
                y: sample(&mut self.rng, self.config.spawn_y),
                z: sample(&mut self.rng, self.config.spawn_z),
                fall_speed: sample(&mut self.rng, self.config.fall_speed),
            };
            self.particles.push(particle);
        }
    }

    pub fn set_rain_enabled(&mut self, enabled: bool) {
        self.rain_enabled = enabled;
    }

    pub fn set_lightning_enabled(&mut self, enabled: bool) {
        self.lightning_enabled = enabled;
    }

    /// Negative and NaN densities are stored as zero.
    pub fn set_fog_density(&mut self, density: f32) {
        self.fog_density = density.max(0.0);
    }

    pub fn rain_enabled(&self) -> bool {
        self.rain_enabled
    }

    pub fn lightning_enabled(&self) -> bool {
        self.lightning_enabled
    }

    pub fn fog_density(&self) -> f32 {
        self.fog_density
    }

    pub fn rain_particles(&self) -> &[RainParticle] {
        &self.particles
    }

    pub fn lightning_active(&self) -> bool {
        matches!(self.lightning, Lightning::Active { .. })
    }

    pub fn lightning_intensity(&self) -> f32 {
        match self.lightning {
            Lightning::Active { intensity, .. } => intensity,
            Lightning::Idle { .. } => 0.0,
        }
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }
}

fn sample(rng: &mut impl Rng, span: Span) -> f32 {
    rng.random_range(span.min()..=span.max())
}
