use crate::camera::FlyCamera;
use crate::config::{Config, SceneConfig};
use crate::day_cycle::DayCycle;
use crate::math::scale_rgb;
use crate::weather::{LightningStrike, WeatherState};
use log::{debug, info};
use nalgebra_glm::{Vec3, Vec4, vec3, vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use thiserror::Error;

pub const GROUND_Y: f32 = 0.0;

pub const TENT_HALF_SIZE: f32 = 1.0;
pub const TENT_HEIGHT: f32 = 1.5;

pub const PIT_CENTER: (f32, f32) = (-1.2, -1.7);
pub const PIT_RADIUS: f32 = 0.5;
pub const STONE_COUNT: usize = 13;
pub const STONE_RADIUS: f32 = 0.12;
pub const FLAME_OFFSET: f32 = 0.2;

pub const SUN_RADIUS: f32 = 5.0;

const FIRE_LIGHT_HEIGHT: f32 = 0.2;
const SMOKE_BASE_HEIGHT: f32 = GROUND_Y + 0.05;

pub struct Tent {
    pub half_size: f32,
    pub height: f32,
}

impl Tent {
    pub fn apex(&self) -> Vec3 {
        vec3(0.0, self.height, 0.0)
    }

    pub fn footprint(&self) -> [Vec3; 4] {
        let hs = self.half_size;
        [
            vec3(-hs, GROUND_Y, -hs),
            vec3(hs, GROUND_Y, -hs),
            vec3(hs, GROUND_Y, hs),
            vec3(-hs, GROUND_Y, hs),
        ]
    }
}

pub struct FirePit {
    pub center: Vec3,
    pub radius: f32,
    pub stones: Vec<Vec3>,
    pub flames: Vec<Vec3>,
}

impl FirePit {
    pub fn new() -> Self {
        let center = vec3(PIT_CENTER.0, GROUND_Y, PIT_CENTER.1);

        let stones = (0..STONE_COUNT)
            .map(|i| {
                let angle = TAU * i as f32 / STONE_COUNT as f32;
                vec3(
                    center.x + PIT_RADIUS * angle.cos(),
                    GROUND_Y + STONE_RADIUS,
                    center.z + PIT_RADIUS * angle.sin(),
                )
            })
            .collect();

        let flames = vec![
            center + vec3(FLAME_OFFSET, 0.0, 0.0),
            center - vec3(FLAME_OFFSET, 0.0, 0.0),
            center + vec3(0.0, 0.0, FLAME_OFFSET),
        ];

        Self {
            center,
            radius: PIT_RADIUS,
            stones,
            flames,
        }
    }
}

impl Default for FirePit {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TreeInstance {
    pub position: Vec3,
    pub height_scale: f32,
    pub yaw: f32,
}

pub struct Campsite {
    pub ground_extent: f32,
    pub tent: Tent,
    pub fire_pit: FirePit,
    pub trees: Vec<TreeInstance>,
}

impl Campsite {
    pub fn generate(config: &SceneConfig, rng: &mut impl Rng) -> Result<Self, SceneError> {
        let tent = Tent {
            half_size: TENT_HALF_SIZE,
            height: TENT_HEIGHT,
        };
        let fire_pit = FirePit::new();
        let trees = scatter_trees(config, &tent, &fire_pit, rng)?;

        Ok(Self {
            ground_extent: config.ground_extent,
            tent,
            fire_pit,
            trees,
        })
    }
}

pub fn scatter_trees(
    config: &SceneConfig,
    tent: &Tent,
    fire_pit: &FirePit,
    rng: &mut impl Rng,
) -> Result<Vec<TreeInstance>, SceneError> {
    let radius = config.spawn_radius;
    let tent_clearance = tent.half_size + config.tent_buffer;
    let pit_clearance = fire_pit.radius + config.pit_buffer;
    let max_attempts = config.num_trees.saturating_mul(100).max(1000);

    let mut trees = Vec::with_capacity(config.num_trees);
    let mut attempts = 0;

    while trees.len() < config.num_trees {
        if attempts == max_attempts {
            return Err(SceneError::ScatterExhausted {
                placed: trees.len(),
                requested: config.num_trees,
            });
        }
        attempts += 1;

        let x = rng.random_range(-radius..=radius);
        let z = rng.random_range(-radius..=radius);

        if x.abs() < tent_clearance && z.abs() < tent_clearance {
            continue;
        }

        let (dx, dz) = (x - fire_pit.center.x, z - fire_pit.center.z);
        if dx * dx + dz * dz < pit_clearance * pit_clearance {
            continue;
        }

        trees.push(TreeInstance {
            position: vec3(x, GROUND_Y, z),
            height_scale: rng.random_range(config.tree_height.min()..=config.tree_height.max()),
            yaw: rng.random_range(0.0..360.0),
        });
    }

    debug!("scattered {} trees in {attempts} attempts", trees.len());

    Ok(trees)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmokePuff {
    pub position: Vec3,
    pub age: f32,
}

impl SmokePuff {
    pub fn alpha(&self, lifetime: f32) -> f32 {
        (1.0 - self.age / lifetime).max(0.0)
    }

    pub fn size(&self) -> f32 {
        0.2 + 0.15 * self.age
    }
}

pub struct SmokeEmitter {
    pub origin: Vec3,
    pub interval: f32,
    pub batch: usize,
    pub lifetime: f32,
    pub rise_speed: f32,
    pub spread: f32,
    puffs: Vec<SmokePuff>,
    timer: f32,
}

impl SmokeEmitter {
    pub fn new(origin: Vec3, config: &SceneConfig) -> Self {
        Self {
            origin: vec3(origin.x, SMOKE_BASE_HEIGHT, origin.z),
            interval: config.smoke_interval,
            batch: config.smoke_batch,
            lifetime: config.smoke_lifetime,
            rise_speed: config.smoke_rise_speed,
            spread: config.smoke_spread,
            puffs: Vec::new(),
            timer: 0.0,
        }
    }

    pub fn update(&mut self, delta: f32, rng: &mut impl Rng) {
        self.timer += delta;

        if self.timer > self.interval {
            for _ in 0..self.batch {
                let jitter = vec3(
                    rng.random_range(-self.spread..=self.spread),
                    0.0,
                    rng.random_range(-self.spread..=self.spread),
                );
                self.puffs.push(SmokePuff {
                    position: self.origin + jitter,
                    age: 0.0,
                });
            }
            self.timer = 0.0;
        }

        let (lifetime, rise) = (self.lifetime, self.rise_speed * delta);
        self.puffs.retain_mut(|p| {
            p.age += delta;
            p.position.y += rise;
            p.age < lifetime
        });
    }

    pub fn puffs(&self) -> &[SmokePuff] {
        &self.puffs
    }
}

pub struct Sun {
    pub position: Vec3,
    pub color: Vec3,
    pub radius: f32,
}

pub struct Fog {
    pub density: f32,
    pub color: Vec4,
}

pub struct PointLight {
    pub position: Vec4,
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub attenuation: Vec3,
}

impl PointLight {
    pub fn campfire(pit: &FirePit) -> Self {
        let diffuse = vec4(1.0, 0.8, 0.4, 1.0);

        Self {
            position: vec4(pit.center.x, GROUND_Y + FIRE_LIGHT_HEIGHT, pit.center.z, 1.0),
            ambient: vec4(0.4, 0.2, 0.1, 1.0),
            diffuse,
            specular: diffuse,
            attenuation: vec3(0.1, 0.01, 0.002),
        }
    }
}

pub struct Environment {
    pub light_direction: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub ambient: Vec4,
    pub sun: Option<Sun>,
    pub fog: Option<Fog>,
    pub campfire: Option<PointLight>,
}

impl Environment {
    pub fn compose<R: Rng>(day: &DayCycle, weather: &WeatherState<R>, fire_pit: &FirePit) -> Self {
        let fog = weather.fog_density();
        let raining = weather.rain_enabled();

        let mut diffuse = day.light_color();
        let mut ambient = day.ambient_color();

        if fog > 0.0 {
            diffuse = scale_rgb(&diffuse, (1.0 - fog * 10.0).max(0.0));
        }

        if raining {
            diffuse = scale_rgb(&diffuse, 0.7);
            ambient = scale_rgb(&ambient, 0.7);
        }

        if weather.lightning_active() {
            let i = weather.lightning_intensity();
            ambient = vec4(i, i, i, 1.0);
        }

        let sun = day.sun_visible().then(|| {
            let phase = day.phase();
            let mut color = if phase < 0.25 || phase > 0.75 {
                vec3(1.0, 0.7, 0.3)
            } else {
                vec3(1.0, 1.0, 0.8)
            };

            if fog > 0.0 {
                let factor = 1.0 - fog * 5.0;
                color = color.map(|c| (c * factor).max(0.2));
            }

            if raining {
                color *= 0.6;
            }

            Sun {
                position: day.sun_world_position(),
                color,
                radius: SUN_RADIUS,
            }
        });

        Self {
            light_direction: day.light_direction(),
            diffuse,
            specular: diffuse,
            ambient,
            sun,
            fog: (fog > 0.0).then(|| Fog {
                density: fog,
                color: vec4(0.5, 0.5, 0.5, 1.0),
            }),
            campfire: (!day.is_daytime()).then(|| PointLight::campfire(fire_pit)),
        }
    }
}

pub struct Scene {
    pub campsite: Campsite,
    pub camera: FlyCamera,
    pub day: DayCycle,
    pub weather: WeatherState,
    pub smoke: SmokeEmitter,
    rng: StdRng,
}

impl Scene {
    pub fn new(config: &Config) -> Result<Self, SceneError> {
        let mut rng = StdRng::seed_from_u64(config.run.seed);

        let campsite = Campsite::generate(&config.scene, &mut rng)?;
        let weather = WeatherState::new(config.weather.clone(), StdRng::from_rng(&mut rng));
        let smoke = SmokeEmitter::new(campsite.fire_pit.center, &config.scene);

        info!(
            "campsite ready: {} trees, day length {} s",
            campsite.trees.len(),
            config.day.duration
        );

        Ok(Scene {
            camera: FlyCamera::from_config(&config.camera),
            day: DayCycle::from_config(&config.day),
            weather,
            smoke,
            campsite,
            rng,
        })
    }

    pub fn step(&mut self, delta: f32) -> Option<LightningStrike> {
        let strike = self.weather.advance(delta);
        self.day.advance(delta);
        self.smoke.update(delta, &mut self.rng);

        strike
    }

    pub fn environment(&self) -> Environment {
        Environment::compose(&self.day, &self.weather, &self.campsite.fire_pit)
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Only {placed} of {requested} trees fit around the camp")]
    ScatterExhausted { placed: usize, requested: usize },
}
