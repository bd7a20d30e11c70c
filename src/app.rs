use crate::config::Config;
use crate::day_cycle::TimeOfDay;
use crate::err::AppError;
use crate::input::{FrameInput, InputMapper, Key, ScriptedInput};
use crate::scene::Scene;
use log::{debug, info, trace};

pub struct FrameContext {
    pub frame: u32,
    pub delta_time: f32,
    pub total_time: f32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u32,
    pub strikes: u32,
    pub peak_particles: usize,
    pub final_phase: f32,
}

pub struct App {
    pub config: Config,
    pub input_mapper: InputMapper<Key, InputAxes>,
    pub script: ScriptedInput,
    pub scene: Scene,
}

impl App {
    pub fn create(config: Config) -> Result<Self, AppError> {
        let scene = Scene::new(&config)?;
        let script = ScriptedInput::new(config.script.clone());
        let input_mapper = Self::setup_input_mapper();

        Ok(Self {
            config,
            input_mapper,
            script,
            scene,
        })
    }

    pub fn run(&mut self) -> RunSummary {
        let delta = 1.0 / self.config.run.fps;
        let mut summary = RunSummary::default();

        info!(
            "running {} frames at {} fps (seed {})",
            self.config.run.frames, self.config.run.fps, self.config.run.seed
        );

        let mut script_done = self.script.finished();

        'running: for frame in 0..self.config.run.frames {
            let context = FrameContext {
                frame,
                delta_time: delta,
                total_time: frame as f32 * delta,
            };

            let input = self.script.poll(context.total_time);

            for &key in &input.taps {
                if key == Key::Escape {
                    info!("escape pressed at {:.2} s", context.total_time);
                    break 'running;
                }
                self.on_key(key);
            }

            self.move_camera(&input, &context);

            if !script_done && self.script.finished() {
                script_done = true;
                debug!("input script finished at {:.2} s", context.total_time);
            }

            if let Some(strike) = self.scene.step(delta) {
                summary.strikes += 1;
                info!(
                    "lightning at {:.2} s: intensity {:.2} for {:.3} s",
                    context.total_time, strike.intensity, strike.duration
                );
            }

            summary.frames = frame + 1;
            summary.peak_particles = summary.peak_particles.max(self.scene.weather.rain_particles().len());

            let log_every = self.config.run.log_every;
            if log_every > 0 && (frame + 1) % log_every == 0 {
                self.log_status(&context);
            }
        }

        summary.final_phase = self.scene.day.phase();

        info!(
            "done after {} frames, {} strikes, peak {} drops",
            summary.frames, summary.strikes, summary.peak_particles
        );

        summary
    }

    fn on_key(&mut self, key: Key) {
        let weather = &mut self.scene.weather;

        match key {
            Key::R => {
                let enabled = !weather.rain_enabled();
                weather.set_rain_enabled(enabled);
                if enabled {
                    weather.seed_rain();
                }
                info!("rain {}", on_off(enabled));
            }
            Key::F => {
                let density = if weather.fog_density() == 0.0 {
                    weather.config().fog_toggle_density
                } else {
                    0.0
                };
                weather.set_fog_density(density);
                info!("fog density {density}");
            }
            Key::L => {
                let enabled = !weather.lightning_enabled();
                weather.set_lightning_enabled(enabled);
                if enabled && !weather.rain_enabled() {
                    weather.set_rain_enabled(true);
                    weather.seed_rain();
                    info!("rain on");
                }
                info!("lightning {}", on_off(enabled));
            }
            Key::B => {
                self.scene.day.jump_to(TimeOfDay::Day);
                info!("jumped to day");
            }
            Key::N => {
                self.scene.day.jump_to(TimeOfDay::Night);
                info!("jumped to night");
            }
            other => trace!("tap on {other:?} ignored"),
        }
    }

    fn move_camera(&mut self, input: &FrameInput, context: &FrameContext) {
        let script = &self.script;
        self.input_mapper.update(|key| script.is_held(key, context.total_time));

        let camera = &mut self.scene.camera;

        camera.process_movement(
            self.input_mapper.get_value(InputAxes::Forward),
            self.input_mapper.get_value(InputAxes::Right),
            self.input_mapper.get_value(InputAxes::Up),
            context.delta_time,
        );

        if input.mouse != (0, 0) && !camera.process_mouse(input.mouse.0, input.mouse.1) {
            debug!("mouse jump {:?} ignored", input.mouse);
        }

        if input.scroll != 0.0 {
            camera.zoom(input.scroll * self.config.camera.zoom_step);
        }
    }

    fn log_status(&self, context: &FrameContext) {
        let scene = &self.scene;
        let env = scene.environment();

        info!(
            "t={:.1}s phase={:.3} ({:?}) drops={} fog={:.3} lightning={:.2} smoke={}",
            context.total_time,
            scene.day.phase(),
            scene.day.time_of_day(),
            scene.weather.rain_particles().len(),
            scene.weather.fog_density(),
            scene.weather.lightning_intensity(),
            scene.smoke.puffs().len(),
        );
        debug!(
            "light {:?} ambient {:?} sun {} campfire {}",
            env.diffuse.as_slice(),
            env.ambient.as_slice(),
            env.sun.is_some(),
            env.campfire.is_some(),
        );
        trace!("camera at {:?}", scene.camera.position.as_slice());
    }

    pub fn setup_input_mapper() -> InputMapper<Key, InputAxes> {
        InputMapper::with_configuration([
            (Key::W, vec![(InputAxes::Forward, 1.0)]),
            (Key::S, vec![(InputAxes::Forward, -1.0)]),
            (Key::A, vec![(InputAxes::Right, -1.0)]),
            (Key::D, vec![(InputAxes::Right, 1.0)]),
            (Key::LShift, vec![(InputAxes::Up, -1.0)]),
            (Key::Space, vec![(InputAxes::Up, 1.0)]),
        ])
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone)]
pub enum InputAxes {
    Forward,
    Right,
    Up,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptEvent;

    fn config(script: Vec<ScriptEvent>) -> Config {
        let mut config = Config::default();
        config.run.frames = 120;
        config.run.log_every = 0;
        config.scene.num_trees = 20;
        config.script = script;
        config
    }

    fn run(script: Vec<ScriptEvent>) -> (App, RunSummary) {
        let mut app = App::create(config(script)).unwrap();
        let summary = app.run();
        (app, summary)
    }

    #[test]
    fn quiet_run_advances_the_day() {
        let (app, summary) = run(vec![]);

        assert_eq!(summary.frames, 120);
        assert_eq!(summary.peak_particles, 0);
        assert_eq!(summary.strikes, 0);
        assert!((summary.final_phase - 2.0 / 600.0).abs() < 1e-4);
        assert_eq!(app.scene.camera.position, nalgebra_glm::vec3(0.0, 2.0, 10.0));
    }

    #[test]
    fn rain_toggle_seeds_and_clears() {
        let (app, summary) = run(vec![ScriptEvent::Tap { at: 0.0, key: Key::R }]);
        assert!(summary.peak_particles > 0);
        assert!(app.scene.weather.rain_enabled());

        let (app, _) = run(vec![
            ScriptEvent::Tap { at: 0.0, key: Key::R },
            ScriptEvent::Tap { at: 1.0, key: Key::R },
        ]);
        assert!(!app.scene.weather.rain_enabled());
        assert!(app.scene.weather.rain_particles().is_empty());
    }

    #[test]
    fn lightning_key_brings_rain() {
        let (app, _) = run(vec![ScriptEvent::Tap { at: 0.0, key: Key::L }]);

        assert!(app.scene.weather.lightning_enabled());
        assert!(app.scene.weather.rain_enabled());
    }

    #[test]
    fn fog_key_toggles() {
        let (app, _) = run(vec![ScriptEvent::Tap { at: 0.0, key: Key::F }]);
        assert_eq!(app.scene.weather.fog_density(), 0.02);

        let (app, _) = run(vec![
            ScriptEvent::Tap { at: 0.0, key: Key::F },
            ScriptEvent::Tap { at: 0.5, key: Key::F },
        ]);
        assert_eq!(app.scene.weather.fog_density(), 0.0);
    }

    #[test]
    fn night_key_lights_the_campfire() {
        let (app, _) = run(vec![ScriptEvent::Tap { at: 0.0, key: Key::N }]);

        assert_eq!(app.scene.day.time_of_day(), TimeOfDay::Night);
        assert!(app.scene.environment().campfire.is_some());
        assert!(app.scene.environment().sun.is_none());
    }

    #[test]
    fn script_runs_to_completion() {
        let (app, _) = run(vec![
            ScriptEvent::Tap { at: 0.0, key: Key::R },
            ScriptEvent::Hold {
                at: 0.5,
                key: Key::W,
                duration: 0.5,
            },
        ]);
        assert!(app.script.finished());

        let (app, _) = run(vec![ScriptEvent::Tap { at: 5.0, key: Key::R }]);
        assert!(!app.script.finished());
    }

    #[test]
    fn escape_stops_early() {
        let (_, summary) = run(vec![ScriptEvent::Tap { at: 0.45, key: Key::Escape }]);

        assert!(summary.frames > 20);
        assert!(summary.frames < 120);
    }

    #[test]
    fn held_key_walks_forward() {
        let (app, _) = run(vec![ScriptEvent::Hold {
            at: 0.0,
            key: Key::W,
            duration: 1.0,
        }]);

        let position = app.scene.camera.position;
        // roughly one second at 5 units per second towards -Z
        assert!((position.z - 5.0).abs() < 0.2, "z = {}", position.z);
        assert!(position.x.abs() < 1e-3);
    }

    #[test]
    fn mouse_and_scroll_reach_the_camera() {
        let (app, _) = run(vec![
            ScriptEvent::Mouse { at: 0.0, dx: 20, dy: 0 },
            ScriptEvent::Mouse { at: 0.1, dx: 500, dy: 0 },
            ScriptEvent::Scroll { at: 0.2, amount: 2.0 },
        ]);

        assert!((app.scene.camera.yaw - -89.0).abs() < 1e-4);
        assert!(app.scene.camera.position.z < 10.0);
    }

    #[test]
    fn same_seed_same_summary() {
        let script = vec![ScriptEvent::Tap { at: 0.0, key: Key::L }];
        let (_, a) = run(script.clone());
        let (_, b) = run(script);

        assert_eq!(a, b);
    }
}
