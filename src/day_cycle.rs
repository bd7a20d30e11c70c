use crate::config::DayConfig;
use crate::math::{blend, wrap_unit};
use nalgebra_glm::{Vec3, Vec4};
use std::f32::consts::TAU;

pub const SUN_DISTANCE: f32 = 80.0;

pub const MIN_LIGHT_ELEVATION: f32 = 0.1;

const SEGMENT: f32 = 0.25;

struct Keyframes {
    dawn: [f32; 4],
    day: [f32; 4],
    dusk: [f32; 4],
    night: [f32; 4],
}

impl Keyframes {
    fn get(&self, time: TimeOfDay) -> [f32; 4] {
        match time {
            TimeOfDay::Dawn => self.dawn,
            TimeOfDay::Day => self.day,
            TimeOfDay::Dusk => self.dusk,
            TimeOfDay::Night => self.night,
        }
    }

    fn sample(&self, phase: f32) -> Vec4 {
        let from = TimeOfDay::from_phase(phase);
        let t = (phase - from.phase()) / SEGMENT;

        blend(&Vec4::from(self.get(from)), &Vec4::from(self.get(from.next())), t)
    }
}

const LIGHT: Keyframes = Keyframes {
    dawn: [0.8, 0.6, 0.4, 1.0],
    day: [1.0, 1.0, 1.0, 1.0],
    dusk: [0.6, 0.4, 0.3, 1.0],
    night: [0.1, 0.1, 0.2, 1.0],
};

const AMBIENT: Keyframes = Keyframes {
    dawn: [0.3, 0.2, 0.2, 1.0],
    day: [0.4, 0.4, 0.4, 1.0],
    dusk: [0.2, 0.2, 0.3, 1.0],
    night: [0.05, 0.05, 0.1, 1.0],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    pub fn phase(self) -> f32 {
        match self {
            TimeOfDay::Dawn => 0.0,
            TimeOfDay::Day => 0.25,
            TimeOfDay::Dusk => 0.5,
            TimeOfDay::Night => 0.75,
        }
    }

    pub fn next(self) -> Self {
        match self {
            TimeOfDay::Dawn => TimeOfDay::Day,
            TimeOfDay::Day => TimeOfDay::Dusk,
            TimeOfDay::Dusk => TimeOfDay::Night,
            TimeOfDay::Night => TimeOfDay::Dawn,
        }
    }

    pub fn from_phase(phase: f32) -> Self {
        if phase < 0.25 {
            TimeOfDay::Dawn
        } else if phase < 0.5 {
            TimeOfDay::Day
        } else if phase < 0.75 {
            TimeOfDay::Dusk
        } else {
            TimeOfDay::Night
        }
    }
}

#[derive(Debug, Clone)]
pub struct DayCycle {
    phase: f32,
    day_duration: f32,
}

impl DayCycle {
    pub fn new(day_duration: f32) -> Self {
        Self::with_phase(day_duration, 0.0)
    }

    pub fn with_phase(day_duration: f32, phase: f32) -> Self {
        Self {
            phase: wrap_unit(phase),
            day_duration,
        }
    }

    pub fn from_config(config: &DayConfig) -> Self {
        Self::with_phase(config.duration, config.start_phase)
    }

    pub fn advance(&mut self, delta_seconds: f32) {
        self.phase = wrap_unit(self.phase + delta_seconds / self.day_duration);
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn set_phase(&mut self, phase: f32) {
        self.phase = wrap_unit(phase);
    }

    pub fn jump_to(&mut self, time: TimeOfDay) {
        self.phase = time.phase();
    }

    pub fn day_duration(&self) -> f32 {
        self.day_duration
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_phase(self.phase)
    }

    pub fn is_daytime(&self) -> bool {
        self.phase < 0.5
    }

    pub fn light_color(&self) -> Vec4 {
        LIGHT.sample(self.phase)
    }

    pub fn ambient_color(&self) -> Vec4 {
        AMBIENT.sample(self.phase)
    }

    pub fn light_direction(&self) -> Vec4 {
        let angle = self.phase * TAU;

        Vec4::new(angle.cos(), angle.sin().max(MIN_LIGHT_ELEVATION), 0.0, 0.0)
    }

    pub fn sun_world_position(&self) -> Vec3 {
        let angle = self.phase * TAU;

        Vec3::new(
            angle.cos() * SUN_DISTANCE,
            angle.sin().max(0.0) * SUN_DISTANCE,
            0.0,
        )
    }

    pub fn sun_visible(&self) -> bool {
        self.sun_world_position().y > 0.0
    }
}
