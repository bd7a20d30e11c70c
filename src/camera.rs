use crate::config::CameraConfig;
use crate::math::deg_to_rad;
use nalgebra_glm::{Mat4, Vec3};

const MAX_MOUSE_DELTA: i32 = 100;
const PITCH_LIMIT: f32 = 89.0;

#[derive(Clone, Debug)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub move_speed: f32,
    pub sensitivity: f32,
}

impl FlyCamera {
    pub fn new() -> Self {
        Self::from_config(&CameraConfig::default())
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: Vec3::from(config.position),
            yaw: config.yaw,
            pitch: config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            move_speed: config.move_speed,
            sensitivity: config.sensitivity,
        }
    }

    pub fn directions(&self) -> Directions {
        let (yaw, pitch) = (deg_to_rad(self.yaw), deg_to_rad(self.pitch));

        let forward = nalgebra_glm::normalize(&Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        ));
        let right = nalgebra_glm::normalize(&nalgebra_glm::cross(&forward, &Vec3::y()));
        let up = nalgebra_glm::normalize(&nalgebra_glm::cross(&right, &forward));

        Directions { up, right, forward }
    }

    pub fn process_movement(&mut self, forward: f32, right: f32, up: f32, delta: f32) {
        let directions = self.directions();
        let velocity = self.move_speed * delta;

        self.position += (directions.forward * forward + directions.right * right) * velocity;
        self.position.y += up * velocity;
    }

    /// Returns `false` when the delta was rejected.
    pub fn process_mouse(&mut self, dx: i32, dy: i32) -> bool {
        if dx.abs() > MAX_MOUSE_DELTA || dy.abs() > MAX_MOUSE_DELTA {
            return false;
        }

        self.yaw += dx as f32 * self.sensitivity;
        self.pitch = (self.pitch - dy as f32 * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        true
    }

    pub fn zoom(&mut self, amount: f32) {
        self.position += self.directions().forward * amount;
    }

    pub fn view(&self) -> Mat4 {
        let directions = self.directions();

        nalgebra_glm::look_at(&self.position, &(self.position + directions.forward), &directions.up)
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Directions {
    pub up: Vec3,
    pub right: Vec3,
    pub forward: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_glm::{vec3, vec4};

    fn close(a: &Vec3, b: &Vec3) -> bool {
        (a - b).norm() < 1e-5
    }

    #[test]
    fn default_looks_down_negative_z() {
        let camera = FlyCamera::new();
        let directions = camera.directions();

        assert!(close(&directions.forward, &vec3(0.0, 0.0, -1.0)));
        assert!(close(&directions.right, &vec3(1.0, 0.0, 0.0)));
        assert!(close(&directions.up, &vec3(0.0, 1.0, 0.0)));
        assert_eq!(camera.position, vec3(0.0, 2.0, 10.0));
    }

    #[test]
    fn movement_follows_front_and_world_up() {
        let mut camera = FlyCamera::new();

        camera.process_movement(1.0, 0.0, 0.0, 1.0);
        assert!(close(&camera.position, &vec3(0.0, 2.0, 5.0)));

        camera.process_movement(0.0, -1.0, 1.0, 0.5);
        assert!(close(&camera.position, &vec3(-2.5, 4.5, 5.0)));
    }

    #[test]
    fn mouse_spikes_are_ignored() {
        let mut camera = FlyCamera::new();

        assert!(!camera.process_mouse(101, 0));
        assert!(!camera.process_mouse(0, -150));
        assert_eq!(camera.yaw, -90.0);
        assert_eq!(camera.pitch, 0.0);

        assert!(camera.process_mouse(20, -10));
        assert!((camera.yaw - -89.0).abs() < 1e-5);
        assert!((camera.pitch - 0.5).abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = FlyCamera::new();

        for _ in 0..100 {
            camera.process_mouse(0, -100);
        }
        assert_eq!(camera.pitch, 89.0);

        for _ in 0..100 {
            camera.process_mouse(0, 100);
        }
        assert_eq!(camera.pitch, -89.0);
    }

    #[test]
    fn zoom_moves_along_front() {
        let mut camera = FlyCamera::new();
        camera.zoom(3.0);
        assert!(close(&camera.position, &vec3(0.0, 2.0, 7.0)));

        camera.zoom(-1.0);
        assert!(close(&camera.position, &vec3(0.0, 2.0, 8.0)));
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let camera = FlyCamera::new();
        let eye = camera.view() * vec4(0.0, 2.0, 10.0, 1.0);
        assert!(eye.xyz().norm() < 1e-5);

        // a point in front of the camera ends up on negative view-space Z
        let ahead = camera.view() * vec4(0.0, 2.0, 0.0, 1.0);
        assert!((ahead.z - -10.0).abs() < 1e-4);
    }
}
