pub mod app;
pub mod camera;
pub mod config;
pub mod day_cycle;
pub mod err;
pub mod input;
pub mod math;
pub mod scene;
pub mod weather;
