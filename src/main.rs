use campsite::app::App;
use campsite::config::Config;
use campsite::err::AppError;
use clap::Parser;
use log::info;
use std::time::Instant;

mod args;

use args::Args;

fn main() -> Result<(), AppError> {
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("loading config `{}`", path.to_string_lossy());
            Config::load(path)?
        }
        None => Config::default(),
    };

    args.apply(&mut config);
    config.validate()?;

    let mut app = App::create(config)?;

    let start = Instant::now();
    let summary = app.run();
    let elapsed = start.elapsed().as_secs_f32();

    if args.benchmark {
        eprintln!(
            "{} frames in {elapsed:.3} s ({:.0} frames/s)",
            summary.frames,
            summary.frames as f32 / elapsed.max(f32::EPSILON)
        );
    }

    Ok(())
}
