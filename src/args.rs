use campsite::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct Args {
    /// Scene configuration (TOML). Defaults are used when omitted.
    pub config: Option<PathBuf>,
    #[arg(short, long)]
    pub frames: Option<u32>,
    #[arg(long)]
    pub fps: Option<f32>,
    #[arg(short, long)]
    pub seed: Option<u64>,
    #[arg(short, long, default_value_t = false)]
    pub benchmark: bool,
}

impl Args {
    pub fn apply(&self, config: &mut Config) {
        if let Some(frames) = self.frames {
            config.run.frames = frames;
        }
        if let Some(fps) = self.fps {
            config.run.fps = fps;
        }
        if let Some(seed) = self.seed {
            config.run.seed = seed;
        }
        if self.benchmark {
            config.run.log_every = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_only_what_was_given() {
        let args = Args::try_parse_from(["campsite", "scene.toml", "--frames", "10", "-s", "7"]).unwrap();
        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(args.config, Some(PathBuf::from("scene.toml")));
        assert_eq!(config.run.frames, 10);
        assert_eq!(config.run.seed, 7);
        assert_eq!(config.run.fps, 60.0);
        assert_eq!(config.run.log_every, 60);
    }

    #[test]
    fn benchmark_silences_status_lines() {
        let args = Args::try_parse_from(["campsite", "-b"]).unwrap();
        let mut config = Config::default();
        args.apply(&mut config);

        assert!(args.config.is_none());
        assert_eq!(config.run.log_every, 0);
    }
}
