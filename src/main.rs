use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use splat_playground::initialize::ParticleKind;
use splat_playground::PlaygroundParams;
use std::io;

/// Click to spray spinning, shrinking polygons across the window
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
  /// Particle kind selected at start (right click cycles it)
  #[arg(short, long, value_enum, default_value_t = ParticleKind::Normal)]
  kind: ParticleKind,
  /// Seed for the random source; omitted means a fresh seed each run
  #[arg(short, long)]
  seed: Option<u64>,
  /// Particles spawned per click
  #[arg(short, long, default_value_t = 5)]
  burst: u32,
  /// Window width in pixels
  #[arg(long, default_value_t = 1920)]
  width: u32,
  /// Window height in pixels
  #[arg(long, default_value_t = 1080)]
  height: u32,
  /// Downward acceleration for falling particles
  #[arg(short, long)]
  gravity: Option<f64>,
  /// Run in headless mode (no window)
  #[arg(long, default_value_t = false)]
  headless: bool,
  /// Frames to simulate in headless mode
  #[arg(long, default_value_t = 600)]
  frames: u64,
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Generate shell completion scripts
  Completions {
    /// The shell to generate the script for
    #[arg(value_enum)]
    shell: Shell,
  },
}

impl Args {
  fn params(&self) -> PlaygroundParams {
    let mut params = PlaygroundParams {
      width: self.width,
      height: self.height,
      burst: self.burst,
      seed: self.seed,
      ..PlaygroundParams::default()
    };
    if let Some(g) = self.gravity {
      params.particle.gravity = g;
    }
    params
  }
}

fn main() {
  let args = Args::parse();

  if let Some(Commands::Completions { shell }) = &args.command {
    let mut cmd = Args::command();
    let name = cmd.get_name().to_string();
    generate(*shell, &mut cmd, name, &mut io::stdout());
    return;
  }

  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  if let Err(e) = splat_playground::state::run(args.params(), args.kind, args.headless, args.frames)
  {
    log::error!("{e}");
    std::process::exit(1);
  }
}
