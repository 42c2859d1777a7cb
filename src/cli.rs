use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::membrane::ModeSet;
use crate::output::OutputFormat;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, global = true, default_value = "drumhead.toml")]
    pub config: String,

    /// Write rows to this file instead of stdout
    #[arg(long, short, global = true)]
    pub output: Option<String>,

    /// Row format (overrides config)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Bessel zero and natural frequency of each mode
    Freq {
        #[command(flatten)]
        membrane: MembraneArgs,
    },
    /// Radial profile J_n(ω x) for orders 0..ORDERS at one mode index
    Curves {
        #[arg(long)]
        radius: Option<f64>,
        /// Number of orders, starting at 0
        #[arg(long)]
        orders: Option<u32>,
        /// Mode index m shared by every curve
        #[arg(long)]
        index: Option<u32>,
        #[arg(long)]
        x_max: Option<f64>,
        #[arg(long)]
        points: Option<usize>,
    },
    /// Superposed field sampled over the disc at one instant
    Field {
        #[command(flatten)]
        membrane: MembraneArgs,
        #[command(flatten)]
        sampling: SamplingArgs,
        /// Time t
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        time: f64,
    },
    /// One sampled field per animation frame
    Animate {
        #[command(flatten)]
        membrane: MembraneArgs,
        #[command(flatten)]
        sampling: SamplingArgs,
        #[arg(long)]
        fps: Option<f64>,
        /// Seconds of animation, starting at t = 0
        #[arg(long)]
        duration: Option<f64>,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct MembraneArgs {
    /// Membrane radius R
    #[arg(long)]
    pub radius: Option<f64>,

    /// Modes as order:index pairs, e.g. 0:1,0:2
    #[arg(long)]
    pub modes: Option<ModeSet>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct SamplingArgs {
    /// Radial sample count over [0, R]
    #[arg(long)]
    pub radial: Option<usize>,

    /// Angular sample count over [0, 2π)
    #[arg(long)]
    pub angular: Option<usize>,

    /// Emit (x, y, z) instead of (r, φ, z)
    #[arg(long, default_value_t = false)]
    pub cartesian: bool,
}

impl MembraneArgs {
    fn apply(&self, cfg: &mut AppConfig) {
        if let Some(radius) = self.radius {
            cfg.membrane.radius = radius;
        }
        if let Some(modes) = &self.modes {
            cfg.membrane.modes = modes
                .iter()
                .map(|m| [i64::from(m.order()), i64::from(m.index())])
                .collect();
        }
    }
}

impl SamplingArgs {
    fn apply(&self, cfg: &mut AppConfig) {
        if let Some(radial) = self.radial {
            cfg.sampling.radial = radial;
        }
        if let Some(angular) = self.angular {
            cfg.sampling.angular = angular;
        }
        if self.cartesian {
            cfg.sampling.cartesian = true;
        }
    }
}

impl Args {
    /// Command-line values take precedence over the config file.
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(format) = self.format {
            cfg.output.format = format;
        }
        match &self.command {
            Command::Freq { membrane } => membrane.apply(cfg),
            Command::Curves {
                radius,
                orders,
                index,
                x_max,
                points,
            } => {
                if let Some(radius) = *radius {
                    cfg.membrane.radius = radius;
                }
                if let Some(orders) = *orders {
                    cfg.curves.orders = orders;
                }
                if let Some(index) = *index {
                    cfg.curves.index = index;
                }
                if let Some(x_max) = *x_max {
                    cfg.curves.x_max = x_max;
                }
                if let Some(points) = *points {
                    cfg.curves.points = points;
                }
            }
            Command::Field { membrane, sampling, .. } => {
                membrane.apply(cfg);
                sampling.apply(cfg);
            }
            Command::Animate {
                membrane,
                sampling,
                fps,
                duration,
            } => {
                membrane.apply(cfg);
                sampling.apply(cfg);
                if let Some(fps) = *fps {
                    cfg.animation.fps = fps;
                }
                if let Some(duration) = *duration {
                    cfg.animation.duration_s = duration;
                }
            }
        }
    }
}
