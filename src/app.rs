use std::fs::File;
use std::io::{self, Write};

use crossbeam_channel::{Sender, bounded};
use serde_json::Value;
use tracing::*;

use crate::cli::{Args, Command};
use crate::config::AppConfig;
use crate::core::special::SpecialFunctions;
use crate::core::timebase::Frame;
use crate::core::util::{angles, linspace};
use crate::membrane::{FieldSampler, InvalidArgument, Membrane, MembraneError, Mode};
use crate::output::Record;
use crate::output::writer::RecordWriter;

pub const FREQ_COLUMNS: &[&str] = &["n", "m", "zero", "omega"];
pub const CURVE_COLUMNS: &[&str] = &["n", "m", "x", "y"];
pub const POLAR_COLUMNS: &[&str] = &["frame", "t", "r", "phi", "z"];
pub const CARTESIAN_COLUMNS: &[&str] = &["frame", "t", "x", "y", "z"];

/// Rows in flight between the driver and the writer thread.
const CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug)]
pub enum AppError {
    Membrane(MembraneError),
    Io(io::Error),
    /// Setting outside the range the driver can use.
    Config(String),
    /// The writer thread stopped before every row was sent.
    WriterClosed,
    WriterPanicked,
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Membrane(err) => write!(f, "{err}"),
            AppError::Io(err) => write!(f, "output error: {err}"),
            AppError::Config(msg) => write!(f, "config error: {msg}"),
            AppError::WriterClosed => write!(f, "output writer closed early"),
            AppError::WriterPanicked => write!(f, "output writer panicked"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Membrane(err) => Some(err),
            AppError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MembraneError> for AppError {
    fn from(err: MembraneError) -> Self {
        AppError::Membrane(err)
    }
}

impl From<InvalidArgument> for AppError {
    fn from(err: InvalidArgument) -> Self {
        AppError::Membrane(err.into())
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

/// Loads config, applies command-line overrides and runs one subcommand.
pub fn run(args: Args) -> Result<(), AppError> {
    let mut cfg = AppConfig::load_or_default(&args.config);
    args.apply(&mut cfg);

    let provider = cfg.to_provider().map_err(AppError::Config)?;
    debug!("Special functions: {:?}", cfg.solver.backend);
    let membrane = Membrane::with_special(cfg.membrane.radius, provider)?;
    let columns = match &args.command {
        Command::Freq { .. } => FREQ_COLUMNS,
        Command::Curves { .. } => CURVE_COLUMNS,
        Command::Field { .. } | Command::Animate { .. } if cfg.sampling.cartesian => CARTESIAN_COLUMNS,
        Command::Field { .. } | Command::Animate { .. } => POLAR_COLUMNS,
    };

    let sink = open_sink(args.output.as_deref())?;
    let (row_tx, row_rx) = bounded::<Record>(CHANNEL_CAPACITY);
    let writer = RecordWriter::run(row_rx, sink, cfg.output.format, columns)?;

    let produced = match &args.command {
        Command::Freq { .. } => run_freq(&membrane, &cfg, &row_tx),
        Command::Curves { .. } => run_curves(&membrane, &cfg, &row_tx),
        Command::Field { time, .. } => run_field(&membrane, &cfg, *time, &row_tx),
        Command::Animate { .. } => run_animate(&membrane, &cfg, &row_tx),
    };
    drop(row_tx);

    // A writer failure explains any WriterClosed the driver saw.
    let rows = writer.join().map_err(|_| AppError::WriterPanicked)??;
    produced?;
    info!("Wrote {rows} rows");
    Ok(())
}

fn open_sink(path: Option<&str>) -> Result<Box<dyn Write + Send>, AppError> {
    match path {
        None | Some("-") => Ok(Box::new(io::stdout())),
        Some(path) => {
            let file = File::create(path)?;
            debug!("Writing rows to {path}");
            Ok(Box::new(file))
        }
    }
}

fn send(tx: &Sender<Record>, record: Record) -> Result<(), AppError> {
    tx.send(record).map_err(|_| AppError::WriterClosed)
}

fn run_freq<S: SpecialFunctions>(
    membrane: &Membrane<S>,
    cfg: &AppConfig,
    tx: &Sender<Record>,
) -> Result<(), AppError> {
    let modes = cfg.mode_set()?;
    info!("Modal frequencies for R={}, {modes}", membrane.radius());
    for &mode in &modes {
        let zero = membrane.bessel_zero(mode)?;
        let omega = membrane.modal_frequency(mode)?;
        debug!("{mode}: j={zero:.12} omega={omega:.12}");
        send(
            tx,
            Record::new(vec![
                Value::from(mode.order()),
                Value::from(mode.index()),
                Value::from(zero),
                Value::from(omega),
            ]),
        )?;
    }
    Ok(())
}

fn run_curves<S: SpecialFunctions>(
    membrane: &Membrane<S>,
    cfg: &AppConfig,
    tx: &Sender<Record>,
) -> Result<(), AppError> {
    let curves = &cfg.curves;
    if !curves.x_max.is_finite() || curves.x_max < 0.0 {
        return Err(AppError::Config(format!(
            "curves.x_max must be finite and >= 0, got {}",
            curves.x_max
        )));
    }
    let xs = linspace(0.0, curves.x_max, curves.points);
    info!(
        "Radial profiles for orders 0..{} at m={}, x in [0, {}]",
        curves.orders, curves.index, curves.x_max
    );
    for order in 0..curves.orders {
        let mode = Mode::new(order, curves.index)?;
        for (x, y) in membrane.radial_profile(mode, &xs)? {
            send(
                tx,
                Record::new(vec![
                    Value::from(mode.order()),
                    Value::from(mode.index()),
                    Value::from(x),
                    Value::from(y),
                ]),
            )?;
        }
    }
    Ok(())
}

fn run_field<S: SpecialFunctions + Clone>(
    membrane: &Membrane<S>,
    cfg: &AppConfig,
    t: f64,
    tx: &Sender<Record>,
) -> Result<(), AppError> {
    let modes = cfg.mode_set()?;
    let (radii, phis) = sample_axes(membrane, cfg);
    info!("Field {modes} at t={t} on {}x{} grid", radii.len(), phis.len());
    let sampler = membrane.sample_field(&modes, t, radii, phis)?;
    send_field(tx, 0, &sampler, cfg.sampling.cartesian)
}

fn run_animate<S: SpecialFunctions + Clone>(
    membrane: &Membrane<S>,
    cfg: &AppConfig,
    tx: &Sender<Record>,
) -> Result<(), AppError> {
    let timebase = cfg.timebase();
    if !timebase.fps.is_finite() || timebase.fps <= 0.0 {
        return Err(AppError::Config(format!(
            "animation.fps must be positive, got {}",
            timebase.fps
        )));
    }
    let modes = cfg.mode_set()?;
    let (radii, phis) = sample_axes(membrane, cfg);
    let frames = timebase.frame_count(cfg.animation.duration_s);
    info!(
        "Animating {modes}: {frames} frames at {} fps, {}x{} grid",
        timebase.fps,
        radii.len(),
        phis.len()
    );

    for frame in 0..frames {
        let t = timebase.frame_to_sec(frame);
        let sampler = membrane.sample_field(&modes, t, radii.clone(), phis.clone())?;
        send_field(tx, frame, &sampler, cfg.sampling.cartesian)?;
        debug!(frame, t, "frame sent");
    }
    Ok(())
}

fn sample_axes<S: SpecialFunctions>(membrane: &Membrane<S>, cfg: &AppConfig) -> (Vec<f64>, Vec<f64>) {
    (
        linspace(0.0, membrane.radius(), cfg.sampling.radial),
        angles(cfg.sampling.angular),
    )
}

fn send_field<S: SpecialFunctions>(
    tx: &Sender<Record>,
    frame: Frame,
    sampler: &FieldSampler<S>,
    cartesian: bool,
) -> Result<(), AppError> {
    let t = sampler.field().time();
    for sample in sampler {
        let sample = sample?;
        let [a, b, z] = if cartesian {
            sample.cartesian()
        } else {
            [sample.r, sample.phi, sample.z]
        };
        send(
            tx,
            Record::new(vec![
                Value::from(frame),
                Value::from(t),
                Value::from(a),
                Value::from(b),
                Value::from(z),
            ]),
        )?;
    }
    Ok(())
}
