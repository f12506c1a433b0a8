use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use rusty_raster::canvas::Figure;
use rusty_raster::color::Color;
use rusty_raster::error::RasterError;
use rusty_raster::io::{read_spike_matrix, write_figure, Layout};
use rusty_raster::raster::{rasterplot, RasterOptions};
use rusty_raster::render::{render_to_file, RenderOptions};
use rusty_raster::DEFAULT_DT;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

#[derive(Parser, Debug)]
#[command(version, about = "Raster plot of a dense spike matrix stored as JSON")]
struct Args {
    /// The JSON spike matrix, one row per neuron (see --time-major)
    #[arg(short, long)]
    input: PathBuf,
    /// The output image, .svg
    #[arg(short, long)]
    output: PathBuf,
    /// The duration of one time step
    #[arg(long, default_value_t = DEFAULT_DT, allow_negative_numbers = true)]
    dt: f64,
    /// The color of the ticks, as #rrggbb
    #[arg(long, default_value = "#9a9a9a")]
    color: Color,
    /// The input has one row per time step instead of one row per neuron
    #[arg(long)]
    time_major: bool,
    /// The image width, in pixels
    #[arg(long, default_value = "1024")]
    width: u32,
    /// The image height, in pixels
    #[arg(long, default_value = "768")]
    height: u32,
    /// The width of the ticks, in pixels
    #[arg(long, default_value = "1")]
    line_width: u32,
    /// An optional title above the plot
    #[arg(long)]
    caption: Option<String>,
    /// Also save the drawn figure (ticks, limits and labels) as JSON
    #[arg(long)]
    figure_json: Option<PathBuf>,
    /// The log level, one of: off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
    /// Also write the logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(args: &Args) -> Result<(), RasterError> {
    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut config = Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
    let mut root = Root::builder().appender("stderr");

    if let Some(log_file) = &args.log_file {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(log_file)?;
        config = config.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let config = config
        .build(root.build(args.log_level))
        .map_err(|e| RasterError::InvalidParameter(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| RasterError::InvalidParameter(e.to_string()))?;
    Ok(())
}

fn run(args: &Args) -> Result<(), RasterError> {
    let layout = if args.time_major {
        Layout::TimeMajor
    } else {
        Layout::NeuronMajor
    };
    let spikes = read_spike_matrix(&args.input, layout)?;
    log::info!(
        "Loaded {} neurons over {} steps with {} spikes from {}",
        spikes.num_neurons(),
        spikes.num_steps(),
        spikes.num_spikes(),
        args.input.display()
    );

    let options = RasterOptions::default()
        .with_dt(args.dt)
        .with_color(args.color);
    let mut figure = Figure::new();
    rasterplot(&spikes, &options, &mut figure)?;

    if let Some(path) = &args.figure_json {
        write_figure(path, &figure)?;
    }

    let render_options = RenderOptions {
        width: args.width,
        height: args.height,
        line_width: args.line_width,
        caption: args.caption.clone(),
    };
    render_to_file(&figure, &args.output, &render_options)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
