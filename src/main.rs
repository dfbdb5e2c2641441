use clap::{Args, Parser, Subcommand, ValueEnum};
use matching_viewer::config::{load_config_or_default, Config, ConfigFormat};
use matching_viewer::logging::{self, LoggingConfig};
use matching_viewer::viewer::{FrameRenderer, InteractiveViewer, WindowFrontend};
use matching_viewer::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "matchview")]
#[command(about = "Step through point correspondences between two images")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer
    View {
        #[command(flatten)]
        inputs: Inputs,

        /// Show a single frame for the configured timeout and exit
        #[arg(long)]
        non_interactive: bool,

        /// Starting cursor (index of the last revealed correspondence)
        #[arg(long, allow_hyphen_values = true)]
        cursor: Option<i64>,
    },

    /// Render the frame for one cursor value to an image file
    Render {
        #[command(flatten)]
        inputs: Inputs,

        /// Index of the last revealed correspondence, -1 for none
        #[arg(long, allow_hyphen_values = true)]
        cursor: i64,

        /// Output image path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write the default configuration to a file
    InitConfig {
        /// Destination path
        path: PathBuf,

        /// File format; guessed from the extension when omitted
        #[arg(short, long)]
        format: Option<FormatArg>,
    },
}

#[derive(Args)]
struct Inputs {
    /// Path to the first image
    #[arg(long)]
    image0: PathBuf,

    /// Path to the second image
    #[arg(long)]
    image1: PathBuf,

    /// Matching file (JSON) with points, correspondences and energy
    #[arg(short, long)]
    matches: Option<PathBuf>,

    /// Generate this many random correspondences instead of reading a file
    #[arg(long, conflicts_with = "matches")]
    synthetic: Option<usize>,

    /// Seed for --synthetic
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Toml,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config_or_default(cli.config.as_deref());

    if cli.quiet {
        config.logging = LoggingConfig {
            log_directory: config.logging.log_directory.clone(),
            ..LoggingConfig::quiet()
        };
    } else if cli.verbose > 0 {
        let level = match cli.verbose {
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        config.logging = config.logging.clone().with_level(level);
    }
    let _log_guard = logging::init_logging(&config.logging)?;

    match cli.command {
        Commands::View { inputs, non_interactive, cursor } => {
            if non_interactive {
                config.viewer.interactive = false;
            }
            if cursor.is_some() {
                config.viewer.initial_cursor = cursor;
            }
            handle_view(&inputs, &config)?;
        }
        Commands::Render { inputs, cursor, output } => {
            handle_render(&inputs, &config, cursor, output)?;
        }
        Commands::InitConfig { path, format } => {
            handle_init_config(path, format)?;
        }
    }

    Ok(())
}

fn build_model(inputs: &Inputs, config: &Config) -> anyhow::Result<MatchingModel> {
    let image0 = load_image(&inputs.image0)?;
    let image1 = load_image(&inputs.image1)?;
    tracing::info!(
        "Images: {}x{} and {}x{}",
        image0.width(),
        image0.height(),
        image1.width(),
        image1.height()
    );

    let matching = match &inputs.matches {
        Some(path) => MatchingFile::load(path)?,
        None => synthesize(
            inputs.synthetic.unwrap_or(10),
            image0.dimensions(),
            image1.dimensions(),
            inputs.seed,
        ),
    };

    let mut model = MatchingModel::new();
    model.set_alpha(config.composite.alpha)?;
    model.set_images(image0, image1);
    matching.apply_to(&mut model)?;
    Ok(model)
}

fn handle_view(inputs: &Inputs, config: &Config) -> anyhow::Result<()> {
    let model = build_model(inputs, config)?;
    let (width, height) = model
        .align_image()
        .map(|image| image.dimensions())
        .ok_or_else(|| anyhow::anyhow!("Aligned view unavailable"))?;

    let mut viewer = InteractiveViewer::new(&config.drawing, &config.viewer)?;
    let mut frontend = WindowFrontend::open(&config.viewer, width, height)?;
    let state = viewer.run(&model, &mut frontend)?;

    println!(
        "Stopped at {}/{} correspondences after {} redraws",
        state.cursor() + 1,
        model.number_of_correspondences(),
        viewer.stats().redraws
    );
    Ok(())
}

fn handle_render(inputs: &Inputs, config: &Config, cursor: i64, output: PathBuf) -> anyhow::Result<()> {
    let model = build_model(inputs, config)?;
    let renderer =
        FrameRenderer::new(&config.drawing)?.with_cursor_convention(config.viewer.cursor_convention);
    let frame = renderer.render(&model, cursor)?;

    frame.image.save(&output)?;
    println!("{}", frame.caption);
    println!("Frame saved to {}", output.display());
    Ok(())
}

fn handle_init_config(path: PathBuf, format: Option<FormatArg>) -> anyhow::Result<()> {
    let format = match format {
        Some(FormatArg::Json) => ConfigFormat::Json,
        Some(FormatArg::Toml) => ConfigFormat::Toml,
        None => ConfigFormat::from_path(&path),
    };
    Config::default().save_to_file(&path, format)?;
    println!("Default configuration written to {}", path.display());
    Ok(())
}
