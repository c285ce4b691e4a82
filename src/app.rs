//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to the command handlers.

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

use crate::commands::{self, DemoOptions, RenderOptions};
use crate::logging;

/// Animated sine-wave visualization driven by a stream of amplitude samples
#[derive(Parser)]
#[command(name = "waveview")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "Animated sine-wave visualization driven by a stream of amplitude samples.\n\nDEFAULT COMMAND:\n    If no command is specified, 'demo' is used by default.\n\nEXAMPLES:\n    # Animate a generated signal\n    $ waveview\n\n    # Animate amplitudes produced by another program, one integer per line\n    $ producer | waveview --stdin\n\n    # Print the geometry of one frame\n    $ waveview render --width 100 --height 90 --samples 30,20,10\n\nKEYS:\n    Space pause/resume, +/- speed, Up/Down height, p peak wave, q/Esc quit.\n    Sending SIGUSR1 also pauses and resumes the animation.")]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/waveview/waveview.toml\n    Logs:               ~/.local/state/waveview/waveview.log.*"
)]
struct Cli {
    #[command(flatten)]
    demo: DemoArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Height and speed levels overriding the configuration file.
#[derive(Args, Debug, Clone, Default)]
struct LevelArgs {
    /// Wave height level (amplitude = level * 20, above 10 clamps to 200)
    #[arg(long, value_name = "LEVEL", allow_negative_numbers = true)]
    height_level: Option<i32>,

    /// Wave speed level (phase step = level / 8, above 10 uses 0.25)
    #[arg(long, value_name = "LEVEL", allow_negative_numbers = true)]
    speed_level: Option<i32>,
}

#[derive(Args, Debug, Clone, Default)]
struct DemoArgs {
    /// Read amplitude samples from stdin, one integer per line
    #[arg(long)]
    stdin: bool,

    #[command(flatten)]
    levels: LevelArgs,
}

impl From<DemoArgs> for DemoOptions {
    fn from(args: DemoArgs) -> Self {
        DemoOptions {
            stdin: args.stdin,
            height_level: args.levels.height_level,
            speed_level: args.levels.speed_level,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the animated wave in the terminal (default)
    ///
    /// Space pauses, +/- change speed, Up/Down change height, p toggles the
    /// peak wave, q or Escape quits.
    #[command(visible_alias = "d")]
    Demo(DemoArgs),

    /// Print the points of one rendered frame
    ///
    /// Samples are fed in the order given, so the last one is drawn at the
    /// left edge. Output is one point per line: path, x, y.
    Render {
        /// Surface width in pixels
        #[arg(long, default_value_t = 400)]
        width: u32,

        /// Surface height in pixels
        #[arg(long, default_value_t = 240)]
        height: u32,

        /// Comma separated amplitude samples, negative values allowed
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        samples: Vec<i32>,

        /// Number of animation ticks to apply before rendering
        #[arg(long, default_value_t = 0)]
        ticks: u32,

        /// Also print the peak wave
        #[arg(long)]
        peak: bool,

        #[command(flatten)]
        levels: LevelArgs,
    },

    /// Open configuration file in your preferred editor
    ///
    /// Writes the default configuration first if none exists.
    #[command(visible_alias = "c")]
    Config,

    /// Show recent log entries
    Logs,

    /// Generate shell completion script
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the application based on command-line arguments.
///
/// # Errors
/// - If logging initialization fails
/// - If command execution fails
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that neither log nor read the configuration
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            generate(*shell, &mut Cli::command(), "waveview", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::Logs) => return commands::handle_logs(),
        _ => {}
    }

    logging::init_logging()?;

    match cli.command {
        None => commands::handle_demo(cli.demo.into()).await?,
        Some(Commands::Demo(args)) => commands::handle_demo(args.into()).await?,
        Some(Commands::Render {
            width,
            height,
            samples,
            ticks,
            peak,
            levels,
        }) => commands::handle_render(RenderOptions {
            width,
            height,
            samples,
            ticks,
            peak,
            height_level: levels.height_level,
            speed_level: levels.speed_level,
        })?,
        Some(Commands::Config) => commands::handle_config()?,
        Some(Commands::Completions { .. }) | Some(Commands::Logs) => {
            unreachable!("These commands are handled earlier")
        }
    }

    Ok(())
}
