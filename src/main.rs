use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::PathBuf;

use procfile::build::{build, BuildContext};
use procfile::config::{resolve_stack_id, OutputTarget};
use procfile::detect::{detect, DetectContext};
use procfile::plan::load_plan;
use procfile::platform::Platform;
use procfile::result::{write_result, OutputFormat};

/// Exit code signalling that detection did not pass
const DETECT_FAIL_CODE: i32 = 100;

/// Buildpack that contributes launch processes declared in a Procfile
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect declared process types and write the build plan
    Detect {
        /// Application directory containing the Procfile
        #[arg(short, long, default_value = ".")]
        app: PathBuf,

        /// Platform directory holding user-provided environment
        #[arg(long)]
        platform: PathBuf,

        /// Path the detect plan is written to
        #[arg(long)]
        plan: PathBuf,
    },

    /// Turn the resolved build plan into launch processes
    Build {
        /// Buildpack plan handed over by the lifecycle
        #[arg(long)]
        plan: PathBuf,

        /// Layers directory; launch.toml is written here
        #[arg(short, long, default_value = ".")]
        layers: PathBuf,

        /// Stack identifier (defaults to $CNB_STACK_ID)
        #[arg(long)]
        stack: Option<String>,

        /// Output format of the build result
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Toml)]
        format: OutputFormat,

        /// Output path, or `-` for stdout (defaults to <layers>/launch.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match args.command {
        Command::Detect { app, platform, plan } => run_detect(app, platform, plan),
        Command::Build { plan, layers, stack, format, output } => {
            run_build(plan, layers, stack, format, output)
        }
    }
}

fn run_detect(app: PathBuf, platform_dir: PathBuf, plan_path: PathBuf) -> Result<()> {
    info!("Application directory: {:?}", app);

    let platform = Platform::load(&platform_dir)?;
    let result = detect(&DetectContext {
        application_dir: app,
        platform,
    })?;

    if !result.pass {
        warn!("No Procfile or {} found", procfile::procfile::DEFAULT_PROCESS_ENV);
        std::process::exit(DETECT_FAIL_CODE);
    }

    let rendered = toml::to_string(&result.plan).wrap_err("Failed to encode detect plan")?;
    fs::write(&plan_path, rendered)
        .wrap_err_with(|| format!("Failed to write detect plan '{}'", plan_path.display()))?;

    info!("Detect plan written to: {:?}", plan_path);
    Ok(())
}

fn run_build(
    plan_path: PathBuf,
    layers: PathBuf,
    stack: Option<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let plan = load_plan(&plan_path)?;
    let context = BuildContext {
        plan,
        stack_id: resolve_stack_id(stack.as_deref()),
    };

    let result = build(&context).wrap_err("Failed to create launch processes")?;
    if result.is_empty() {
        info!("No process types to contribute");
    }

    match OutputTarget::resolve(output.as_deref(), &layers) {
        OutputTarget::Stdout => write_result(&result, format, io::stdout().lock())?,
        OutputTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .wrap_err_with(|| format!("Failed to create directory '{}'", parent.display()))?;
            }
            let file = fs::File::create(&path)
                .wrap_err_with(|| format!("Failed to create '{}'", path.display()))?;
            write_result(&result, format, io::BufWriter::new(file))?;
            info!("Launch metadata written to: {:?}", path);
        }
    }

    Ok(())
}
