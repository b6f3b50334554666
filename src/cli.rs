use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

mod driver;
mod menu;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use driver::{Driver, prompt_for_path};
use planner::{Config, domain::CONFIG_FILE};
use terminal::Palette;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// The course catalogue to load. If omitted you are asked for one.
    path: Option<PathBuf>,
}

impl Cli {
    /// Loads the configuration, picks the catalogue file and runs the menu.
    ///
    /// # Errors
    ///
    /// Fails if the catalogue file can't be opened, or if reading the terminal
    /// or writing to it fails.
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = Config::load_or_default(Path::new(CONFIG_FILE));

        let mut input = io::stdin().lock();
        let mut output = io::stdout().lock();

        let path = match self.path {
            Some(path) => path,
            None => prompt_for_path(&mut input, &mut output, config.data_file())?,
        };
        check_accessible(&path)?;

        Driver::new(path, config, input, output, Palette::detect()).run()?;
        Ok(())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout belongs to the menu
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Fails if the catalogue file can't be opened.
#[instrument(level = "debug")]
fn check_accessible(path: &Path) -> anyhow::Result<()> {
    File::open(path).with_context(|| format!("File {} is not accessible", path.display()))?;
    Ok(())
}
