use clap::{ArgAction, Parser, Subcommand};
use nuxtify::config::{self, ConvertConfig, Variant};
use nuxtify::output;
use nuxtify::walk::{self, WalkMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nuxtify")]
#[command(about = "Convert static HTML documentation into Nuxt page components")]
#[command(long_about = "\
Convert static HTML documentation into Nuxt page components

Every .html file under the source directory becomes a .vue component at the
same relative path under the output directory. Internal links are rewritten
into router links and each page gets a breadcrumb trail:

  site/                          pages/
  ├── index.html            →    ├── index.vue        Home
  └── docs/                      └── docs/
      ├── index.html        →        ├── index.vue    Home / docs
      └── guide.html        →        └── guide.vue    Home / docs / guide

Settings are read from nuxtify.toml in the working directory (or --config).
Run 'nuxtify gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (default: nuxtify.toml, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// HTML source directory (overrides `source`)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory (overrides `destination`)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Output variant (overrides `variant`)
    #[arg(long, value_enum, global = true)]
    variant: Option<Variant>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert every page and write the component files
    Convert,
    /// Convert every page in memory without writing anything
    Check,
    /// Print a stock nuxtify.toml with all options documented
    GenConfig,
}

impl Cli {
    fn init_logging(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };
        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }

    /// Resolve the config file, then apply flag overrides.
    fn resolve_config(&self) -> Result<ConvertConfig, config::ConfigError> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILE));
        if self.config.is_some() && !path.exists() {
            return Err(config::ConfigError::Validation(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let mut config = config::load_config(&path)?;
        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if let Some(output) = &self.output {
            config.destination = output.clone();
        }
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli.init_logging();

    match cli.command {
        Command::Convert => {
            let config = cli.resolve_config()?;
            println!(
                "==> Converting {} → {}",
                config.source.display(),
                config.destination.display()
            );
            let report = walk::convert_tree(&config, WalkMode::Write)?;
            output::print_convert_output(&report, false);
        }
        Command::Check => {
            let config = cli.resolve_config()?;
            println!("==> Checking {}", config.source.display());
            let report = walk::convert_tree(&config, WalkMode::DryRun)?;
            output::print_convert_output(&report, true);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
