use blogsite::application::{BuildOptions, BuildSiteService, ConfigService, ListTagsService};
use blogsite::cli::{format_build_report, format_tag_list, Cli, Commands};
use blogsite::domain::BuildMode;
use blogsite::error::BlogError;
use blogsite::infrastructure::FileSystemRepository;
use clap::Parser;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blogsite=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), BlogError> {
    let repo = match cli.root {
        Some(root) => FileSystemRepository::new(root),
        None => FileSystemRepository::discover()?,
    };

    match cli.command {
        Commands::Build { mode } => {
            // --mode wins over APP_ENV
            let mode = match mode {
                Some(m) => BuildMode::from_str(&m).map_err(BlogError::Config)?,
                None => BuildMode::from_env(),
            };

            let report = BuildSiteService::new(repo).execute(BuildOptions { mode })?;
            print!("{}", format_build_report(&report));
            Ok(())
        }
        Commands::Tags => {
            let tags = ListTagsService::new(repo).execute()?;
            println!("{}", format_tag_list(&tags).trim_end());
            Ok(())
        }
        Commands::Config { key } => {
            let service = ConfigService::new(repo);
            match key {
                Some(k) => println!("{}", service.get(&k)?),
                None => print!("{}", service.list()?.to_toml()?),
            }
            Ok(())
        }
    }
}
