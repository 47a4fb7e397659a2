use anyhow::Context;
use clap::Parser;
use cli::{Commands, GlobalArgs, LogLevel};
use commands::{materialize::materialize, resolve::resolve};
use env_logger::Target;
use log::LevelFilter;
use promconf_core::kubernetes::operations::create_local_client;

use crate::cli::Cli;

mod cli;
mod commands;
mod output;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    configure_logging(&cli.global_args);

    let client = create_local_client(&cli.global_args.kube_config, &cli.global_args.kube_context)
        .await
        .context("Couldn't initialize k8s API client!")?;

    match cli.command {
        Commands::Materialize(args) => materialize(cli.global_args, args, client).await?,
        Commands::Resolve(args) => resolve(cli.global_args, args, client).await?,
    }

    Ok(())
}

fn configure_logging(global_args: &GlobalArgs) {
    let log_level = global_args.get_log_level();
    let mut logger = env_logger::builder();

    logger
        .format_timestamp(None)
        .format_module_path(matches!(log_level, LogLevel::Trace))
        .format_target(false)
        .format_level(false)
        .target(Target::Stderr);

    match log_level {
        LogLevel::Normal => {
            logger
                .filter(Some("promconf"), LevelFilter::Info)
                .filter(Some("promconf_core"), LevelFilter::Info);
        }
        LogLevel::Verbose => {
            logger
                .filter(Some("promconf"), LevelFilter::Debug)
                .filter(Some("promconf_core"), LevelFilter::Debug);
        }
        LogLevel::Trace => {
            logger.filter(None, LevelFilter::Debug);
        }
    }

    logger.init();
}
