use anyhow::Context;
use clap::Parser;
use nf_cli::{Cli, init_logging, run};
use nf_domain::config::SiteConfig;
use nf_kernel::config::load_config;

#[nf_runtime::main(event_loop)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg: SiteConfig =
        load_config(cli.config.as_ref()).context("Critical: Configuration is malformed")?;

    let _log = init_logging(&cfg.logging, cli.verbose)?;

    let mut stdout = std::io::stdout().lock();
    run(&cli, &cfg, &mut stdout).await
}
