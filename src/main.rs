mod cli;
mod telemetry;

use anyhow::Context;
use churnverse_api::{run_evaluation, start_send_alerts_job, RunEvaluationUseCase};
use churnverse_infra::setup_context;
use clap::Parser;
use cli::{Cli, Commands};
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("churnverse".into(), "info".into());
    init_subscriber(subscriber);

    let cli = Cli::parse();
    let context = setup_context().await?;

    match cli.command {
        Commands::Run {
            date,
            warning_days,
            critical_days,
            dry_run,
        } => {
            let usecase = RunEvaluationUseCase {
                reference_date: date,
                warning_days,
                critical_days,
                dry_run,
            };
            let res = run_evaluation(usecase, &context)
                .await
                .context("Card inactivity check could not be started")?;
            println!("{}", res);
        }
        Commands::Schedule => {
            context
                .config
                .thresholds()
                .context("Invalid alert thresholds")?;
            let job = start_send_alerts_job(context);
            tokio::select! {
                res = job => res.context("Alerts job stopped unexpectedly")?,
                _ = tokio::signal::ctrl_c() => info!("Received shutdown signal, stopping alerts job"),
            }
        }
    }

    Ok(())
}
