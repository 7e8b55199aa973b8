use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use community_jobs::config::Config;
use community_jobs::jobs;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with reduced verbosity
    let env_filter = EnvFilter::from_default_env()
        .add_directive("community_jobs=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("sqlx=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    let job_name = match std::env::args().nth(1) {
        Some(name) => name,
        None => {
            eprintln!("usage: jobs <{}>", jobs::JOB_NAMES.join("|"));
            std::process::exit(2);
        }
    };

    let config = Config::load()?;
    info!("Starting job '{}'", job_name);

    match jobs::run(&job_name, &config).await {
        Ok(()) => {
            info!("Job '{}' completed", job_name);
            Ok(())
        }
        Err(e) => {
            error!("Job '{}' failed: {}", job_name, e);
            Err(e.into())
        }
    }
}
