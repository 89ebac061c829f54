use olm_packagemanifest::cli::{Cli, CliError};
use olm_packagemanifest::k8s::client::SyncK8sClient;
use olm_packagemanifest::logging::Logging;
use std::sync::Arc;
use tracing::{debug, error};

fn main() {
    if let Err(err) = run() {
        error!("{}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::init();
    let config = cli.load_config()?;

    Logging::try_init()?;
    debug!("starting with config {:?}", config);

    let runtime = Arc::new(
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?,
    );
    let k8s_client = Arc::new(SyncK8sClient::try_new(runtime, &config.k8s)?);

    let output = cli.action().run(k8s_client)?;
    print!("{}", output);

    Ok(())
}
