use formgate_app::app::App;
use formgate_app::config::AppConfig;
use std::env;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Install global log collector.
    tracing_subscriber::fmt::init();

    // Setup environment variables.
    let config_path = env::var("CONFIG_PATH").expect("env variable CONFIG_PATH should be set");

    let config: AppConfig = config::Config::builder()
        .add_source(config::File::with_name(&config_path))
        .build()
        .and_then(|c| c.try_deserialize())
        .unwrap_or_else(|err| {
            error!("{:?}", err);
            process::exit(1);
        });

    // Run the formgate service with the provided config.
    App { config }.start().await.unwrap_or_else(|err| {
        error!("{:?}", err);
        process::exit(1);
    });
}
