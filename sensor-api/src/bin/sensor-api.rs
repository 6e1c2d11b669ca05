use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use sensor_api::{
    arguments::{AppConfig, ProgramArgs},
    build_app, SENSOR_API_TARGET,
};
use sensor_database::{memory_database::MemoryDatabase, postgrest_database::PostgrestDatabase};
use std::{error::Error, net::SocketAddr, sync::Arc};
use tracing::{event, Level};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .pretty()
        .init();

    let program_opts = ProgramArgs::parse();
    let app_config = AppConfig::from(&program_opts);

    event!(
        target: SENSOR_API_TARGET,
        Level::INFO,
        "starting with {program_opts}"
    );

    let app = match PostgrestDatabase::from_args(&program_opts.database_opts) {
        Some(database) => {
            event!(
                target: SENSOR_API_TARGET,
                Level::INFO,
                "storing measurements in {database:?}"
            );
            build_app(Arc::new(database), app_config)
        }
        None => {
            event!(
                target: SENSOR_API_TARGET,
                Level::WARN,
                "no SUPABASE_URL configured, measurements are kept in memory"
            );
            build_app(Arc::new(MemoryDatabase::default()), app_config)
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], program_opts.port));
    event!(target: SENSOR_API_TARGET, Level::INFO, "listening on {addr}");

    match program_opts.tls_files() {
        Some((cert_file, key_file)) => {
            let config = RustlsConfig::from_pem_file(cert_file, key_file).await?;
            axum_server::bind_rustls(addr, config)
                .serve(app.into_make_service())
                .await?
        }
        None => {
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await?
        }
    }

    Ok(())
}
