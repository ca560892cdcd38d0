//! application entry point

use crate::server::model::config::{load_dotenv, ServerConfig};
use log::info;
use std::env;
use std::path::Path;

mod server;

const CONFIG_LOADING_FAILED_MSG: &str = "failed to load server config, aborting";

#[actix_web::main()]
async fn main() -> std::io::Result<()> {
    // bootstrap
    // a. env, dotenv files are optional
    let env = load_dotenv(Path::new("."));

    // b. logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // c. run app
    let config = ServerConfig::from_lookup(|key| env::var(key).ok())
        .map_err(|e| std::io::Error::other(e.context(CONFIG_LOADING_FAILED_MSG)))?;

    info!("App is starting in env={}", env);

    server::run(config).await
}
