use std::{env, process::exit};

use pong_responder::{config, Config};
use spdlog::prelude::*;

#[tokio::main]
async fn main() {
    let verbose = config::is_verbose(env::var_os(config::VERBOSE_ENV_VAR).as_deref());
    if cfg!(debug_assertions) || verbose {
        spdlog::default_logger().set_level_filter(LevelFilter::All);
    }

    info!(
        "{} v{} reading events from stdin",
        config::PACKAGE.name,
        config::PACKAGE.version
    );

    let result = match load_config().await {
        Ok(cfg) => pong_responder::run(cfg).await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        error!("exited with err: {err}");
        exit(1);
    }
}

async fn load_config() -> anyhow::Result<Config> {
    match env::var_os(config::CONFIG_PATH_ENV_VAR) {
        Some(path) => {
            info!("loading config from '{}'", path.to_string_lossy());
            Config::load(path).await
        }
        None => {
            debug!("`{}` is not set", config::CONFIG_PATH_ENV_VAR);
            Ok(Config::default())
        }
    }
}
