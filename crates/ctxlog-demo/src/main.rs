//! Demo: env_logger as the backend, ctxlog as the call-site API
//!
//! ```text
//! cargo run -p ctxlog-demo
//! CTXLOG_LEVEL=warn cargo run -p ctxlog-demo
//! ```

use std::sync::Arc;

use ctxlog_core::config::{ConfigResult, ENV_LEVEL};
use ctxlog_core::{Context, Level, LogConfig};
use ctxlog_log::LogHandler;

fn main() -> ConfigResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let mut config = LogConfig::load()?;
    if std::env::var(ENV_LEVEL).is_err() {
        config.level = Level::DEBUG;
    }

    let handler = LogHandler::global().with_min_level(config.level);
    let ctx = ctxlog_core::set_logger(&Context::background(), Arc::new(handler));

    ctxlog_core::info!(&ctx, "Hello, World!");
    ctxlog_core::debug!(&ctx, "Hello, World!", "key", "value", "key2", 123);

    for id in ["a1", "b2"] {
        handle_request(&ctxlog_core::with(&ctx, &["req_id".into(), id.into()]));
    }

    // The backend is still usable directly.
    log::info!("Hello, World!");
    Ok(())
}

fn handle_request(ctx: &Context) {
    ctxlog_core::info!(ctx, "request started");
    let ctx = ctxlog_core::with_group(ctx, "db");
    ctxlog_core::warn!(&ctx, "slow query", "rows", 12u32, "elapsed_ms", 250);
}
