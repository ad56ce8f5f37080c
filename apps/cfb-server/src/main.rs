use std::net::SocketAddr;

use tracing::{error, info};

mod access_log;
mod api;
mod app_state;
mod bootstrap;
mod openapi;
mod responses;
mod router;

pub(crate) use app_state::AppState;

#[tokio::main]
async fn main() {
    cfb_otel::init();

    let loaded = match cfb_core::load_effective() {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    };
    let http_cfg = match bootstrap::http_config(&loaded.config.server) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };
    let ctx = match cfb_core::AppContext::from_config(loaded.config) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let app = bootstrap::attach_global_layers(bootstrap::attach_http_layers(
        bootstrap::build_app(ctx),
        http_cfg.concurrency_limit,
    ));

    let listener = match tokio::net::TcpListener::bind(http_cfg.addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("error: failed to bind {}: {err}", http_cfg.addr);
            std::process::exit(2);
        }
    };
    info!(
        addr = %http_cfg.addr,
        config = loaded.source.as_deref().unwrap_or("defaults"),
        "campus feedback board listening"
    );

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal());

    if let Err(err) = server.await {
        error!("http server exited with error: {err}");
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                error!("failed to install SIGTERM handler: {err}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("shutdown signal received");
}
