use common::config::CONFIG;
use common::logging::setup_logging;
use common::persistence::init_pg_pool;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[tokio::main]
async fn main() {
    setup_logging("api");
    info!("starting app");
    let cancellation_token = CancellationToken::new();

    let pool = init_pg_pool();
    let app = api::router(pool);
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", CONFIG.http.host, CONFIG.http.port))
            .await
            .expect("failed to bind");
    let app_done = serve(listener, app, cancellation_token.clone());

    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl c event");
    info!("exiting");
    cancellation_token.cancel();
    app_done.notified().await;
    info!("exited");
}

fn serve(
    listener: tokio::net::TcpListener,
    app: axum::Router,
    cancellation_token: CancellationToken,
) -> Arc<Notify> {
    let done = Arc::new(Notify::new());

    tokio::spawn({
        let done = done.clone();
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    cancellation_token.cancelled().await;
                    info!("gracefully shutting down app");
                    done.notify_waiters();
                })
                .await
                .expect("failed to serve");
        }
    });

    done
}
