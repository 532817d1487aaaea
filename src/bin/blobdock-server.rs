//! Development object-store server.
//!
//! Implements the wire contract the blobdock client speaks: paginated flat
//! listing, pathname-addressed PUT uploads, batch delete by URL, and public
//! blob fetch. Used by the integration tests and for local development; not a
//! production backend.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Path, Query, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use clap::Parser;
use tokio::sync::RwLock;

#[path = "blobdock_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "blobdock_server/state.rs"]
mod state;
use self::state::*;
#[path = "blobdock_server/handlers.rs"]
mod handlers;
use self::handlers::*;

#[derive(Parser)]
#[command(name = "blobdock-server")]
#[command(about = "Blobdock object store (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Data directory for blob bytes and the metadata index
    #[arg(long, default_value = "./blobdock-data")]
    data_dir: PathBuf,

    /// Development bearer token
    #[arg(long, default_value = "dev")]
    dev_token: String,

    /// Server-side page size clamp for listings
    #[arg(long, default_value_t = 1000)]
    max_page: usize,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("blobdock-server listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    let state = Arc::new(AppState {
        data_dir: args.data_dir.clone(),
        public_base: format!("http://{}", local_addr),
        token: args.dev_token.clone(),
        max_page: args.max_page.max(1),
        objects: RwLock::new(load_index(&args.data_dir).context("load index")?),
    });

    let authed = Router::new()
        .route("/store", get(list_objects))
        .route("/store/delete", post(delete_objects))
        .route("/store/*pathname", put(put_object))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/b/*pathname", get(get_blob))
        .merge(authed)
        .with_state(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let expected = format!("Bearer {}", state.token);
    let ok = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false);
    if !ok {
        return unauthorized();
    }
    next.run(req).await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
