//! `peercache` node: serves one group to its peers and, optionally, to clients
use clap::Parser;
use eyre::WrapErr;
use peercache_cache::{
    serve, GroupBuilder, GroupRegistry, HttpPool, PeerCacheConfig, PeerCacheConfigLoader,
    PeerPicker,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod demo;

#[derive(Parser, Debug)]
#[command(name = "peercache")]
#[command(author, version, about = "Distributed read-through cache node", long_about = None)]
struct Cli {
    /// Host this node is reachable on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for peer traffic
    #[arg(short, long, default_value_t = 8001)]
    port: u16,

    /// Every node's URL, including this one (comma separated)
    #[arg(long, value_delimiter = ',')]
    peers: Vec<String>,

    /// Also serve the client API on this port
    #[arg(long)]
    api: Option<u16>,

    /// Name of the group to serve
    #[arg(short, long, default_value = "scores")]
    group: String,

    /// Local cache budget in bytes (overrides PEERCACHE_CACHE_BYTES)
    #[arg(long)]
    cache_bytes: Option<u64>,

    /// Virtual nodes per peer (overrides PEERCACHE_REPLICAS)
    #[arg(long)]
    replicas: Option<usize>,
}

impl Cli {
    fn self_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Configured peers, or just this node when none were given
    fn peer_urls(&self) -> Vec<String> {
        if self.peers.is_empty() {
            vec![self.self_url()]
        } else {
            self.peers.clone()
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PeerCacheConfigLoader::load().wrap_err("loading configuration")?;
    let config = PeerCacheConfigLoader::apply_cli_args(config, cli.cache_bytes, cli.replicas)?;

    run(cli, config).await
}

async fn run(cli: Cli, config: PeerCacheConfig) -> eyre::Result<()> {
    let registry = GroupRegistry::global().clone();
    let group = GroupBuilder::new(cli.group.as_str())
        .cache_bytes(config.cache_bytes)
        .getter(Arc::new(demo::ScoresDb::new()))
        .build_in(&registry)?;

    let self_url = cli.self_url();
    let pool = Arc::new(HttpPool::new(self_url.clone(), &config)?);
    pool.set_peers(cli.peer_urls())?;
    group.register_peers(Arc::clone(&pool) as Arc<dyn PeerPicker>)?;

    let listener = TcpListener::bind((cli.host.as_str(), cli.port))
        .await
        .wrap_err_with(|| format!("binding peer port {}", cli.port))?;
    info!(%self_url, group = %cli.group, peers = ?pool.peers(), "peercache node starting");
    let peer_server = tokio::spawn(serve(listener, pool.router(registry), shutdown_signal()));

    let api_server = match cli.api {
        Some(port) => {
            let listener = TcpListener::bind((cli.host.as_str(), port))
                .await
                .wrap_err_with(|| format!("binding api port {port}"))?;
            info!(url = %format!("http://{}:{port}/api", cli.host), "api front end enabled");
            Some(tokio::spawn(serve(listener, api::router(group), shutdown_signal())))
        }
        None => None,
    };

    peer_server.await??;
    if let Some(api_server) = api_server {
        api_server.await??;
    }

    info!("peercache node stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
