//! Two-node loopback tests for the HTTP peer transport

use peercache_cache::{
    serve, ByteView, Error, Group, GroupBuilder, GroupRegistry, HashRing, HttpPool,
    PeerCacheConfig, PeerGetter, PeerPicker, Request, Result,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

struct Node {
    url: String,
    group: Arc<Group>,
    loads: Arc<AtomicUsize>,
}

impl Node {
    fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    async fn get(&self, key: &str) -> Result<ByteView> {
        self.group.get(key).await
    }
}

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    (listener, url)
}

/// Start a node whose loader answers `"{name}:{key}"` and fails on "missing"
async fn start_node(name: &'static str, listener: TcpListener, url: String, peers: &[String]) -> Node {
    let registry = GroupRegistry::new();
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);

    let group = GroupBuilder::new("scores")
        .cache_bytes(2 << 10)
        .getter_fn(move |key: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            if key == "missing" {
                return Err(Error::loader(key, format!("{key} not exist")));
            }
            Ok(format!("{name}:{key}").into_bytes())
        })
        .build_in(&registry)
        .unwrap();

    let pool = Arc::new(HttpPool::new(url.clone(), &PeerCacheConfig::default()).unwrap());
    pool.set_peers(peers).unwrap();
    group.register_peers(Arc::clone(&pool) as Arc<dyn PeerPicker>).unwrap();

    let router = pool.router(registry);
    tokio::spawn(serve(listener, router, std::future::pending()));

    Node { url, group, loads }
}

/// First key of the form `key-N` that the ring assigns to `owner`
fn key_owned_by(owner: &str, peers: &[String]) -> String {
    let mut ring = HashRing::new(PeerCacheConfig::default().replicas);
    ring.add(peers);
    (0..10_000)
        .map(|i| format!("key-{i}"))
        .find(|key| ring.get(key) == Some(owner))
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_remote_key_is_loaded_by_its_owner() {
    let (listener_a, url_a) = bind().await;
    let (listener_b, url_b) = bind().await;
    let peers = vec![url_a.clone(), url_b.clone()];

    let a = start_node("a", listener_a, url_a, &peers).await;
    let b = start_node("b", listener_b, url_b, &peers).await;

    let remote = key_owned_by(&b.url, &peers);
    let value = a.get(&remote).await.unwrap();
    assert_eq!(value.as_string(), format!("b:{remote}"));
    assert_eq!(a.loads(), 0);
    assert_eq!(b.loads(), 1);

    // The owner cached it; the requester did not
    let _ = a.get(&remote).await.unwrap();
    assert_eq!(b.loads(), 1);
    assert_eq!(a.group.cache().items(), 0);
    assert_eq!(b.group.cache().items(), 1);

    let local = key_owned_by(&a.url, &peers);
    assert_eq!(a.get(&local).await.unwrap().as_string(), format!("a:{local}"));
    assert_eq!(a.loads(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unreachable_peer_falls_back_to_local() {
    let (listener_a, url_a) = bind().await;
    let (dead_listener, dead_url) = bind().await;
    drop(dead_listener);
    let peers = vec![url_a.clone(), dead_url.clone()];

    let a = start_node("a", listener_a, url_a, &peers).await;

    let key = key_owned_by(&dead_url, &peers);
    assert_eq!(a.get(&key).await.unwrap().as_string(), format!("a:{key}"));
    assert_eq!(a.loads(), 1);
    assert_eq!(a.group.stats().peer_errors, 1);

    // Cached after the fallback
    let _ = a.get(&key).await.unwrap();
    assert_eq!(a.loads(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server_status_codes() {
    let (listener, url) = bind().await;
    let node = start_node("a", listener, url.clone(), &[url.clone()]).await;

    let client = reqwest::Client::new();
    let ok = client
        .get(format!("{url}/_peercache/scores/Tom"))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), reqwest::StatusCode::OK);
    let body = ok.bytes().await.unwrap();
    let decoded = peercache_cache::Response::decode(&body).unwrap();
    assert_eq!(decoded.value, b"a:Tom".to_vec());

    let unknown = client
        .get(format!("{url}/_peercache/nope/Tom"))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), reqwest::StatusCode::NOT_FOUND);

    let failed = client
        .get(format!("{url}/_peercache/scores/missing"))
        .send()
        .await
        .unwrap();
    assert_eq!(failed.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(failed.text().await.unwrap(), "missing not exist");

    assert_eq!(node.loads(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_getter_reports_peer_errors() {
    let (listener, url) = bind().await;
    let _node = start_node("a", listener, url.clone(), &[url.clone()]).await;

    let getter =
        peercache_cache::HttpGetter::new(&url, "/_peercache/", reqwest::Client::new()).unwrap();

    let ok = getter.get(&Request::new("scores", "a b/c")).await.unwrap();
    assert_eq!(ok.value, b"a:a b/c".to_vec());

    let err = getter.get(&Request::new("scores", "missing")).await.unwrap_err();
    assert!(matches!(err, Error::Peer { .. }));
    assert!(err.is_transient());
}
