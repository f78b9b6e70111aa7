//! Default HTTP transport between peers
//!
//! Every node serves `GET {base_path}{group}/{key}` and answers with the
//! bincode-encoded [`Response`](crate::Response). [`HttpPool`] routes keys
//! to peers with a consistent-hash ring and fetches through [`HttpGetter`].

mod client;
mod pool;
mod server;

pub use client::HttpGetter;
pub use pool::HttpPool;
pub use server::serve;
