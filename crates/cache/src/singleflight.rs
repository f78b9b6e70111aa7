//! Duplicate call suppression
//!
//! Concurrent callers asking for the same key share a single execution of
//! the load function. The first caller runs it on its own task; everyone
//! arriving while it is in flight waits for, and receives a clone of, that
//! one result. Once the call finishes its record is dropped, so a later
//! caller starts a new call.

use parking_lot::Mutex;
use peercache_core::{Error, Result};
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::watch;

type Outcome<T> = Option<Result<T>>;

/// Per-key registry of in-flight calls
pub struct SingleFlight<T> {
    calls: Mutex<HashMap<String, watch::Receiver<Outcome<T>>>>,
}

enum Role<T> {
    Leader(watch::Sender<Outcome<T>>),
    Waiter(watch::Receiver<Outcome<T>>),
}

/// Removes the call record when the leader finishes or is dropped.
struct CallGuard<'a, T> {
    calls: &'a Mutex<HashMap<String, watch::Receiver<Outcome<T>>>>,
    key: &'a str,
}

impl<T> Drop for CallGuard<'_, T> {
    fn drop(&mut self) {
        self.calls.lock().remove(self.key);
    }
}

impl<T: Clone> SingleFlight<T> {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` for `key` unless a call for `key` is already in flight, in
    /// which case wait for that call and return its result.
    pub async fn work<F, Fut>(&self, key: &str, f: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let role = {
            let mut calls = self.calls.lock();
            match calls.get(key) {
                Some(rx) => Role::Waiter(rx.clone()),
                None => {
                    let (tx, rx) = watch::channel(None);
                    calls.insert(key.to_string(), rx);
                    Role::Leader(tx)
                }
            }
        };

        match role {
            Role::Waiter(mut rx) => {
                tracing::trace!(key, "joining in-flight call");
                let outcome = match rx.wait_for(Option::is_some).await {
                    Ok(outcome) => (*outcome).clone(),
                    Err(_) => None,
                };
                outcome.unwrap_or_else(|| {
                    Err(Error::InFlightAbandoned {
                        key: key.to_string(),
                    })
                })
            }
            Role::Leader(tx) => {
                let guard = CallGuard {
                    calls: &self.calls,
                    key,
                };
                let result = f().await;
                tx.send_replace(Some(result.clone()));
                drop(guard);
                result
            }
        }
    }

    /// Number of calls currently in flight
    pub fn in_flight(&self) -> usize {
        self.calls.lock().len()
    }
}

impl<T: Clone> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}
