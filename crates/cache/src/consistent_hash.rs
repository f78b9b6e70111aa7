//! Consistent-hash ring mapping keys to peers
//!
//! Every real peer is placed on the ring `replicas` times. A key belongs to
//! the first virtual node whose hash is at or after the key's hash, wrapping
//! around to the start of the ring.

use std::collections::HashMap;

/// Hash function mapping bytes to a ring position
pub type HashFn = fn(&[u8]) -> u32;

/// Consistent-hash ring of peer identities.
///
/// Mutate during setup, then read; it carries no internal locking.
#[derive(Debug, Clone)]
pub struct HashRing {
    hash: HashFn,
    /// Virtual nodes per real peer
    replicas: usize,
    /// Sorted virtual node hashes
    keys: Vec<u32>,
    /// Virtual node hash to real peer
    owners: HashMap<u32, String>,
}

impl HashRing {
    /// Ring using CRC-32C over the key bytes
    pub fn new(replicas: usize) -> Self {
        Self::with_hasher(replicas, crc32c::crc32c)
    }

    pub fn with_hasher(replicas: usize, hash: HashFn) -> Self {
        Self {
            hash,
            replicas,
            keys: Vec::new(),
            owners: HashMap::new(),
        }
    }

    /// Add real peers, each under `replicas` virtual nodes
    pub fn add<I, S>(&mut self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for peer in peers {
            let peer = peer.as_ref();
            for replica in 0..self.replicas {
                let hash = (self.hash)(format!("{replica}{peer}").as_bytes());
                self.keys.push(hash);
                self.owners.insert(hash, peer.to_string());
            }
        }
        self.keys.sort_unstable();
        self.keys.dedup();
    }

    /// Peer owning `key`, or `None` when the ring is empty
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }

        let hash = (self.hash)(key.as_bytes());
        let idx = self.keys.partition_point(|&vnode| vnode < hash);
        let vnode = self.keys[idx % self.keys.len()];
        self.owners.get(&vnode).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of virtual nodes on the ring
    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Interprets the bytes as a decimal number so positions are predictable
    fn decimal(data: &[u8]) -> u32 {
        std::str::from_utf8(data)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    #[test]
    fn test_lookup_and_wraparound() {
        let mut ring = HashRing::with_hasher(3, decimal);

        // Virtual nodes: 2, 4, 6, 12, 14, 16, 22, 24, 26
        ring.add(["6", "4", "2"]);
        assert_eq!(ring.len(), 9);

        let cases = [("2", "2"), ("11", "2"), ("23", "4"), ("27", "2")];
        for (key, peer) in cases {
            assert_eq!(ring.get(key), Some(peer), "key {key}");
        }

        // Adds 8, 18, 28
        ring.add(["8"]);

        // 27 now maps to 8
        assert_eq!(ring.get("27"), Some("8"));
        assert_eq!(ring.get("11"), Some("2"));
    }

    #[test]
    fn test_exact_match_uses_that_node() {
        let mut ring = HashRing::with_hasher(1, decimal);
        ring.add(["5", "9"]);

        assert_eq!(ring.get("5"), Some("5"));
        assert_eq!(ring.get("6"), Some("9"));
        assert_eq!(ring.get("10"), Some("5"));
    }

    #[test]
    fn test_empty_ring() {
        let ring = HashRing::new(50);
        assert!(ring.is_empty());
        assert_eq!(ring.get("anything"), None);
    }

    #[test]
    fn test_deterministic_with_default_hash() {
        let peers = ["http://10.0.0.1:8001", "http://10.0.0.2:8001", "http://10.0.0.3:8001"];
        let mut first = HashRing::new(50);
        first.add(peers);
        let mut second = HashRing::new(50);
        second.add(peers.iter().rev());

        for i in 0..200 {
            let key = format!("key-{i}");
            let owner = first.get(&key);
            assert!(owner.is_some());
            assert_eq!(owner, first.get(&key));
            assert_eq!(owner, second.get(&key));
        }
    }

    #[test]
    fn test_virtual_nodes_spread_keys() {
        let mut ring = HashRing::new(50);
        ring.add(["a", "b", "c"]);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for i in 0..3000 {
            let owner = ring.get(&format!("key-{i}")).unwrap();
            *counts.entry(owner).or_default() += 1;
        }

        assert_eq!(counts.len(), 3);
        assert!(counts.values().all(|&n| n > 300), "{counts:?}");
    }
}
