//! Child-URI trie for routing and event fan-out.
//!
//! [`ChildMap`] indexes registrants by uri and enumerates, for a query
//! uri, every registrant whose registered uri is a structural ancestor of
//! the query. A registration whose final segment is the literal `*` is a
//! wildcard: it matches every path strictly below its prefix but not the
//! prefix itself. Every other registration matches its own path and every
//! descendant.
//!
//! Keys are compared case-insensitively at every level: scheme, host and
//! port, and each path segment. A map built with
//! [`ChildMap::ignoring_scheme`] collapses all schemes into one.
//!
//! # Concurrency
//!
//! The trie is not internally synchronized and is built for read-mostly
//! workloads: populate it during a single-writer registration phase, then
//! match from any number of readers. Concurrent inserts or removals with
//! concurrent reads are undefined unless serialized by an external
//! reader-writer lock, or unless writers swap a rebuilt map in atomically
//! (copy-on-write). Matching itself takes no locks.

use fnv::FnvHashMap;
use std::collections::HashSet;
use std::hash::Hash;

use crate::log::debug;
use crate::uri::Uri;


/// Key used in place of the scheme when schemes are ignored.
const ANY_SCHEME: &str = "any";

/// Host-and-port key matching every authority.
const ANY_HOST: &str = "*";

/// Final segment marking a wildcard registration.
const WILDCARD: &str = "*";

#[derive(Debug)]
struct Node<T> {
    children: FnvHashMap<String, Node<T>>,
    exact: Vec<T>,
    wildcard: Vec<T>,
}

impl<T> Node<T> {
    fn new() -> Node<T> {
        Node {
            children: FnvHashMap::default(),
            exact: Vec::new(),
            wildcard: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.children.is_empty() && self.exact.is_empty() && self.wildcard.is_empty()
    }
}

/// A trie of registrants keyed by scheme, host and port, and path
/// segments.
///
/// See the [module documentation](self) for matching semantics and the
/// concurrency contract.
#[derive(Debug)]
pub struct ChildMap<T> {
    root: Node<T>,
    ignore_scheme: bool,
    len: usize,
}

impl<T> ChildMap<T> {
    /// Create an empty, scheme-sensitive map.
    pub fn new() -> ChildMap<T> {
        ChildMap {
            root: Node::new(),
            ignore_scheme: false,
            len: 0,
        }
    }

    /// Create an empty map that collapses all schemes into one key.
    pub fn ignoring_scheme() -> ChildMap<T> {
        ChildMap {
            root: Node::new(),
            ignore_scheme: true,
            len: 0,
        }
    }

    /// Number of registrations held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no registrations.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Register `value` under `uri`.
    ///
    /// A final literal `*` segment is stripped and makes the registration
    /// a wildcard. Duplicate registrations accumulate.
    pub fn insert(&mut self, uri: &Uri, value: T) {
        let (wildcard, segments) = match uri.segments().split_last() {
            Some((last, init)) if last == WILDCARD => (true, init),
            _ => (false, uri.segments()),
        };

        let mut node = self
            .root
            .children
            .entry(self.scheme_key(uri))
            .or_insert_with(Node::new);
        node = node
            .children
            .entry(uri.host_port().to_ascii_lowercase())
            .or_insert_with(Node::new);
        for segment in segments {
            node = node
                .children
                .entry(segment.to_ascii_lowercase())
                .or_insert_with(Node::new);
        }

        if wildcard {
            node.wildcard.push(value);
        } else {
            node.exact.push(value);
        }
        self.len += 1;
        debug!(
            "registered {} ({})",
            uri.to_sanitized_string(),
            if wildcard { "wildcard" } else { "exact" },
        );
    }

    /// Register one value under several uris.
    pub fn insert_all(&mut self, uris: &[Uri], value: T)
    where
        T: Clone,
    {
        for uri in uris {
            self.insert(uri, value.clone());
        }
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.root = Node::new();
        self.len = 0;
    }

    /// Remove every registration of `value`, pruning emptied nodes.
    ///
    /// Returns the number of registrations removed.
    pub fn remove_all(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        let removed = prune(&mut self.root, value);
        self.len -= removed;
        if removed > 0 {
            debug!("removed {removed} registrations");
        }
        removed
    }

    /// Enumerate every registrant whose registered uri matches `uri`.
    ///
    /// Results come in a fixed order the routing layer relies on: the
    /// exact host branch before the `*` host branch, descent order within
    /// a branch, and at each node wildcards before exacts.
    pub fn get_matches(&self, uri: &Uri) -> Vec<&T> {
        let mut matches = Vec::new();
        let Some(scheme_node) = self.root.children.get(&self.scheme_key(uri)) else {
            return matches;
        };

        let host_key = uri.host_port().to_ascii_lowercase();
        if let Some(node) = scheme_node.children.get(&host_key) {
            collect(node, uri.segments(), &mut matches);
        }
        if host_key != ANY_HOST {
            if let Some(node) = scheme_node.children.get(ANY_HOST) {
                collect(node, uri.segments(), &mut matches);
            }
        }
        matches
    }

    /// Like [`get_matches`](ChildMap::get_matches), keeping only
    /// registrants present in `filter`.
    pub fn get_matches_filtered(&self, uri: &Uri, filter: &HashSet<T>) -> Vec<&T>
    where
        T: Eq + Hash,
    {
        let mut matches = self.get_matches(uri);
        matches.retain(|value| filter.contains(*value));
        matches
    }

    fn scheme_key(&self, uri: &Uri) -> String {
        if self.ignore_scheme {
            ANY_SCHEME.to_string()
        } else {
            uri.scheme().to_ascii_lowercase()
        }
    }
}

impl<T> Default for ChildMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Logic =====

/// Walk `segments` down from the host node, gathering matches.
///
/// Every node the query passes strictly through contributes its wildcard
/// and exact buckets; the node the query lands on contributes exacts only,
/// a wildcard does not match its own prefix.
fn collect<'a, T>(node: &'a Node<T>, segments: &[String], matches: &mut Vec<&'a T>) {
    let mut node = node;
    for segment in segments {
        matches.extend(node.wildcard.iter());
        matches.extend(node.exact.iter());
        match node.children.get(&segment.to_ascii_lowercase()) {
            Some(child) => node = child,
            None => return,
        }
    }
    matches.extend(node.exact.iter());
}

fn prune<T: PartialEq>(node: &mut Node<T>, value: &T) -> usize {
    let before = node.exact.len() + node.wildcard.len();
    node.exact.retain(|held| held != value);
    node.wildcard.retain(|held| held != value);
    let mut removed = before - node.exact.len() - node.wildcard.len();
    node.children.retain(|_, child| {
        removed += prune(child, value);
        !child.is_empty()
    });
    removed
}
