//! Segment trie used as the path index.
//!
//! # Responsibilities
//! - Store one value per path, keyed by `/`-separated segments
//! - Exact lookup and node handles with ancestor enumeration in both
//!   directions
//! - Ordered traversal of the whole tree or of one subtree
//!
//! # Design Decisions
//! - Empty segments are ignored: `/foo`, `/foo/` and `//foo` share a node
//! - `/` is the root node
//! - Children kept in a `BTreeMap` so traversal is in key order
//! - Node handles carry the root-to-node chain instead of parent pointers

use std::collections::BTreeMap;

/// Iterate the non-empty segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// True if `path` is `prefix` or lies below it, comparing whole segments.
pub fn is_within(path: &str, prefix: &str) -> bool {
    let mut path = segments(path);
    segments(prefix).all(|seg| path.next() == Some(seg))
}

/// Join paths into one absolute path without duplicate separators.
pub fn join(prefix: &str, path: &str) -> String {
    let joined = segments(prefix)
        .chain(segments(path))
        .collect::<Vec<_>>()
        .join("/");
    format!("/{joined}")
}

#[derive(Debug)]
struct Node<V> {
    key: String,
    value: Option<V>,
    children: BTreeMap<String, Node<V>>,
}

impl<V> Node<V> {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            value: None,
            children: BTreeMap::new(),
        }
    }
}

/// Prefix tree keyed by path segments.
#[derive(Debug)]
pub struct PathTrie<V> {
    root: Node<V>,
    len: usize,
}

impl<V> Default for PathTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PathTrie<V> {
    pub fn new() -> Self {
        Self {
            root: Node::new(""),
            len: 0,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `value` at `pattern`, returning the value it replaced.
    pub fn insert(&mut self, pattern: &str, value: V) -> Option<V> {
        let mut node = &mut self.root;
        for seg in segments(pattern) {
            node = node
                .children
                .entry(seg.to_string())
                .or_insert_with(|| Node::new(seg));
        }
        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Exact lookup.
    pub fn get(&self, pattern: &str) -> Option<&V> {
        self.get_node(pattern).and_then(|node| node.value())
    }

    /// Handle to the node at `pattern`, whether or not it holds a value.
    pub fn get_node(&self, pattern: &str) -> Option<NodeRef<'_, V>> {
        let mut node = &self.root;
        let mut chain = vec![node];
        for seg in segments(pattern) {
            node = node.children.get(seg)?;
            chain.push(node);
        }
        Some(NodeRef { chain })
    }

    /// Visit every stored value in key order with its full path.
    ///
    /// The visitor returns `false` to stop the traversal.
    pub fn walk<F>(&self, visit: F)
    where
        F: FnMut(&str, &V) -> bool,
    {
        self.walk_prefix("/", visit);
    }

    /// Like [`walk`](Self::walk) but limited to the subtree at `prefix`
    /// (the prefix node included).
    pub fn walk_prefix<F>(&self, prefix: &str, mut visit: F)
    where
        F: FnMut(&str, &V) -> bool,
    {
        let Some(start) = self.get_node(prefix) else {
            return;
        };
        let mut path: Vec<&str> = segments(prefix).collect();
        walk_node(start.node(), &mut path, &mut visit);
    }
}

fn walk_node<'a, V, F>(node: &'a Node<V>, path: &mut Vec<&'a str>, visit: &mut F) -> bool
where
    F: FnMut(&str, &V) -> bool,
{
    if let Some(value) = &node.value {
        let full_path = format!("/{}", path.join("/"));
        if !visit(&full_path, value) {
            return false;
        }
    }
    for (key, child) in &node.children {
        path.push(key);
        let keep_going = walk_node(child, path, visit);
        path.pop();
        if !keep_going {
            return false;
        }
    }
    true
}

/// Handle to one trie node.
#[derive(Debug)]
pub struct NodeRef<'a, V> {
    // Root first, this node last; never empty.
    chain: Vec<&'a Node<V>>,
}

impl<V> Clone for NodeRef<'_, V> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
        }
    }
}

impl<'a, V> NodeRef<'a, V> {
    fn node(&self) -> &'a Node<V> {
        self.chain[self.chain.len() - 1]
    }

    /// Segment key of this node (empty for the root).
    pub fn key(&self) -> &'a str {
        &self.node().key
    }

    pub fn value(&self) -> Option<&'a V> {
        self.node().value.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.chain.len() == 1
    }

    /// Full path of this node.
    pub fn path(&self) -> String {
        let keys: Vec<&str> = self.chain[1..].iter().map(|n| n.key.as_str()).collect();
        format!("/{}", keys.join("/"))
    }

    /// Enumerate this node and its ancestors, nearest first, ending at the root.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a, V>> + '_ {
        (1..=self.chain.len()).rev().map(|depth| NodeRef {
            chain: self.chain[..depth].to_vec(),
        })
    }

    /// The same chain as [`ancestors`](Self::ancestors), root first.
    pub fn lineage(&self) -> impl Iterator<Item = NodeRef<'a, V>> + '_ {
        (1..=self.chain.len()).map(|depth| NodeRef {
            chain: self.chain[..depth].to_vec(),
        })
    }
}
