// Copyright (c) 2025 Prefix Search Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Prefix Trie Implementation
//!
//! This module provides an arena-backed trie mapping normalized keys to
//! payloads, with prefix lookups that flatten every payload below the
//! matched node.
//!
//! Nodes are stored in a single `Vec` and linked by integer ids. Insertion,
//! descent and flattening are iterative, so key length never grows the
//! call stack.
//!
//! The trie does not normalize keys itself; callers pass keys that are
//! already lowercased (see [`crate::index`]).

pub mod node;

use node::{NodeId, TrieNode, ROOT};

/// Arena-backed prefix trie.
///
/// Key features:
/// * One edge per `char`, no delimiter semantics
/// * Last-write-wins payloads for duplicate keys
/// * Distinct key count maintained on insert
#[derive(Debug, Clone)]
pub struct PrefixTrie<T> {
    /// Node arena; slot [`ROOT`] is the root (the empty prefix)
    nodes: Vec<TrieNode<T>>,

    /// Number of distinct terminal keys
    len: usize,
}

impl<T> PrefixTrie<T> {
    /// Creates a new trie holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new()],
            len: 0,
        }
    }

    /// Inserts a key with its payload.
    ///
    /// Missing edges are created on the way down. At the end of the key the
    /// node is marked terminal and the payload stored, replacing any payload
    /// a previous insertion of the same key left there.
    ///
    /// # Returns
    ///
    /// `true` if the key was not present before, `false` if it was updated.
    pub fn insert(&mut self, key: &str, payload: T) -> bool {
        let mut current = ROOT;

        for c in key.chars() {
            current = match self.nodes[current].children.get(&c) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::new());
                    self.nodes[current].children.insert(c, next);
                    next
                }
            };
        }

        let node = &mut self.nodes[current];
        let is_new = !node.is_terminal;
        node.is_terminal = true;
        node.payload = Some(payload);

        if is_new {
            self.len += 1;
        }
        is_new
    }

    /// Walks the trie along `prefix`, returning the node reached or `None`
    /// when an edge is missing.
    fn descend(&self, prefix: &str) -> Option<NodeId> {
        let mut current = ROOT;
        for c in prefix.chars() {
            current = *self.nodes[current].children.get(&c)?;
        }
        Some(current)
    }

    /// Returns `true` if `key` was inserted as a complete key.
    pub fn contains(&self, key: &str) -> bool {
        self.descend(key)
            .map(|id| self.nodes[id].is_terminal)
            .unwrap_or(false)
    }

    /// Collects the payloads of every key starting with `prefix`.
    ///
    /// An empty prefix matches the whole trie. At most `limit` payloads are
    /// returned when a limit is given. Order follows a pre-order walk (a node
    /// before its children); sibling order is unspecified.
    pub fn find_by_prefix(&self, prefix: &str, limit: Option<usize>) -> Vec<&T> {
        match self.descend(prefix) {
            Some(start) => self.flatten(start, limit),
            None => Vec::new(),
        }
    }

    /// Depth-first collection of all terminal payloads at or below `start`.
    fn flatten(&self, start: NodeId, limit: Option<usize>) -> Vec<&T> {
        let limit = limit.unwrap_or(usize::MAX);
        let mut results = Vec::new();
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            if results.len() >= limit {
                break;
            }

            let node = &self.nodes[id];
            if node.is_terminal {
                if let Some(payload) = &node.payload {
                    results.push(payload);
                }
            }
            stack.extend(node.children.values().copied());
        }

        results
    }

    /// Returns the number of distinct keys in the trie.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes in the arena, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<T> Default for PrefixTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted<'a>(results: Vec<&&'a str>) -> Vec<&'a str> {
        let mut out: Vec<&str> = results.into_iter().copied().collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn test_trie_basic_operations() {
        let mut trie = PrefixTrie::new();

        assert!(trie.is_empty());
        assert!(trie.insert("hello", "world"));
        assert_eq!(trie.len(), 1);
        assert!(trie.contains("hello"));
        assert!(!trie.contains("hell"));
        assert!(!trie.contains("nonexistent"));

        // Update keeps the count and replaces the payload
        assert!(!trie.insert("hello", "planet"));
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.find_by_prefix("hello", None), vec![&"planet"]);
    }

    #[test]
    fn test_trie_prefix_search() {
        let mut trie = PrefixTrie::new();
        trie.insert("apple", "apple");
        trie.insert("application", "application");
        trie.insert("apply", "apply");
        trie.insert("banana", "banana");

        assert_eq!(
            sorted(trie.find_by_prefix("app", None)),
            vec!["apple", "application", "apply"]
        );
        assert_eq!(sorted(trie.find_by_prefix("ban", None)), vec!["banana"]);
        assert!(trie.find_by_prefix("orange", None).is_empty());
        assert_eq!(trie.find_by_prefix("", None).len(), 4);
    }

    #[test]
    fn test_flatten_visits_node_before_children() {
        let mut trie = PrefixTrie::new();
        trie.insert("app", "app");
        trie.insert("apple", "apple");
        trie.insert("apt", "apt");

        let results = trie.find_by_prefix("app", None);
        assert_eq!(results.first(), Some(&&"app"));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_empty_key_terminates_at_root() {
        let mut trie = PrefixTrie::new();
        assert!(trie.insert("", "empty"));
        assert!(trie.insert("a", "a"));
        assert!(!trie.insert("", "again"));

        assert_eq!(trie.len(), 2);
        assert!(trie.contains(""));
        assert_eq!(trie.node_count(), 2);
        assert_eq!(trie.find_by_prefix("a", None), vec![&"a"]);
    }

    #[test]
    fn test_limit_caps_results() {
        let mut trie = PrefixTrie::new();
        for key in ["ta", "tb", "tc", "td"] {
            trie.insert(key, key);
        }

        assert_eq!(trie.find_by_prefix("t", Some(2)).len(), 2);
        assert_eq!(trie.find_by_prefix("t", Some(10)).len(), 4);
    }

    #[test]
    fn test_multibyte_characters_are_single_edges() {
        let mut trie = PrefixTrie::new();
        trie.insert("çà", 1);
        trie.insert("ç", 2);

        // root, 'ç', 'à'
        assert_eq!(trie.node_count(), 3);
        assert_eq!(trie.find_by_prefix("ç", None).len(), 2);
    }

    #[test]
    fn test_long_key_does_not_recurse() {
        let mut trie = PrefixTrie::new();
        let key = "x".repeat(100_000);
        trie.insert(&key, ());
        assert!(trie.contains(&key));
        assert_eq!(trie.find_by_prefix("xxx", None).len(), 1);
    }
}
