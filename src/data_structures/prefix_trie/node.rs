// Copyright (c) 2025 Prefix Search Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the prefix trie.
//!
//! Nodes live in the trie's arena and refer to their children by index,
//! so the tree carries no pointers and no locks of its own.

use hashbrown::HashMap;

/// Index of a node inside the trie arena.
pub type NodeId = usize;

/// Arena slot of the root node.
pub const ROOT: NodeId = 0;

/// A node in the prefix trie.
///
/// Each node represents one character of a key path. Terminal nodes carry
/// the payload of the item whose key ends there.
#[derive(Debug, Clone)]
pub struct TrieNode<T> {
    /// Map of characters to child node ids
    pub children: HashMap<char, NodeId>,

    /// Whether some key ends exactly at this node
    pub is_terminal: bool,

    /// Payload of the item terminating here (only set on terminal nodes)
    pub payload: Option<T>,
}

impl<T> TrieNode<T> {
    /// Creates a new empty trie node.
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
            is_terminal: false,
            payload: None,
        }
    }
}

impl<T> Default for TrieNode<T> {
    fn default() -> Self {
        Self::new()
    }
}
