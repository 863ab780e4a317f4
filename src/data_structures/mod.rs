//! Data structures for Prefix Search.
//!
//! The trie here is generic over its payload and knows nothing about
//! datasets, modes or readiness; those live in [`crate::index`].

pub mod prefix_trie;

pub use prefix_trie::PrefixTrie;
