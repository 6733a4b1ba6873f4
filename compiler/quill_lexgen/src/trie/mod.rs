//! 256-way prefix trie over literal bytes.
//!
//! Nodes live in one `Vec` and refer to their children by index; index 0 is
//! the root, which is never anyone's child, so 0 doubles as "no child".
//! A node's terminal is the kind whose literal is spelled by the path from
//! the root.

use quill_ir::TokenKind;

const FANOUT: usize = 256;

struct Node {
    children: Box<[u32; FANOUT]>,
    terminal: Option<TokenKind>,
}

impl Node {
    fn new() -> Self {
        Node {
            children: Box::new([0; FANOUT]),
            terminal: None,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum TrieError {
    #[error("empty literal")]
    Empty,
    #[error("literal already names {existing:?}")]
    Collision { existing: TokenKind },
    #[error("trie exceeds {} nodes", u32::MAX)]
    Overflow,
}

pub struct Trie {
    nodes: Vec<Node>,
}

impl Trie {
    pub fn new() -> Self {
        Trie {
            nodes: vec![Node::new()],
        }
    }

    /// Add `literal` as the spelling of `kind`.
    pub fn insert(&mut self, literal: &[u8], kind: TokenKind) -> Result<(), TrieError> {
        if literal.is_empty() {
            return Err(TrieError::Empty);
        }
        let mut cur = 0usize;
        for &byte in literal {
            let next = self.nodes[cur].children[usize::from(byte)];
            cur = if next == 0 {
                let id = self.nodes.len();
                self.nodes.push(Node::new());
                self.nodes[cur].children[usize::from(byte)] =
                    u32::try_from(id).map_err(|_| TrieError::Overflow)?;
                id
            } else {
                next as usize
            };
        }
        match self.nodes[cur].terminal {
            Some(existing) => Err(TrieError::Collision { existing }),
            None => {
                self.nodes[cur].terminal = Some(kind);
                Ok(())
            }
        }
    }

    /// Deepest terminal on the path spelled by a prefix of `input`, with
    /// the prefix length.
    pub fn longest_match(&self, input: &[u8]) -> Option<(TokenKind, usize)> {
        let mut best = None;
        let mut cur = 0usize;
        for (depth, &byte) in input.iter().enumerate() {
            let next = self.nodes[cur].children[usize::from(byte)];
            if next == 0 {
                break;
            }
            cur = next as usize;
            if let Some(kind) = self.nodes[cur].terminal {
                best = Some((kind, depth + 1));
            }
        }
        best
    }

    /// Terminal spelled by exactly `word`.
    pub fn exact(&self, word: &[u8]) -> Option<TokenKind> {
        let mut cur = 0usize;
        for &byte in word {
            let next = self.nodes[cur].children[usize::from(byte)];
            if next == 0 {
                return None;
            }
            cur = next as usize;
        }
        self.nodes[cur].terminal
    }

    /// Whether some literal starts with `byte`.
    pub fn starts_with(&self, byte: u8) -> bool {
        self.nodes[0].children[usize::from(byte)] != 0
    }

    pub fn root(&self) -> TrieNode<'_> {
        TrieNode { trie: self, id: 0 }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no literal has been inserted.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of one node, used by the emitter to walk the trie.
#[derive(Copy, Clone)]
pub struct TrieNode<'t> {
    trie: &'t Trie,
    id: usize,
}

impl<'t> TrieNode<'t> {
    pub fn terminal(self) -> Option<TokenKind> {
        self.trie.nodes[self.id].terminal
    }

    /// Populated branches in byte order.
    pub fn children(self) -> impl Iterator<Item = (u8, TrieNode<'t>)> {
        let trie = self.trie;
        trie.nodes[self.id]
            .children
            .iter()
            .enumerate()
            .filter(|(_, child)| **child != 0)
            .map(move |(byte, &child)| {
                #[expect(clippy::cast_possible_truncation, reason = "index into a 256-entry array")]
                let byte = byte as u8;
                (
                    byte,
                    TrieNode {
                        trie,
                        id: child as usize,
                    },
                )
            })
    }

    pub fn has_children(self) -> bool {
        self.children().next().is_some()
    }
}
