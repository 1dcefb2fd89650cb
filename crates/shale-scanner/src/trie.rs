//! Word tries for the keyword and operator matchers.
//!
//! One trie is built per reserved-word list when the scanner is created; a
//! match must consume a complete word and then see a word boundary to
//! accept, so a reserved prefix inside a longer word ("do" in "domain")
//! fails and leaves the input to the identifier matcher.

use crate::scanner::is_boundary;
use shale_input::Cursor;
use shale_strings::{IStr, Interner, StringsError};

pub(crate) struct Trie<'i> {
    nodes: Vec<Node<'i>>,
}

struct Node<'i> {
    /// Interned word ending at this node, if any.
    word: Option<IStr<'i>>,
    /// Outgoing edges; reserved-word alphabets are small, so a flat scan
    /// beats a byte-indexed array here.
    edges: Vec<(u8, u32)>,
}

impl<'i> Node<'i> {
    fn new() -> Self {
        Node {
            word: None,
            edges: Vec::new(),
        }
    }

    fn edge(&self, byte: u8) -> Option<usize> {
        self.edges
            .iter()
            .find(|(b, _)| *b == byte)
            .map(|(_, next)| *next as usize)
    }
}

impl<'i> Trie<'i> {
    /// Build a trie from `words`, interning every word up front.
    pub(crate) fn build(words: &[&str], interner: &'i Interner) -> Result<Self, StringsError> {
        let mut trie = Trie {
            nodes: vec![Node::new()],
        };

        for &word in words {
            let text = interner.intern(word)?;
            let mut node = 0;
            for &byte in word.as_bytes() {
                node = match trie.nodes[node].edge(byte) {
                    Some(next) => next,
                    None => {
                        trie.nodes.push(Node::new());
                        let next = trie.nodes.len() - 1;
                        trie.nodes[node].edges.push((byte, next as u32));
                        next
                    }
                };
            }
            trie.nodes[node].word = Some(text);
        }

        Ok(trie)
    }

    /// Walk the input from the current position. Accepts only a complete
    /// word followed by a boundary; the boundary byte is consumed. The
    /// cursor is left wherever the walk stopped — the caller restores it on
    /// failure.
    pub(crate) fn match_word(&self, input: &mut impl Cursor) -> Option<IStr<'i>> {
        let mut node = 0;
        loop {
            match input.next_char() {
                None => return self.nodes[node].word,
                Some(c) if is_boundary(c) => return self.nodes[node].word,
                Some(c) => node = self.nodes[node].edge(c)?,
            }
        }
    }
}
