use slotmap::DefaultKey;
use std::fmt;

/// A single entry of the index: one distinct word and every line it occurs on.
///
/// Nodes live in the tree's slotmap arena; child links are arena keys rather
/// than owning pointers, which keeps structural surgery (rotations, successor
/// splicing) to plain key reassignment.
#[derive(Debug, Clone)]
pub struct Node {
    /// Normalized lowercase word, the comparison key. Unique across the tree.
    pub(crate) word: String,
    /// Line numbers in first-seen order, never empty while the node exists.
    pub(crate) lines: Vec<u32>,
    pub(crate) left: Option<DefaultKey>,
    pub(crate) right: Option<DefaultKey>,
    /// Cached subtree height: leaf = 0, absent child = -1.
    pub(crate) height: i32,
}

/// Outcome of removing one line number from a node's occurrence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineRemoval {
    /// The line was not in the list; nothing changed.
    Missing,
    /// The line was removed and the list still has occurrences.
    Remaining,
    /// The line was removed and the list is now empty; the node must go.
    Emptied,
}

impl Node {
    /// Creates a leaf holding a single occurrence.
    ///
    /// The caller normalizes the word before construction.
    pub(crate) fn new(word: &str, line: u32) -> Self {
        Self {
            word: word.to_owned(),
            lines: vec![line],
            left: None,
            right: None,
            height: 0,
        }
    }

    /// Returns the normalized word this node keys on.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Returns the occurrence lines in first-seen order.
    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    /// Returns the occurrence lines sorted ascending.
    pub fn sorted_lines(&self) -> Vec<u32> {
        let mut lines = self.lines.clone();
        lines.sort_unstable();
        lines
    }

    /// Number of distinct lines the word occurs on.
    pub fn occurrence_count(&self) -> usize {
        self.lines.len()
    }

    /// Appends a line number unless it is already recorded.
    pub(crate) fn add_line(&mut self, line: u32) {
        if !self.lines.contains(&line) {
            self.lines.push(line);
        }
    }

    /// Removes one line number, reporting what that did to the list.
    pub(crate) fn remove_line(&mut self, line: u32) -> LineRemoval {
        let Some(pos) = self.lines.iter().position(|&l| l == line) else {
            return LineRemoval::Missing;
        };
        self.lines.remove(pos);
        if self.lines.is_empty() {
            LineRemoval::Emptied
        } else {
            LineRemoval::Remaining
        }
    }
}

impl fmt::Display for Node {
    /// Report record format: the word, a space, then the sorted lines
    /// comma-joined without spaces (`fox 1,4,9`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.word)?;
        for (i, line) in self.sorted_lines().iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}
