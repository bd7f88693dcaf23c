use crate::node::{LineRemoval, Node};
use slotmap::{DefaultKey, SlotMap};
use std::cmp::Ordering;

/// Height-balanced word → occurrence-lines index.
///
/// An AVL tree over normalized lowercase words. Nodes are stored in a slotmap
/// arena with `DefaultKey` child slots, so rotations and deletion splices are
/// key reassignments instead of pointer juggling. Every structural operation
/// is a recursive descent that hands back the (possibly new) subtree root for
/// the parent to reattach; no parent links exist.
///
/// ## Example
///
/// ```
/// use concordance_rs::WordIndex;
///
/// let mut index = WordIndex::new();
/// index.insert("The", 1);
/// index.insert("the", 2);
/// index.insert("fox", 1);
///
/// let node = index.search("THE").expect("indexed");
/// assert_eq!(node.sorted_lines(), vec![1, 2]);
/// assert_eq!(index.distinct_words(), 2);
/// ```
pub struct WordIndex {
    /// Node arena; child links index into this map.
    pub(crate) nodes: SlotMap<DefaultKey, Node>,
    pub(crate) root: Option<DefaultKey>,
    /// Rebalance decisions taken over the tree's lifetime. A double rotation
    /// (LR/RL) counts once: the counter tracks decisions, not simple spins.
    rotations: u64,
    /// Insert calls that hit an existing key, whether or not the line number
    /// was actually new.
    discarded: u64,
}

impl WordIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::new(),
            root: None,
            rotations: 0,
            discarded: 0,
        }
    }

    /// Returns true if no words are indexed.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total rebalance decisions performed so far.
    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    /// Insert calls that targeted an already-indexed word.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    // ========================================================================
    // Balance primitives
    // ========================================================================

    /// Cached height of a subtree; -1 for an absent child.
    pub(crate) fn height(&self, slot: Option<DefaultKey>) -> i32 {
        slot.map_or(-1, |key| self.nodes[key].height)
    }

    /// height(left) - height(right); 0 for an absent subtree.
    pub(crate) fn balance_factor(&self, slot: Option<DefaultKey>) -> i32 {
        slot.map_or(0, |key| {
            self.height(self.nodes[key].left) - self.height(self.nodes[key].right)
        })
    }

    /// Recomputes a node's cached height from its children.
    ///
    /// Must run after any child slot changes, before the balance factor is
    /// read at that node.
    fn update_height(&mut self, key: DefaultKey) {
        let left = self.height(self.nodes[key].left);
        let right = self.height(self.nodes[key].right);
        self.nodes[key].height = 1 + left.max(right);
    }

    /// Simple right rotation for a left-left heavy node. Returns the new
    /// subtree root.
    fn rotate_ll(&mut self, a: DefaultKey) -> DefaultKey {
        let b = self.nodes[a].left.expect("LL rotation requires a left child");
        self.nodes[a].left = self.nodes[b].right;
        self.nodes[b].right = Some(a);
        self.update_height(a);
        self.update_height(b);
        b
    }

    /// Simple left rotation for a right-right heavy node. Mirror of LL.
    fn rotate_rr(&mut self, a: DefaultKey) -> DefaultKey {
        let b = self.nodes[a].right.expect("RR rotation requires a right child");
        self.nodes[a].right = self.nodes[b].left;
        self.nodes[b].left = Some(a);
        self.update_height(a);
        self.update_height(b);
        b
    }

    /// Double rotation for a left-right heavy node: RR on the left child,
    /// then LL on the node itself.
    fn rotate_lr(&mut self, a: DefaultKey) -> DefaultKey {
        let left = self.nodes[a].left.expect("LR rotation requires a left child");
        let new_left = self.rotate_rr(left);
        self.nodes[a].left = Some(new_left);
        self.rotate_ll(a)
    }

    /// Double rotation for a right-left heavy node: LL on the right child,
    /// then RR on the node itself.
    fn rotate_rl(&mut self, a: DefaultKey) -> DefaultKey {
        let right = self.nodes[a].right.expect("RL rotation requires a right child");
        let new_right = self.rotate_ll(right);
        self.nodes[a].right = Some(new_right);
        self.rotate_rr(a)
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Records that `word` occurs on `line`.
    ///
    /// The word is lowercased before comparison and storage. A previously
    /// unseen word creates a node; a known word only gains the line (if not
    /// already recorded) and bumps the discarded-insert counter.
    pub fn insert(&mut self, word: &str, line: u32) {
        let word = word.to_lowercase();
        self.root = Some(self.insert_at(self.root, &word, line));
    }

    /// Recursive insert; returns the key of the updated subtree root.
    fn insert_at(&mut self, slot: Option<DefaultKey>, word: &str, line: u32) -> DefaultKey {
        let Some(key) = slot else {
            return self.nodes.insert(Node::new(word, line));
        };

        match word.cmp(self.nodes[key].word.as_str()) {
            Ordering::Equal => {
                // Known word: no restructuring, so no rebalance below.
                self.nodes[key].add_line(line);
                self.discarded += 1;
                return key;
            }
            Ordering::Less => {
                let left = self.nodes[key].left;
                let new_left = self.insert_at(left, word, line);
                self.nodes[key].left = Some(new_left);
            }
            Ordering::Greater => {
                let right = self.nodes[key].right;
                let new_right = self.insert_at(right, word, line);
                self.nodes[key].right = Some(new_right);
            }
        }

        self.update_height(key);
        let balance = self.balance_factor(Some(key));

        // The inserted word disambiguates the heavy grandchild side; equality
        // with the child key is impossible on an insert path that descended
        // past it.
        if balance > 1 {
            let left = self.nodes[key].left.expect("left-heavy node has a left child");
            self.rotations += 1;
            return if word < self.nodes[left].word.as_str() {
                self.rotate_ll(key)
            } else {
                self.rotate_lr(key)
            };
        }
        if balance < -1 {
            let right = self.nodes[key].right.expect("right-heavy node has a right child");
            self.rotations += 1;
            return if word > self.nodes[right].word.as_str() {
                self.rotate_rr(key)
            } else {
                self.rotate_rl(key)
            };
        }

        key
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes a word, or a single occurrence line of it.
    ///
    /// With `Some(line)`, only that occurrence goes: a missing line fails
    /// without touching the structure; a line removal that leaves occurrences
    /// behind succeeds with no structural change; emptying the list removes
    /// the node itself. With `None`, the whole node goes regardless of its
    /// occurrence count.
    ///
    /// Returns true iff a node or an occurrence was actually removed.
    pub fn remove(&mut self, word: &str, line: Option<u32>) -> bool {
        let word = word.to_lowercase();
        let mut removed = false;
        self.root = self.remove_at(self.root, &word, line, &mut removed);
        removed
    }

    /// Recursive removal; returns the updated subtree root (None if the
    /// subtree emptied).
    fn remove_at(
        &mut self,
        slot: Option<DefaultKey>,
        word: &str,
        line: Option<u32>,
        removed: &mut bool,
    ) -> Option<DefaultKey> {
        let key = slot?;

        match word.cmp(self.nodes[key].word.as_str()) {
            Ordering::Less => {
                let left = self.nodes[key].left;
                self.nodes[key].left = self.remove_at(left, word, line, removed);
            }
            Ordering::Greater => {
                let right = self.nodes[key].right;
                self.nodes[key].right = self.remove_at(right, word, line, removed);
            }
            Ordering::Equal => {
                if let Some(line) = line {
                    match self.nodes[key].remove_line(line) {
                        // Line was never there: fail without restructuring.
                        LineRemoval::Missing => return Some(key),
                        LineRemoval::Remaining => {
                            *removed = true;
                            return Some(key);
                        }
                        // List emptied: fall through to structural removal.
                        LineRemoval::Emptied => {}
                    }
                }
                *removed = true;

                // Zero or one child: splice the other side in.
                if self.nodes[key].left.is_none() {
                    let right = self.nodes[key].right;
                    self.nodes.remove(key);
                    return right;
                }
                if self.nodes[key].right.is_none() {
                    let left = self.nodes[key].left;
                    self.nodes.remove(key);
                    return left;
                }

                // Two children: adopt the in-order successor's payload, then
                // remove the successor's original node (whole-node mode).
                let right = self.nodes[key].right.expect("two-child node has a right child");
                let successor = self.leftmost(right);
                let successor_word = self.nodes[successor].word.clone();
                self.nodes[key].word = successor_word.clone();
                self.nodes[key].lines = self.nodes[successor].lines.clone();

                let new_right = self.remove_at(Some(right), &successor_word, None, removed);
                self.nodes[key].right = new_right;
            }
        }

        self.update_height(key);
        let balance = self.balance_factor(Some(key));

        // The removed key is gone, so the heavy grandchild side is read off
        // the child's balance-factor sign instead of a key comparison.
        if balance > 1 {
            let left = self.nodes[key].left;
            self.rotations += 1;
            return Some(if self.balance_factor(left) >= 0 {
                self.rotate_ll(key)
            } else {
                self.rotate_lr(key)
            });
        }
        if balance < -1 {
            let right = self.nodes[key].right;
            self.rotations += 1;
            return Some(if self.balance_factor(right) <= 0 {
                self.rotate_rr(key)
            } else {
                self.rotate_rl(key)
            });
        }

        Some(key)
    }

    /// Key of the leftmost (minimum) node of a subtree.
    pub(crate) fn leftmost(&self, mut key: DefaultKey) -> DefaultKey {
        while let Some(left) = self.nodes[key].left {
            key = left;
        }
        key
    }
}

impl Default for WordIndex {
    fn default() -> Self {
        Self::new()
    }
}
