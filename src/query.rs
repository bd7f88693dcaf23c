use crate::index::WordIndex;
use crate::node::Node;
use slotmap::DefaultKey;

/// Result of a lookup that also gauges how evenly the found node's subtrees
/// are populated.
///
/// The gauge counts elements by full subtree traversal rather than trusting
/// cached heights, so it reflects population, not depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceGauge {
    /// The word is not indexed.
    NotFound,
    /// Left and right subtrees hold the same number of words.
    Balanced,
    /// Signed left-minus-right element-count difference.
    Imbalanced { difference: i64 },
}

impl WordIndex {
    // ========================================================================
    // Lookup
    // ========================================================================

    /// Exact lookup; `None` on a miss.
    pub fn search(&self, word: &str) -> Option<&Node> {
        let word = word.to_lowercase();
        self.find_key(self.root, &word).map(|key| &self.nodes[key])
    }

    /// Recursive BST descent to the key holding `word`, if any.
    fn find_key(&self, slot: Option<DefaultKey>, word: &str) -> Option<DefaultKey> {
        let key = slot?;
        let node = &self.nodes[key];
        match word.cmp(node.word.as_str()) {
            std::cmp::Ordering::Equal => Some(key),
            std::cmp::Ordering::Less => self.find_key(node.left, word),
            std::cmp::Ordering::Greater => self.find_key(node.right, word),
        }
    }

    /// Looks a word up and reports how evenly its subtrees are populated.
    pub fn search_with_gauge(&self, word: &str) -> BalanceGauge {
        let word = word.to_lowercase();
        let Some(key) = self.find_key(self.root, &word) else {
            return BalanceGauge::NotFound;
        };

        let left = self.count_nodes(self.nodes[key].left) as i64;
        let right = self.count_nodes(self.nodes[key].right) as i64;
        let difference = left - right;

        if difference == 0 {
            BalanceGauge::Balanced
        } else {
            BalanceGauge::Imbalanced { difference }
        }
    }

    // ========================================================================
    // Prefix search
    // ========================================================================

    /// All indexed words starting with `prefix`, sorted lexicographically.
    pub fn search_by_prefix(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        let mut found = Vec::new();
        self.collect_prefix(self.root, &prefix, &mut found);
        found.sort();
        found
    }

    fn collect_prefix(&self, slot: Option<DefaultKey>, prefix: &str, found: &mut Vec<String>) {
        let Some(key) = slot else {
            return;
        };
        let node = &self.nodes[key];

        if node.word.starts_with(prefix) {
            found.push(node.word.clone());
        }

        // BST order only positions full keys, so a branch is descended
        // whenever the prefix comparison cannot rule it out.
        if prefix < node.word.as_str() {
            self.collect_prefix(node.left, prefix, found);
        }
        if prefix >= truncate_chars(&node.word, prefix.chars().count()) {
            self.collect_prefix(node.right, prefix, found);
        }
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    /// The word occurring on the most lines, with that line count.
    ///
    /// Ties keep the first node in in-order (left, self, right) traversal.
    /// `None` for an empty index.
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        let mut best: Option<(DefaultKey, usize)> = None;
        self.scan_most_frequent(self.root, &mut best);
        best.map(|(key, count)| (self.nodes[key].word.as_str(), count))
    }

    fn scan_most_frequent(&self, slot: Option<DefaultKey>, best: &mut Option<(DefaultKey, usize)>) {
        let Some(key) = slot else {
            return;
        };
        let node = &self.nodes[key];

        self.scan_most_frequent(node.left, best);
        let count = node.lines.len();
        if best.map_or(true, |(_, n)| count > n) {
            *best = Some((key, count));
        }
        self.scan_most_frequent(node.right, best);
    }

    /// Number of distinct indexed words.
    pub fn distinct_words(&self) -> usize {
        self.count_nodes(self.root)
    }

    /// Sum of occurrence counts over all words (a word on three lines
    /// contributes three).
    pub fn total_words(&self) -> usize {
        self.count_occurrences(self.root)
    }

    pub(crate) fn count_nodes(&self, slot: Option<DefaultKey>) -> usize {
        slot.map_or(0, |key| {
            1 + self.count_nodes(self.nodes[key].left) + self.count_nodes(self.nodes[key].right)
        })
    }

    fn count_occurrences(&self, slot: Option<DefaultKey>) -> usize {
        slot.map_or(0, |key| {
            self.nodes[key].lines.len()
                + self.count_occurrences(self.nodes[key].left)
                + self.count_occurrences(self.nodes[key].right)
        })
    }

    // ========================================================================
    // Dump
    // ========================================================================

    /// One formatted record per word (`word line1,line2,...`), in key order.
    pub fn records(&self) -> Vec<String> {
        let mut records = Vec::new();
        self.collect_in_order(self.root, &mut records);
        records
    }

    fn collect_in_order(&self, slot: Option<DefaultKey>, records: &mut Vec<String>) {
        let Some(key) = slot else {
            return;
        };
        let node = &self.nodes[key];
        self.collect_in_order(node.left, records);
        records.push(node.to_string());
        self.collect_in_order(node.right, records);
    }
}

/// Prefix of `word` holding at most `n_chars` characters, on a UTF-8 boundary.
fn truncate_chars(word: &str, n_chars: usize) -> &str {
    match word.char_indices().nth(n_chars) {
        Some((byte_index, _)) => &word[..byte_index],
        None => word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> WordIndex {
        let mut index = WordIndex::new();
        for (word, line) in [
            ("the", 1),
            ("quick", 1),
            ("fox", 1),
            ("the", 2),
            ("lazy", 2),
            ("dog", 2),
            ("then", 3),
            ("there", 3),
        ] {
            index.insert(word, line);
        }
        index
    }

    #[test]
    fn test_search_hit_and_miss() {
        let index = sample_index();
        let node = index.search("the").expect("indexed");
        assert_eq!(node.sorted_lines(), vec![1, 2]);
        assert!(index.search("cat").is_none());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let index = sample_index();
        assert!(index.search("The").is_some());
        assert!(index.search("THE").is_some());
    }

    #[test]
    fn test_gauge_not_found() {
        let index = sample_index();
        assert_eq!(index.search_with_gauge("cat"), BalanceGauge::NotFound);
    }

    #[test]
    fn test_gauge_leaf_is_balanced() {
        let mut index = WordIndex::new();
        index.insert("solo", 1);
        assert_eq!(index.search_with_gauge("solo"), BalanceGauge::Balanced);
    }

    #[test]
    fn test_gauge_reports_signed_difference() {
        let mut index = WordIndex::new();
        // Balanced shape: bat at the root, ant left, cat right, dog below cat.
        index.insert("bat", 1);
        index.insert("ant", 1);
        index.insert("cat", 1);
        index.insert("dog", 1);

        assert_eq!(
            index.search_with_gauge("bat"),
            BalanceGauge::Imbalanced { difference: -1 }
        );
        assert_eq!(index.search_with_gauge("ant"), BalanceGauge::Balanced);
    }

    #[test]
    fn test_prefix_search_sorted() {
        let index = sample_index();
        assert_eq!(index.search_by_prefix("the"), vec!["the", "then", "there"]);
        assert_eq!(index.search_by_prefix("t"), vec!["the", "then", "there"]);
        assert_eq!(index.search_by_prefix("q"), vec!["quick"]);
        assert!(index.search_by_prefix("zz").is_empty());
    }

    #[test]
    fn test_prefix_search_empty_prefix_returns_everything() {
        let index = sample_index();
        let all = index.search_by_prefix("");
        assert_eq!(all.len(), index.distinct_words());
        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(all, sorted);
    }

    #[test]
    fn test_prefix_search_lowercases_input() {
        let index = sample_index();
        assert_eq!(index.search_by_prefix("THE"), vec!["the", "then", "there"]);
    }

    #[test]
    fn test_most_frequent() {
        let index = sample_index();
        assert_eq!(index.most_frequent(), Some(("the", 2)));
    }

    #[test]
    fn test_most_frequent_tie_keeps_in_order_first() {
        let mut index = WordIndex::new();
        index.insert("zebra", 1);
        index.insert("ant", 2);
        // Both occur once; "ant" comes first in key order.
        assert_eq!(index.most_frequent(), Some(("ant", 1)));
    }

    #[test]
    fn test_most_frequent_empty() {
        let index = WordIndex::new();
        assert_eq!(index.most_frequent(), None);
    }

    #[test]
    fn test_counts() {
        let index = sample_index();
        assert_eq!(index.distinct_words(), 7);
        assert_eq!(index.total_words(), 8);
        assert_eq!(index.discarded(), 1);
    }

    #[test]
    fn test_counts_on_empty_index() {
        let index = WordIndex::new();
        assert_eq!(index.distinct_words(), 0);
        assert_eq!(index.total_words(), 0);
    }

    #[test]
    fn test_records_in_key_order() {
        let mut index = WordIndex::new();
        index.insert("fox", 9);
        index.insert("ant", 2);
        index.insert("fox", 3);
        assert_eq!(index.records(), vec!["ant 2", "fox 3,9"]);
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("ação", 2), "aç");
        assert_eq!(truncate_chars("ação", 10), "ação");
        assert_eq!(truncate_chars("fox", 0), "");
    }
}
