use crate::index::WordIndex;
use crate::query::BalanceGauge;
use slotmap::DefaultKey;


impl WordIndex {
    /// Walks the whole tree recomputing everything from scratch and asserts
    /// the structural invariants: BST order, AVL balance, exact cached
    /// heights, non-empty occurrence lists, and no leaked arena slots.
    pub(crate) fn check_invariants(&self) {
        fn walk(index: &WordIndex, slot: Option<DefaultKey>, words: &mut Vec<String>) -> i32 {
            let Some(key) = slot else {
                return -1;
            };
            let node = &index.nodes[key];

            let left_height = walk(index, node.left, words);
            words.push(node.word.clone());
            let right_height = walk(index, node.right, words);

            assert!(
                !node.lines.is_empty(),
                "node '{}' has an empty occurrence list",
                node.word
            );
            assert_eq!(
                node.height,
                1 + left_height.max(right_height),
                "stale cached height at '{}'",
                node.word
            );
            assert!(
                (left_height - right_height).abs() <= 1,
                "balance violated at '{}' ({} vs {})",
                node.word,
                left_height,
                right_height
            );

            1 + left_height.max(right_height)
        }

        let mut words = Vec::new();
        walk(self, self.root, &mut words);

        for pair in words.windows(2) {
            assert!(
                pair[0] < pair[1],
                "BST order violated: '{}' before '{}'",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(
            words.len(),
            self.nodes.len(),
            "arena holds unreachable nodes"
        );
    }
}

/// End-to-end walk through every operation on one small index.
#[test]
fn test_full_lifecycle_scenario() {
    let mut index = WordIndex::new();
    index.insert("the", 1);
    index.insert("the", 2);
    index.insert("fox", 1);

    assert_eq!(index.distinct_words(), 2);
    assert_eq!(index.total_words(), 3);
    assert_eq!(index.discarded(), 1);
    assert_eq!(index.search_by_prefix("t"), vec!["the"]);
    assert_eq!(index.most_frequent(), Some(("the", 2)));

    assert!(index.remove("the", Some(1)));
    let node = index.search("the").expect("one occurrence left");
    assert_eq!(node.lines(), &[2]);

    assert!(index.remove("the", Some(2)));
    assert!(index.search("the").is_none());
    assert!(index.search_by_prefix("t").is_empty());

    assert!(index.remove("fox", None));
    assert!(index.is_empty());
    assert_eq!(index.most_frequent(), None);
    index.check_invariants();
}

#[test]
fn test_gauge_after_removals() {
    let mut index = WordIndex::new();
    for (word, line) in [("m", 1), ("f", 1), ("t", 1), ("a", 1), ("z", 1)] {
        index.insert(word, line);
    }
    index.remove("z", None);

    assert_eq!(
        index.search_with_gauge("m"),
        BalanceGauge::Imbalanced { difference: 1 }
    );
    assert_eq!(index.search_with_gauge("gone"), BalanceGauge::NotFound);
}
