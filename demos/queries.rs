use anyhow::{bail, Context};
use concordance_rs::{build_index_from_path, BalanceGauge};
use std::env;

/// Builds the concordance for a text file, then runs one query against it.
///
/// Usage: cargo run --example queries <input.txt> <command> [args]
///
/// Commands:
///   search <word>            exact lookup with the balance gauge
///   prefix <prefix>          all words starting with the prefix
///   remove <word> [line]     remove a word, or one occurrence line of it
///   frequent                 the word occurring on the most lines
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        bail!("usage: {} <input.txt> <search|prefix|remove|frequent> [args]", args[0]);
    }

    let input = &args[1];
    let (mut index, _stats) =
        build_index_from_path(input).with_context(|| format!("reading {}", input))?;

    match args[2].as_str() {
        "search" => {
            let word = args.get(3).context("search needs a word")?;
            match index.search(word) {
                None => println!("'{}' is not in the index.", word),
                Some(node) => {
                    let lines: Vec<String> =
                        node.sorted_lines().iter().map(u32::to_string).collect();
                    println!("'{}' occurs on lines {}", node.word(), lines.join(", "));
                }
            }
            match index.search_with_gauge(word) {
                BalanceGauge::NotFound => {}
                BalanceGauge::Balanced => println!("Node subtrees are perfectly balanced."),
                BalanceGauge::Imbalanced { difference } => {
                    println!("Node subtrees differ by {} elements.", difference)
                }
            }
        }
        "prefix" => {
            let prefix = args.get(3).context("prefix needs a prefix string")?;
            let words = index.search_by_prefix(prefix);
            if words.is_empty() {
                println!("No words start with '{}'.", prefix);
            } else {
                for word in words {
                    println!("{}", word);
                }
            }
        }
        "remove" => {
            let word = args.get(3).context("remove needs a word")?;
            let line = match args.get(4) {
                Some(raw) => Some(raw.parse::<u32>().context("line must be a number")?),
                None => None,
            };
            if index.remove(word, line) {
                println!("Removed.");
            } else {
                println!("Word or line not found.");
            }
        }
        "frequent" => match index.most_frequent() {
            None => println!("The index is empty."),
            Some((word, count)) => {
                println!("'{}' occurs on {} different lines.", word, count)
            }
        },
        other => bail!("unknown command '{}'", other),
    }

    Ok(())
}
