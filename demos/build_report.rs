use anyhow::{bail, Context};
use concordance_rs::{build_index_from_path, save_report};
use std::env;

/// Builds the concordance for a text file and writes the full report.
///
/// Usage: cargo run --example build_report <input.txt> [output.txt]
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        bail!("usage: {} <input.txt> [output.txt]", args[0]);
    }

    let input = &args[1];
    let output = args.get(2).map(String::as_str).unwrap_or("concordance.txt");

    let (index, stats) =
        build_index_from_path(input).with_context(|| format!("reading {}", input))?;
    save_report(output, &index, &stats).with_context(|| format!("writing {}", output))?;

    println!(
        "Indexed {} words ({} distinct) in {:?}",
        stats.total_words,
        index.distinct_words(),
        stats.build_time
    );
    println!("Report written to {}", output);

    Ok(())
}
