use crate::error::IndexError;
use crate::index::WordIndex;
use crate::ingest::BuildStats;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the full concordance report to a sink.
///
/// Layout: one `word line1,line2,...` record per distinct word in key order,
/// a blank line, then five labeled summary fields. `total_words` in the stats
/// is the ingestion-side occurrence count, which exceeds the tree's own total
/// when the same word repeats within a line.
pub fn write_report<W: Write>(
    sink: &mut W,
    index: &WordIndex,
    stats: &BuildStats,
) -> Result<(), IndexError> {
    for record in index.records() {
        writeln!(sink, "{}", record)?;
    }

    writeln!(sink)?;
    writeln!(sink, "Total words: {}", stats.total_words)?;
    writeln!(sink, "Distinct words: {}", index.distinct_words())?;
    writeln!(sink, "Discarded words: {}", index.discarded())?;
    writeln!(
        sink,
        "Index build time: {:.6}s",
        stats.build_time.as_secs_f64()
    )?;
    writeln!(sink, "Rotations performed: {}", index.rotations())?;

    Ok(())
}

/// Writes the report to a file, replacing any previous contents.
pub fn save_report<P: AsRef<Path>>(
    path: P,
    index: &WordIndex,
    stats: &BuildStats,
) -> Result<(), IndexError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_report(&mut writer, index, stats)?;
    writer.flush()?;
    Ok(())
}
