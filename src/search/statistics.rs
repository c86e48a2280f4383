//! Search instrumentation.
use colored::Colorize;

use std::fmt;
use std::time::Duration;


/// Counters collected during one search.
///
/// `expansions` counts subproblems whose candidate splits were actually
/// enumerated; a solved itemset reached again via a different split
/// order costs a cache hit, never a second expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Subproblems expanded (candidate splits enumerated).
    pub expansions: u64,

    /// Cache lookups that found an entry.
    pub cache_hits: u64,

    /// Cache lookups that found nothing.
    pub cache_misses: u64,

    /// Distinct subproblems stored in the cache.
    pub cache_entries: usize,

    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}


impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "---------- search report ----------".bold())?;
        writeln!(
            f, "{:<16} {}",
            "expansions".green(), self.expansions,
        )?;
        writeln!(
            f, "{:<16} {} hit / {} miss",
            "cache".green(), self.cache_hits, self.cache_misses,
        )?;
        writeln!(
            f, "{:<16} {}",
            "subproblems".green(), self.cache_entries,
        )?;
        write!(
            f, "{:<16} {:.3} s",
            "elapsed".green(), self.elapsed.as_secs_f64(),
        )
    }
}
