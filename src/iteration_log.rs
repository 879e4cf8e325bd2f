use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::color::VertexId;
use crate::search::SearchResult;
use crate::search::observer::{Candidate, SearchObserver};
use crate::search::state::StateSummary;

/// joins summaries with ", "
fn join<T:ToString>(elts:&[T]) -> String {
    elts.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ")
}

/**
Writes a human-readable trace of a search: open and closed lists at each iteration,
candidate colors for the greedy search, and the final result.

Write errors do not interrupt the search: the first one is kept and returned by `finish`.
*/
#[derive(Debug)]
pub struct IterationLog<W:Write> {
    out: W,
    error: Option<io::Error>,
}

impl IterationLog<BufWriter<File>> {
    /// creates (or truncates) the log file
    pub fn create<P:AsRef<Path>>(path:P) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W:Write> IterationLog<W> {
    /// log written to any writer
    pub fn new(out:W) -> Self { Self { out, error: None } }

    /// flushes the log, returns the first write error (if any) and the writer
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write(&mut self, content:String) {
        if self.error.is_none() {
            if let Err(e) = self.out.write_all(content.as_bytes()) {
                log::warn!("iteration log: {}", e);
                self.error = Some(e);
            }
        }
    }
}

impl<W:Write> SearchObserver for IterationLog<W> {
    fn enabled(&self) -> bool { self.error.is_none() }

    fn on_iteration(&mut self, iteration:usize, open:&[StateSummary], closed:&[StateSummary]) {
        self.write(format!(
            "Iteration {}:\nOpen: {}\nClosed: {}\n\n", iteration, join(open), join(closed)
        ));
    }

    fn on_candidates(&mut self, vertex:VertexId, candidates:&[Candidate]) {
        let mut res = format!("=== vertex {} ===\n", vertex);
        if candidates.is_empty() {
            res += "Open: (no valid color)\n";
        } else {
            let open:Vec<String> = candidates.iter()
                .map(|c| format!("{}={} (+{})", c.vertex, c.color, c.additional_cost))
                .collect();
            res += format!("Open: {}\n", open.join(", ")).as_str();
        }
        self.write(res);
    }

    fn on_outcome(&mut self, result:&SearchResult) {
        let res = match result {
            SearchResult::Solved(s) => format!("Solution: {} (cost {})\n", s.assignment, s.total_cost),
            SearchResult::NoSolution(f) => format!("No solution: {:?}\n", f),
        };
        self.write(res);
    }
}
