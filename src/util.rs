use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{json, Value};

use crate::color::{Assignment, CheckerResult, Solution, WeightedInstance, checker};
use crate::error::{ColoringError, Result};
use crate::search::{SearchOutcome, SearchResult};
use crate::search::tree::fill_color;

/** output files requested on the command line (None: not exported) */
#[derive(Debug, Clone, Default)]
pub struct ExportFiles {
    /// solution file
    pub solution: Option<PathBuf>,
    /// statistics (JSON)
    pub perf: Option<PathBuf>,
    /// search tree (JSON)
    pub tree_json: Option<PathBuf>,
    /// search tree (Graphviz)
    pub tree_dot: Option<PathBuf>,
    /// colored graph (Graphviz)
    pub graph_dot: Option<PathBuf>,
}

/// writes a string to a file, keeping the path in the error
fn write_file(path:&Path, content:&str) -> Result<()> {
    fs::write(path, content).map_err(|e| ColoringError::io(path, e))
}

/** solution file content: a cost line, then one "vertex color" line per vertex */
pub fn solution_to_string(solution:&Solution) -> String {
    let mut res = format!("c cost {}\n", solution.total_cost);
    for (v,c) in solution.assignment.iter() {
        res += format!("{} {}\n", v, c).as_str();
    }
    res
}

/// writes the solution in a file
pub fn write_solution<P:AsRef<Path>>(path:P, solution:&Solution) -> Result<()> {
    write_file(path.as_ref(), solution_to_string(solution).as_str())
}

/// serializes a value as JSON in a file
pub fn write_json<P:AsRef<Path>, T:Serialize>(path:P, value:&T) -> Result<()> {
    let content = serde_json::to_string(value)?;
    write_file(path.as_ref(), content.as_str())
}

/** statistics of a run, in the format of the performance files */
pub fn stats_to_json(inst_name:&str, outcome:&SearchOutcome) -> Value {
    let (primal_list, failure) = match &outcome.result {
        SearchResult::Solved(s) => (vec![s.total_cost], Value::Null),
        SearchResult::NoSolution(f) => (vec![], json!(f)),
    };
    json!({
        "inst_name": inst_name,
        "strategy": outcome.strategy,
        "primal_list": primal_list,
        "failure": failure,
        "time_searched": outcome.stats.time_searched,
        "iterations": outcome.stats.iterations,
        "expanded": outcome.stats.expanded,
        "generated": outcome.stats.generated,
        "max_frontier": outcome.stats.max_frontier,
        "tree_size": outcome.stats.tree_size,
    })
}

/**
Graphviz representation of the instance (undirected, edges labelled by their weight).
Colored vertices are filled with their color.
*/
pub fn graph_to_dot(inst:&WeightedInstance, assignment:Option<&Assignment>) -> String {
    let mut res = String::from("graph instance {\n");
    res += "\tnode [style=filled, fillcolor=white];\n";
    for v in inst.vertices() {
        match assignment.and_then(|a| a.get(v)) {
            None => res += format!("\t{};\n", v).as_str(),
            Some(c) => res += format!("\t{} [fillcolor={}];\n", v, fill_color(c)).as_str(),
        }
    }
    for (u,v,w) in inst.edges() {
        res += format!("\t{} -- {} [label=\"{}\"];\n", u, v, w).as_str();
    }
    res += "}\n";
    res
}

/// exports search results to files
pub fn export_results(
    inst:&WeightedInstance,
    inst_name:&str,
    outcome:&SearchOutcome,
    files:&ExportFiles,
) -> Result<()> {
    if let Some(filename) = &files.perf {
        write_json(filename, &stats_to_json(inst_name, outcome))?;
    }
    if let Some(filename) = &files.tree_json {
        write_json(filename, &outcome.tree)?;
    }
    if let Some(filename) = &files.tree_dot {
        write_file(filename, outcome.tree.to_dot().as_str())?;
    }
    let solution = outcome.result.solution();
    if let Some(filename) = &files.graph_dot {
        write_file(filename, graph_to_dot(inst, solution.map(|s| &s.assignment)).as_str())?;
    }
    match (&files.solution, solution) {
        (Some(filename), Some(sol)) => {
            match checker(inst, &sol.assignment) {
                CheckerResult::Ok(_) => {},
                e => log::warn!("invalid solution (reason: {:?})", e),
            }
            write_solution(filename, sol)?;
        },
        (Some(filename), None) => log::warn!("no solution to write in {:?}", filename),
        (None, _) => {},
    }
    Ok(())
}
