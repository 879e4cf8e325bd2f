use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{App, load_yaml};

use color_search::graph_file::read_from_file;
use color_search::iteration_log::IterationLog;
use color_search::search::{solve, SearchResult, Strategy};
use color_search::search::observer::NoopObserver;
use color_search::util::{export_results, ExportFiles};


/** reads an instance, runs the requested strategy and exports the results */
pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let inst_filename = main_args.value_of("instance").context("missing instance file")?;
    let strategy:Strategy = main_args.value_of("algorithm").unwrap_or("greedy").parse()?;
    let default_weight:f64 = main_args.value_of("weight").unwrap_or("1").parse()
        .context("unable to parse the default weight")?;
    let path_arg = |name:&str| main_args.value_of(name).map(PathBuf::from);
    let files = ExportFiles {
        solution: path_arg("solution"),
        perf: path_arg("perf"),
        tree_json: path_arg("tree"),
        tree_dot: path_arg("tree_dot"),
        graph_dot: path_arg("graph_dot"),
    };
    // read instance file
    println!("=========================================================");
    println!("reading instance: {}...", inst_filename);
    let inst = Rc::new(
        read_from_file(inst_filename, default_weight)
            .with_context(|| format!("unable to read instance {}", inst_filename))?
    );
    inst.display_statistics();
    println!("strategy: {}", strategy);
    println!("=========================================================");

    // solve it
    let outcome = match path_arg("log") {
        None => solve(inst.clone(), strategy, &mut NoopObserver),
        Some(filename) => {
            let mut log = IterationLog::create(&filename)
                .with_context(|| format!("unable to create {:?}", filename))?;
            let outcome = solve(inst.clone(), strategy, &mut log);
            log.finish().with_context(|| format!("unable to write {:?}", filename))?;
            outcome
        }
    };
    match &outcome.result {
        SearchResult::Solved(sol) => {
            println!("solution found: {}", sol.assignment);
            println!("total cost: {}", sol.total_cost);
        },
        SearchResult::NoSolution(failure) => println!("no solution found ({:?})", failure),
    }
    println!(
        "{} took {:.3} seconds. {} iterations, {} expanded, {} tree nodes",
        strategy, outcome.stats.time_searched, outcome.stats.iterations,
        outcome.stats.expanded, outcome.stats.tree_size
    );

    // export results
    export_results(&inst, inst_filename, &outcome, &files)?;
    Ok(())
}
