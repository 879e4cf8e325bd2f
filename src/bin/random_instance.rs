use std::fs;

use anyhow::{Context, Result};
use clap::{App, ArgMatches, load_yaml};
use rand::SeedableRng;
use rand::rngs::StdRng;

use color_search::generator::random_instance;
use color_search::graph_file::instance_to_string;


/// parses a numeric argument
fn parse_arg<T:std::str::FromStr>(main_args:&ArgMatches, name:&str) -> Result<T> {
    let value = main_args.value_of(name).with_context(|| format!("missing argument {}", name))?;
    value.parse::<T>().ok().with_context(|| format!("unable to parse {} ({})", name, value))
}

/** generates a random instance and writes it */
pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let yaml = load_yaml!("random_instance.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let n:usize = parse_arg(&main_args, "nb_vertices")?;
    let density:f64 = parse_arg(&main_args, "density")?;
    let min_weight:f64 = parse_arg(&main_args, "min_weight")?;
    let max_weight:f64 = parse_arg(&main_args, "max_weight")?;
    let mut rng = match main_args.value_of("seed") {
        None => StdRng::from_entropy(),
        Some(_) => StdRng::seed_from_u64(parse_arg(&main_args, "seed")?),
    };
    let inst = random_instance(&mut rng, n, density, min_weight, max_weight)?;
    inst.display_statistics();
    let content = instance_to_string(&inst);
    match main_args.value_of("output") {
        None => print!("{}", content),
        Some(filename) => {
            fs::write(filename, content).with_context(|| format!("unable to write {}", filename))?;
            log::info!("instance written in {}", filename);
        }
    }
    Ok(())
}
