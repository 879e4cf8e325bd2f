use std::fs;
use std::path::Path;

use nom::IResult;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{digit1, space0, space1};
use nom::combinator::{all_consuming, map_res, opt};
use nom::number::complete::double;
use nom::sequence::{delimited, preceded, terminated, tuple};

use crate::color::{MAX_VERTICES, VertexId, WeightedInstance};
use crate::error::{ColoringError, Result};

/*
File format:

    DIMENSION
    <number of vertices>
    GRAPH
    <u> <v> [<weight>]
    ...

keywords are case insensitive, blank lines are ignored, vertices are numbered from 1.
at most MAX_VERTICES vertices.
*/


/// reads an unsigned integer
fn unsigned(s:&str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(s)
}

/// reads a line made of a single keyword (case insensitive)
pub fn read_keyword<'a>(s:&'a str, keyword:&'static str) -> IResult<&'a str, &'a str> {
    all_consuming(delimited(space0, tag_no_case(keyword), space0))(s)
}

/// reads the line containing the number of vertices
pub fn read_dimension(s:&str) -> IResult<&str, usize> {
    all_consuming(delimited(space0, unsigned, space0))(s)
}

/// reads an edge line: two vertices and an optional weight
pub fn read_edge(s:&str) -> IResult<&str, (VertexId, VertexId, Option<f64>)> {
    all_consuming(terminated(
        tuple((
            preceded(space0, unsigned),
            preceded(space1, unsigned),
            opt(preceded(space1, double)),
        )),
        space0
    ))(s)
}

/**
parses an instance. Edges without a weight get `default_weight`.
Self-loops, duplicate edges, unknown vertices and invalid weights are rejected.
*/
pub fn read_str(content:&str, default_weight:f64) -> Result<WeightedInstance> {
    let mut lines = content.lines()
        .enumerate()
        .map(|(i,l)| (i+1, l.trim()))
        .filter(|(_,l)| !l.is_empty());
    // header
    let (line_nb, line) = lines.next()
        .ok_or_else(|| ColoringError::format(1, "empty instance (expected 'DIMENSION')"))?;
    if read_keyword(line, "DIMENSION").is_err() {
        return Err(ColoringError::format(line_nb, format!("expected 'DIMENSION', found '{}'", line)));
    }
    let (line_nb, line) = lines.next()
        .ok_or_else(|| ColoringError::format(line_nb+1, "missing number of vertices"))?;
    let n = match read_dimension(line) {
        Ok((_,n)) => n,
        Err(_) => return Err(ColoringError::format(line_nb, format!("expected the number of vertices, found '{}'", line))),
    };
    if n > MAX_VERTICES {
        return Err(ColoringError::format(line_nb, format!("{} vertices (at most {} supported)", n, MAX_VERTICES)));
    }
    let (line_nb, line) = lines.next()
        .ok_or_else(|| ColoringError::format(line_nb+1, "missing 'GRAPH'"))?;
    if read_keyword(line, "GRAPH").is_err() {
        return Err(ColoringError::format(line_nb, format!("expected 'GRAPH', found '{}'", line)));
    }
    // edges
    let mut res = WeightedInstance::empty(n);
    for (line_nb, line) in lines {
        let (u,v,w) = match read_edge(line) {
            Ok((_,e)) => e,
            Err(_) => return Err(ColoringError::format(line_nb, format!("expected '<u> <v> [<weight>]', found '{}'", line))),
        };
        res.add_edge(u, v, w.unwrap_or(default_weight))
            .map_err(|e| ColoringError::format(line_nb, e.to_string()))?;
    }
    Ok(res)
}

/// reads an instance from file
pub fn read_from_file<P:AsRef<Path>>(filename:P, default_weight:f64) -> Result<WeightedInstance> {
    let path = filename.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ColoringError::io(path, e))?;
    let res = read_str(&content, default_weight)?;
    log::debug!("read {:?}: {} vertices, {} edges", path, res.nb_vertices(), res.nb_edges());
    Ok(res)
}

/** writes a string encoding the instance (readable by `read_str`) */
pub fn instance_to_string(inst:&WeightedInstance) -> String {
    let mut res = String::default();
    res += "DIMENSION\n";
    res += format!("{}\n", inst.nb_vertices()).as_str();
    res += "GRAPH\n";
    for (u,v,w) in inst.edges() {
        res += format!("{} {} {}\n", u, v, w).as_str();
    }
    res
}
