use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use indicatif::ProgressIterator;
use log::info;

use super::{dynamic_graph::DynamicGraph, VertexId, Weight};
use crate::error::GraphError;

pub fn from_file(path: &Path) -> Result<DynamicGraph, GraphError> {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("fmi") => from_fmi_file(path),
        Some("gr") => from_gr_file(path),
        _ => Err(GraphError::UnknownExtension(path.to_path_buf())),
    }
}

fn open_lines(path: &Path) -> Result<impl Iterator<Item = Result<String, GraphError>>, GraphError> {
    let file = File::open(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let path = path.to_path_buf();

    Ok(BufReader::new(file).lines().map(move |line| {
        line.map_err(|source| GraphError::Io {
            path: path.clone(),
            source,
        })
    }))
}

fn parse_value<T: FromStr>(
    values: &mut std::str::SplitWhitespace,
    what: &'static str,
    line: &str,
) -> Result<T, GraphError> {
    values
        .next()
        .ok_or_else(|| GraphError::MissingValue {
            what,
            line: line.to_string(),
        })?
        .parse()
        .map_err(|_| GraphError::Parse {
            what,
            line: line.to_string(),
        })
}

/// Reads a graph in the FMI text format.
///
/// Vertex lines are skipped, coordinates are of no interest here. Every edge
/// line `srcIDX trgIDX cost ...` becomes a one-way edge.
pub fn from_fmi_file(path: &Path) -> Result<DynamicGraph, GraphError> {
    // skip comment and blank lines
    let mut lines = open_lines(path)?.filter(|line| match line {
        Ok(line) => !(line.starts_with('#') || line.trim().is_empty()),
        Err(_) => true,
    });

    let mut next_count = |what: &'static str| -> Result<usize, GraphError> {
        let line = lines
            .next()
            .ok_or(GraphError::UnexpectedEof { what, expected: 1 })??;
        parse_value(&mut line.split_whitespace(), what, &line)
    };
    let number_of_vertices = next_count("vertex count")?;
    let number_of_edges = next_count("edge count")?;

    let mut graph = DynamicGraph::with_vertices(number_of_vertices as u32);

    let mut vertex_lines = 0;
    for line in lines.by_ref().take(number_of_vertices) {
        line?;
        vertex_lines += 1;
    }
    if vertex_lines < number_of_vertices {
        return Err(GraphError::UnexpectedEof {
            what: "vertices",
            expected: number_of_vertices,
        });
    }

    let mut edge_lines = 0;
    for line in lines
        .take(number_of_edges)
        .progress_count(number_of_edges as u64)
    {
        // srcIDX trgIDX cost type maxspeed
        let line = line?;
        let mut values = line.split_whitespace();
        let tail: VertexId = parse_value(&mut values, "tail", &line)?;
        let head: VertexId = parse_value(&mut values, "head", &line)?;
        let weight: Weight = parse_value(&mut values, "weight", &line)?;
        if tail != head {
            graph.add_edge(tail, head, weight, true, false);
        }
        edge_lines += 1;
    }
    if edge_lines < number_of_edges {
        return Err(GraphError::UnexpectedEof {
            what: "edges",
            expected: number_of_edges,
        });
    }

    info!(
        "read {} vertices and {} edges from {}",
        graph.number_of_vertices(),
        edge_lines,
        path.display()
    );
    Ok(graph)
}

/// Reads a graph in the DIMACS `.gr` format, only `a tail head cost` lines are
/// of interest.
pub fn from_gr_file(path: &Path) -> Result<DynamicGraph, GraphError> {
    let mut graph = DynamicGraph::new();

    for line in open_lines(path)? {
        let line = line?;
        let mut values = line.split_whitespace();
        if values.next() != Some("a") {
            continue;
        }
        let tail: VertexId = parse_value(&mut values, "tail", &line)?;
        let head: VertexId = parse_value(&mut values, "head", &line)?;
        let weight: Weight = parse_value(&mut values, "cost", &line)?;
        if tail != head {
            graph.add_edge(tail, head, weight, true, false);
        }
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}", std::process::id(), name));
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_fmi() {
        let path = write_temp(
            "small.fmi",
            "# Id : 1\n# Timestamp : 0\n\n3\n2\n0 100 48.0 9.0 0\n1 101 48.1 9.1 0\n2 102 48.2 9.2 0\n0 1 4 1 50\n1 2 6 1 50\n",
        );
        let graph = from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(graph.number_of_vertices(), 3);
        assert_eq!(graph.min_arc(0, 1).unwrap().weight, 4.0);
        assert_eq!(graph.min_arc(1, 2).unwrap().weight, 6.0);
        assert!(graph.min_arc(1, 0).is_none());
    }

    #[test]
    fn truncated_fmi_is_an_error() {
        let path = write_temp("truncated.fmi", "2\n3\n0 0 0 0 0\n1 0 0 0 0\n0 1 4\n");
        let result = from_fmi_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            result,
            Err(GraphError::UnexpectedEof { what: "edges", .. })
        ));
    }

    #[test]
    fn reads_gr() {
        let path = write_temp("small.gr", "c comment\np sp 3 2\na 0 1 7\na 1 2 1\n");
        let graph = from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(graph.min_arc(0, 1).unwrap().weight, 7.0);
        assert_eq!(graph.number_of_arcs(), 4);
    }

    #[test]
    fn unknown_extension() {
        let result = from_file(Path::new("graph.osm"));
        assert!(matches!(result, Err(GraphError::UnknownExtension(_))));
    }
}
