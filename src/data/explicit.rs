//! Edge list file loading
//!
//! Format: the first line holds the node count N; every following line is
//! `i j cost` with 1 <= i < j <= N and a non-negative integer cost.

use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{anyhow, Context, Result};

use crate::edges::Edge;

/// Load a weighted edge list and its node count
pub fn load_edge_list(path: &str) -> Result<(Vec<Edge>, usize)> {
    log::info!("Reading edge list: {}", path);

    let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
    let mut lines = BufReader::new(file).lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(anyhow!("{}: empty file", path)),
    };
    let node_count: usize = header
        .trim()
        .parse()
        .with_context(|| format!("line 1: invalid node count {:?}", header.trim()))?;

    let mut edges = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2;
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.is_empty() {
            continue; // Skip blank lines
        }
        if fields.len() != 3 {
            return Err(anyhow!(
                "line {}: expected 3 fields, found {}",
                line_no,
                fields.len()
            ));
        }

        let u: u32 = fields[0]
            .parse()
            .with_context(|| format!("line {}: invalid node id {:?}", line_no, fields[0]))?;
        let v: u32 = fields[1]
            .parse()
            .with_context(|| format!("line {}: invalid node id {:?}", line_no, fields[1]))?;
        let cost: u64 = fields[2]
            .parse()
            .with_context(|| format!("line {}: invalid edge cost {:?}", line_no, fields[2]))?;

        edges.push(Edge { u, v, cost });
    }

    log::info!("Loaded {} edges over {} nodes", edges.len(), node_count);

    Ok((edges, node_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_edge_list() {
        let file = write_temp("4\n1 2 10\n1 3 5250\n2 4 3\n");
        let (edges, node_count) = load_edge_list(file.path().to_str().unwrap()).unwrap();
        assert_eq!(node_count, 4);
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[1], Edge { u: 1, v: 3, cost: 5250 });
    }

    #[test]
    fn test_load_rejects_wrong_field_count() {
        let file = write_temp("3\n1 2\n");
        let err = load_edge_list(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_load_rejects_negative_cost() {
        let file = write_temp("3\n1 2 -7\n");
        assert!(load_edge_list(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_rejects_empty_file() {
        let file = write_temp("");
        assert!(load_edge_list(file.path().to_str().unwrap()).is_err());
    }
}
