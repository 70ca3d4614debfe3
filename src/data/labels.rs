//! Bit-label file loading
//!
//! Format: the first line holds `N bit_width`; every following line is
//! `bit_width` space-separated 0/1 tokens, one line per node in id order.

use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{anyhow, Context, Result};

/// Load the per-node bit labels and their width
///
/// Token k of a line becomes bit `bit_width - 1 - k` of the label, so the
/// leftmost token is the most significant bit. Hamming distances only need
/// the mapping to be consistent across nodes.
pub fn load_label_records(path: &str) -> Result<(Vec<u64>, u32)> {
    log::info!("Reading bit labels: {}", path);

    let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
    let mut lines = BufReader::new(file).lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(anyhow!("{}: empty file", path)),
    };
    let header_fields: Vec<&str> = header.split_whitespace().collect();
    if header_fields.len() != 2 {
        return Err(anyhow!(
            "line 1: expected node count and bit width, found {} fields",
            header_fields.len()
        ));
    }
    let node_count: usize = header_fields[0]
        .parse()
        .with_context(|| format!("line 1: invalid node count {:?}", header_fields[0]))?;
    let bit_width: u32 = header_fields[1]
        .parse()
        .with_context(|| format!("line 1: invalid bit width {:?}", header_fields[1]))?;
    if bit_width == 0 || bit_width > 64 {
        return Err(anyhow!("line 1: bit width {} outside [1, 64]", bit_width));
    }

    let mut labels = Vec::with_capacity(node_count);
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2;
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.is_empty() {
            continue; // Skip blank lines
        }
        if tokens.len() != bit_width as usize {
            return Err(anyhow!(
                "line {}: expected {} bits, found {}",
                line_no,
                bit_width,
                tokens.len()
            ));
        }

        let mut label = 0u64;
        for token in tokens {
            let bit = match token {
                "0" => 0,
                "1" => 1,
                _ => {
                    return Err(anyhow!(
                        "line {}: expected 0 or 1, found {:?}",
                        line_no,
                        token
                    ))
                }
            };
            label = (label << 1) | bit;
        }
        labels.push(label);
    }

    if labels.len() != node_count {
        return Err(anyhow!(
            "header declares {} nodes but {} label lines were found",
            node_count,
            labels.len()
        ));
    }

    log::info!("Loaded {} labels of {} bits each", labels.len(), bit_width);

    Ok((labels, bit_width))
}
