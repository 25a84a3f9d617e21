//! Component A — Graph Loader.
//!
//! Reads serialized node and adjacency-list shards from a path prefix and
//! merges them into a single in-memory `Graph`. See SPEC_FULL.md §4.1.

use std::path::{Path, PathBuf};

use prost::Message;
use smc_core::{Graph, Link, Links, Nodes, SmcError, SmcResult};
use tracing::{debug, info, warn};

use crate::proto;

/// Enumerate shard files matching `{prefix}*nodes_*.pb` and
/// `{prefix}*adjacency_lists_*.pb`, decode each, and merge them into a
/// single `Graph`.
///
/// Matches within each glob are sorted lexicographically before decoding,
/// giving a deterministic load order for a fixed filesystem layout (the
/// specification only requires *a* total order consistent with filesystem
/// enumeration, not this particular one).
pub fn load(prefix: &str) -> SmcResult<Graph> {
    let node_shards = glob_shards(prefix, "nodes_")?;
    let link_shards = glob_shards(prefix, "adjacency_lists_")?;

    let mut nodes = Nodes::default();
    for path in &node_shards {
        merge_nodes_shard(&mut nodes, path)?;
    }

    let mut links = Links::default();
    for path in &link_shards {
        merge_links_shard(&mut links, path)?;
    }

    info!(
        total_nodes = links.total_nodes,
        edges = links.links.len(),
        node_shards = node_shards.len(),
        link_shards = link_shards.len(),
        "graph loaded"
    );

    Ok(Graph { nodes, links })
}

fn glob_shards(prefix: &str, kind: &str) -> SmcResult<Vec<PathBuf>> {
    let pattern = format!("{prefix}*{kind}*.pb");
    let mut paths: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| SmcError::ArgError(format!("invalid shard glob pattern '{pattern}': {e}")))?
        .filter_map(|entry| entry.ok())
        .collect();
    paths.sort();
    Ok(paths)
}

fn merge_nodes_shard(acc: &mut Nodes, path: &Path) -> SmcResult<()> {
    let bytes = std::fs::read(path)?;
    let shard = proto::Nodes::decode(bytes.as_slice())
        .map_err(|e| SmcError::DecodeError(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), records = shard.json.len(), "nodes shard read");
    acc.json.extend(shard.json);
    Ok(())
}

fn merge_links_shard(acc: &mut Links, path: &Path) -> SmcResult<()> {
    let bytes = std::fs::read(path)?;
    let shard = proto::Links::decode(bytes.as_slice())
        .map_err(|e| SmcError::DecodeError(format!("{}: {e}", path.display())))?;

    let mut total_nodes = shard.total_nodes as usize;
    if shard.total_nodes == 0 && !shard.links.is_empty() {
        // SchemaError per SPEC_FULL.md §7: not fatal. Log once and fall
        // back to the largest state id referenced by this shard's links.
        let inferred = shard
            .links
            .iter()
            .flat_map(|l| [l.src, l.dst])
            .max()
            .map(|m| m as usize + 1)
            .unwrap_or(0);
        warn!(
            path = %path.display(),
            inferred_total_nodes = inferred,
            "missing required field total_nodes; inferring from link endpoints"
        );
        total_nodes = inferred;
    }

    debug!(path = %path.display(), links = shard.links.len(), "links shard read");

    acc.total_nodes = acc.total_nodes.max(total_nodes);
    acc.links.extend(shard.links.into_iter().map(|l| Link {
        src: l.src as usize,
        dst: l.dst as usize,
        weight: l.weight,
        labels: l.labels,
    }));
    Ok(())
}
