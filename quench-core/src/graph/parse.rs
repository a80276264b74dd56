//! Text problem format.
//!
//! The first non-blank line is a `# <N> <M>` header (the `#` may be attached
//! to `N`). Every following non-blank line that does not start with `#` is
//! an edge: `v1 v2 … vk w`, i.e. `k ≥ 1` integer labels followed by a real
//! weight. A header edge count that disagrees with the observed count is a
//! warning; the observed count wins.

use tracing::warn;

use crate::error::{Error, Result};
use crate::graph::remap::RemapPolicy;
use crate::graph::ProblemGraph;

/// Parses the text form into a canonical [`ProblemGraph`].
///
/// # Errors
/// [`Error::HeaderMalformed`], [`Error::EdgeMalformed`], or any
/// canonicalization error of [`ProblemGraph::from_edges`].
pub fn parse_problem_text(input: &str, policy: &RemapPolicy) -> Result<ProblemGraph> {
    let mut lines = input.lines().enumerate();

    let (n_vert, declared_edges) = loop {
        let Some((nr, line)) = lines.next() else {
            return Err(Error::HeaderMalformed {
                header: String::new(),
            });
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        break parse_header(line).ok_or_else(|| Error::HeaderMalformed {
            header: input.lines().nth(nr).unwrap_or_default().to_string(),
        })?;
    };

    let mut pairs: Vec<(f64, Vec<i64>)> = Vec::with_capacity(declared_edges);
    for (nr, line) in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (weight_tok, vert_toks) = match tokens.split_last() {
            Some((w, verts)) if !verts.is_empty() => (w, verts),
            _ => {
                return Err(Error::EdgeMalformed {
                    line: nr + 1,
                    reason: "need at least one vertex and a weight".to_string(),
                })
            }
        };
        let weight: f64 = weight_tok.parse().map_err(|_| Error::EdgeMalformed {
            line: nr + 1,
            reason: format!("cannot parse weight {weight_tok:?}"),
        })?;
        let verts = vert_toks
            .iter()
            .map(|t| {
                t.parse().map_err(|_| Error::EdgeMalformed {
                    line: nr + 1,
                    reason: format!("cannot parse vertex {t:?}"),
                })
            })
            .collect::<Result<Vec<i64>>>()?;
        pairs.push((weight, verts));
    }

    if pairs.len() != declared_edges {
        warn!(
            declared = declared_edges,
            found = pairs.len(),
            "header edge count disagrees with the file; using the observed count"
        );
    }

    ProblemGraph::from_edges(n_vert, pairs, policy)
}

/// Accepts `# N M` and `#N M`.
fn parse_header(line: &str) -> Option<(usize, usize)> {
    let rest = line.strip_prefix('#')?;
    let mut tokens = rest.split_whitespace();
    let n = tokens.next()?.parse().ok()?;
    let m = tokens.next()?.parse().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((n, m))
}
