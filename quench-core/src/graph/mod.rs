//! Canonical problem representation.
//!
//! A problem is a set of weighted hyperedges over `N` spins. Ingestion
//! remaps arbitrary integer user labels to internal indices in `[0, N)`,
//! sorts and deduplicates each edge's vertex list, merges duplicate edges by
//! weight summation, and drops zero-weight edges. The edge list owns the
//! edges; everything downstream refers to them by index.

pub mod normalize;
pub mod parse;
pub mod remap;

use std::collections::HashMap;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::warn;

use crate::error::{Error, Result};
use remap::{FillMode, RemapPolicy, SortOrder};

/// One k-body interaction: a weight and the sorted, duplicate-free internal
/// indices of the participating spins. Arity 1 is a local field.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperedge {
    /// Interaction strength.
    pub weight: f64,
    /// Participating spins, ascending.
    pub verts: Vec<u32>,
}

impl Hyperedge {
    /// Number of participating spins.
    #[inline]
    pub fn arity(&self) -> usize {
        self.verts.len()
    }
}

/// The canonicalized hyperedge set plus the inverse label map.
#[derive(Debug, Clone)]
pub struct ProblemGraph {
    n_vert: usize,
    edges: Vec<Hyperedge>,
    itou: Vec<Option<i64>>,
}

impl ProblemGraph {
    /// Builds a canonical graph from `(weight, labels)` pairs.
    ///
    /// # Errors
    /// [`Error::UnderDeclared`] if more distinct labels appear than
    /// `n_vert`; [`Error::InconsistentLabels`] if a label falls outside
    /// `[fill_start, n_vert + fill_start)` under the `fill` policy.
    pub fn from_edges(
        n_vert: usize,
        pairs: Vec<(f64, Vec<i64>)>,
        policy: &RemapPolicy,
    ) -> Result<Self> {
        // First pass: user label -> first-seen rank.
        let mut labels: BTreeMap<i64, usize> = BTreeMap::new();
        for (_, verts) in &pairs {
            for &label in verts {
                let rank = labels.len();
                labels.entry(label).or_insert(rank);
            }
        }

        let found = labels.len();
        if found > n_vert {
            return Err(Error::UnderDeclared {
                declared: n_vert,
                found,
            });
        }

        match policy.fill {
            FillMode::Fill { start } => {
                let mut next = start;
                while labels.len() < n_vert {
                    let rank = labels.len();
                    if let Entry::Vacant(v) = labels.entry(next) {
                        v.insert(rank);
                    }
                    next += 1;
                }
                if let Some((&max, _)) = labels.last_key_value() {
                    let limit = n_vert as i64 + start;
                    if max >= limit {
                        return Err(Error::InconsistentLabels { label: max, limit });
                    }
                }
            }
            FillMode::NoFill => {
                if found < n_vert {
                    warn!(
                        uncoupled = n_vert - found,
                        "spins do not couple to anything"
                    );
                }
            }
        }

        // Second pass: internal index per label, by ascending label or by
        // first-seen rank.
        let mut utoi: HashMap<i64, u32> = HashMap::with_capacity(labels.len());
        let mut itou = vec![None; n_vert];
        match policy.order {
            SortOrder::Sorted => {
                for (internal, (&label, _)) in labels.iter().enumerate() {
                    utoi.insert(label, internal as u32);
                    itou[internal] = Some(label);
                }
            }
            SortOrder::Encounter => {
                for (&label, &rank) in &labels {
                    utoi.insert(label, rank as u32);
                    itou[rank] = Some(label);
                }
            }
        }

        // Canonical edge form, then duplicate merge (first occurrence keeps
        // its position) and zero-weight removal.
        let mut edges: Vec<Hyperedge> = Vec::with_capacity(pairs.len());
        let mut by_verts: HashMap<Vec<u32>, usize> = HashMap::with_capacity(pairs.len());
        for (weight, user_verts) in pairs {
            let mut verts: Vec<u32> = user_verts.iter().map(|l| utoi[l]).collect();
            verts.sort_unstable();
            verts.dedup();
            match by_verts.entry(verts) {
                std::collections::hash_map::Entry::Occupied(o) => {
                    edges[*o.get()].weight += weight;
                }
                std::collections::hash_map::Entry::Vacant(v) => {
                    let verts = v.key().clone();
                    v.insert(edges.len());
                    edges.push(Hyperedge { weight, verts });
                }
            }
        }
        edges.retain(|e| e.weight != 0.0);

        if edges.is_empty() {
            warn!("problem contains no interactions; energy will be zero");
        }

        Ok(Self {
            n_vert,
            edges,
            itou,
        })
    }

    /// Number of spins.
    #[inline]
    pub fn n_vert(&self) -> usize {
        self.n_vert
    }

    /// Number of canonical edges.
    #[inline]
    pub fn n_edge(&self) -> usize {
        self.edges.len()
    }

    /// The canonical edges.
    #[inline]
    pub fn edges(&self) -> &[Hyperedge] {
        &self.edges
    }

    /// The user label of internal spin `i`, if it has one. `None` only for
    /// spins allocated beyond the labels found under `no_fill`.
    #[inline]
    pub fn user_label(&self, i: usize) -> Option<i64> {
        self.itou[i]
    }

    /// Per-spin lists of edge indices. Arity-duplicate-free: a spin appears
    /// at most once per edge, so each edge index occurs at most once per
    /// list.
    pub fn adjacency(&self) -> Vec<Vec<u32>> {
        let mut adj = vec![Vec::new(); self.n_vert];
        for (ei, edge) in self.edges.iter().enumerate() {
            for &v in &edge.verts {
                adj[v as usize].push(ei as u32);
            }
        }
        adj
    }

    /// Signed sum of all canonical edge weights.
    pub fn weight_sum(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}
