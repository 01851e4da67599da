//! The call graph: a deduplicated set of calls, closed under composition.

use derivative::Derivative;
use fxhash::FxHashMap;

use crate::config::Config;
use crate::error::{Result, TerminationError};
use crate::matrix::CallMatrix;
use crate::name::Name;
use crate::range::RangeSet;

/// One recursive call, with the matrix summarizing its argument-by-argument
/// size change and the source ranges of the call sites it was built from.
///
/// `witness` is diagnostic evidence, not part of a call's identity: two
/// calls with the same `(source, target, matrix)` are the same call even if
/// different concrete call sites produced them.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq)]
pub struct Call {
    pub source: Name,
    pub target: Name,
    pub matrix: CallMatrix,
    #[derivative(PartialEq = "ignore")]
    pub witness: RangeSet,
}

impl Call {
    /// Two calls over the same `(source, target, matrix)` triple are
    /// mergeable; merging unions their witnesses.
    pub fn key(&self) -> (Name, Name, &CallMatrix) {
        (self.source, self.target, &self.matrix)
    }
}

/// A set of [`Call`]s, deduplicated on `(source, target, matrix)` with
/// witness union.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    edges: FxHashMap<(Name, Name, CallMatrix), RangeSet>,
}

impl CallGraph {
    pub fn empty() -> Self {
        CallGraph { edges: FxHashMap::default() }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Insert `call`; if a call with the same `(source, target, matrix)`
    /// already exists, union the witness sets instead of adding a duplicate.
    pub fn insert(&mut self, call: Call) {
        let key = (call.source, call.target, call.matrix);
        self.edges
            .entry(key)
            .and_modify(|witness| witness.union_in_place(&call.witness))
            .or_insert(call.witness);
    }

    pub fn union(mut g1: CallGraph, g2: CallGraph) -> CallGraph {
        for (key, witness) in g2.edges {
            g1.edges
                .entry(key)
                .and_modify(|w| w.union_in_place(&witness))
                .or_insert(witness);
        }
        g1
    }

    pub fn iter(&self) -> impl Iterator<Item = Call> + '_ {
        self.edges.iter().map(|((source, target, matrix), witness)| Call {
            source: *source,
            target: *target,
            matrix: matrix.clone(),
            witness: witness.clone(),
        })
    }

    /// The transitive closure under matrix composition: repeatedly form
    /// `g' = g ∪ { compose(a, b) | a.target = b.source }` until a fixpoint.
    ///
    /// Guaranteed to terminate because the order set and the matrix shape
    /// per `(source, target)` are both finite, so finitely many distinct
    /// matrices exist per edge pair. `config.closure_fuel` bounds the
    /// number of fixpoint rounds defensively; exhausting it raises
    /// `Impossible` rather than looping or returning a wrong answer.
    pub fn complete(&self, config: &Config) -> Result<CallGraph> {
        let mut graph = self.clone();
        for _ in 0..config.closure_fuel {
            let before = graph.len();
            let edges: Vec<Call> = graph.iter().collect();
            let mut composed = CallGraph::empty();
            for a in &edges {
                for b in &edges {
                    if a.target == b.source {
                        let matrix = a.matrix.compose(&b.matrix)?;
                        composed.insert(Call {
                            source: a.source,
                            target: b.target,
                            matrix,
                            witness: a.witness.union(&b.witness),
                        });
                    }
                }
            }
            graph = CallGraph::union(graph, composed);
            if graph.len() == before {
                log::debug!("call graph closure reached a fixpoint at {} edges", graph.len());
                return Ok(graph);
            }
        }
        Err(TerminationError::impossible(
            "call graph closure did not reach a fixpoint within the configured fuel",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{LE, LT};

    fn m(entries: &[crate::order::Order]) -> CallMatrix {
        CallMatrix::make(1, 1, |_, _| entries[0])
    }

    #[test]
    fn insert_dedups_and_unions_witness() {
        let mut g = CallGraph::empty();
        g.insert(Call { source: Name(0), target: Name(0), matrix: m(&[LT]), witness: RangeSet::empty() });
        g.insert(Call { source: Name(0), target: Name(0), matrix: m(&[LT]), witness: RangeSet::empty() });
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn no_two_records_share_source_target_matrix() {
        let mut g = CallGraph::empty();
        g.insert(Call { source: Name(0), target: Name(1), matrix: m(&[LT]), witness: RangeSet::empty() });
        g.insert(Call { source: Name(0), target: Name(1), matrix: m(&[LE]), witness: RangeSet::empty() });
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn closure_is_idempotent() {
        let mut g = CallGraph::empty();
        g.insert(Call { source: Name(0), target: Name(1), matrix: m(&[LE]), witness: RangeSet::empty() });
        g.insert(Call { source: Name(1), target: Name(0), matrix: m(&[LT]), witness: RangeSet::empty() });
        let config = Config::default();
        let once = g.complete(&config).unwrap();
        let edges_once: std::collections::HashSet<_> =
            once.iter().map(|c| (c.source, c.target, c.matrix)).collect();
        let twice = once.complete(&config).unwrap();
        let edges_twice: std::collections::HashSet<_> =
            twice.iter().map(|c| (c.source, c.target, c.matrix)).collect();
        assert_eq!(edges_once, edges_twice);
    }

    #[test]
    fn closure_contains_composed_self_loop() {
        let mut g = CallGraph::empty();
        g.insert(Call { source: Name(0), target: Name(1), matrix: m(&[LE]), witness: RangeSet::empty() });
        g.insert(Call { source: Name(1), target: Name(0), matrix: m(&[LT]), witness: RangeSet::empty() });
        let closed = g.complete(&Config::default()).unwrap();
        let has_self_loop = closed.iter().any(|c| c.source == Name(0) && c.target == Name(0));
        assert!(has_self_loop);
    }
}
