//! Orchestrating a mutual block: enumerate its members, aggregate calls,
//! close the graph, decide, and produce a verdict.

use derivative::Derivative;

use crate::config::Config;
use crate::decision::{self, Decision};
use crate::error::{Result, TerminationError};
use crate::graph::CallGraph;
use crate::name::{MutualBlock, Name};
use crate::oracle::{DefKind, Oracle};
use crate::pattern::extract_clause;
use crate::range::RangeSet;
use crate::walker;

/// One problematic idempotent call, reported against every member of the
/// block rather than just the idempotent loop's own name, since the
/// composed loop may trace through any of them.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq)]
pub struct FailureReport {
    pub names: Vec<Name>,
    #[derivative(PartialEq = "ignore")]
    pub call_sites: RangeSet,
}

/// The public verdict for one mutual block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationResult {
    Ok,
    Failed(Vec<FailureReport>),
}

fn oracle_failure<E: std::error::Error + Send + Sync + 'static>(err: E) -> TerminationError {
    TerminationError::OracleFailure(Box::new(err))
}

/// Decide whether `block` terminates, using `oracle` to resolve
/// definitions, normalize terms and fetch diagnostic ranges.
pub fn terminate_check<O: Oracle>(
    block: &MutualBlock,
    oracle: &O,
    config: &Config,
) -> Result<TerminationResult> {
    let mut graph = CallGraph::empty();

    for (idx, &name) in block.members().iter().enumerate() {
        let def = oracle.def_of(name).map_err(oracle_failure)?;
        let DefKind::Function(clauses) = def else {
            // Calls to this name still contribute transitively, via the
            // argument traversal that happens wherever some other member
            // of the block applies it -- but it cannot itself close a
            // cycle, since it contributes no clauses to walk.
            continue;
        };
        let mut calls_for_def = 0usize;
        for clause in clauses {
            let Some(extraction) = extract_clause(&clause.patterns, clause.body)? else {
                continue; // absurd clause: no calls
            };
            let clause_graph = walker::walk(&extraction.body, &extraction.patterns, block, idx, oracle)?;
            calls_for_def += clause_graph.len();
            graph = CallGraph::union(graph, clause_graph);
        }
        log::debug!("definition {name} contributed {calls_for_def} call(s) before closure");
    }

    log::debug!("call graph has {} edge(s) before closure", graph.len());
    let closed = graph.complete(config)?;
    log::debug!("call graph has {} edge(s) after closure", closed.len());

    match decision::decide(&closed)? {
        Decision::Terminates => Ok(TerminationResult::Ok),
        Decision::Failed(loops) => {
            let reports = loops
                .into_iter()
                .map(|failing| FailureReport {
                    names: block.members().to_vec(),
                    call_sites: failing.witness,
                })
                .collect();
            Ok(TerminationResult::Failed(reports))
        }
    }
}
