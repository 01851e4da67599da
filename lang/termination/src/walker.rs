//! The clause walker: traverses a clause body under a pattern vector,
//! collecting recursive calls into a [`CallGraph`].

use crate::comparator::compare_args;
use crate::error::{Result, TerminationError};
use crate::graph::{Call, CallGraph};
use crate::name::MutualBlock;
use crate::oracle::Oracle;
use crate::pattern::{lift_vec, DeBruijnPattern};
use crate::term::Term;

fn oracle_failure<E: std::error::Error + Send + Sync + 'static>(err: E) -> TerminationError {
    TerminationError::OracleFailure(Box::new(err))
}

/// Walk `term` under pattern vector `patterns`, inside `block` from the
/// perspective of the member at `caller_idx`, collecting every call the
/// term makes to a member of `block`.
pub fn walk<O: Oracle>(
    term: &Term,
    patterns: &[DeBruijnPattern],
    block: &MutualBlock,
    caller_idx: usize,
    oracle: &O,
) -> Result<CallGraph> {
    let reduced = oracle.reduce(term).map_err(oracle_failure)?;
    match reduced {
        Term::Var(_, args) | Term::Con(_, args) | Term::Meta(_, args) => {
            walk_args(&args, patterns, block, caller_idx, oracle)
        }
        Term::Lit(_) | Term::Sort => Ok(CallGraph::empty()),
        Term::Lam(body) => {
            let lifted = lift_vec(patterns);
            walk(&body, &lifted, block, caller_idx, oracle)
        }
        Term::Pi(dom, body) => {
            let from_dom = walk(&dom, patterns, block, caller_idx, oracle)?;
            let lifted = lift_vec(patterns);
            let from_body = walk(&body, &lifted, block, caller_idx, oracle)?;
            Ok(CallGraph::union(from_dom, from_body))
        }
        Term::Fun(dom, cod) => {
            let from_dom = walk(&dom, patterns, block, caller_idx, oracle)?;
            let from_cod = walk(&cod, patterns, block, caller_idx, oracle)?;
            Ok(CallGraph::union(from_dom, from_cod))
        }
        Term::Def(target_name, args) => {
            let mut graph = walk_args(&args, patterns, block, caller_idx, oracle)?;
            if block.index_of(target_name).is_some() {
                let matrix = compare_args(patterns, &args);
                let witness = oracle.ranges_of(target_name).map_err(oracle_failure)?;
                let source = block.members()[caller_idx];
                graph.insert(Call { source, target: target_name, matrix, witness });
            }
            Ok(graph)
        }
        Term::Blocked(_) => {
            Err(TerminationError::impossible("Blocked term observed after normalization"))
        }
    }
}

fn walk_args<O: Oracle>(
    args: &[Term],
    patterns: &[DeBruijnPattern],
    block: &MutualBlock,
    caller_idx: usize,
    oracle: &O,
) -> Result<CallGraph> {
    let mut graph = CallGraph::empty();
    for arg in args {
        let g = walk(arg, patterns, block, caller_idx, oracle)?;
        graph = CallGraph::union(graph, g);
    }
    Ok(graph)
}
