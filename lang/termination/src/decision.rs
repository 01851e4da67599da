//! Extracting a termination verdict from a closed call graph.

use derivative::Derivative;

use crate::error::Result;
use crate::graph::{Call, CallGraph};
use crate::name::Name;
use crate::order::Order;
use crate::range::RangeSet;

/// One idempotent self-loop whose diagonal has no strict decrease.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq)]
pub struct FailingLoop {
    pub name: Name,
    pub matrix: crate::matrix::CallMatrix,
    #[derivative(PartialEq = "ignore")]
    pub witness: RangeSet,
}

/// The result of deciding termination from a closed call graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Terminates,
    Failed(Vec<FailingLoop>),
}

/// A call is idempotent iff it is a self-loop whose matrix is a fixpoint of
/// composition with itself.
pub fn is_idempotent(call: &Call) -> Result<bool> {
    if call.source != call.target {
        return Ok(false);
    }
    let squared = call.matrix.compose(&call.matrix)?;
    Ok(squared == call.matrix)
}

/// Decide termination: the block terminates iff every idempotent call in
/// `graph` has at least one `Lt` entry on its matrix diagonal.
pub fn decide(graph: &CallGraph) -> Result<Decision> {
    let mut failing = Vec::new();
    for call in graph.iter() {
        if !is_idempotent(&call)? {
            continue;
        }
        let diagonal = call.matrix.diagonal()?;
        if !diagonal.iter().any(|order| *order == Order::Lt) {
            failing.push(FailingLoop { name: call.source, matrix: call.matrix, witness: call.witness });
        }
    }
    if failing.is_empty() {
        Ok(Decision::Terminates)
    } else {
        Ok(Decision::Failed(failing))
    }
}
