//! End-to-end checks of `terminate_check` against whole toy blocks, plus the
//! graph-level invariants (no two edges sharing a (source, target, matrix)
//! key, closure idempotence) restated end to end.

use std::convert::Infallible;

use fxhash::FxHashMap;
use termination::{
    terminate_check, Call, CallGraph, CallMatrix, Clause, ClauseBody, Config, DefKind, Idx,
    MutualBlock, Name, Oracle, Order, Pattern, RangeSet, Term, TerminationError, TerminationResult,
};

struct ToyHost {
    defs: FxHashMap<Name, DefKind>,
    block: MutualBlock,
}

impl Oracle for ToyHost {
    type Error = Infallible;

    fn reduce(&self, term: &Term) -> Result<Term, Infallible> {
        Ok(term.clone())
    }

    fn def_of(&self, name: Name) -> Result<DefKind, Infallible> {
        Ok(self.defs.get(&name).cloned().unwrap_or(DefKind::Other))
    }

    fn mutual_blocks_containing(&self, _name: Name) -> Result<MutualBlock, Infallible> {
        Ok(self.block.clone())
    }

    fn ranges_of(&self, _name: Name) -> Result<RangeSet, Infallible> {
        Ok(RangeSet::empty())
    }
}

fn bind(n: usize, body: ClauseBody) -> ClauseBody {
    (0..n).fold(body, |acc, _| ClauseBody::Bind(Box::new(acc)))
}

const ACK: Name = Name(0);
const S: Name = Name(1);
const Z: Name = Name(2);

/// `ack Z n = n`
/// `ack (S m) Z = ack m (S Z)`
/// `ack (S m) (S n) = ack m (ack (S m) n)`
///
/// The classical size-change example: no single argument decreases on
/// every call, but the matrix algebra closes to a set of idempotent
/// self-loops that each show a strict decrease somewhere.
#[test]
fn ackermann_terminates() {
    let clause_zero_n = Clause {
        patterns: vec![Pattern::ConP(Z, vec![]), Pattern::VarP(Some("n".into()))],
        body: bind(1, ClauseBody::Body(Term::Var(Idx(0), vec![]))),
    };

    let clause_succ_zero = Clause {
        patterns: vec![
            Pattern::ConP(S, vec![Pattern::VarP(Some("m".into()))]),
            Pattern::ConP(Z, vec![]),
        ],
        body: bind(
            1,
            ClauseBody::Body(Term::Def(
                ACK,
                vec![Term::Var(Idx(0), vec![]), Term::Con(S, vec![Term::Con(Z, vec![])])],
            )),
        ),
    };

    let clause_succ_succ = Clause {
        patterns: vec![
            Pattern::ConP(S, vec![Pattern::VarP(Some("m".into()))]),
            Pattern::ConP(S, vec![Pattern::VarP(Some("n".into()))]),
        ],
        body: bind(
            2,
            ClauseBody::Body(Term::Def(
                ACK,
                vec![
                    Term::Var(Idx(1), vec![]),
                    Term::Def(
                        ACK,
                        vec![Term::Con(S, vec![Term::Var(Idx(1), vec![])]), Term::Var(Idx(0), vec![])],
                    ),
                ],
            )),
        ),
    };

    let mut defs = FxHashMap::default();
    defs.insert(
        ACK,
        DefKind::Function(vec![clause_zero_n, clause_succ_zero, clause_succ_succ]),
    );
    let block = MutualBlock::new(vec![ACK]);
    let host = ToyHost { defs, block: block.clone() };

    let result = terminate_check(&block, &host, &Config::default()).unwrap();
    assert_eq!(result, TerminationResult::Ok);
}

/// Mutual recursion that never decreases: `f x = g x ; g x = f x`. The
/// composed `f -> f` loop has matrix `[[Le]]`, idempotent, with no `Lt` on
/// its diagonal.
#[test]
fn mutual_block_failure_report_names_every_member() {
    const F: Name = Name(10);
    const G: Name = Name(11);

    let f_clause = Clause {
        patterns: vec![Pattern::VarP(Some("x".into()))],
        body: bind(1, ClauseBody::Body(Term::Def(G, vec![Term::Var(Idx(0), vec![])]))),
    };
    let g_clause = Clause {
        patterns: vec![Pattern::VarP(Some("y".into()))],
        body: bind(1, ClauseBody::Body(Term::Def(F, vec![Term::Var(Idx(0), vec![])]))),
    };

    let mut defs = FxHashMap::default();
    defs.insert(F, DefKind::Function(vec![f_clause]));
    defs.insert(G, DefKind::Function(vec![g_clause]));
    let block = MutualBlock::new(vec![F, G]);
    let host = ToyHost { defs, block: block.clone() };

    let result = terminate_check(&block, &host, &Config::default()).unwrap();
    match result {
        TerminationResult::Failed(reports) => {
            // Both the composed f->f and g->g self-loops are idempotent
            // with an all-`Le` diagonal.
            assert_eq!(reports.len(), 2);
            assert!(reports.iter().all(|r| r.names == vec![F, G]));
        }
        TerminationResult::Ok => panic!("expected a non-terminating verdict"),
    }
}

#[test]
fn no_two_graph_records_share_source_target_matrix() {
    let mut graph = CallGraph::empty();
    let matrix = termination::CallMatrix::make(1, 1, |_, _| termination::Order::Lt);
    graph.insert(Call { source: Name(0), target: Name(0), matrix: matrix.clone(), witness: RangeSet::empty() });
    graph.insert(Call { source: Name(0), target: Name(0), matrix, witness: RangeSet::empty() });
    assert_eq!(graph.len(), 1);
}

#[test]
fn closure_is_idempotent_end_to_end() {
    let mut graph = CallGraph::empty();
    let lt = termination::CallMatrix::make(1, 1, |_, _| termination::Order::Lt);
    graph.insert(Call { source: Name(0), target: Name(0), matrix: lt, witness: RangeSet::empty() });
    let config = Config::default();
    let once = graph.complete(&config).unwrap();
    let twice = once.clone().complete(&config).unwrap();
    assert_eq!(once.len(), twice.len());
}

/// A fully connected 8-function block, arity 4, every edge carrying the
/// all-`Unk` matrix: the largest shape the default fuel is meant to absorb
/// without ever raising `Impossible`.
#[test]
fn closure_fuel_survives_worst_case_block() {
    let names: Vec<Name> = (0..8).map(Name).collect();
    let all_unk = CallMatrix::make(4, 4, |_, _| Order::Unk);

    let mut graph = CallGraph::empty();
    for &source in &names {
        for &target in &names {
            graph.insert(Call {
                source,
                target,
                matrix: all_unk.clone(),
                witness: RangeSet::empty(),
            });
        }
    }

    let closed = graph.complete(&Config::default());
    assert!(closed.is_ok());
}

#[derive(Debug)]
struct StubOracleError;

impl std::fmt::Display for StubOracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stub oracle failure")
    }
}

impl std::error::Error for StubOracleError {}

/// An oracle whose `reduce` always fails.
struct FailingHost {
    defs: FxHashMap<Name, DefKind>,
    block: MutualBlock,
}

impl Oracle for FailingHost {
    type Error = StubOracleError;

    fn reduce(&self, _term: &Term) -> Result<Term, StubOracleError> {
        Err(StubOracleError)
    }

    fn def_of(&self, name: Name) -> Result<DefKind, StubOracleError> {
        Ok(self.defs.get(&name).cloned().unwrap_or(DefKind::Other))
    }

    fn mutual_blocks_containing(&self, _name: Name) -> Result<MutualBlock, StubOracleError> {
        Ok(self.block.clone())
    }

    fn ranges_of(&self, _name: Name) -> Result<RangeSet, StubOracleError> {
        Ok(RangeSet::empty())
    }
}

/// A failing oracle surfaces as `TerminationError::OracleFailure` unchanged:
/// no wrapping, no retry.
#[test]
fn oracle_failure_propagates_unchanged() {
    const F: Name = Name(42);

    let clause = Clause {
        patterns: vec![Pattern::VarP(Some("x".into()))],
        body: bind(1, ClauseBody::Body(Term::Def(F, vec![Term::Var(Idx(0), vec![])]))),
    };
    let mut defs = FxHashMap::default();
    defs.insert(F, DefKind::Function(vec![clause]));
    let block = MutualBlock::new(vec![F]);
    let host = FailingHost { defs, block: block.clone() };

    let err = terminate_check(&block, &host, &Config::default()).unwrap_err();
    match err {
        TerminationError::OracleFailure(inner) => assert_eq!(inner.to_string(), "stub oracle failure"),
        TerminationError::Impossible { .. } => panic!("expected OracleFailure, got Impossible"),
    }
}
