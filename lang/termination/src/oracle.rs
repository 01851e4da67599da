//! The host-supplied collaborators this crate treats as pure oracles.
//!
//! Parsing, name resolution, type checking, elaboration, mutual-block
//! discovery and diagnostic range tracking all live on the host side of
//! this boundary; the core only ever calls through [`Oracle`].

use crate::name::{MutualBlock, Name};
use crate::pattern::Pattern;
use crate::range::RangeSet;
use crate::term::{ClauseBody, Term};

/// One equational clause: a head pattern sequence and its right-hand side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub patterns: Vec<Pattern>,
    pub body: ClauseBody,
}

/// What a top-level name resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefKind {
    /// A function defined by a (possibly empty) set of clauses.
    Function(Vec<Clause>),
    /// An axiom, primitive, datatype, constructor or record: anything the
    /// checker does not itself walk. Calls to such a name still appear in
    /// the term language as `Def` nodes; their arguments are still
    /// traversed for nested calls even though `Other` never closes a cycle
    /// on its own.
    Other,
}

/// The host oracles consumed by [`crate::terminate_check`].
///
/// Every method is assumed referentially transparent (in particular,
/// `reduce` is idempotent on its own result) and is invoked synchronously;
/// the core performs no caching of its own and makes no retry on failure.
pub trait Oracle {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Normalize `term` enough to remove any top-level metavariable or
    /// blocking constructor.
    fn reduce(&self, term: &Term) -> Result<Term, Self::Error>;

    /// What `name` resolves to.
    fn def_of(&self, name: Name) -> Result<DefKind, Self::Error>;

    /// The mutual block `name` belongs to.
    fn mutual_blocks_containing(&self, name: Name) -> Result<MutualBlock, Self::Error>;

    /// Opaque diagnostic ranges naming the occurrences of `name`.
    fn ranges_of(&self, name: Name) -> Result<RangeSet, Self::Error>;
}
