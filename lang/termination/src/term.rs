//! The internal term language the clause walker traverses, and the clause
//! body shape it is traversed under.
//!
//! Terms carry de Bruijn *indices* (`Idx`, 0 = innermost binder); the
//! pattern model (`crate::pattern`) separately tracks de Bruijn *levels*
//! while a clause head is being consumed, converting every level to an
//! index in a single pass once the whole head has been walked.

use crate::name::Name;

/// An opaque literal value, comparable for equality and hashable. The host
/// owns the encoding; the core never inspects a literal's structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal(pub u64);

/// A de Bruijn index: 0 refers to the innermost enclosing binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Idx(pub usize);

/// An opaque identifier for a metavariable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetaId(pub u64);

/// The internal term language.
///
/// `Blocked` must never be observed by the walker after normalization
/// (`crate::oracle::Reduce::reduce`); seeing one is an `Impossible`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A bound variable, applied to a (possibly empty) spine of arguments.
    Var(Idx, Vec<Term>),
    /// A saturated constructor application.
    Con(Name, Vec<Term>),
    /// An application of a (possibly mutually recursive) top-level
    /// definition.
    Def(Name, Vec<Term>),
    /// A lambda abstraction.
    Lam(Box<Term>),
    /// A dependent function type.
    Pi(Box<Term>, Box<Term>),
    /// A non-dependent function type.
    Fun(Box<Term>, Box<Term>),
    /// A literal.
    Lit(Literal),
    /// A sort (universe).
    Sort,
    /// An uninstantiated metavariable, applied to its pending substitution.
    Meta(MetaId, Vec<Term>),
    /// Reduction blocked on an uninstantiated metavariable elsewhere in the
    /// term. Only ever produced transiently by the reduction oracle; must
    /// not survive a call to `reduce`.
    Blocked(Box<Term>),
}

/// The source form of one clause's right-hand side, together with the
/// binders its head patterns still need to consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseBody {
    /// A real right-hand side.
    Body(Term),
    /// One more binder to consume before reaching the body.
    Bind(Box<ClauseBody>),
    /// An unused head variable; no index is consumed.
    NoBind(Box<ClauseBody>),
    /// Absurd clause / missing right-hand side.
    NoBody,
}
