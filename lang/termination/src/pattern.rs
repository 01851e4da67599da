//! De Bruijn patterns: the clause walker's working form of a clause head.
//!
//! A clause head is a surface-level [`Pattern`] sequence; [`extract_clause`]
//! turns it, together with the clause's [`ClauseBody`], into a
//! [`DeBruijnPattern`] vector whose `PVar` indices are valid inside the
//! clause's right-hand side.

use crate::error::{Result, TerminationError};
use crate::name::Name;
use crate::term::{ClauseBody, Idx, Literal, Term};

/// The source form of one head position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// A bound variable. The payload is a display label only; it plays no
    /// role in the algorithm.
    VarP(Option<String>),
    ConP(Name, Vec<Pattern>),
    LitP(Literal),
}

/// The clause walker's working form of a pattern.
///
/// `PUnused` records a head variable that the clause body does not bind
/// (e.g. an absurd position that was nonetheless given a name in source).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeBruijnPattern {
    PVar(Idx),
    PCon(Name, Vec<DeBruijnPattern>),
    PLit(Literal),
    PUnused,
}

impl DeBruijnPattern {
    /// Lift every index in `self` by one, for traversal under one binder.
    /// `PUnused` and `PLit` are fixed points.
    pub fn lift(&self) -> DeBruijnPattern {
        match self {
            DeBruijnPattern::PVar(Idx(i)) => DeBruijnPattern::PVar(Idx(i + 1)),
            DeBruijnPattern::PCon(name, args) => {
                DeBruijnPattern::PCon(*name, args.iter().map(DeBruijnPattern::lift).collect())
            }
            DeBruijnPattern::PLit(l) => DeBruijnPattern::PLit(*l),
            DeBruijnPattern::PUnused => DeBruijnPattern::PUnused,
        }
    }
}

/// Lift every pattern in a pattern vector by one binder.
pub fn lift_vec(pats: &[DeBruijnPattern]) -> Vec<DeBruijnPattern> {
    pats.iter().map(DeBruijnPattern::lift).collect()
}

/// A fully extracted clause: the pattern vector (indices already converted,
/// relative to the outermost position of `body`) and the clause's real
/// right-hand side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseExtraction {
    pub patterns: Vec<DeBruijnPattern>,
    pub body: Term,
}

/// Consume `heads` against `body` left to right, producing a
/// [`ClauseExtraction`], or `None` if the clause is absurd (some head
/// position is matched against [`ClauseBody::NoBody`]).
pub fn extract_clause(heads: &[Pattern], body: ClauseBody) -> Result<Option<ClauseExtraction>> {
    let mut level = 0usize;
    let mut cursor = body;
    let mut patterns = Vec::with_capacity(heads.len());

    for head in heads {
        match consume(head, level, cursor)? {
            Consumed::Absurd => return Ok(None),
            Consumed::Ok { pattern, level: new_level, rest } => {
                patterns.push(pattern);
                level = new_level;
                cursor = rest;
            }
        }
    }

    let body = match cursor {
        ClauseBody::Body(t) => t,
        ClauseBody::NoBody => return Ok(None),
        ClauseBody::Bind(_) | ClauseBody::NoBind(_) => {
            return Err(TerminationError::impossible(
                "clause head shorter than the binders its body introduces",
            ))
        }
    };

    // i -> (n-1) - i, the single level-to-index conversion. `level` is the
    // total number of binders (`n`) consumed by the head; an empty head
    // (`level == 0`) needs no conversion, so the subtraction never
    // underflows.
    let n = level;
    let patterns = patterns.into_iter().map(|p| convert_levels(&p, n)).collect();

    Ok(Some(ClauseExtraction { patterns, body }))
}

enum Consumed {
    Ok { pattern: LeveledPattern, level: usize, rest: ClauseBody },
    Absurd,
}

/// The pre-conversion form of a pattern: `PVar` carries a de Bruijn *level*
/// (counted from the clause root outward), not yet an index.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LeveledPattern {
    PVar(usize),
    PCon(Name, Vec<LeveledPattern>),
    PLit(Literal),
    PUnused,
}

fn consume(pat: &Pattern, level: usize, body: ClauseBody) -> Result<Consumed> {
    match (pat, body) {
        (_, ClauseBody::NoBody) => Ok(Consumed::Absurd),
        (Pattern::VarP(_), ClauseBody::Bind(inner)) => {
            Ok(Consumed::Ok { pattern: LeveledPattern::PVar(level), level: level + 1, rest: *inner })
        }
        (Pattern::VarP(_), ClauseBody::NoBind(inner)) => {
            Ok(Consumed::Ok { pattern: LeveledPattern::PUnused, level, rest: *inner })
        }
        (Pattern::VarP(_), ClauseBody::Body(_)) => Err(TerminationError::impossible(
            "clause head has more variables than the body has binders",
        )),
        (Pattern::LitP(l), rest) => Ok(Consumed::Ok { pattern: LeveledPattern::PLit(*l), level, rest }),
        (Pattern::ConP(name, args), rest) => {
            let mut level = level;
            let mut rest = rest;
            let mut subpats = Vec::with_capacity(args.len());
            for arg in args {
                match consume(arg, level, rest)? {
                    Consumed::Absurd => return Ok(Consumed::Absurd),
                    Consumed::Ok { pattern, level: new_level, rest: new_rest } => {
                        subpats.push(pattern);
                        level = new_level;
                        rest = new_rest;
                    }
                }
            }
            Ok(Consumed::Ok { pattern: LeveledPattern::PCon(*name, subpats), level, rest })
        }
    }
}

fn convert_levels(pat: &LeveledPattern, n: usize) -> DeBruijnPattern {
    match pat {
        LeveledPattern::PVar(i) => DeBruijnPattern::PVar(Idx((n - 1) - i)),
        LeveledPattern::PCon(name, args) => {
            DeBruijnPattern::PCon(*name, args.iter().map(|p| convert_levels(p, n)).collect())
        }
        LeveledPattern::PLit(l) => DeBruijnPattern::PLit(*l),
        LeveledPattern::PUnused => DeBruijnPattern::PUnused,
    }
}
