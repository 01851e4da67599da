//! Comparing one call argument against one caller pattern.

use crate::matrix::CallMatrix;
use crate::order::Order;
use crate::pattern::DeBruijnPattern;
use crate::term::{Idx, Term};

/// Build the matrix for one call: `rows = |args|`, `cols = |patterns|`,
/// entry `(r, c) = compare_term(args[r], patterns[c])`.
pub fn compare_args(patterns: &[DeBruijnPattern], args: &[Term]) -> CallMatrix {
    CallMatrix::make(args.len(), patterns.len(), |r, c| compare_term(&args[r], &patterns[c]))
}

/// Compare one argument term against one caller pattern.
pub fn compare_term(term: &Term, pattern: &DeBruijnPattern) -> Order {
    match (term, pattern) {
        (Term::Var(Idx(i), _), DeBruijnPattern::PVar(Idx(j))) => {
            if i == j {
                Order::Le
            } else {
                Order::Unk
            }
        }
        (Term::Var(_, _), DeBruijnPattern::PLit(_)) => Order::Unk,
        (Term::Var(_, _), DeBruijnPattern::PCon(_, sub)) => {
            // Any variable appearing strictly inside a constructor pattern
            // is strictly smaller than the whole pattern; composing with
            // `Lt` enforces the strictness even when a sub-comparison is
            // only `Le` or `Unk`.
            let best = sub.iter().fold(Order::Lt, |acc, p| acc.max(compare_term(term, p)));
            Order::Lt.compose(best)
        }
        (Term::Lit(l), DeBruijnPattern::PLit(l2)) => {
            if l == l2 {
                Order::Le
            } else {
                Order::Unk
            }
        }
        (Term::Con(c, ts), DeBruijnPattern::PCon(c2, ps)) if c == c2 && ts.len() == ps.len() => ts
            .iter()
            .zip(ps.iter())
            .fold(Order::Unk, |acc, (t, p)| acc.min(compare_term(t, p))),
        (Term::Con(_, _), DeBruijnPattern::PCon(_, _)) => Order::Unk,
        _ => Order::Unk,
    }
}
