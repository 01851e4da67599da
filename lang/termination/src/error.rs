use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// The three error kinds distinguished by this crate.
///
/// `NonTerminating` is deliberately absent from this type: a rejected
/// termination check is an ordinary value carried by
/// [`crate::TerminationResult::Failed`], not an error.
#[derive(Error, Diagnostic, Debug)]
pub enum TerminationError {
    /// An internal invariant was violated. This should never occur on
    /// well-typed input; the core never attempts to recover from it.
    #[error("internal invariant violated: {message}")]
    #[diagnostic(code(termination::impossible))]
    Impossible {
        message: String,
        #[label]
        span: Option<SourceSpan>,
    },

    /// A host-supplied oracle (`reduce`, `def_of`, ...) failed. Propagated
    /// unchanged; the core adds no context and performs no retry.
    #[error("a host oracle failed while checking termination")]
    #[diagnostic(code(termination::oracle_failure))]
    OracleFailure(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl TerminationError {
    pub fn impossible(message: impl Into<String>) -> Self {
        TerminationError::Impossible { message: message.into(), span: None }
    }
}

pub type Result<T> = std::result::Result<T, TerminationError>;
