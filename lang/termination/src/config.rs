/// Tunable resource bounds for one [`crate::terminate_check`] call.
///
/// A value-typed, freely-copyable configuration, in the spirit of the
/// small config structs the host's printer carries (e.g. `PrintCfg`):
/// everything here has a documented default and is never required to be
/// threaded through the algorithm by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Upper bound on the number of fixpoint rounds `CallGraph::complete`
    /// may perform before giving up with `Impossible`.
    ///
    /// The order set and the matrix shape per `(source, target)` pair are
    /// both finite, so closure reaches a fixpoint well before this on any
    /// call graph actually produced by the clause walker; this bound exists
    /// only to turn a hypothetical future bug (a walker that emits
    /// unboundedly many distinct matrices for one `(source, target)` pair)
    /// into a diagnosable error instead of an infinite loop.
    pub closure_fuel: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config { closure_fuel: 10_000 }
    }
}
