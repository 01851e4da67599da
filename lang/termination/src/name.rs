use std::fmt;

/// An opaque identifier for a top-level function or constructor.
///
/// The host owns the mapping from source identifiers to `Name`s; the core
/// only ever compares, hashes and displays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(pub u32);

impl Name {
    pub const fn new(id: u32) -> Self {
        Name(id)
    }

    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ordered sequence of mutually recursive [`Name`]s.
///
/// Indices into this sequence double as the row/column identity used by the
/// call-matrix algebra: the position of a definition in its block is fixed
/// for the lifetime of one [`crate::terminate_check`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutualBlock {
    members: Vec<Name>,
}

impl MutualBlock {
    pub fn new(members: Vec<Name>) -> Self {
        MutualBlock { members }
    }

    pub fn members(&self) -> &[Name] {
        &self.members
    }

    /// The position of `name` in the block, if it is a member.
    pub fn index_of(&self, name: Name) -> Option<usize> {
        self.members.iter().position(|&m| m == name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
