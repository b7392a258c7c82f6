use core::fmt;

/// Errors returned by fallible [`AvlTree`](crate::AvlTree) operations.
///
/// Every error is raised before the tree is modified.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The key passed to `insert` is already present.
    DuplicateKey,
    /// The requested key is not present.
    KeyNotFound,
    /// The operation needs at least one key, but the tree is empty.
    EmptyTree,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateKey => f.write_str("key is already present in the tree"),
            Error::KeyNotFound => f.write_str("key not found"),
            Error::EmptyTree => f.write_str("tree is empty"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;

    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::DuplicateKey.to_string(),
            "key is already present in the tree"
        );
        assert_eq!(Error::KeyNotFound.to_string(), "key not found");
        assert_eq!(Error::EmptyTree.to_string(), "tree is empty");
    }
}
