//! Access policy: each operation kind has a statically defined minimum role.

use std::fmt;

use crate::caller::Role;

/// The four operations the facade exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Add,
    Edit,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Read,
        Operation::Add,
        Operation::Edit,
        Operation::Delete,
    ];

    /// Lowercase verb used in denial messages ("read", "add", ...).
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Add => "add",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Role-ordered access policy.
///
/// | Operation | Minimum role |
/// |-----------|--------------|
/// | Read      | Guest        |
/// | Add       | User         |
/// | Edit      | Moderator    |
/// | Delete    | Admin        |
///
/// Pure: the answer depends only on the operation and the role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessPolicy;

impl AccessPolicy {
    pub const fn new() -> Self {
        AccessPolicy
    }

    pub const fn minimum_role(&self, operation: Operation) -> Role {
        match operation {
            Operation::Read => Role::Guest,
            Operation::Add => Role::User,
            Operation::Edit => Role::Moderator,
            Operation::Delete => Role::Admin,
        }
    }

    /// True iff `role` is at least the minimum role for `operation`.
    pub fn authorize(&self, operation: Operation, role: Role) -> bool {
        role >= self.minimum_role(operation)
    }
}
