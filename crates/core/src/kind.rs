//! The two parallel entity collections managed by the service.

use std::fmt;

/// An entity kind. Both kinds share the same row shape and CRUD surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Employee,
    Role,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Employee, EntityKind::Role];

    /// Singular, lowercase name used in messages and log fields.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Employee => "employee",
            EntityKind::Role => "role",
        }
    }

    /// Backing table name. Must match the migrations in `db/migrations`.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Employee => "employee",
            EntityKind::Role => "role",
        }
    }

    /// Plural path segment under `/api/v1`.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Employee => "employees",
            EntityKind::Role => "roles",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
