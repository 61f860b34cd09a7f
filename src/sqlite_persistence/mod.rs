mod versioned_schema;

pub use versioned_schema::*;

/// Offset added to schema versions before they are stamped into
/// `PRAGMA user_version`, so that a fresh SQLite file (user_version 0) is
/// never mistaken for a versioned database.
pub const BASE_DB_VERSION: usize = 99999;
