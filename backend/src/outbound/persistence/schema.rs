//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Stored users. `id` is the primary key and is never updated.
    users (id) {
        /// Opaque identifier; UUID v4 strings for users created by this service.
        id -> Varchar,
        /// Display name. Not unique.
        name -> Varchar,
    }
}
