//! Internal Diesel row structs for the `users` table.
//!
//! These types never leave the persistence module; repositories convert them
//! into domain values at the boundary.

use diesel::prelude::*;

use super::schema::users;

/// Row read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
}

/// Row inserted when a user is created.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
}
