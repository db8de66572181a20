//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;

use super::schema::{calculations, users};

/// Row struct for reading from the calculations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = calculations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CalculationRow {
    pub id: i32,
    pub a: f64,
    pub b: f64,
    pub operation: String,
    pub result: f64,
}

/// Insertable struct for creating new calculation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = calculations)]
pub(crate) struct NewCalculationRow<'a> {
    pub a: f64,
    pub b: f64,
    pub operation: &'a str,
    pub result: f64,
}

/// Changeset struct for overwriting calculation records in place.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = calculations)]
pub(crate) struct CalculationChangeset<'a> {
    pub a: f64,
    pub b: f64,
    pub operation: &'a str,
    pub result: f64,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}
