//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations/`
//! exactly; `diesel print-schema` can regenerate them from a live database.

diesel::table! {
    /// Calculation records with their operands, kind, and computed result.
    calculations (id) {
        /// Primary key from a monotonic sequence; never reused.
        id -> Int4,
        /// Operand A.
        a -> Float8,
        /// Operand B.
        b -> Float8,
        /// Operation kind in its canonical string form.
        operation -> Varchar,
        /// Result computed by the engine at create or edit time.
        result -> Float8,
    }
}

diesel::table! {
    /// User accounts with unique usernames and emails.
    users (id) {
        /// Primary key from a monotonic sequence; never reused.
        id -> Int4,
        /// Unique account name.
        username -> Varchar,
        /// Unique email address.
        email -> Varchar,
        /// Argon2id password verifier in PHC string form.
        password_hash -> Varchar,
    }
}
