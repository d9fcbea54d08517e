//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// PHC-format Argon2 hash.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// The ranked store. Listing order is `likes desc, updated_at desc`.
    domains (id) {
        id -> Uuid,
        /// Unique domain name.
        name -> Varchar,
        /// Committed like count, never negative.
        likes -> Int4,
        created_at -> Timestamptz,
        /// Bumped on every like and unlike.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per (user, domain) like; the primary key enforces at most one.
    user_liked_domains (user_id, domain_id) {
        user_id -> Uuid,
        domain_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Moderation queue; `(domain, submitted_by)` is unique.
    domain_submissions (id) {
        id -> Uuid,
        domain -> Varchar,
        submitted_by -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_liked_domains -> domains (domain_id));
diesel::joinable!(user_liked_domains -> users (user_id));
diesel::joinable!(domain_submissions -> users (submitted_by));

diesel::allow_tables_to_appear_in_same_query!(users, domains, user_liked_domains, domain_submissions);
