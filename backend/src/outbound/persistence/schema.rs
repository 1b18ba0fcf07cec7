//! Diesel table definitions for the PostgreSQL schema.
//!
//! Keep in step with `migrations/`; `diesel print-schema` regenerates these
//! from a live database.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique login name, at least three characters.
        username -> Varchar,
        name -> Nullable<Varchar>,
        /// bcrypt hash; the plaintext password is never stored.
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog listings. `user_id` is the owner and becomes NULL when that
    /// account is removed.
    blogs (id) {
        id -> Uuid,
        title -> Text,
        author -> Nullable<Text>,
        url -> Text,
        likes -> Int8,
        user_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(blogs -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(blogs, users);
