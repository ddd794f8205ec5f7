//! Diesel schema for board persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Globally unique task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Optional assignee.
        assigned_user -> Nullable<Uuid>,
        /// Board column label.
        #[max_length = 50]
        status -> Varchar,
        /// Priority label.
        #[max_length = 50]
        priority -> Varchar,
        /// Latest mutation timestamp.
        updated_at -> Timestamptz,
        /// Optimistic-concurrency version counter.
        version -> Int8,
    }
}

diesel::table! {
    /// Registered users, owned by the identity collaborator.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        username -> Varchar,
        /// Email address.
        #[max_length = 255]
        email -> Varchar,
    }
}

diesel::table! {
    /// Append-only audit records.
    action_logs (id) {
        /// Log record identifier.
        id -> Uuid,
        /// The acting user.
        user_id -> Uuid,
        /// Action kind label.
        #[max_length = 50]
        action -> Varchar,
        /// Action timestamp.
        timestamp -> Timestamptz,
        /// Task snapshot at action time.
        task -> Jsonb,
    }
}
