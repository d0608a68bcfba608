//! Diesel schema for todo persistence.

diesel::table! {
    /// Todo records, including soft-deleted ones awaiting purge.
    todos (id) {
        /// Todo identifier.
        id -> Uuid,
        /// Owning user identifier.
        #[max_length = 255]
        owner_id -> Varchar,
        /// Trimmed title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional memo.
        memo -> Nullable<Text>,
        /// Priority (`LOW`, `NORMAL`, `HIGH`).
        #[max_length = 10]
        priority -> Varchar,
        /// Lifecycle status (`ACTIVE`, `COMPLETED`, `DELETED`).
        #[max_length = 10]
        status -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// First completion timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}
