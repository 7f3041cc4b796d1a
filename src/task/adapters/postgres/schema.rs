//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Storage-assigned task identifier.
        id -> Int8,
        /// Task title.
        title -> Varchar,
        /// Free-form description; empty when not supplied.
        description -> Text,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Optional calendar due date.
        due_date -> Nullable<Date>,
    }
}
