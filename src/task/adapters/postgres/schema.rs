//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Title.
        #[max_length = 255]
        title -> Varchar,
        /// Long description.
        description -> Nullable<Text>,
        /// Current assignee.
        assigned_to -> Nullable<Uuid>,
        /// Creating manager.
        created_by -> Uuid,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Advisory priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Score weight.
        score_value -> Int4,
        /// Estimated effort in hours.
        estimated_hours -> Nullable<Float8>,
        /// Measured effort in hours.
        actual_hours -> Nullable<Float8>,
        /// Due date.
        due_date -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Append-only task status reports.
    task_status_reports (id) {
        /// Report identifier.
        id -> Uuid,
        /// Reported task.
        task_id -> Uuid,
        /// Reporting user.
        employee_id -> Uuid,
        /// Report body.
        report_text -> Text,
        /// Progress percentage.
        progress -> Int2,
        /// Generated feedback.
        feedback -> Nullable<Text>,
        /// Feedback failure reason.
        feedback_error -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(task_status_reports -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_status_reports);
