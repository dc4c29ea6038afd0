//! Diesel schema for profile persistence.

diesel::table! {
    /// Employee profiles with derived performance fields.
    employee_profiles (id) {
        /// Profile identifier.
        id -> Uuid,
        /// Owning user identifier.
        user_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Job position.
        #[max_length = 255]
        position -> Nullable<Varchar>,
        /// Performance score.
        score -> Int8,
        /// Leave score.
        leave_score -> Int4,
        /// Success rate in percent.
        success_rate -> Float8,
        /// Completed task count.
        tasks_completed -> Int4,
        /// Failed task count.
        tasks_failed -> Int4,
    }
}

diesel::table! {
    /// Manager profiles with team metadata.
    manager_profiles (id) {
        /// Profile identifier.
        id -> Uuid,
        /// Owning user identifier.
        user_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Annual salary.
        salary -> Float8,
        /// Number of projects.
        projects_count -> Int4,
        /// Project success rate in percent.
        success_rate -> Float8,
        /// Team headcount.
        team_size -> Int4,
    }
}

diesel::allow_tables_to_appear_in_same_query!(employee_profiles, manager_profiles);
