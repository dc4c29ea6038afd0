//! Diesel schema for leave persistence.

diesel::table! {
    /// Leave requests filed by employees.
    leave_requests (id) {
        /// Request identifier.
        id -> Uuid,
        /// Owning employee profile.
        employee_profile_id -> Uuid,
        /// First instant of leave.
        start_date -> Timestamptz,
        /// Instant leave ends.
        end_date -> Timestamptz,
        /// Stated reason.
        reason -> Text,
        /// Decision status.
        #[max_length = 50]
        status -> Varchar,
        /// Deciding manager.
        approved_by -> Nullable<Uuid>,
        /// Decision timestamp.
        approval_date -> Nullable<Timestamptz>,
        /// Whether the transfer step ran or was unnecessary.
        tasks_transferred -> Bool,
        /// Whether work was handed over.
        transfer_successful -> Bool,
        /// Filing timestamp.
        created_at -> Timestamptz,
    }
}
