//! Unit tests for the leave domain and workflow.
