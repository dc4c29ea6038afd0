//! Unit tests for identity domain and services.
