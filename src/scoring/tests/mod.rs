//! Unit tests for score arithmetic and the scoring service.

mod card_tests;
