//! Unit tests for team records and task operations.
