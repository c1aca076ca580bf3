//! Unit tests for availability ranges, overlap queries, and declarations.
