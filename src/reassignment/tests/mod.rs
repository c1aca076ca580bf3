//! Unit tests for reassignment records, ranking, generators, and the
//! workflow service.

mod memory_tests;
