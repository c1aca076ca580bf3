//! Unit tests for workload scoring and risk classification.

mod risk_tests;
