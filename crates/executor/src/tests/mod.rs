//! Executor test suites
