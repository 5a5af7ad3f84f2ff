//! Test suites for the process bootstrap.

mod support;
