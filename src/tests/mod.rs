//! Crate-level integration tests exercising the public API end to end

mod calculate_tests;
