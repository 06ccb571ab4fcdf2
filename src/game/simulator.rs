//! Balance simulator for the standard catalog.
//! Run with: cargo test simulate_greedy -- --nocapture
