//! Unit tests for the marketplace clients.

mod market_tests;
