//! Unit tests for the flow instantiations

mod newsletter_tests;
