//! Client Tests

mod login_tests;
mod play_tests;
mod status_tests;
