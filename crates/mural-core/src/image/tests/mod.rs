mod fixtures;
mod strips_tests;
