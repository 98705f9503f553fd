//! Unit tests - Exercise the public translation API without any server

mod translation_regression_tests;
