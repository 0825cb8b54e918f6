//! Scenario tests for the slider controller and the host layer around it.

mod rotation_tests;
