//! End-to-end tests running `steprun` against a fake JDK.

#![cfg(unix)]

mod common;
mod config_tests;
