//! Image builder - BinderHub build client
//!
//! This library drives image builds on a BinderHub build service, streams the build
//! log into an output sink, and provides the headless repository combobox and form
//! fields used to start a build.

pub mod build;
pub mod cli;
pub mod combobox;
pub mod config;
pub mod form;
pub mod logging;
pub mod sink;
