//! # bagvote
//!
//! Client for the bag configurator and voting service.
//!
//! This crate contains the REST API client (authentication, bag CRUD,
//! votes), the session store it persists into, the app's route table, and
//! the navigation guard that gates routes on the stored session. The
//! `bagvote` binary exposes all of it as a command-line client.

pub mod api;
pub mod config;
pub mod guard;
pub mod routes;
pub mod session;
