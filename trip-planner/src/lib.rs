//! Multi-modal trip planner server.
//!
//! A web application that answers: "I'm at this point and want to get
//! to that one - which trips through the transport network should I take?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod graph;
pub mod planner;
pub mod web;
