//! Natural frequencies and displacement fields of an ideal circular
//! membrane (drumhead), with a small CLI driver that tabulates them.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod membrane;
pub mod output;
