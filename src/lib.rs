//! Voice Converter API: rewrites sentences between active and passive voice
//! through a Groq-hosted chat completion model.

pub mod cli;
pub mod config;
pub mod converter;
pub mod proxy;
