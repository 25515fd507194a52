pub mod batch;
pub mod classify;
pub mod config;
pub mod create;
pub mod interactive;
pub mod levels;
pub mod template;
