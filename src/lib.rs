pub mod args;
pub mod caddie;
pub mod controller;
pub mod error;
pub mod model;
pub mod score;
pub mod storage;
pub mod view;

pub const HTMX_PATH: &str = "https://unpkg.com/htmx.org@1.9.12";
