pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod directory;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod feed;
pub mod screens;
pub mod search;
pub mod server;
