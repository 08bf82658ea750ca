mod config;
mod workspace;
