mod config;
mod help;
mod once;
