pub mod config;
pub mod host;
pub mod icon;
pub mod notice;
pub mod plugin;
pub mod route;
pub mod sender;
pub mod server;

#[cfg(test)]
mod test_support;
