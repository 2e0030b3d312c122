pub mod config;
pub mod frames;
pub mod inspect;
pub mod nacks;
pub mod summary;
pub mod timeline;
pub mod watch;
