//! 命令定义和实现

pub mod config;
pub mod export;
pub mod inspect;
pub mod joints;

pub use config::ConfigCommand;
pub use export::ExportCommand;
pub use inspect::InspectCommand;
pub use joints::JointsCommand;
