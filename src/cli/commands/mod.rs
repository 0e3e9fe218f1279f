//! CLI command implementations

pub mod ask;
pub mod build;
pub mod clone;
pub mod config;
pub mod list;
pub mod nuke;
pub mod publish;
pub mod sync;
pub mod wizard;

pub use ask::execute as ask;
pub use build::execute as build;
pub use clone::execute as clone;
pub use config::execute as config;
pub use list::execute as list;
pub use nuke::execute as nuke;
pub use publish::execute as publish;
pub use sync::execute as sync;
pub use wizard::execute as wizard;
