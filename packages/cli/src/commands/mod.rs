pub mod export;
pub mod init;
pub mod inspect;

pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
