pub mod canvas;
pub mod config;
pub mod editor;
pub mod error;
pub mod message;
pub mod property_panel;
pub mod publish;
pub mod selection;

pub use canvas::*;
pub use config::*;
pub use editor::*;
pub use error::*;
pub use message::*;
pub use property_panel::*;
pub use publish::*;
pub use selection::*;
