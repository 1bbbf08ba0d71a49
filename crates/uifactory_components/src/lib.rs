pub mod element;
pub mod error;
pub mod factory;
pub mod fragment;
pub mod markup;
pub mod template;

pub use element::*;
pub use error::*;
pub use factory::*;
pub use fragment::*;
pub use template::*;
