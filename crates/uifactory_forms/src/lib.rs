pub mod catalog;
pub mod definition;
pub mod error;
pub mod properties;
pub mod schema;
pub mod serialization;
pub mod view;

pub use catalog::*;
pub use definition::*;
pub use error::*;
pub use properties::*;
pub use schema::*;
pub use view::*;
