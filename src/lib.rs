pub mod codec;
pub mod error;
pub mod location;
pub mod marks;
pub mod model;
pub mod store;
