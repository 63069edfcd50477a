pub mod descriptor;
pub mod record;
pub mod registry;

pub use descriptor::*;
pub use record::*;
pub use registry::*;
