//! CrudService: generic CRUD over entity descriptors using the safe SQL builder.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::RequestValidator;
