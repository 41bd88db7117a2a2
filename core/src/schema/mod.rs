//! Swagger 2.0 document synthesis from the route table and the schema
//! descriptions attached to each handler.

pub mod generator;
pub mod types;

pub use generator::SwaggerGenerator;
pub use types::{OperationSchema, ParamLocation, ParameterSchema};
