// Domain layer: diseases, form fields, inference values and ports (interfaces).

pub mod forms;
pub mod model;
pub mod ports;
