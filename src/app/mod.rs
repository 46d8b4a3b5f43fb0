// Application layer: the surfaces that collect raw input and hand it to the registry.

pub mod batch;
pub mod form;
#[cfg(feature = "server")]
pub mod server;
