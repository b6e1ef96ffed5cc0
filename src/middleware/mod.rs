mod cors;
mod request_logger;

pub use cors::build_cors;
pub use request_logger::RequestLogger;
