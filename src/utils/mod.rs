pub mod code_generator;

pub use code_generator::CodeGenerator;
