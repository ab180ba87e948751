pub mod code_generator;
pub mod device;
pub mod password;
pub mod time_parser;
pub mod url_validator;

pub use code_generator::{
    Alphabet, CodeGenerator, generate_random_code, is_valid_short_code,
};
