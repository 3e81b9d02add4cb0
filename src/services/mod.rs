pub mod response_parser;
