mod builder;
mod modify;
mod parser;
