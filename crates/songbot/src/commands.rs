pub mod meta;
pub mod register;
pub mod songs;
