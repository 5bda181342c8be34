pub mod install;
pub mod marshal;
pub mod parse;
pub mod verify;
