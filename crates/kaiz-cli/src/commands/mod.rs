pub mod add;
pub mod args;
pub mod list;
pub mod show;
pub mod update;
