// Command implementations, one module per subcommand

pub mod current;
pub mod install;
pub mod list;
pub mod uninstall;
