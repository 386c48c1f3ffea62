pub mod generate;
pub mod list;
pub mod show;

pub use generate::generate_command;
pub use list::list_command;
pub use show::show_command;
