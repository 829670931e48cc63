//! Todo route handlers (all behind required authentication).

pub mod create;
pub mod detail;
pub mod list;
pub mod toggle;

pub use create::create_todo;
pub use detail::{delete_todo, get_todo, update_todo};
pub use list::list_todos;
pub use toggle::toggle_todo;
