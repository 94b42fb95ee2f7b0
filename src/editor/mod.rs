pub mod buffer;
pub mod modal;
pub mod motion;
pub mod mutate;
pub mod status;

pub use buffer::{CursorPosition, TextBuffer};
pub use modal::{EditorMode, ModalEditor, PendingPrefix};
pub use motion::Motion;
pub use status::StatusLine;
