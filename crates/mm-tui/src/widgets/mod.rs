pub mod messages;
pub mod minimap;
pub mod question;
pub mod status;
pub mod view;

pub use messages::MessagesWidget;
pub use minimap::MinimapWidget;
pub use question::QuestionWidget;
pub use status::StatusWidget;
pub use view::{FirstPersonWidget, render_view};
