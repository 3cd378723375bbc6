//! Embassy tasks

mod buttons;
mod ui;

pub use buttons::buttons_task;
pub use ui::ui_task;
