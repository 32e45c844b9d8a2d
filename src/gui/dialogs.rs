//! Blocking native message dialogs.

use rfd::{MessageButtons, MessageDialog, MessageLevel};

fn show(level: MessageLevel, title: &str, message: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn info(title: &str, message: &str) {
    show(MessageLevel::Info, title, message);
}

pub fn warning(title: &str, message: &str) {
    show(MessageLevel::Warning, title, message);
}

pub fn error(title: &str, message: &str) {
    show(MessageLevel::Error, title, message);
}
