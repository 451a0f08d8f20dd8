//! Errors returned by the toolkit.
//!
//! Most failure modes are not errors at all: unwrappable text and zero-sized
//! windows are skipped while painting, and a path that leads nowhere is
//! `None`. What remains is misuse of a handle and a full input buffer.

use thiserror::Error;

use crate::window::{MenuId, WindowId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("window {0} no longer exists")]
    StaleWindow(WindowId),

    #[error("menu {0} no longer exists")]
    StaleMenu(MenuId),

    #[error("window {0} is not a container")]
    NotAContainer(WindowId),

    #[error("window {0} is not a grid")]
    NotAGrid(WindowId),

    #[error("window {0} is not a text pane")]
    NotAText(WindowId),

    #[error("input is full ({capacity} characters)")]
    InputFull { capacity: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_capacity() {
        let err = Error::InputFull { capacity: 8 };
        assert_eq!(err.to_string(), "input is full (8 characters)");
    }
}
