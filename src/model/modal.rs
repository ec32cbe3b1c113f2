//! Modal stack for managing overlays
//!
//! Dialogs are enum variants pushed onto a stack. Only the top modal
//! receives input; all of them are drawn bottom to top.

use super::form::FormState;

/// Colour and title style of a message dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Logout confirmation dialog
    LogoutConfirm,
    /// Delete the given book after confirmation
    DeleteBookConfirm { book_id: u32, title: String },
    /// Dismissable message (results, errors, stubs)
    Message {
        title: String,
        body: String,
        kind: MessageKind,
    },
    /// Book status/genre filter dialog
    BookFilter,
    /// Data entry form
    Form(FormState),
    /// Help dialog showing all keyboard shortcuts
    Help { scroll_offset: usize },
}

impl Modal {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Modal::Message {
            title: title.into(),
            body: body.into(),
            kind: MessageKind::Info,
        }
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Modal::Message {
            title: title.into(),
            body: body.into(),
            kind: MessageKind::Success,
        }
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Modal::Message {
            title: title.into(),
            body: body.into(),
            kind: MessageKind::Warning,
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Modal::Message {
            title: title.into(),
            body: body.into(),
            kind: MessageKind::Error,
        }
    }
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    /// Form on top of the stack, if the top modal is a form
    pub fn top_form_mut(&mut self) -> Option<&mut FormState> {
        match self.stack.last_mut() {
            Some(Modal::Form(form)) => Some(form),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}
