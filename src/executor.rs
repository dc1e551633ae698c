/// The action to perform when a result is activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionAction {
    /// Copy text to clipboard and close the launcher
    CopyToClipboard { content: String },

    /// Just close the launcher window
    HideWindow,
}

impl ExecutionAction {
    pub fn copy(content: impl Into<String>) -> Self {
        ExecutionAction::CopyToClipboard {
            content: content.into(),
        }
    }

    /// Text that would land on the clipboard, if any
    pub fn clipboard_text(&self) -> Option<&str> {
        match self {
            ExecutionAction::CopyToClipboard { content } => Some(content),
            ExecutionAction::HideWindow => None,
        }
    }
}
