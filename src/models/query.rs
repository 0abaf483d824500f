//! Query-string parameters accepted by the relay routes.

use serde::Deserialize;

/// `?workspace=GID` on the list routes.
///
/// Optional at the extractor level so a missing value becomes
/// `AppError::MissingWorkspace` rather than an axum rejection.
#[derive(Debug, Deserialize)]
pub struct WorkspaceQuery {
    pub workspace: Option<String>,
}

impl WorkspaceQuery {
    /// The workspace id, or `None` when absent or empty.
    pub fn workspace_gid(&self) -> Option<&str> {
        self.workspace.as_deref().filter(|gid| !gid.is_empty())
    }
}

/// `?code=...` on the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}
