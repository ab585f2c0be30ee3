use std::time::Duration;

use crate::{link::encode_link, model::ImageRef};

pub const COPY_SUCCESS: &str = "Link copied to clipboard!";
pub const COPY_FAILURE: &str = "Failed to copy link";

/// How long the "copied" indicator stays on after a successful copy.
pub const COPIED_INDICATOR: Duration = Duration::from_millis(2000);

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// Keeps the last written text. `fail` makes every write error out.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub fail: bool,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("clipboard unavailable");
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Success(&'static str),
    Failure(&'static str),
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match *self {
            Self::Success(m) | Self::Failure(m) => m,
        }
    }
}

/// Outcome of a copy: the toast to show and whether the copied indicator is lit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyOutcome {
    pub notification: Notification,
    pub copied_for: Option<Duration>,
}

impl CopyOutcome {
    pub fn failed() -> Self {
        Self {
            notification: Notification::Failure(COPY_FAILURE),
            copied_for: None,
        }
    }
}

/// Copies the share link for the pair. Any failure, including a pair that
/// has no link, ends up as a failure toast; nothing is retried.
pub fn copy_share_link(
    clipboard: &mut dyn Clipboard,
    base_url: &str,
    person: &ImageRef,
    cloth: &ImageRef,
) -> CopyOutcome {
    let Some(link) = encode_link(base_url, person, cloth) else {
        tracing::debug!(%person, %cloth, "pair has no share link");
        return CopyOutcome::failed();
    };

    match clipboard.write_text(&link) {
        Ok(()) => CopyOutcome {
            notification: Notification::Success(COPY_SUCCESS),
            copied_for: Some(COPIED_INDICATOR),
        },
        Err(e) => {
            tracing::warn!(error = %e, "clipboard write failed");
            CopyOutcome::failed()
        }
    }
}
