//! Output collaborators provided by the host: speech/announcement and clipboard.

#[cfg(test)]
use mockall::automock;

/// Delivers a message to the user. Fire-and-forget.
pub trait Announcer: Send + Sync {
    fn announce(&self, text: &str);
}

/// Places text on the system clipboard. Failures are the sink's business.
#[cfg_attr(test, automock)]
pub trait Clipboard: Send + Sync {
    fn copy_to_clipboard(&self, text: &str);
}

#[cfg(test)]
pub use recording::RecordingSink;
