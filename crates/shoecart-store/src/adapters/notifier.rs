//! [`Notifier`] implementations.

use shoecart_core::Notice;
use tokio::sync::mpsc;
use tracing::warn;

use crate::ports::Notifier;

/// Logs every notice at `warn` level. Useful headless.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(?notice, "{}", notice.message());
    }
}

/// Forwards notices to a UI task over an unbounded channel.
///
/// Sending never blocks. If the receiver is gone the notice is dropped.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    /// Creates the notifier and the receiving end the UI listens on.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelNotifier { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        let _ = self.tx.send(notice);
    }
}
