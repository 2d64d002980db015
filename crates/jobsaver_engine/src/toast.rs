use std::sync::mpsc;

use jobsaver_core::Toast;

/// Where transient notifications end up (a toaster on the page, a terminal).
pub trait ToastSink: Send + Sync {
    fn show(&self, toast: Toast);
}

pub struct ChannelToastSink {
    tx: mpsc::Sender<Toast>,
}

impl ChannelToastSink {
    pub fn new(tx: mpsc::Sender<Toast>) -> Self {
        Self { tx }
    }
}

impl ToastSink for ChannelToastSink {
    fn show(&self, toast: Toast) {
        let _ = self.tx.send(toast);
    }
}
