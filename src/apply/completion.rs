use tokio::sync::watch;

/// One-shot completion signal for the deferred pass.
///
/// Replaces the "global mutable flag plus ad-hoc broadcast" shape with one
/// mechanism: poll with [`CompletionSignal::is_complete`], or subscribe and
/// await the broadcast. The signal transitions at most once; raising it
/// again is a no-op. The broadcast's well-known name is
/// [`crate::config::consts::COMPLETION_EVENT`].
#[derive(Debug)]
pub struct CompletionSignal {
    tx: watch::Sender<bool>,
}

impl CompletionSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn is_complete(&self) -> bool {
        *self.tx.borrow()
    }

    /// Raise the signal. Returns `true` on the first call, `false` once the
    /// signal is already raised; subscribers are only notified on the
    /// transition.
    pub fn raise(&self) -> bool {
        let mut transitioned = false;
        self.tx.send_if_modified(|complete| {
            if *complete {
                false
            } else {
                *complete = true;
                transitioned = true;
                true
            }
        });
        transitioned
    }

    pub fn subscribe(&self) -> CompletionSubscription {
        CompletionSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for CompletionSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Push-side handle on a [`CompletionSignal`].
#[derive(Debug, Clone)]
pub struct CompletionSubscription {
    rx: watch::Receiver<bool>,
}

impl CompletionSubscription {
    /// Wait until the pass completes. Resolves immediately when the signal
    /// is already raised. Returns `false` only if the signal was dropped
    /// without ever being raised.
    pub async fn wait(&mut self) -> bool {
        self.rx.wait_for(|complete| *complete).await.is_ok()
    }
}
