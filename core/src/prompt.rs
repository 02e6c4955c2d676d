/// Single-occupancy prompt slot.
///
/// Dialog UI is a shared resource: only one prompt per controller may be
/// outstanding. Beginning a new prompt resolves the previous pending one as
/// `Cancelled` rather than queuing behind it.
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::errors::Prompted;

struct SlotState<T> {
    seq: u64,
    pending: Option<(u64, oneshot::Sender<Prompted<T>>)>,
}

pub struct PromptSlot<T> {
    state: Arc<Mutex<SlotState<T>>>,
}

/// Resolves one outstanding prompt. Dropping it unresolved cancels the
/// prompt, so a dismissed dialog can simply drop its resolver.
pub struct PromptResolver<T> {
    state: Arc<Mutex<SlotState<T>>>,
    seq: u64,
    done: bool,
}

/// The awaiting side of one prompt.
pub struct PromptTicket<T> {
    receiver: oneshot::Receiver<Prompted<T>>,
}

impl<T> PromptSlot<T> {
    pub fn new() -> Self {
        PromptSlot {
            state: Arc::new(Mutex::new(SlotState {
                seq: 0,
                pending: None,
            })),
        }
    }

    /// Open a prompt, displacing any prompt already pending.
    pub fn begin(&self) -> (PromptResolver<T>, PromptTicket<T>) {
        let (tx, rx) = oneshot::channel();
        let seq = {
            let mut state = self.state.lock();
            state.seq += 1;
            let seq = state.seq;
            if let Some((_, previous)) = state.pending.replace((seq, tx)) {
                let _ = previous.send(Prompted::Cancelled);
            }
            seq
        };
        (
            PromptResolver {
                state: self.state.clone(),
                seq,
                done: false,
            },
            PromptTicket { receiver: rx },
        )
    }

    pub fn has_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }
}

impl<T> Default for PromptSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PromptResolver<T> {
    /// Resolve the prompt with the user's value. A no-op when a newer prompt
    /// has already displaced this one.
    pub fn resolve(mut self, value: T) {
        self.finish(Prompted::Value(value));
    }

    /// Resolve the prompt as dismissed.
    pub fn cancel(mut self) {
        self.finish(Prompted::Cancelled);
    }

    fn finish(&mut self, outcome: Prompted<T>) {
        self.done = true;
        let sender = {
            let mut state = self.state.lock();
            match &state.pending {
                Some((seq, _)) if *seq == self.seq => state.pending.take().map(|(_, tx)| tx),
                _ => None,
            }
        };
        if let Some(sender) = sender {
            let _ = sender.send(outcome);
        }
    }
}

impl<T> Drop for PromptResolver<T> {
    fn drop(&mut self) {
        if !self.done {
            self.finish(Prompted::Cancelled);
        }
    }
}

impl<T> PromptTicket<T> {
    /// Wait for the prompt outcome. A torn-down slot reads as a dismissal.
    pub async fn wait(self) -> Prompted<T> {
        self.receiver.await.unwrap_or(Prompted::Cancelled)
    }
}
