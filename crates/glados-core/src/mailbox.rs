//! Non-blocking result delivery from a background task to the frame loop.
//!
//! One mailbox exists per worker instance. When a worker is replaced its
//! [`Mailbox`] is dropped, so anything its orphaned task still pushes is
//! rejected instead of reaching the new worker.

use tokio::sync::mpsc;

/// Create a connected sender/receiver pair.
#[must_use]
pub fn mailbox<T>() -> (MailboxSender<T>, Mailbox<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MailboxSender { tx }, Mailbox { rx })
}

/// Producer half, held by background tasks.
#[derive(Debug)]
pub struct MailboxSender<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for MailboxSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> MailboxSender<T> {
    /// Deliver an item without blocking.
    ///
    /// # Errors
    ///
    /// Hands the item back when the receiving side has been dropped.
    pub fn push(&self, item: T) -> Result<(), T> {
        self.tx.send(item).map_err(|e| e.0)
    }
}

/// Consumer half, polled once per frame.
#[derive(Debug)]
pub struct Mailbox<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Mailbox<T> {
    /// Take the oldest pending item, if any. Never waits.
    pub fn try_pop(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mailbox_returns_none() {
        let (_tx, mut rx) = mailbox::<String>();
        assert_eq!(rx.try_pop(), None);
    }

    #[test]
    fn items_arrive_in_order_and_once() {
        let (tx, mut rx) = mailbox();
        tx.push(1).unwrap();
        tx.push(2).unwrap();

        assert_eq!(rx.try_pop(), Some(1));
        assert_eq!(rx.try_pop(), Some(2));
        assert_eq!(rx.try_pop(), None);
    }

    #[test]
    fn push_after_receiver_dropped_returns_item() {
        let (tx, rx) = mailbox();
        drop(rx);
        assert_eq!(tx.push("stale"), Err("stale"));
    }
}
