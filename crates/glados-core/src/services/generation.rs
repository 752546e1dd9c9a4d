//! Text generation worker.
//!
//! One worker exists per active model. It owns that model's conversation
//! history and runs at most one chat request at a time as a background task
//! on the tokio runtime. Finished replies are delivered through a mailbox
//! that the frame loop drains with [`GenerationWorker::poll`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::busy::{BusyFlag, BusyGuard};
use crate::domain::{ChatMessage, ConversationHistory};
use crate::mailbox::{Mailbox, MailboxSender, mailbox};
use crate::ports::{BackendError, ChatBackendPort};
use crate::retry::{RetryPolicy, retry_async};
use crate::text::{FALLBACK_REPLY, normalize_reply};

/// Tunables for a generation worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Retry policy for each chat request.
    pub retry: RetryPolicy,
    /// Reply used once every attempt has failed.
    pub fallback_reply: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::inference(),
            fallback_reply: FALLBACK_REPLY.to_string(),
        }
    }
}

impl GenerationConfig {
    /// The reply used after every attempt failed. A blank configured reply
    /// is replaced by [`FALLBACK_REPLY`], so a failure is never silent.
    #[must_use]
    pub fn fallback(&self) -> &str {
        if self.fallback_reply.trim().is_empty() {
            FALLBACK_REPLY
        } else {
            &self.fallback_reply
        }
    }
}

/// Background chat worker bound to a single model.
pub struct GenerationWorker {
    model: String,
    backend: Arc<dyn ChatBackendPort>,
    config: GenerationConfig,
    history: Arc<Mutex<ConversationHistory>>,
    busy: BusyFlag,
    sender: MailboxSender<String>,
    replies: Mailbox<String>,
    task: Mutex<Option<JoinHandle<()>>>,
    runtime: Handle,
}

impl std::fmt::Debug for GenerationWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationWorker")
            .field("model", &self.model)
            .field("busy", &self.busy.is_busy())
            .finish_non_exhaustive()
    }
}

impl GenerationWorker {
    /// Create an idle worker with a fresh history seeded from `system_prompt`.
    pub fn new(
        model: impl Into<String>,
        system_prompt: &str,
        backend: Arc<dyn ChatBackendPort>,
        config: GenerationConfig,
        runtime: Handle,
    ) -> Self {
        let (sender, replies) = mailbox();
        Self {
            model: model.into(),
            backend,
            config,
            history: Arc::new(Mutex::new(ConversationHistory::new(system_prompt))),
            busy: BusyFlag::new(),
            sender,
            replies,
            task: Mutex::new(None),
            runtime,
        }
    }

    /// Start generating a reply to `user_text` in the background.
    ///
    /// Returns `false` without touching history when a request is already
    /// in flight.
    pub fn submit(&self, user_text: &str) -> bool {
        let Some(guard) = self.busy.try_acquire() else {
            tracing::debug!(model = %self.model, "Generation busy, dropping submission");
            return false;
        };

        lock(&self.history).push(ChatMessage::user(user_text));

        let job = GenerationJob {
            model: self.model.clone(),
            backend: Arc::clone(&self.backend),
            config: self.config.clone(),
            history: Arc::clone(&self.history),
            sender: self.sender.clone(),
        };
        let handle = self.runtime.spawn(job.run(guard));
        *lock(&self.task) = Some(handle);

        tracing::debug!(model = %self.model, "Generation task spawned");
        true
    }

    /// Take the next finished reply, if one is waiting.
    pub fn poll(&mut self) -> Option<String> {
        self.replies.try_pop()
    }

    /// Reset history to a single system entry.
    ///
    /// Refused (returns `false`) while a request is in flight.
    pub fn clear_history(&self, system_prompt: &str) -> bool {
        let Some(_guard) = self.busy.try_acquire() else {
            return false;
        };
        lock(&self.history).reset(system_prompt);
        tracing::debug!(model = %self.model, "Conversation history cleared");
        true
    }

    /// Snapshot of the conversation so far.
    #[must_use]
    pub fn history(&self) -> Vec<ChatMessage> {
        lock(&self.history).messages().to_vec()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Handle on the busy flag that stays valid after the worker is dropped.
    #[must_use]
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Wait for the most recently spawned task to finish.
    pub async fn join_in_flight(&self) {
        let Some(handle) = lock(&self.task).take() else {
            return;
        };
        if let Err(e) = handle.await {
            tracing::error!(model = %self.model, error = %e, "Generation task aborted");
        }
    }
}

/// Everything one background request needs, detached from the worker.
struct GenerationJob {
    model: String,
    backend: Arc<dyn ChatBackendPort>,
    config: GenerationConfig,
    history: Arc<Mutex<ConversationHistory>>,
    sender: MailboxSender<String>,
}

impl GenerationJob {
    async fn run(self, guard: BusyGuard) {
        let snapshot = lock(&self.history).messages().to_vec();

        let result = {
            let backend = &self.backend;
            let model = self.model.as_str();
            let snapshot = snapshot.as_slice();
            retry_async(self.config.retry, "chat", |attempt| async move {
                tracing::debug!(model, attempt, "Requesting chat completion");
                let reply = backend.chat(model, snapshot).await?;
                if reply.trim().is_empty() {
                    return Err(BackendError::Inference("empty reply".to_string()));
                }
                Ok(reply)
            })
            .await
        };

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(
                    model = %self.model,
                    attempts = self.config.retry.max_attempts,
                    error = %e,
                    "Inference failed, using fallback reply"
                );
                self.config.fallback().to_string()
            }
        };

        let normalized = normalize_reply(&reply);
        lock(&self.history).push(ChatMessage::assistant(reply));

        // Release before delivery so a polled reply always implies idle.
        drop(guard);

        if self.sender.push(normalized).is_err() {
            tracing::debug!(model = %self.model, "Worker replaced, discarding stale reply");
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageRole;
    use crate::ports::MockChatBackendPort;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap()
    }

    fn worker_with(mock: MockChatBackendPort, rt: &tokio::runtime::Runtime) -> GenerationWorker {
        GenerationWorker::new(
            "qwen3:0.6b",
            "You are GLaDOS.",
            Arc::new(mock),
            GenerationConfig {
                retry: RetryPolicy::immediate(3),
                ..GenerationConfig::default()
            },
            rt.handle().clone(),
        )
    }

    #[test]
    fn reply_is_normalized_and_history_grows_by_two() {
        let rt = runtime();
        let mut mock = MockChatBackendPort::new();
        mock.expect_chat()
            .times(1)
            .returning(|_, _| Ok("  Oh.   It's   you  ".to_string()));
        let mut worker = worker_with(mock, &rt);

        assert!(worker.submit("Hello"));
        rt.block_on(worker.join_in_flight());

        assert_eq!(worker.poll().as_deref(), Some("Oh. It's you."));
        assert_eq!(worker.poll(), None);

        let history = worker.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1], ChatMessage::user("Hello"));
        assert_eq!(history[2].role, MessageRole::Assistant);
        assert!(!worker.is_busy());
    }

    #[test]
    fn empty_reply_is_retried() {
        let rt = runtime();
        let mut mock = MockChatBackendPort::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_chat()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok("   ".to_string()));
        mock.expect_chat()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok("Fine".to_string()));
        let mut worker = worker_with(mock, &rt);

        assert!(worker.submit("Hello"));
        rt.block_on(worker.join_in_flight());

        assert_eq!(worker.poll().as_deref(), Some("Fine."));
    }

    #[test]
    fn exhausted_retries_yield_fallback() {
        let rt = runtime();
        let mut mock = MockChatBackendPort::new();
        mock.expect_chat()
            .times(3)
            .returning(|_, _| Err(BackendError::Inference("boom".to_string())));
        let mut worker = worker_with(mock, &rt);

        assert!(worker.submit("Hello"));
        rt.block_on(worker.join_in_flight());

        assert_eq!(worker.poll().as_deref(), Some(FALLBACK_REPLY));
        assert_eq!(worker.history().len(), 3);
        assert!(!worker.is_busy());
    }

    #[test]
    fn clear_history_keeps_only_system_prompt() {
        let rt = runtime();
        let mut mock = MockChatBackendPort::new();
        mock.expect_chat().returning(|_, _| Ok("Go away".to_string()));
        let worker = worker_with(mock, &rt);

        assert!(worker.submit("Hello"));
        rt.block_on(worker.join_in_flight());
        assert_eq!(worker.history().len(), 3);

        assert!(worker.clear_history("New prompt"));
        assert_eq!(worker.history(), vec![ChatMessage::system("New prompt")]);
    }
}
