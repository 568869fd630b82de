use std::collections::HashMap;

use tokio::sync::RwLock;

/// In-memory per-user state for flows that span several requests.
pub struct SessionStore<T> {
    sessions: RwLock<HashMap<String, T>>,
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Clone + Send + Sync> SessionStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any state already held for the user.
    pub async fn insert(&self, user_id: &str, state: T) {
        self.sessions
            .write()
            .await
            .insert(user_id.to_string(), state);
    }

    pub async fn get(&self, user_id: &str) -> Option<T> {
        self.sessions.read().await.get(user_id).cloned()
    }

    pub async fn remove(&self, user_id: &str) -> Option<T> {
        self.sessions.write().await.remove(user_id)
    }

    /// Runs `f` on the user's state under the write lock. `None` when the user
    /// has no state.
    pub async fn update<R>(&self, user_id: &str, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(user_id).map(f)
    }
}
