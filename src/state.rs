// src/state.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    catalog::QuizCatalog,
    config::{Config, DEFAULT_SESSION_TTL_SECS},
    location::geocoder::CountryResolver,
    session::QuizSession,
};

/// In-memory sessions keyed by id. Nothing survives a restart.
///
/// Sessions older than the TTL are invisible to lookups and are dropped on
/// the next insert, whatever state they reached.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, QuizSession>>>,
    ttl: TimeDelta,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL_SECS)
    }
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl: TimeDelta::from_std(Duration::from_secs(ttl_secs)).unwrap_or(TimeDelta::MAX),
        }
    }

    fn is_expired(&self, session: &QuizSession, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(session.created_at) > self.ttl
    }

    /// Stores `session` after dropping every expired one.
    pub async fn insert(&self, session: QuizSession) {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;

        let before = sessions.len();
        sessions.retain(|_, s| !self.is_expired(s, now));
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::debug!("Pruned {} expired sessions", pruned);
        }

        sessions.insert(session.id, session);
    }

    pub async fn get(&self, id: Uuid) -> Option<QuizSession> {
        let now = Utc::now();
        self.inner
            .read()
            .await
            .get(&id)
            .filter(|s| !self.is_expired(s, now))
            .cloned()
    }

    /// Runs `f` on the session under the write lock.
    /// Returns `None` when the session does not exist or has expired.
    pub async fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut QuizSession) -> T) -> Option<T> {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        sessions
            .get_mut(&id)
            .filter(|s| !self.is_expired(s, now))
            .map(f)
    }

    pub async fn remove(&self, id: Uuid) -> Option<QuizSession> {
        self.inner.write().await.remove(&id)
    }

    /// Number of sessions held in memory, expired ones included until pruned.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<QuizCatalog>,
    pub resolver: Arc<dyn CountryResolver>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, catalog: QuizCatalog, resolver: Arc<dyn CountryResolver>) -> Self {
        let sessions = SessionStore::new(config.session_ttl_secs);
        Self {
            config,
            catalog: Arc::new(catalog),
            resolver,
            sessions,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<QuizCatalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}
