/// In-process session store
///
/// Maps session ids to authenticated sessions. A session id present and unexpired
/// means `authenticated`; anything else is `anonymous`. Expired entries are dropped
/// lazily on lookup and by [`SessionStore::purge_expired`].

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "folio_session";

/// An authenticated admin session
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Shared store of authenticated sessions
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Start a fresh authenticated session
    pub async fn create(&self) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());

        session
    }

    /// Whether the id names a live session
    pub async fn is_authenticated(&self, id: &str) -> bool {
        self.get(id).await.is_some()
    }

    /// Look up a live session, removing it if it has expired
    pub async fn get(&self, id: &str) -> Option<Session> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(id) {
                Some(session) if !session.is_expired(now) => return Some(session.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        tracing::debug!("⌛ Session expired: {}", id);
        self.sessions.write().await.remove(id);
        None
    }

    /// Invalidate a session; returns whether it existed
    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Drop every expired session, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }
}

/// Extract the session id from a raw `Cookie` header value
pub fn session_id_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value establishing the session
pub fn session_cookie(session: &Session, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, session.id, max_age_secs
    )
}

/// `Set-Cookie` value clearing the session cookie in the browser
pub fn expired_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}
