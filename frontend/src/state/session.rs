//! Identity-provider seam. The screen never talks to Firebase directly; it
//! receives a [`SessionProvider`] through context so tests can swap in a
//! [`MemorySession`].

use async_trait::async_trait;
use std::{cell::RefCell, fmt, rc::Rc};

use crate::api::ApiError;

pub const NOT_AUTHENTICATED: &str = "User is not authenticated";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl SessionUser {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
        }
    }

    #[cfg(test)]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn label(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.uid.clone())
    }
}

pub type SessionListener = Rc<dyn Fn(Option<SessionUser>)>;

#[async_trait(?Send)]
pub trait SessionProvider {
    fn current_user(&self) -> Option<SessionUser>;

    /// Fetches a fresh identity token for the current user. Called once per
    /// backend request; implementations must not hand out a cached token
    /// past its expiry.
    async fn id_token(&self) -> Result<String, ApiError>;

    /// Registers `listener` for sign-in/sign-out transitions. The listener is
    /// invoked once with the current state right after registration.
    fn subscribe(&self, listener: SessionListener) -> Subscription;
}

/// Handle returned by [`SessionProvider::subscribe`]. Dropping it
/// unsubscribes.
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.run_teardown();
    }

    fn run_teardown(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_teardown();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}

#[derive(Default)]
struct MemoryInner {
    user: Option<SessionUser>,
    token: Option<String>,
    listeners: Vec<(u64, SessionListener)>,
    next_listener_id: u64,
    token_requests: usize,
}

/// In-process session source. Used when no identity provider is available
/// in the page, and as the test double for the screen.
#[derive(Clone, Default)]
pub struct MemorySession {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemorySession {
    pub fn signed_out() -> Self {
        Self::default()
    }
}

/// Test controls: drive transitions and inspect subscriptions.
#[cfg(test)]
impl MemorySession {
    pub fn signed_in(user: SessionUser, token: impl Into<String>) -> Self {
        let session = Self::default();
        {
            let mut inner = session.inner.borrow_mut();
            inner.user = Some(user);
            inner.token = Some(token.into());
        }
        session
    }

    pub fn sign_in(&self, user: SessionUser, token: impl Into<String>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.user = Some(user.clone());
            inner.token = Some(token.into());
        }
        self.notify(Some(user));
    }

    pub fn sign_out(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.user = None;
            inner.token = None;
        }
        self.notify(None);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn token_requests(&self) -> usize {
        self.inner.borrow().token_requests
    }

    fn notify(&self, user: Option<SessionUser>) {
        // Listeners may call back into the session, so release the borrow first.
        let listeners: Vec<SessionListener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(user.clone());
        }
    }
}

#[async_trait(?Send)]
impl SessionProvider for MemorySession {
    fn current_user(&self) -> Option<SessionUser> {
        self.inner.borrow().user.clone()
    }

    async fn id_token(&self) -> Result<String, ApiError> {
        let mut inner = self.inner.borrow_mut();
        inner.token_requests += 1;
        log::debug!("memory session token request #{}", inner.token_requests);
        match (&inner.user, &inner.token) {
            (Some(_), Some(token)) => Ok(token.clone()),
            _ => Err(ApiError::unauthenticated(NOT_AUTHENTICATED)),
        }
    }

    fn subscribe(&self, listener: SessionListener) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, listener.clone()));
            id
        };
        listener(self.current_user());

        let inner = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }
}
