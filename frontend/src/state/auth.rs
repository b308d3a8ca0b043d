use super::session::{MemorySession, SessionProvider, SessionUser};
use leptos::*;
use std::rc::Rc;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub is_authenticated: bool,
    pub loading: bool,
}

/// Session provider shared through context.
#[derive(Clone)]
pub struct SessionContext(pub Rc<dyn SessionProvider>);

fn apply_session_change(state: &mut AuthState, user: Option<SessionUser>) {
    state.is_authenticated = user.is_some();
    state.user = user;
    state.loading = false;
}

fn create_auth_context(session: Rc<dyn SessionProvider>) -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState {
        loading: true,
        ..AuthState::default()
    });

    let subscription = session.subscribe(Rc::new(move |user: Option<SessionUser>| {
        match &user {
            Some(user) => log::info!("session active for {}", user.uid),
            None => log::info!("no active session"),
        }
        set_auth_state.update(|state| apply_session_change(state, user));
    }));
    on_cleanup(move || subscription.unsubscribe());

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(session: Rc<dyn SessionProvider>, children: Children) -> impl IntoView {
    provide_context(SessionContext(session.clone()));
    let ctx = create_auth_context(session);
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

/// The injected session provider, or a signed-out one when none was provided.
pub fn use_session() -> Rc<dyn SessionProvider> {
    use_context::<SessionContext>()
        .map(|ctx| ctx.0)
        .unwrap_or_else(|| Rc::new(MemorySession::signed_out()))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::{render_to_string, with_runtime};

    #[test]
    fn use_auth_returns_default_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            let snapshot = state.get();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.user.is_none());
            assert!(use_session().current_user().is_none());
        });
    }

    #[test]
    fn apply_session_change_tracks_user() {
        let mut state = AuthState {
            loading: true,
            ..AuthState::default()
        };
        apply_session_change(&mut state, Some(SessionUser::new("u1")));
        assert!(state.is_authenticated);
        assert!(!state.loading);

        apply_session_change(&mut state, None);
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
    }

    #[test]
    fn auth_context_follows_session_transitions() {
        with_runtime(|| {
            let session = MemorySession::signed_out();
            let (state, _set_state) = create_auth_context(Rc::new(session.clone()));
            assert!(!state.get().is_authenticated);
            assert!(!state.get().loading);

            session.sign_in(SessionUser::new("u1").with_email("root@example.com"), "t");
            let snapshot = state.get();
            assert!(snapshot.is_authenticated);
            assert_eq!(
                snapshot.user.and_then(|user| user.email).as_deref(),
                Some("root@example.com")
            );

            session.sign_out();
            assert!(!state.get().is_authenticated);
        });
    }

    #[test]
    fn auth_provider_renders_children() {
        let html = render_to_string(move || {
            let session: Rc<dyn SessionProvider> = Rc::new(MemorySession::signed_out());
            view! {
                <AuthProvider session=session>
                    <div>{"child"}</div>
                </AuthProvider>
            }
        });
        assert!(html.contains("child"));
    }
}
