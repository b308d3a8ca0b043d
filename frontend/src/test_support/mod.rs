#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{AdminRecord, ApiClient};
    use crate::state::auth::SessionContext;
    use crate::state::session::{MemorySession, SessionUser};
    use leptos::*;
    use serde_json::json;
    use std::rc::Rc;

    pub const TOKEN: &str = "token-1";

    pub fn admin_record(uid: &str, email: &str) -> AdminRecord {
        AdminRecord {
            uid: uid.into(),
            email: email.into(),
            first_name: "Alice".into(),
            last_name: "Example".into(),
            photo_url: None,
        }
    }

    pub fn admin_json(uid: &str, email: &str) -> serde_json::Value {
        json!({
            "uid": uid,
            "email": email,
            "firstName": "Alice",
            "lastName": "Example",
            "photoURL": ""
        })
    }

    pub fn root_user() -> SessionUser {
        SessionUser::new("root").with_email("root@example.com")
    }

    pub fn signed_in_session() -> MemorySession {
        MemorySession::signed_in(root_user(), TOKEN)
    }

    pub fn client_for(base_url: impl Into<String>, session: &MemorySession) -> ApiClient {
        ApiClient::new_with_base_url(base_url, Rc::new(session.clone()))
    }

    pub fn provide_session(session: &MemorySession) {
        provide_context(SessionContext(Rc::new(session.clone())));
    }
}
