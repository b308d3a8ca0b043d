use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::session::{SessionListener, SessionProvider, SessionUser, Subscription, NOT_AUTHENTICATED};
use crate::api::ApiError;

/// Global the host page sets to its Firebase `Auth` instance, e.g.
/// `window.__ADMINROSTER_AUTH = getAuth(app)`.
pub const AUTH_GLOBAL: &str = "__ADMINROSTER_AUTH";

/// [`SessionProvider`] backed by the Firebase JS SDK's `Auth` object.
pub struct FirebaseSession {
    auth: JsValue,
}

impl FirebaseSession {
    pub fn from_window() -> Result<Self, ApiError> {
        let window = web_sys::window()
            .ok_or_else(|| ApiError::unauthenticated("No window object"))?;
        let auth = Reflect::get(&window, &AUTH_GLOBAL.into())
            .ok()
            .filter(is_present)
            .ok_or_else(|| {
                ApiError::unauthenticated(format!("window.{} is not set", AUTH_GLOBAL))
            })?;
        Ok(Self { auth })
    }

    fn current_user_value(&self) -> Option<JsValue> {
        Reflect::get(&self.auth, &"currentUser".into())
            .ok()
            .filter(is_present)
    }
}

fn is_present(value: &JsValue) -> bool {
    !value.is_undefined() && !value.is_null()
}

fn string_field(target: &JsValue, key: &str) -> Option<String> {
    Reflect::get(target, &key.into())
        .ok()
        .and_then(|value| value.as_string())
}

fn user_from_js(value: &JsValue) -> Option<SessionUser> {
    if !is_present(value) {
        return None;
    }
    Some(SessionUser {
        uid: string_field(value, "uid")?,
        email: string_field(value, "email"),
        display_name: string_field(value, "displayName"),
    })
}

fn js_error(context: &str, value: JsValue) -> ApiError {
    let detail = value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "unknown error".to_string());
    ApiError::unauthenticated(format!("{}: {}", context, detail))
}

#[async_trait(?Send)]
impl SessionProvider for FirebaseSession {
    fn current_user(&self) -> Option<SessionUser> {
        self.current_user_value().as_ref().and_then(user_from_js)
    }

    async fn id_token(&self) -> Result<String, ApiError> {
        let user = self
            .current_user_value()
            .ok_or_else(|| ApiError::unauthenticated(NOT_AUTHENTICATED))?;
        let get_id_token: Function = Reflect::get(&user, &"getIdToken".into())
            .map_err(|err| js_error("getIdToken unavailable", err))?
            .dyn_into()
            .map_err(|err| js_error("getIdToken is not a function", err))?;
        let promise: Promise = get_id_token
            .call0(&user)
            .map_err(|err| js_error("Failed to request token", err))?
            .dyn_into()
            .map_err(|err| js_error("getIdToken did not return a promise", err))?;
        let token = JsFuture::from(promise)
            .await
            .map_err(|err| js_error("Failed to get token", err))?;
        token
            .as_string()
            .ok_or_else(|| ApiError::unauthenticated("Identity token was not a string"))
    }

    fn subscribe(&self, listener: SessionListener) -> Subscription {
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |user: JsValue| {
            listener(user_from_js(&user));
        });

        let unsubscribe = Reflect::get(&self.auth, &"onAuthStateChanged".into())
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .and_then(|on_change| {
                on_change
                    .call1(&self.auth, callback.as_ref())
                    .ok()
            })
            .and_then(|value| value.dyn_into::<Function>().ok());

        if unsubscribe.is_none() {
            log::error!("onAuthStateChanged is unavailable on window.{}", AUTH_GLOBAL);
        }

        Subscription::new(move || {
            if let Some(unsubscribe) = unsubscribe {
                let _ = unsubscribe.call0(&JsValue::NULL);
            }
            drop(callback);
        })
    }
}
