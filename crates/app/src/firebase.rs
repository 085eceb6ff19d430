//! Firebase Auth bound through the page's JS SDK.
//!
//! `index.html` loads the Firebase compat SDK and calls
//! `firebase.initializeApp(...)`; this module reaches that global through
//! `js_sys::Reflect` and adapts its promise-based API to the
//! [`IdentityProvider`] trait. The SDK owns token persistence and session
//! restore; we only observe it through `onAuthStateChanged`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use skillsight_auth::{
    Identity, IdentityProvider, ListenerGuard, ProviderError, SessionListener,
};

/// Placeholder the config template ships with; treated as "not configured".
const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

/// The provider client, bound to `window.firebase.auth()`.
#[derive(Clone)]
pub struct FirebaseAuth {
    namespace: JsValue,
    auth: JsValue,
}

impl FirebaseAuth {
    /// Bind to the `firebase` global set up by the host page.
    ///
    /// Returns `None` when the SDK scripts did not load or the app was never
    /// initialized; the shell renders a configuration notice in that case.
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let namespace = js_sys::Reflect::get(&window, &JsValue::from_str("firebase")).ok()?;
        if namespace.is_undefined() || namespace.is_null() {
            return None;
        }
        let auth_fn = js_sys::Reflect::get(&namespace, &JsValue::from_str("auth"))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()?;
        let auth = auth_fn.call0(&namespace).ok()?;
        Some(Self { namespace, auth })
    }

    fn method(&self, name: &str) -> Result<js_sys::Function, ProviderError> {
        js_sys::Reflect::get(&self.auth, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
            .ok_or_else(|| {
                ProviderError::new(
                    "auth/internal-error",
                    format!("auth.{name} is not available"),
                )
            })
    }

    async fn invoke(&self, name: &str, args: &[JsValue]) -> Result<JsValue, ProviderError> {
        let method = self.method(name)?;
        let promise = match args {
            [] => method.call0(&self.auth),
            [a] => method.call1(&self.auth, a),
            [a, b] => method.call2(&self.auth, a, b),
            _ => unreachable!("no auth method takes more than two arguments"),
        }
        .map_err(provider_error)?;

        JsFuture::from(js_sys::Promise::from(promise))
            .await
            .map_err(provider_error)
    }

    async fn invoke_for_identity(
        &self,
        name: &str,
        args: &[JsValue],
    ) -> Result<Identity, ProviderError> {
        let credential = self.invoke(name, args).await?;
        let user = js_sys::Reflect::get(&credential, &JsValue::from_str("user"))
            .map_err(provider_error)?;
        identity_from_user(&user).ok_or_else(|| {
            ProviderError::new("auth/internal-error", "credential carried no user")
        })
    }

    fn api_key(&self) -> Option<String> {
        let app = js_sys::Reflect::get(&self.auth, &JsValue::from_str("app")).ok()?;
        let options = js_sys::Reflect::get(&app, &JsValue::from_str("options")).ok()?;
        js_sys::Reflect::get(&options, &JsValue::from_str("apiKey"))
            .ok()?
            .as_string()
    }

    fn google_provider(&self) -> Result<JsValue, ProviderError> {
        let auth_ns = js_sys::Reflect::get(&self.namespace, &JsValue::from_str("auth"))
            .map_err(provider_error)?;
        let ctor = js_sys::Reflect::get(&auth_ns, &JsValue::from_str("GoogleAuthProvider"))
            .ok()
            .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
            .ok_or_else(|| {
                ProviderError::new("auth/internal-error", "GoogleAuthProvider is not available")
            })?;
        js_sys::Reflect::construct(&ctor, &js_sys::Array::new()).map_err(provider_error).map(Into::into)
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for FirebaseAuth {
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError> {
        self.invoke_for_identity(
            "signInWithEmailAndPassword",
            &[JsValue::from_str(email), JsValue::from_str(password)],
        )
        .await
    }

    async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError> {
        self.invoke_for_identity(
            "createUserWithEmailAndPassword",
            &[JsValue::from_str(email), JsValue::from_str(password)],
        )
        .await
    }

    async fn sign_in_with_federated_provider(&self) -> Result<Identity, ProviderError> {
        let provider = self.google_provider()?;
        self.invoke_for_identity("signInWithPopup", &[provider]).await
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        self.invoke("sendPasswordResetEmail", &[JsValue::from_str(email)])
            .await
            .map(|_| ())
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        // The SDK drops the local session synchronously and fires the
        // `None` notification before any remote call can fail.
        self.invoke("signOut", &[]).await.map(|_| ())
    }

    fn on_session_changed(&self, listener: SessionListener) -> ListenerGuard {
        let trampoline = Closure::wrap(Box::new(move |user: JsValue| {
            listener(identity_from_user(&user));
        }) as Box<dyn Fn(JsValue)>);

        let unsubscribe = match self.method("onAuthStateChanged") {
            Ok(method) => method
                .call1(&self.auth, trampoline.as_ref())
                .ok()
                .and_then(|value| value.dyn_into::<js_sys::Function>().ok()),
            Err(err) => {
                tracing::warn!("session notifications unavailable: {err}");
                None
            }
        };

        // The guard owns the trampoline: dropping it unhooks the SDK callback
        // and releases the JS->wasm closure in one move.
        ListenerGuard::new(move || {
            if let Some(unsubscribe) = unsubscribe {
                let _ = unsubscribe.call0(&JsValue::NULL);
            }
            drop(trampoline);
        })
    }

    fn has_valid_configuration(&self) -> bool {
        match self.api_key() {
            Some(key) => !key.is_empty() && key != PLACEHOLDER_API_KEY,
            None => false,
        }
    }
}

fn identity_from_user(user: &JsValue) -> Option<Identity> {
    if user.is_null() || user.is_undefined() {
        return None;
    }
    let uid = js_sys::Reflect::get(user, &JsValue::from_str("uid"))
        .ok()?
        .as_string()?;
    let email = js_sys::Reflect::get(user, &JsValue::from_str("email"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default();
    let display_name = js_sys::Reflect::get(user, &JsValue::from_str("displayName"))
        .ok()
        .and_then(|value| value.as_string());

    Some(Identity {
        id: uid.parse().ok()?,
        email,
        display_name,
    })
}

fn provider_error(err: JsValue) -> ProviderError {
    let code = js_sys::Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_else(|| "auth/internal-error".to_string());
    let message = js_sys::Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    ProviderError::new(code, message)
}
