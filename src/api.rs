use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, RequestInit, Response};

use crate::error::ApiError;
use crate::story::{AdminCredentials, Story};

/// Thin client over the browser Fetch API for the story backend.
/// One instance per page controller; it holds nothing but the base URL.
pub struct Api {
    base: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct VerifyBody {
    #[serde(default)]
    valid: bool,
}

impl Api {
    pub fn new(base: String) -> Self {
        Api { base }
    }

    /// Base path derived from the page's own origin, `{origin}/api`.
    pub fn from_window() -> Self {
        let origin = web_sys::window()
            .expect("could not get window")
            .location()
            .origin()
            .expect("could not read location origin");
        Api::new(format!("{origin}/api"))
    }

    pub async fn list_stories(&self) -> Result<Vec<Story>, ApiError> {
        let init = RequestInit::new();
        init.set_method("GET");
        let response = fetch(&format!("{}/stories", self.base), &init).await?;
        if !response.ok() {
            return Err(ApiError::Http {
                status: response.status(),
                message: None,
            });
        }
        let text = response_text(&response).await?;
        serde_json::from_str(&text)
            .map_err(|err| ApiError::Network(format!("could not parse story list: {err}")))
    }

    /// Multipart create. `form` carries title, description, content,
    /// author_name and the optional photo file.
    pub async fn create_story(&self, form: &FormData) -> Result<(), ApiError> {
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(form.as_ref());
        let response = fetch(&format!("{}/stories", self.base), &init).await?;
        if response.ok() {
            return Ok(());
        }
        // Best effort: the backend sends {"error": ...} on 4xx.
        let status = response.status();
        let message = response_text(&response)
            .await
            .ok()
            .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
            .and_then(|body| body.error);
        Err(ApiError::Http { status, message })
    }

    /// Per-request authorization: the credentials travel as headers,
    /// there is no session token to reuse.
    pub async fn delete_story(
        &self,
        id: u64,
        credentials: &AdminCredentials,
    ) -> Result<(), ApiError> {
        let headers = Headers::new().map_err(js_err)?;
        headers
            .set("X-Admin-Username", &credentials.username)
            .map_err(js_err)?;
        headers
            .set("X-Admin-Password", &credentials.password)
            .map_err(js_err)?;

        let init = RequestInit::new();
        init.set_method("DELETE");
        init.set_headers(headers.as_ref());
        let response = fetch(&format!("{}/stories/{id}", self.base), &init).await?;
        if !response.ok() {
            return Err(ApiError::Http {
                status: response.status(),
                message: None,
            });
        }
        Ok(())
    }

    /// Checks a credential pair against the backend. Accepted only when
    /// the status is ok AND the body carries `valid: true`.
    pub async fn verify_admin(&self, credentials: &AdminCredentials) -> Result<(), ApiError> {
        let headers = Headers::new().map_err(js_err)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(js_err)?;

        let body =
            serde_json::to_string(credentials).expect("could not encode credentials as JSON");
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(headers.as_ref());
        init.set_body(&JsValue::from_str(&body));

        let response = fetch(&format!("{}/admin/verify", self.base), &init).await?;
        let flag = response_text(&response)
            .await
            .ok()
            .and_then(|text| serde_json::from_str::<VerifyBody>(&text).ok())
            .map(|body| body.valid);
        if credentials_accepted(response.ok(), flag) {
            Ok(())
        } else {
            Err(ApiError::InvalidCredentials)
        }
    }
}

/// The validity rule for admin login: an ok status alone is not enough,
/// the body must also carry an explicit `valid: true`.
pub fn credentials_accepted(status_ok: bool, valid_flag: Option<bool>) -> bool {
    status_ok && valid_flag == Some(true)
}

async fn fetch(url: &str, init: &RequestInit) -> Result<Response, ApiError> {
    let window = web_sys::window().expect("could not get window");
    let value = JsFuture::from(window.fetch_with_str_and_init(url, init))
        .await
        .map_err(js_err)?;
    value
        .dyn_into::<Response>()
        .map_err(|_| ApiError::Network("fetch did not produce a response".to_owned()))
}

async fn response_text(response: &Response) -> Result<String, ApiError> {
    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(text.as_string().unwrap_or_default())
}

fn js_err(err: JsValue) -> ApiError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{err:?}"));
    ApiError::Network(message)
}
