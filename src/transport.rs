//! Sending a staged file to the backend.
//!
//! The controller only sees [`UploadTransport`]; [`HttpTransport`] is the
//! browser implementation posting `multipart/form-data` with `gloo-net`.

use crate::error::TransportError;
use crate::options::ProcessingOptions;
use crate::stats::UploadResponse;
use crate::validation::FileInfo;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_net::http::Request;
use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

/// Where the bytes of a staged file live.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// Picked or dropped in the browser.
    Browser(web_sys::File),
    InMemory(Vec<u8>),
}

/// The single file held by the controller awaiting submission.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub info: FileInfo,
    pub source: FileSource,
}

impl StagedFile {
    pub fn from_browser(file: web_sys::File) -> Self {
        let info = FileInfo::new(file.name(), file.size() as u64, file.type_());
        Self {
            info,
            source: FileSource::Browser(file),
        }
    }

    pub fn in_memory(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        let info = FileInfo::new(name, bytes.len() as u64, mime);
        Self {
            info,
            source: FileSource::InMemory(bytes),
        }
    }

    fn to_blob(&self) -> Result<Blob, JsValue> {
        match &self.source {
            FileSource::Browser(file) => Ok(Blob::from(file.clone())),
            FileSource::InMemory(bytes) => {
                let array = js_sys::Uint8Array::from(bytes.as_slice());
                let parts = js_sys::Array::of1(&array);
                let props = BlobPropertyBag::new();
                props.set_type(&self.info.mime);
                Blob::new_with_u8_array_sequence_and_options(&parts, &props)
            }
        }
    }
}

/// Everything sent in one upload request.
#[derive(Debug, Clone)]
pub struct UploadForm {
    pub file: StagedFile,
    pub options: ProcessingOptions,
}

impl UploadForm {
    pub fn to_form_data(&self) -> Result<FormData, JsValue> {
        let data = FormData::new()?;
        data.append_with_blob_and_filename("file", &self.file.to_blob()?, &self.file.info.name)?;
        for (name, value) in self.options.form_fields() {
            data.append_with_str(name, value)?;
        }
        Ok(data)
    }
}

pub trait UploadTransport {
    /// Issue one request. Dropping the returned future abandons it.
    fn send(&self, form: UploadForm) -> LocalBoxFuture<'_, Result<UploadResponse, TransportError>>;
}

pub struct HttpTransport {
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl UploadTransport for HttpTransport {
    fn send(&self, form: UploadForm) -> LocalBoxFuture<'_, Result<UploadResponse, TransportError>> {
        async move { post_form(&self.url, &form).await }.boxed_local()
    }
}

async fn post_form(url: &str, form: &UploadForm) -> Result<UploadResponse, TransportError> {
    let data = form
        .to_form_data()
        .map_err(|e| TransportError::Network(format!("{:?}", e)))?;
    debug!("POST {} ({} bytes)", url, form.file.info.size);

    let response = Request::post(url)
        .body(data)
        .map_err(|e| TransportError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;
    classify_response(status, &body)
}

/// Decode an upload answer.
///
/// The backend reports rejected files as `{"error": ...}` with a 4xx/5xx
/// status; that message is kept so it reaches the user verbatim. Any other
/// non-2xx answer is a plain status failure.
pub fn classify_response(status: u16, body: &str) -> Result<UploadResponse, TransportError> {
    if !(200..300).contains(&status) {
        return match serde_json::from_str::<UploadResponse>(body) {
            Ok(UploadResponse {
                error: Some(message),
                ..
            }) => Ok(UploadResponse::error(message)),
            _ => Err(TransportError::Status(status)),
        };
    }
    serde_json::from_str(body).map_err(|e| TransportError::MalformedBody(e.to_string()))
}
