//! # cfsync-api
//!
//! Typed client for the content type and editor interface endpoints of the
//! Contentful Management API. Requests go through [`HttpClient`], which adds
//! authentication and version headers and retries rate-limited calls.

pub mod client;
pub mod documents;
pub mod services;
pub mod transport;

pub use client::ApiClient;
pub use documents::{
    ApiControl, ApiField, ApiItems, ApiSettings, ContentTypeDocument, EditorInterfaceDocument,
    SysMeta, ValidationRule, Versioned,
};
pub use services::{ContentTypeService, EditorInterfaceService};
pub use transport::{
    ApiRequest, ApiResponse, HttpClient, HttpClientConfig, HttpMethod, IBackoffSleeper,
    IHttpTransport, ReqwestTransport, ThreadSleeper,
};
