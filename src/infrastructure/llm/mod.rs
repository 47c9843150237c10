//! LLM provider plumbing: request shapes, transport and response extraction

mod completion_client;
mod http_client;
mod request_builder;
mod response_extractor;

pub use completion_client::CompletionClient;
pub use http_client::{HttpClient, HttpClientTrait, HttpResponse};
pub use request_builder::{ProviderRequest, ProviderRequestBuilder};
pub use response_extractor::extract_content;

#[cfg(test)]
pub use http_client::mock;
