use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::client::RawResponse;
use crate::document::Mutation;

/// Something that can carry HTTP requests to the server
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a GET request.
    /// An `Err` means the server could not be reached; any HTTP answer (even an error status) is an `Ok`.
    async fn get(&self, url: Url) -> Result<RawResponse, Box<dyn Error + Send + Sync>>;

    /// Send a POST request with a `application/x-www-form-urlencoded` body
    async fn post_form(&self, url: Url, form: Vec<(String, String)>) -> Result<RawResponse, Box<dyn Error + Send + Sync>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: Url) -> Result<RawResponse, Box<dyn Error + Send + Sync>> {
        (**self).get(url).await
    }

    async fn post_form(&self, url: Url, form: Vec<(String, String)>) -> Result<RawResponse, Box<dyn Error + Send + Sync>> {
        (**self).post_form(url, form).await
    }
}


/// The page elements this crate reads from and writes to
pub trait Document {
    /// Returns the `value` of an (input) element, or `None` if there is no such element
    fn value(&self, element: &str) -> Option<String>;

    /// Returns the raw cookie string of the page (`name=value; other=value`)
    fn cookies(&self) -> String;

    /// Perform a single write
    fn apply(&mut self, mutation: &Mutation);

    /// Perform a batch of writes, in order
    fn apply_all(&mut self, mutations: &[Mutation]) {
        for mutation in mutations {
            self.apply(mutation);
        }
    }
}
