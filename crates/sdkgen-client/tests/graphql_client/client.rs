use sdkgen_client::BaseClient;
use std::ops::Deref;

#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) base: BaseClient,
}

impl Client {
    pub fn new(url: impl Into<String>) -> Self {
        Self::from_base(BaseClient::new(url))
    }

    /// Wrap a configured transport (headers, custom HTTP client).
    pub fn from_base(base: BaseClient) -> Self {
        Self { base }
    }

    /// Release this handle's share of the connection pool.
    pub fn close(self) {
        self.base.close();
    }
}

impl Deref for Client {
    type Target = BaseClient;

    fn deref(&self) -> &BaseClient {
        &self.base
    }
}
