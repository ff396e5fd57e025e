use tokio_util::sync::CancellationToken;

use crate::{
    client::Client, config::Config, error::ApiError, parse, query,
    types::organization::Organization,
};

/// API resource for rescue organizations
pub struct Organizations<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Organizations<'c, C> {
    /// Creates a new Organizations resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Fetch one organization
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self, id: &str) -> Result<Option<Organization>, ApiError> {
        self.get_inner(id, None).await
    }

    /// Fetch one organization, aborting when `cancel` fires
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, is cancelled, or the API
    /// returns an error.
    pub async fn get_with_cancel(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Organization>, ApiError> {
        self.get_inner(id, Some(cancel)).await
    }

    async fn get_inner(
        &self,
        id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Option<Organization>, ApiError> {
        let envelope = query::organization_by_id(id);
        let response = self.client.send(&envelope, cancel).await?;
        Ok(parse::page(response, 0, 1).into_first())
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Organizations API resource
    #[must_use]
    pub const fn organizations(&self) -> Organizations<'_, C> {
        Organizations::new(self)
    }
}
