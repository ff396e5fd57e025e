use tokio_util::sync::CancellationToken;

use crate::{
    client::Client,
    config::Config,
    error::ApiError,
    parse, query,
    types::{
        animal::{Animal, AnimalSearchParams},
        page::Page,
    },
};

/// API resource for adoptable animals
pub struct Animals<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Animals<'c, C> {
    /// Creates a new Animals resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Search available animals
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn search(&self, params: &AnimalSearchParams) -> Result<Page<Animal>, ApiError> {
        self.search_inner(params, None).await
    }

    /// Search available animals, aborting when `cancel` fires
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, is cancelled, or the API
    /// returns an error.
    pub async fn search_with_cancel(
        &self,
        params: &AnimalSearchParams,
        cancel: &CancellationToken,
    ) -> Result<Page<Animal>, ApiError> {
        self.search_inner(params, Some(cancel)).await
    }

    /// Fetch one animal with its detail fields
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self, id: &str) -> Result<Option<Animal>, ApiError> {
        self.get_inner(id, None).await
    }

    /// Fetch one animal, aborting when `cancel` fires
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, is cancelled, or the API
    /// returns an error.
    pub async fn get_with_cancel(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Animal>, ApiError> {
        self.get_inner(id, Some(cancel)).await
    }

    async fn search_inner(
        &self,
        params: &AnimalSearchParams,
        cancel: Option<&CancellationToken>,
    ) -> Result<Page<Animal>, ApiError> {
        let envelope = query::animal_search(params, &self.client.config().search_defaults());
        let response = self.client.send(&envelope, cancel).await?;
        Ok(parse::page(
            response,
            envelope.search.result_start,
            envelope.search.result_limit,
        ))
    }

    async fn get_inner(
        &self,
        id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Option<Animal>, ApiError> {
        let envelope = query::animal_by_id(id);
        let response = self.client.send(&envelope, cancel).await?;
        Ok(parse::page(response, 0, 1).into_first())
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Animals API resource
    #[must_use]
    pub const fn animals(&self) -> Animals<'_, C> {
        Animals::new(self)
    }
}
