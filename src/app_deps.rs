use anyhow::Result;
use async_trait::async_trait;

use crate::instance::{self, AccessToken, AppRegistration, Status, Visibility};
use crate::prompt::{self, Credentials};

#[async_trait]
pub trait InstanceApi: Send + Sync {
    async fn register_app(&self) -> Result<AppRegistration>;
    async fn exchange_token(
        &self,
        registration: &AppRegistration,
        username: &str,
        password: &str,
    ) -> Result<AccessToken>;
    async fn create_status(
        &self,
        authorization: &str,
        status: &str,
        visibility: Visibility,
    ) -> Result<Status>;
}

pub trait InstanceApiFactory: Send + Sync {
    fn create(&self, base_url: &str) -> Result<Box<dyn InstanceApi>>;
}

pub struct RealInstanceApi {
    inner: instance::InstanceClient,
}

#[async_trait]
impl InstanceApi for RealInstanceApi {
    async fn register_app(&self) -> Result<AppRegistration> {
        self.inner.register_app().await
    }

    async fn exchange_token(
        &self,
        registration: &AppRegistration,
        username: &str,
        password: &str,
    ) -> Result<AccessToken> {
        self.inner
            .exchange_token(registration, username, password)
            .await
    }

    async fn create_status(
        &self,
        authorization: &str,
        status: &str,
        visibility: Visibility,
    ) -> Result<Status> {
        self.inner
            .create_status(authorization, status, visibility)
            .await
    }
}

pub struct RealInstanceApiFactory;

impl InstanceApiFactory for RealInstanceApiFactory {
    fn create(&self, base_url: &str) -> Result<Box<dyn InstanceApi>> {
        let client = instance::InstanceClient::new(base_url)?;
        Ok(Box::new(RealInstanceApi { inner: client }))
    }
}

pub trait PromptInterface: Send + Sync {
    fn prompt_instance_url(&self) -> Result<String>;
    fn prompt_credentials(&self) -> Result<Credentials>;
    fn prompt_status(&self) -> Result<String>;
    fn select_visibility(&self) -> Result<Visibility>;
}

pub struct RealPrompt;

impl PromptInterface for RealPrompt {
    fn prompt_instance_url(&self) -> Result<String> {
        prompt::prompt_instance_url()
    }

    fn prompt_credentials(&self) -> Result<Credentials> {
        prompt::prompt_credentials()
    }

    fn prompt_status(&self) -> Result<String> {
        prompt::prompt_status()
    }

    fn select_visibility(&self) -> Result<Visibility> {
        prompt::select_visibility()
    }
}
