#![doc = "S3 implementation of the core `ObjectStore` trait, used by the CLI for real uploads."]
//
//! # S3 client (CLI <-> Core)
//!
//! This module bridges the [`ObjectStore`] abstraction in `s3-uploader-core`
//! to `aws-sdk-s3`.
//!
//! ## Credentials
//!
//! Credentials are explicit configuration, never read inside the upload path:
//! - an access/secret key pair in [`S3ClientConfig`] wins when both halves are set;
//! - otherwise an injected fallback provider ([`S3Client::with_fallback_provider`]);
//! - otherwise the AWS SDK default chain (environment, profile, instance metadata).
//!
//! The SDK client is built on the first upload, so a dry run never resolves
//! credentials or touches the network.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use s3_uploader_core::contract::{ObjectStore, ObjectUpload, StoreError};
use tokio::sync::OnceCell;

const PROVIDER_NAME: &str = "s3-uploader";

/// Connection settings for [`S3Client`].
#[derive(Debug, Clone, Default)]
pub struct S3ClientConfig {
    pub region: Option<String>,
    /// Custom endpoint (MinIO, LocalStack, ...). Enables path-style addressing.
    pub endpoint_url: Option<String>,
    /// Named profile for the default credential chain.
    pub profile: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

/// Where an [`S3Client`] gets its credentials from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    ExplicitKeys,
    FallbackProvider,
    DefaultChain,
}

impl S3ClientConfig {
    /// The explicit key pair, when both halves are present.
    pub fn explicit_credentials(&self) -> Option<Credentials> {
        match (&self.access_key, &self.secret_key) {
            (Some(access_key), Some(secret_key)) => Some(Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                PROVIDER_NAME,
            )),
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!(
                    "Only one of access key / secret key was supplied; \
                     ignoring explicit credentials"
                );
                None
            }
            (None, None) => None,
        }
    }
}

pub struct S3Client {
    config: S3ClientConfig,
    fallback: Option<SharedCredentialsProvider>,
    client: OnceCell<Client>,
}

impl S3Client {
    pub fn new(config: S3ClientConfig) -> Self {
        Self {
            config,
            fallback: None,
            client: OnceCell::new(),
        }
    }

    /// Use `provider` instead of the SDK default chain when no explicit keys are configured.
    pub fn with_fallback_provider(mut self, provider: impl ProvideCredentials + 'static) -> Self {
        self.fallback = Some(SharedCredentialsProvider::new(provider));
        self
    }

    pub fn credential_source(&self) -> CredentialSource {
        if self.config.access_key.is_some() && self.config.secret_key.is_some() {
            CredentialSource::ExplicitKeys
        } else if self.fallback.is_some() {
            CredentialSource::FallbackProvider
        } else {
            CredentialSource::DefaultChain
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| build_client(&self.config, self.fallback.clone()))
            .await
    }
}

async fn build_client(
    config: &S3ClientConfig,
    fallback: Option<SharedCredentialsProvider>,
) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }

    let source = if let Some(credentials) = config.explicit_credentials() {
        loader = loader.credentials_provider(credentials);
        CredentialSource::ExplicitKeys
    } else if let Some(provider) = fallback {
        loader = loader.credentials_provider(provider);
        CredentialSource::FallbackProvider
    } else {
        CredentialSource::DefaultChain
    };

    let sdk_config = loader.load().await;
    let builder = aws_sdk_s3::config::Builder::from(&sdk_config);
    let s3_config = if config.endpoint_url.is_some() {
        builder.force_path_style(true).build()
    } else {
        builder.build()
    };

    tracing::info!(
        ?source,
        region = ?sdk_config.region(),
        endpoint = config.endpoint_url.as_deref().unwrap_or("<default>"),
        "Initialized S3 client"
    );
    Client::from_conf(s3_config)
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn upload<'a>(&self, req: ObjectUpload<'a>) -> Result<(), StoreError> {
        let body = ByteStream::from_path(req.local_path).await?;

        let mut request = self
            .client()
            .await
            .put_object()
            .bucket(req.bucket)
            .key(req.key)
            .body(body);

        if let Some(ct) = req.content_type {
            request = request.content_type(ct);
        }

        request
            .send()
            .await
            .map_err(|e| {
                format!(
                    "put_object to s3://{}/{} failed: {}",
                    req.bucket,
                    req.key,
                    DisplayErrorContext(&e)
                )
            })?;
        Ok(())
    }
}
