use s3_uploader::upload::{CredentialSource, S3Client, S3ClientConfig};
use aws_credential_types::Credentials;

fn keys(access: Option<&str>, secret: Option<&str>) -> S3ClientConfig {
    S3ClientConfig {
        access_key: access.map(str::to_string),
        secret_key: secret.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn explicit_keys_need_both_halves() {
    let creds = keys(Some("AKIA"), Some("secret"))
        .explicit_credentials()
        .expect("both halves given");
    assert_eq!(creds.access_key_id(), "AKIA");
    assert_eq!(creds.secret_access_key(), "secret");

    assert!(keys(Some("AKIA"), None).explicit_credentials().is_none());
    assert!(keys(None, Some("secret")).explicit_credentials().is_none());
    assert!(keys(None, None).explicit_credentials().is_none());
}

#[test]
fn credential_source_precedence() {
    let fallback = Credentials::new("fallback", "fallback-secret", None, None, "test");

    let client =
        S3Client::new(keys(Some("AKIA"), Some("secret"))).with_fallback_provider(fallback.clone());
    assert_eq!(client.credential_source(), CredentialSource::ExplicitKeys);

    let client = S3Client::new(keys(Some("AKIA"), None)).with_fallback_provider(fallback);
    assert_eq!(client.credential_source(), CredentialSource::FallbackProvider);

    let client = S3Client::new(S3ClientConfig::default());
    assert_eq!(client.credential_source(), CredentialSource::DefaultChain);
}
