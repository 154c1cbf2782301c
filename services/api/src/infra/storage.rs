use anyhow::Context as _;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

use crate::domain::repository::ObjectStorage;

/// Profile image storage on S3. Objects are publicly readable so profile
/// URIs can be served directly.
#[derive(Clone)]
pub struct S3ObjectStorage {
    pub client: aws_sdk_s3::Client,
}

impl ObjectStorage for S3ObjectStorage {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> anyhow::Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(body))
            .send()
            .await
            .context("s3 put object")?;
        Ok(())
    }
}
