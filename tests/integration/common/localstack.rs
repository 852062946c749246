//! LocalStack test context and utilities.

use aws_sdk_s3::Client as S3Client;
use sift_search::S3Config;

/// LocalStack test context providing an S3 client.
pub struct LocalStackTestContext {
    pub s3: S3Client,
    pub endpoint: String,
    pub region: String,
}

impl LocalStackTestContext {
    /// Create a new LocalStack test context.
    ///
    /// Uses the `LOCALSTACK_ENDPOINT` environment variable if set,
    /// otherwise defaults to `http://localhost:4566`.
    pub async fn new() -> Self {
        let endpoint = std::env::var("LOCALSTACK_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4566".to_string());
        let region = "us-east-1".to_string();

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(region.clone()))
            .endpoint_url(&endpoint)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        Self {
            s3: S3Client::from_conf(s3_config),
            endpoint,
            region,
        }
    }

    /// Check if LocalStack is available and healthy.
    pub async fn is_available(&self) -> bool {
        self.s3.list_buckets().send().await.is_ok()
    }

    /// Configuration for a store pointed at this LocalStack bucket.
    pub fn s3_config(&self, bucket: &str) -> S3Config {
        S3Config::new(bucket)
            .with_region(&self.region)
            .with_endpoint(&self.endpoint)
    }

    /// Create an S3 bucket for testing, emptying it if it already exists.
    pub async fn create_bucket(&self, name: &str) -> Result<(), aws_sdk_s3::Error> {
        let buckets = self.s3.list_buckets().send().await?;
        let exists = buckets
            .buckets()
            .iter()
            .any(|b| b.name().unwrap_or_default() == name);

        if exists {
            for key in self.list_keys(name).await? {
                self.s3.delete_object().bucket(name).key(key).send().await?;
            }
        } else {
            self.s3.create_bucket().bucket(name).send().await?;
        }
        Ok(())
    }

    /// Upload a JSON document to S3.
    pub async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: &str,
    ) -> Result<(), aws_sdk_s3::Error> {
        self.s3
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(data.as_bytes().to_vec().into())
            .content_type("application/json")
            .send()
            .await?;
        Ok(())
    }

    /// All keys in a bucket.
    pub async fn list_keys(&self, bucket: &str) -> Result<Vec<String>, aws_sdk_s3::Error> {
        let mut keys = Vec::new();
        let mut token = None;

        loop {
            let result = self
                .s3
                .list_objects_v2()
                .bucket(bucket)
                .set_continuation_token(token)
                .send()
                .await?;

            keys.extend(
                result
                    .contents()
                    .iter()
                    .filter_map(|o| o.key().map(String::from)),
            );

            match result.next_continuation_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        Ok(keys)
    }
}

/// A login log document for `user_id`.
pub fn login_log(user_id: &str, email: &str, timestamp: i64) -> String {
    serde_json::json!({
        "timestamp": timestamp,
        "data": {
            "userId": user_id,
            "status": "success",
            "request": {"email": email},
            "response": {"ok": true}
        },
        "meta": {
            "resource": "/api/auth/login",
            "destIp": "10.0.0.2",
            "os": "linux",
            "userAgent": "curl/8.0"
        }
    })
    .to_string()
}
