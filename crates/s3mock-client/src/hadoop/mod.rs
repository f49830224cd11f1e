//! Hadoop S3A and Spark integration helpers.
//!
//! Spark jobs reach S3 through Hadoop's S3A filesystem. Pointing them at a
//! mock server takes two steps. First, `s3://` and `s3n://` paths in step
//! arguments are rewritten to `s3a://`. Second, the submission is given
//! `spark.hadoop.fs.s3a.*` properties that select the mock endpoint and the
//! non-chunked client factory.

use std::collections::HashMap;

mod s3a_path;
mod spark_conf;

pub use s3a_path::{convert_s3_to_s3a_paths, to_s3a_uri};
pub use spark_conf::{
    NON_CHUNKED_CLIENT_FACTORY_CLASS, S3A_FILESYSTEM_CLASS, SPARK_HADOOP_PREFIX, SparkS3Config,
};

/// Looks up an S3A property, preferring the per-bucket override.
///
/// For `property = "endpoint"` this checks `fs.s3a.bucket.<bucket>.endpoint`
/// first and then `fs.s3a.endpoint`. Values are trimmed.
pub(crate) fn s3a_property<'a>(
    conf: &'a HashMap<String, String>,
    bucket: &str,
    property: &str,
) -> Option<&'a str> {
    let per_bucket_key = format!("fs.s3a.bucket.{bucket}.{property}");
    conf.get(&per_bucket_key)
        .or_else(|| conf.get(&format!("fs.s3a.{property}")))
        .map(|value| value.trim())
}
