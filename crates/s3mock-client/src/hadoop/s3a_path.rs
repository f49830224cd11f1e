//! `s3://` and `s3n://` to `s3a://` rewriting.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static S3_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"s3n?://").expect("scheme pattern should be valid"));

/// Replaces every `s3://` and `s3n://` occurrence in `arg` with `s3a://`.
///
/// Occurrences anywhere in the string are rewritten, so values embedded in
/// options such as `--conf key=s3://bucket/path` are converted too. The
/// input is borrowed back when nothing matches.
///
/// # Examples
///
/// ```rust
/// use s3mock_client::to_s3a_uri;
///
/// assert_eq!(to_s3a_uri("s3://bucket/key"), "s3a://bucket/key");
/// assert_eq!(to_s3a_uri("s3n://bucket/key"), "s3a://bucket/key");
/// assert_eq!(to_s3a_uri("--deploy-mode"), "--deploy-mode");
/// ```
pub fn to_s3a_uri(arg: &str) -> Cow<'_, str> {
    S3_SCHEME.replace_all(arg, "s3a://")
}

/// Applies [`to_s3a_uri`] to each step argument.
pub fn convert_s3_to_s3a_paths<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .map(|arg| to_s3a_uri(arg.as_ref()).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaves_other_args_borrowed() {
        for arg in ["spark-submit", "s3a://bucket/key", "file:///tmp/s3", "--class"] {
            assert!(matches!(to_s3a_uri(arg), Cow::Borrowed(_)), "{arg}");
        }
    }

    #[test]
    fn test_rewrites_embedded_paths() {
        assert_eq!(
            to_s3a_uri("spark.yarn.dist.files=s3://bucket/a.txt,s3n://bucket/b.txt"),
            "spark.yarn.dist.files=s3a://bucket/a.txt,s3a://bucket/b.txt"
        );
    }

    #[test]
    fn test_convert_step() {
        let step = [
            "spark-submit",
            "--class",
            "org.apache.spark.examples.WordCount",
            "s3://bucket/tmp/localemr/wc-spark.jar",
            "s3n://bucket/key/2020-05/03/*/*.txt",
            "s3://bucket/tmp/localemr/output",
        ];

        assert_eq!(
            convert_s3_to_s3a_paths(step),
            vec![
                "spark-submit",
                "--class",
                "org.apache.spark.examples.WordCount",
                "s3a://bucket/tmp/localemr/wc-spark.jar",
                "s3a://bucket/key/2020-05/03/*/*.txt",
                "s3a://bucket/tmp/localemr/output",
            ]
        );
    }
}
