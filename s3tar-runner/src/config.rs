use std::path::PathBuf;

pub const DEFAULT_REGION: &str = "us-east-2";
pub const DEFAULT_MANIFEST_DIR: &str = "/home/ec2-user/data/manifests";
pub const DEFAULT_S3TAR_PATH: &str = "./s3tar";

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub manifest_dir: PathBuf,
    pub region: String,
    pub s3tar_path: PathBuf,
    pub log_level: String,
    pub max_concurrent_jobs: usize,
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            manifest_dir: PathBuf::from(
                var("MANIFEST_DIR").unwrap_or_else(|| DEFAULT_MANIFEST_DIR.into()),
            ),
            region: var("AWS_REGION")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_REGION.into()),
            s3tar_path: PathBuf::from(
                var("S3TAR_PATH").unwrap_or_else(|| DEFAULT_S3TAR_PATH.into()),
            ),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            max_concurrent_jobs: var("MAX_CONCURRENT_JOBS")
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> RunnerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunnerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = config_with(&[]);
        assert_eq!(config.region, "us-east-2");
        assert_eq!(config.manifest_dir, PathBuf::from("/home/ec2-user/data/manifests"));
        assert_eq!(config.s3tar_path, PathBuf::from("./s3tar"));
        assert_eq!(config.max_concurrent_jobs, 1);
    }

    #[test]
    fn test_region_from_env() {
        let config = config_with(&[("AWS_REGION", "eu-central-1")]);
        assert_eq!(config.region, "eu-central-1");
    }

    #[test]
    fn test_invalid_concurrency_falls_back() {
        assert_eq!(config_with(&[("MAX_CONCURRENT_JOBS", "0")]).max_concurrent_jobs, 1);
        assert_eq!(config_with(&[("MAX_CONCURRENT_JOBS", "four")]).max_concurrent_jobs, 1);
        assert_eq!(config_with(&[("MAX_CONCURRENT_JOBS", "4")]).max_concurrent_jobs, 4);
    }
}
