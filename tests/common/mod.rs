use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use myjvn::{MyJvn, MyJvnConfig};

pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture file should be readable")
}

#[allow(dead_code)]
pub fn client() -> MyJvn {
    MyJvn::new().unwrap()
}

/// Client pointed at a local mock server, with millisecond backoff.
#[allow(dead_code)]
pub fn mock_client(base_url: &str) -> MyJvn {
    let mut config = MyJvnConfig::with_base_url(base_url);
    config.retry.initial_backoff = Duration::from_millis(1);
    config.retry.max_backoff = Duration::from_millis(5);
    MyJvn::with_config(config).unwrap()
}
