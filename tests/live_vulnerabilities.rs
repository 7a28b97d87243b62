use myjvn::{Format, MyJvn, Parameters, VulnerabilityOperations};
use tokio_util::sync::CancellationToken;

#[tokio::test]
#[ignore]
async fn vuln_overview_list() {
    let client = MyJvn::new().unwrap();
    let opts = Parameters::new()
        .with_keyword("openssl")
        .with_max_count_item(5);
    let list = client
        .vuln_overview_list(&CancellationToken::new(), Some(opts))
        .await
        .unwrap();
    assert!(!list.items.is_empty());
}

#[tokio::test]
#[ignore]
async fn vuln_detail_info() {
    let client = MyJvn::new().unwrap();
    let opts = Parameters::new()
        .with_vuln_id("JVNDB-2020-006469")
        .with_format(Format::Json);
    let detail = client
        .vuln_detail_info(&CancellationToken::new(), Some(opts))
        .await
        .unwrap();
    assert!(detail.find("JVNDB-2020-006469").is_some());
}
