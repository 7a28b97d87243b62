use myjvn::{AlertOperations, Format, MyJvn, Parameters};
use tokio_util::sync::CancellationToken;

#[tokio::test]
#[ignore]
async fn alert_list() {
    let client = MyJvn::new().unwrap();
    let alerts = client
        .alert_list(&CancellationToken::new(), None)
        .await
        .unwrap();
    assert!(!alerts.entries.is_empty());
    assert!(!alerts.status.has_error());
}

#[tokio::test]
#[ignore]
async fn alert_list_json() {
    let client = MyJvn::new().unwrap();
    let opts = Parameters::new()
        .with_max_count_item(5)
        .with_format(Format::Json);
    let alerts = client
        .alert_list(&CancellationToken::new(), Some(opts))
        .await
        .unwrap();
    assert_eq!(alerts.status.method, "getAlertList");
}
