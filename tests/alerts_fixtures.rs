mod common;

use common::{client, read_fixture};
use myjvn::{AlertOperations, Format};

#[test]
fn parse_alert_list_xml() {
    let client = client();
    let content = read_fixture("xml/alert_list.xml");
    let alerts = client.alert_list_from_str(&content, None).unwrap();

    assert_eq!(alerts.language, "ja");
    assert!(alerts.schema_location.starts_with("http://www.w3.org/2005/Atom"));
    assert_eq!(alerts.title.title_type, "text");
    assert_eq!(alerts.title.text, "title");
    assert_eq!(alerts.updated, "2020-07-22T16:00:40+09:00");
    assert_eq!(alerts.link.rel, "alternate");
    assert_eq!(alerts.link.hreflang, "ja");
    assert_eq!(alerts.author.uri, "http://example.com/");

    let marking = &alerts.handling.marking.structure;
    assert_eq!(marking.structure_type, "xsitype");
    assert_eq!(marking.marking_model_name, "TLP");
    assert_eq!(marking.color, "WHITE");

    assert_eq!(alerts.entries.len(), 1);
    let entry = &alerts.entries[0];
    assert_eq!(entry.category.label, "label");
    assert_eq!(entry.category.term, "term");
    assert_eq!(entry.items.items.len(), 2);

    let first = &entry.items.items[0];
    assert_eq!(first.title, "Microsoft 製品の脆弱性対策について(2020年1月)");
    assert_eq!(first.identifier, "MYJVN-ALT-2020-0002-0001");
    assert_eq!(
        first.link.href,
        "https://www.ipa.go.jp/security/ciadr/vul/20200115-ms.html"
    );
    assert_eq!(first.published, "2020-01-15T00:00:00+09:00");
    assert_eq!(entry.items.items[1].identifier, "MYJVN-ALT-2020-0002-0002");
}

#[test]
fn alert_list_status() {
    let client = client();
    let content = read_fixture("xml/alert_list.xml");
    let status = client.alert_list_from_str(&content, None).unwrap().status;

    assert_eq!(status.version, "3.3");
    assert_eq!(status.method, "getAlertList");
    assert_eq!(status.ret_cd, 0);
    assert_eq!(status.ret_max, "50");
    assert_eq!(status.err_cd, "errcd");
    assert_eq!(status.err_msg, "errmsg");
    assert_eq!(status.total_res, "54");
    assert_eq!(status.total_res_ret, "1");
    assert_eq!(status.first_res, "1");
    assert_eq!(status.feed, "hnd");
    assert_eq!(status.max_count_item, 1);
    assert_eq!(status.next_start_item(), Some(2));
}

#[test]
fn xml_with_and_without_explicit_format() {
    let client = client();
    let content = read_fixture("xml/alert_list.xml");
    let implicit = client.alert_list_from_str(&content, None).unwrap();
    let explicit = client
        .alert_list_from_str(&content, Some(Format::Xml))
        .unwrap();
    assert_eq!(implicit, explicit);
}

#[test]
fn parse_alert_list_json() {
    let client = client();
    let content = read_fixture("json/alert_list.json");
    let alerts = client
        .alert_list_from_str(&content, Some(Format::Json))
        .unwrap();

    assert_eq!(alerts.language, "ja");
    assert_eq!(alerts.title.title_type, "text");
    assert_eq!(alerts.title.text, "JVNDB 注意警戒情報");
    assert_eq!(alerts.id, "https://jvndb.jvn.jp/apis/myjvn");
    assert_eq!(alerts.handling.marking.structure.color, "WHITE");
    assert_eq!(alerts.items().count(), 1);
    assert_eq!(alerts.entries[0].category.term, "alert");
    assert_eq!(alerts.status.max_count_item, 1);
    assert_eq!(alerts.status.format, "json");
    assert!(!alerts.status.has_error());
}
