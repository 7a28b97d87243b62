mod common;

use common::{client, read_fixture};
use myjvn::{Format, StatisticsOperations};

#[test]
fn parse_statistics_hnd() {
    let client = client();
    let content = read_fixture("xml/statistics_hnd.xml");
    let stats = client.statistics_from_str(&content, None).unwrap();

    assert_eq!(stats.version, "3.3");

    let jvndb = &stats.sum_jvndb;
    assert_eq!(jvndb.titles.len(), 2);
    assert_eq!(jvndb.title("ja"), Some("脆弱性統計情報"));
    assert_eq!(jvndb.title("en-US"), Some("Statistics Vulnerability Count"));
    assert_eq!(jvndb.res_data_total.vulinfo, "122180");
    assert_eq!(jvndb.res_data_total.vendor, "17739");
    assert_eq!(jvndb.res_data_total.product, "43096");
    assert_eq!(jvndb.res_data.len(), 2);
    assert_eq!(jvndb.res_data[1].date, "2016");
    assert_eq!(jvndb.res_data[1].cnt_all, "8002");

    let cvss = &stats.sum_cvss.res_data[0];
    assert_eq!(cvss.cnt_c, "286");
    assert_eq!(cvss.cnt_h, "653");
    assert_eq!(cvss.cnt_m, "702");
    assert_eq!(cvss.cnt_l, "24");
    assert_eq!(cvss.cnt_n, "0");

    assert_eq!(stats.sum_cwe.cwe_id, "CWE-20");
    assert_eq!(stats.sum_cwe.title("en-US"), Some("Improper Input Validation"));
    assert_eq!(stats.sum_cwe.res_data[0].cnt_all, "131");

    assert_eq!(stats.status.theme, "sumAll");
    assert_eq!(stats.status.ret_max_cnt, "15558");
    assert_eq!(stats.status.date_public_start_y, 2015);
}

#[test]
fn parse_statistics_itm() {
    let client = client();
    let content = read_fixture("xml/statistics_itm.xml");
    let stats = client.statistics_from_str(&content, None).unwrap();

    assert_eq!(stats.version, "3.2");
    assert!(stats.sum_jvndb.res_data.is_empty());
    assert!(stats.sum_cwe.titles.is_empty());
    assert_eq!(stats.sum_cvss.res_data.len(), 2);
    assert!(stats.sum_cvss.res_data[0].cnt_c.is_empty());
    assert_eq!(stats.sum_cvss.res_data[0].cnt_h, "2717");
    assert_eq!(stats.status.feed, "itm");
    assert_eq!(stats.status.theme, "sumCvss");
}

#[test]
fn statistics_itm_formats_agree() {
    let client = client();
    let xml = client
        .statistics_from_str(&read_fixture("xml/statistics_itm.xml"), None)
        .unwrap();
    let json = client
        .statistics_from_str(&read_fixture("json/statistics_itm.json"), Some(Format::Json))
        .unwrap();

    assert_eq!(xml.sum_cvss, json.sum_cvss);
    assert_eq!(xml.status.feed, json.status.feed);
    assert_eq!(xml.status.cwe_id, json.status.cwe_id);
    assert_eq!(xml.status.date_public_start_y, json.status.date_public_start_y);
}
