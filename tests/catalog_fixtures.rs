mod common;

use common::{client, read_fixture};
use myjvn::{CatalogOperations, Format};

#[test]
fn parse_vendor_list_xml() {
    let client = client();
    let content = read_fixture("xml/vendor_list.xml");
    let list = client.vendor_list_from_str(&content, None).unwrap();

    assert_eq!(list.version, "3.3");
    assert_eq!(list.vendor_info.language, "ja");
    assert_eq!(list.vendor_info.vendors.len(), 2);

    let vendor = &list.vendor_info.vendors[0];
    assert_eq!(vendor.name, "#1 deals and maps app");
    assert_eq!(vendor.cpe, "cpe:/:pointinside");
    assert_eq!(vendor.vid, "10133");
    assert!(vendor.products.is_empty());

    assert_eq!(list.status.method, "getVendorList");
    assert_eq!(list.status.language, "ja");
    assert_eq!(list.status.ret_max, "10000");
}

#[test]
fn parse_product_list_with_raw_ampersand() {
    let client = client();
    let content = read_fixture("xml/product_list.xml");
    let list = client.product_list_from_str(&content, None).unwrap();

    let products: Vec<_> = list.vendor_info.products().collect();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Point Inside Shopping & Travel");
    assert_eq!(
        products[0].cpe,
        "cpe:/a:pointinside:point_inside_shopping_%26_travel"
    );
    assert_eq!(products[0].pid, "21248");

    let syspass = list.vendor_info.vendor("12776").unwrap();
    assert_eq!(syspass.products[0].pid, "29385");

    assert_eq!(list.status.method, "getProductList");
    assert_eq!(list.status.total_res, "43019");
    assert_eq!(list.status.max_count_item, 2);
}

#[test]
fn product_list_formats_agree() {
    let client = client();
    let xml = client
        .product_list_from_str(&read_fixture("xml/product_list.xml"), Some(Format::Xml))
        .unwrap();
    let json = client
        .product_list_from_str(&read_fixture("json/product_list.json"), Some(Format::Json))
        .unwrap();

    assert_eq!(xml.vendor_info, json.vendor_info);
    assert_eq!(xml.version, json.version);
    assert_eq!(xml.schema_location, json.schema_location);
    assert_eq!(xml.status.total_res, json.status.total_res);
    assert_eq!(xml.status.max_count_item, json.status.max_count_item);
}
