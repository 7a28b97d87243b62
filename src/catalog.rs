//! Vendor and product catalog (`getVendorList`, `getProductList`).
//!
//! Both methods answer with the same `Result` document: a `VendorInfo` block
//! holding vendors, each optionally holding its products. The vendor list
//! leaves the product children out.

use super::MyJvn;
use super::error::Result;
use super::options::{Feed, Format, Method, Parameters, RequestDescriptor};
use super::parsing::{ResponseDecoder, Status};
use super::traits::CatalogOperations;
use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Response of `getVendorList`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VendorList {
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "@schemaLocation", alias = "@xsi:schemaLocation")]
    pub schema_location: String,
    #[serde(rename = "VendorInfo")]
    pub vendor_info: VendorInfo,
    #[serde(rename = "Status", alias = "status:Status")]
    pub status: Status,
}

/// Response of `getProductList`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductList {
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "@schemaLocation", alias = "@xsi:schemaLocation")]
    pub schema_location: String,
    #[serde(rename = "VendorInfo")]
    pub vendor_info: VendorInfo,
    #[serde(rename = "Status", alias = "status:Status")]
    pub status: Status,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VendorInfo {
    #[serde(rename = "@lang", alias = "@xml:lang")]
    pub language: String,
    #[serde(rename = "Vendor")]
    pub vendors: Vec<Vendor>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Vendor {
    #[serde(rename = "@vname")]
    pub name: String,
    /// Vendor-level CPE, e.g. `cpe:/:syspass`.
    #[serde(rename = "@cpe")]
    pub cpe: String,
    #[serde(rename = "@vid")]
    pub vid: String,
    #[serde(rename = "Product")]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(rename = "@pname")]
    pub name: String,
    #[serde(rename = "@cpe")]
    pub cpe: String,
    #[serde(rename = "@pid")]
    pub pid: String,
}

impl VendorInfo {
    /// Looks a vendor up by its JVN vendor id.
    pub fn vendor(&self, vid: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|vendor| vendor.vid == vid)
    }

    /// Every product of every vendor, in document order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.vendors.iter().flat_map(|vendor| vendor.products.iter())
    }
}

/// Catalog operations for the MyJVN API.
///
/// # Examples
///
/// ```ignore
/// use myjvn::{CatalogOperations, MyJvn, Parameters};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MyJvn::new()?;
///     let cancel = CancellationToken::new();
///
///     let vendors = client
///         .vendor_list(&cancel, Some(Parameters::new().with_keyword("apache")))
///         .await?;
///     if let Some(vendor) = vendors.vendor_info.vendors.first() {
///         let opts = Parameters::new().with_vendor_id(vendor.vid.clone());
///         let products = client.product_list(&cancel, Some(opts)).await?;
///         println!("{} has {} products", vendor.name, products.vendor_info.products().count());
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
impl CatalogOperations for MyJvn {
    async fn vendor_list(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<VendorList> {
        let request = RequestDescriptor::new(Method::GetVendorList, Feed::Hnd, opts);
        self.fetch(&request, cancel).await
    }

    fn vendor_list_from_str(&self, content: &str, format: Option<Format>) -> Result<VendorList> {
        ResponseDecoder::new(format).decode_str(content)
    }

    async fn product_list(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<ProductList> {
        let request = RequestDescriptor::new(Method::GetProductList, Feed::Hnd, opts);
        self.fetch(&request, cancel).await
    }

    fn product_list_from_str(
        &self,
        content: &str,
        format: Option<Format>,
    ) -> Result<ProductList> {
        ResponseDecoder::new(format).decode_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_list_from_json() {
        let client = MyJvn::new().unwrap();
        let json = r##"{
            "@version": "3.3",
            "VendorInfo": {
                "@xml:lang": "ja",
                "Vendor": [
                    {"@vname": "#sysPass", "@cpe": "cpe:/:syspass", "@vid": "12776"}
                ]
            },
            "status:Status": {"@retCd": "0", "@totalRes": "1"}
        }"##;

        let list = client.vendor_list_from_str(json, Some(Format::Json)).unwrap();
        assert_eq!(list.version, "3.3");
        assert_eq!(list.vendor_info.language, "ja");
        assert_eq!(list.vendor_info.vendors.len(), 1);
        assert_eq!(list.vendor_info.vendor("12776").unwrap().name, "#sysPass");
        assert!(list.vendor_info.vendor("1").is_none());
        assert_eq!(list.status.total_res, "1");
    }

    #[test]
    fn test_vendor_without_products() {
        let client = MyJvn::new().unwrap();
        let xml = r#"<Result><VendorInfo><Vendor vname="a" cpe="cpe:/:a" vid="1"/></VendorInfo></Result>"#;
        let list = client.vendor_list_from_str(xml, None).unwrap();
        assert!(list.vendor_info.vendors[0].products.is_empty());
        assert_eq!(list.vendor_info.products().count(), 0);
    }

    #[test]
    fn test_product_list_query() {
        let opts = Parameters::new()
            .with_vendor_id("12776")
            .with_product_id("29385")
            .with_language("en");
        let vendor = RequestDescriptor::new(Method::GetVendorList, Feed::Hnd, Some(opts.clone()));
        let product = RequestDescriptor::new(Method::GetProductList, Feed::Hnd, Some(opts));

        let params = vendor.query_params();
        assert_eq!(params["method"], "getVendorList");
        assert_eq!(params["productId"], "29385");
        assert_eq!(params["vendorId"], "12776");

        let params = product.query_params();
        assert_eq!(params["productId"], "29385");
        assert_eq!(params["vendorId"], "12776");
        assert_eq!(params["lang"], "en");
    }
}
