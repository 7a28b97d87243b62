//! Request parameters for the MyJVN API.
//!
//! Every method of the API is a `GET` on the same endpoint, distinguished by the
//! `method` and `feed` query parameters. [`Parameters`] holds the union of all the
//! other inputs any method accepts. A field left at its zero value (`0`, empty
//! string, or no format) is treated as absent and never reaches the query string.
//!
//! Parameters are built either with the `with_*` builder methods or by applying
//! [`QueryOption`] values in order; both paths go through the same mutators, so the
//! last value written for a field wins.
//!
//! ```rust
//! use myjvn::{Format, Parameters, QueryOption};
//!
//! let params = Parameters::new()
//!     .with_keyword("openssl")
//!     .with_max_count_item(10)
//!     .with_format(Format::Json);
//!
//! let same = Parameters::from_options([
//!     QueryOption::Keyword("openssl".into()),
//!     QueryOption::MaxCountItem(10),
//!     QueryOption::Format(Format::Json),
//! ]);
//! assert_eq!(params, same);
//! ```

use super::error::{MyJvnError, Result};
use reqwest::Url;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Wire format of a response body. The service defaults to XML when `ft` is not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Xml,
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Xml => "xml",
            Format::Json => "json",
        }
    }

    /// Resolves an optional selector string. Absent and empty selectors mean
    /// "not requested"; anything other than `xml` or `json` is rejected.
    pub fn from_selector(selector: Option<&str>) -> Result<Option<Format>> {
        match selector {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl FromStr for Format {
    type Err = MyJvnError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xml" => Ok(Format::Xml),
            "json" => Ok(Format::Json),
            other => Err(MyJvnError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JVN data feed. `hnd` is the general countermeasure feed; `itm` carries the
/// item-level statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feed {
    #[default]
    Hnd,
    Itm,
}

impl Feed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::Hnd => "hnd",
            Feed::Itm => "itm",
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote API methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GetAlertList,
    GetVendorList,
    GetProductList,
    GetStatistics,
    GetVulnDetailInfo,
    GetVulnOverviewList,
}

const ALERT_LIST_PARAMS: &[&str] = &[
    "startItem",
    "maxCountItem",
    "datePublished",
    "dateFirstPublished",
    "cpeName",
    "ft",
];

const VENDOR_LIST_PARAMS: &[&str] = &[
    "startItem",
    "maxCountItem",
    "cpeName",
    "vendorId",
    "productId",
    "keyword",
    "lang",
    "ft",
];

const PRODUCT_LIST_PARAMS: &[&str] = &[
    "startItem",
    "maxCountItem",
    "cpeName",
    "vendorId",
    "productId",
    "keyword",
    "lang",
    "ft",
];

const STATISTICS_PARAMS: &[&str] = &[
    "theme",
    "type",
    "cweId",
    "pid",
    "cpeName",
    "datePublicStartY",
    "datePublicStartM",
    "datePublicEndY",
    "datePublicEndM",
    "lang",
    "ft",
];

const VULN_DETAIL_INFO_PARAMS: &[&str] = &["startItem", "maxCountItem", "vulnId", "lang", "ft"];

const VULN_OVERVIEW_LIST_PARAMS: &[&str] = &[
    "startItem",
    "maxCountItem",
    "cpeName",
    "vendorId",
    "productId",
    "keyword",
    "severity",
    "vector",
    "rangeDatePublic",
    "rangeDatePublished",
    "rangeDateFirstPublished",
    "datePublicStartY",
    "datePublicStartM",
    "datePublicStartD",
    "datePublicEndY",
    "datePublicEndM",
    "datePublicEndD",
    "dateFirstPublishedStartY",
    "dateFirstPublishedStartM",
    "dateFirstPublishedStartD",
    "dateFirstPublishedEndY",
    "dateFirstPublishedEndM",
    "dateFirstPublishedEndD",
    "lang",
    "ft",
];

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GetAlertList => "getAlertList",
            Method::GetVendorList => "getVendorList",
            Method::GetProductList => "getProductList",
            Method::GetStatistics => "getStatistics",
            Method::GetVulnDetailInfo => "getVulnDetailInfo",
            Method::GetVulnOverviewList => "getVulnOverviewList",
        }
    }

    /// Wire names of the parameters this method understands, besides `method` and `feed`.
    pub fn accepted_params(&self) -> &'static [&'static str] {
        match self {
            Method::GetAlertList => ALERT_LIST_PARAMS,
            Method::GetVendorList => VENDOR_LIST_PARAMS,
            Method::GetProductList => PRODUCT_LIST_PARAMS,
            Method::GetStatistics => STATISTICS_PARAMS,
            Method::GetVulnDetailInfo => VULN_DETAIL_INFO_PARAMS,
            Method::GetVulnOverviewList => VULN_OVERVIEW_LIST_PARAMS,
        }
    }

    pub fn accepts(&self, wire_name: &str) -> bool {
        self.accepted_params().contains(&wire_name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All inputs any MyJVN method may send, except `method` and `feed`.
///
/// Free-text fields are stored raw; percent-encoding happens once, when the
/// query string is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    /// First result to return (1-based).
    pub start_item: u32,
    /// Page size.
    pub max_count_item: u32,
    /// Year filter on the alert publication date.
    pub date_published: u16,
    /// Year filter on the alert first-publication date.
    pub date_first_published: u16,
    /// CPE name of a product, e.g. `cpe:/a:openssl:openssl`.
    pub cpe_name: String,
    /// Requested response format; `None` lets the service answer in XML.
    pub format: Option<Format>,
    /// Free-text keyword.
    pub keyword: String,
    /// Response language, `ja` or `en`.
    pub language: String,
    pub vendor_id: String,
    pub product_id: String,
    /// JVNDB identifier(s), e.g. `JVNDB-2020-006469`.
    pub vuln_id: String,
    /// CVSS severity letter(s).
    pub severity: String,
    /// CVSS vector filter.
    pub vector: String,
    pub range_date_public: String,
    pub range_date_published: String,
    pub range_date_first_published: String,
    pub date_public_start_y: u16,
    pub date_public_start_m: u8,
    pub date_public_start_d: u8,
    pub date_public_end_y: u16,
    pub date_public_end_m: u8,
    pub date_public_end_d: u8,
    pub date_first_published_start_y: u16,
    pub date_first_published_start_m: u8,
    pub date_first_published_start_d: u8,
    pub date_first_published_end_y: u16,
    pub date_first_published_end_m: u8,
    pub date_first_published_end_d: u8,
    /// Statistics theme, e.g. `sumJvnDb`, `sumCvss`, `sumCwe`, `sumAll`.
    pub theme: String,
    /// Statistics aggregation type (`type` on the wire).
    pub aggregation_type: String,
    /// CWE identifier for the `sumCwe` theme.
    pub cwe_id: String,
    /// Product identifier for item-level statistics.
    pub pid: u32,
}

/// A single parameter mutation. The set is closed: one variant per field of
/// [`Parameters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOption {
    StartItem(u32),
    MaxCountItem(u32),
    DatePublished(u16),
    DateFirstPublished(u16),
    CpeName(String),
    Format(Format),
    Keyword(String),
    Language(String),
    VendorId(String),
    ProductId(String),
    VulnId(String),
    Severity(String),
    Vector(String),
    RangeDatePublic(String),
    RangeDatePublished(String),
    RangeDateFirstPublished(String),
    DatePublicStartY(u16),
    DatePublicStartM(u8),
    DatePublicStartD(u8),
    DatePublicEndY(u16),
    DatePublicEndM(u8),
    DatePublicEndD(u8),
    DateFirstPublishedStartY(u16),
    DateFirstPublishedStartM(u8),
    DateFirstPublishedStartD(u8),
    DateFirstPublishedEndY(u16),
    DateFirstPublishedEndM(u8),
    DateFirstPublishedEndD(u8),
    Theme(String),
    AggregationType(String),
    CweId(String),
    Pid(u32),
}

impl QueryOption {
    /// Writes this option's field on `target`. A missing target is a no-op.
    pub fn apply(self, target: Option<&mut Parameters>) {
        let Some(p) = target else {
            return;
        };

        match self {
            QueryOption::StartItem(v) => p.start_item = v,
            QueryOption::MaxCountItem(v) => p.max_count_item = v,
            QueryOption::DatePublished(v) => p.date_published = v,
            QueryOption::DateFirstPublished(v) => p.date_first_published = v,
            QueryOption::CpeName(v) => p.cpe_name = v,
            QueryOption::Format(v) => p.format = Some(v),
            QueryOption::Keyword(v) => p.keyword = v,
            QueryOption::Language(v) => p.language = v,
            QueryOption::VendorId(v) => p.vendor_id = v,
            QueryOption::ProductId(v) => p.product_id = v,
            QueryOption::VulnId(v) => p.vuln_id = v,
            QueryOption::Severity(v) => p.severity = v,
            QueryOption::Vector(v) => p.vector = v,
            QueryOption::RangeDatePublic(v) => p.range_date_public = v,
            QueryOption::RangeDatePublished(v) => p.range_date_published = v,
            QueryOption::RangeDateFirstPublished(v) => p.range_date_first_published = v,
            QueryOption::DatePublicStartY(v) => p.date_public_start_y = v,
            QueryOption::DatePublicStartM(v) => p.date_public_start_m = v,
            QueryOption::DatePublicStartD(v) => p.date_public_start_d = v,
            QueryOption::DatePublicEndY(v) => p.date_public_end_y = v,
            QueryOption::DatePublicEndM(v) => p.date_public_end_m = v,
            QueryOption::DatePublicEndD(v) => p.date_public_end_d = v,
            QueryOption::DateFirstPublishedStartY(v) => p.date_first_published_start_y = v,
            QueryOption::DateFirstPublishedStartM(v) => p.date_first_published_start_m = v,
            QueryOption::DateFirstPublishedStartD(v) => p.date_first_published_start_d = v,
            QueryOption::DateFirstPublishedEndY(v) => p.date_first_published_end_y = v,
            QueryOption::DateFirstPublishedEndM(v) => p.date_first_published_end_m = v,
            QueryOption::DateFirstPublishedEndD(v) => p.date_first_published_end_d = v,
            QueryOption::Theme(v) => p.theme = v,
            QueryOption::AggregationType(v) => p.aggregation_type = v,
            QueryOption::CweId(v) => p.cwe_id = v,
            QueryOption::Pid(v) => p.pid = v,
        }
    }
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters by applying `options` left to right.
    pub fn from_options(options: impl IntoIterator<Item = QueryOption>) -> Self {
        let mut params = Self::default();
        params.apply_all(options);
        params
    }

    pub fn apply_all(&mut self, options: impl IntoIterator<Item = QueryOption>) {
        for option in options {
            option.apply(Some(self));
        }
    }

    pub fn with(mut self, option: QueryOption) -> Self {
        option.apply(Some(&mut self));
        self
    }

    pub fn with_start_item(self, start_item: u32) -> Self {
        self.with(QueryOption::StartItem(start_item))
    }

    pub fn with_max_count_item(self, max_count_item: u32) -> Self {
        self.with(QueryOption::MaxCountItem(max_count_item))
    }

    pub fn with_date_published(self, year: u16) -> Self {
        self.with(QueryOption::DatePublished(year))
    }

    pub fn with_date_first_published(self, year: u16) -> Self {
        self.with(QueryOption::DateFirstPublished(year))
    }

    pub fn with_cpe_name(self, cpe_name: impl Into<String>) -> Self {
        self.with(QueryOption::CpeName(cpe_name.into()))
    }

    /// Requests a response format. The same value selects the decoder.
    pub fn with_format(self, format: Format) -> Self {
        self.with(QueryOption::Format(format))
    }

    /// Sets the free-text keyword. Pass it unescaped.
    pub fn with_keyword(self, keyword: impl Into<String>) -> Self {
        self.with(QueryOption::Keyword(keyword.into()))
    }

    pub fn with_language(self, language: impl Into<String>) -> Self {
        self.with(QueryOption::Language(language.into()))
    }

    pub fn with_vendor_id(self, vendor_id: impl Into<String>) -> Self {
        self.with(QueryOption::VendorId(vendor_id.into()))
    }

    pub fn with_product_id(self, product_id: impl Into<String>) -> Self {
        self.with(QueryOption::ProductId(product_id.into()))
    }

    pub fn with_vuln_id(self, vuln_id: impl Into<String>) -> Self {
        self.with(QueryOption::VulnId(vuln_id.into()))
    }

    pub fn with_severity(self, severity: impl Into<String>) -> Self {
        self.with(QueryOption::Severity(severity.into()))
    }

    pub fn with_vector(self, vector: impl Into<String>) -> Self {
        self.with(QueryOption::Vector(vector.into()))
    }

    pub fn with_range_date_public(self, range: impl Into<String>) -> Self {
        self.with(QueryOption::RangeDatePublic(range.into()))
    }

    pub fn with_range_date_published(self, range: impl Into<String>) -> Self {
        self.with(QueryOption::RangeDatePublished(range.into()))
    }

    pub fn with_range_date_first_published(self, range: impl Into<String>) -> Self {
        self.with(QueryOption::RangeDateFirstPublished(range.into()))
    }

    /// Sets the lower bound of the public-date range. Zero components are left out.
    pub fn with_date_public_start(self, year: u16, month: u8, day: u8) -> Self {
        self.with(QueryOption::DatePublicStartY(year))
            .with(QueryOption::DatePublicStartM(month))
            .with(QueryOption::DatePublicStartD(day))
    }

    /// Sets the upper bound of the public-date range.
    pub fn with_date_public_end(self, year: u16, month: u8, day: u8) -> Self {
        self.with(QueryOption::DatePublicEndY(year))
            .with(QueryOption::DatePublicEndM(month))
            .with(QueryOption::DatePublicEndD(day))
    }

    pub fn with_date_first_published_start(self, year: u16, month: u8, day: u8) -> Self {
        self.with(QueryOption::DateFirstPublishedStartY(year))
            .with(QueryOption::DateFirstPublishedStartM(month))
            .with(QueryOption::DateFirstPublishedStartD(day))
    }

    pub fn with_date_first_published_end(self, year: u16, month: u8, day: u8) -> Self {
        self.with(QueryOption::DateFirstPublishedEndY(year))
            .with(QueryOption::DateFirstPublishedEndM(month))
            .with(QueryOption::DateFirstPublishedEndD(day))
    }

    pub fn with_theme(self, theme: impl Into<String>) -> Self {
        self.with(QueryOption::Theme(theme.into()))
    }

    pub fn with_aggregation_type(self, aggregation_type: impl Into<String>) -> Self {
        self.with(QueryOption::AggregationType(aggregation_type.into()))
    }

    pub fn with_cwe_id(self, cwe_id: impl Into<String>) -> Self {
        self.with(QueryOption::CweId(cwe_id.into()))
    }

    pub fn with_pid(self, pid: u32) -> Self {
        self.with(QueryOption::Pid(pid))
    }

    /// Non-zero fields keyed by wire name, in lexicographic order.
    pub fn to_query_params(&self) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();

        push_num(&mut params, "startItem", self.start_item);
        push_num(&mut params, "maxCountItem", self.max_count_item);
        push_num(&mut params, "datePublished", self.date_published);
        push_num(&mut params, "dateFirstPublished", self.date_first_published);
        push_str(&mut params, "cpeName", &self.cpe_name);
        if let Some(format) = self.format {
            params.insert("ft", format.as_str().to_string());
        }
        push_str(&mut params, "keyword", &self.keyword);
        push_str(&mut params, "lang", &self.language);
        push_str(&mut params, "vendorId", &self.vendor_id);
        push_str(&mut params, "productId", &self.product_id);
        push_str(&mut params, "vulnId", &self.vuln_id);
        push_str(&mut params, "severity", &self.severity);
        push_str(&mut params, "vector", &self.vector);
        push_str(&mut params, "rangeDatePublic", &self.range_date_public);
        push_str(&mut params, "rangeDatePublished", &self.range_date_published);
        push_str(
            &mut params,
            "rangeDateFirstPublished",
            &self.range_date_first_published,
        );
        push_num(&mut params, "datePublicStartY", self.date_public_start_y);
        push_num(&mut params, "datePublicStartM", self.date_public_start_m);
        push_num(&mut params, "datePublicStartD", self.date_public_start_d);
        push_num(&mut params, "datePublicEndY", self.date_public_end_y);
        push_num(&mut params, "datePublicEndM", self.date_public_end_m);
        push_num(&mut params, "datePublicEndD", self.date_public_end_d);
        push_num(
            &mut params,
            "dateFirstPublishedStartY",
            self.date_first_published_start_y,
        );
        push_num(
            &mut params,
            "dateFirstPublishedStartM",
            self.date_first_published_start_m,
        );
        push_num(
            &mut params,
            "dateFirstPublishedStartD",
            self.date_first_published_start_d,
        );
        push_num(
            &mut params,
            "dateFirstPublishedEndY",
            self.date_first_published_end_y,
        );
        push_num(
            &mut params,
            "dateFirstPublishedEndM",
            self.date_first_published_end_m,
        );
        push_num(
            &mut params,
            "dateFirstPublishedEndD",
            self.date_first_published_end_d,
        );
        push_str(&mut params, "theme", &self.theme);
        push_str(&mut params, "type", &self.aggregation_type);
        push_str(&mut params, "cweId", &self.cwe_id);
        push_num(&mut params, "pid", self.pid);

        params
    }
}

fn push_str(params: &mut BTreeMap<&'static str, String>, key: &'static str, value: &str) {
    if !value.is_empty() {
        params.insert(key, value.to_string());
    }
}

fn push_num(params: &mut BTreeMap<&'static str, String>, key: &'static str, value: impl Into<u64>) {
    let value = value.into();
    if value != 0 {
        params.insert(key, value.to_string());
    }
}

/// A fully resolved request: the method-fixed `method` and `feed` plus the
/// caller's parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub feed: Feed,
    pub params: Parameters,
}

impl RequestDescriptor {
    /// Merges caller parameters over the defaults of `method`.
    pub fn new(method: Method, feed: Feed, params: Option<Parameters>) -> Self {
        Self {
            method,
            feed,
            params: params.unwrap_or_default(),
        }
    }

    /// Response format the caller asked for, if any.
    pub fn format(&self) -> Option<Format> {
        self.params.format
    }

    /// Query pairs sent for this request, restricted to what the method accepts.
    pub fn query_params(&self) -> BTreeMap<&'static str, String> {
        let mut params: BTreeMap<&'static str, String> = self
            .params
            .to_query_params()
            .into_iter()
            .filter(|(key, _)| self.method.accepts(key))
            .collect();
        params.insert("method", self.method.as_str().to_string());
        params.insert("feed", self.feed.as_str().to_string());
        params
    }

    /// Form-encodes the query pairs. Every value is escaped exactly once here.
    pub fn encode_query(&self) -> Result<String> {
        serde_urlencoded::to_string(self.query_params())
            .map_err(|e| MyJvnError::ConfigError(format!("Failed to encode query: {}", e)))
    }

    /// Appends the encoded query to `endpoint`.
    ///
    /// Fails with [`MyJvnError::ConfigError`] when `endpoint` is not an absolute URL.
    pub fn to_url(&self, endpoint: &str) -> Result<Url> {
        let mut url = Url::parse(endpoint)
            .map_err(|e| MyJvnError::ConfigError(format!("Invalid endpoint {}: {}", endpoint, e)))?;
        let query = self.encode_query()?;
        url.set_query(Some(&query));
        Ok(url)
    }
}
