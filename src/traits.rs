//! Trait definitions organizing MyJVN methods by feature area.
//!
//! The API exposes six methods in four groups: security alerts, the
//! vendor/product catalog, statistics, and vulnerability records. Each group has
//! a trait that the `MyJvn` client implements when the matching feature is
//! enabled.
//!
//! Network methods take a `CancellationToken` and optional [`Parameters`]; the
//! `*_from_str` companions decode a body obtained some other way (a fixture, a
//! cache, a proxy) with the same decoder the network path uses.

#[cfg(feature = "alerts")]
use super::alerts::AlertList;
#[cfg(feature = "catalog")]
use super::catalog::{ProductList, VendorList};
use super::error::Result;
#[cfg(feature = "statistics")]
use super::options::Feed;
use super::options::{Format, Parameters};
#[cfg(feature = "statistics")]
use super::statistics::Statistics;
#[cfg(feature = "vulnerabilities")]
use super::vulnerabilities::{VulnDetailInfo, VulnOverviewList};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Operations for the JVN security alert feed (`getAlertList`).
#[cfg(feature = "alerts")]
#[async_trait]
pub trait AlertOperations {
    /// Retrieves the list of security alerts.
    async fn alert_list(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<AlertList>;
    /// Decodes an alert list body.
    fn alert_list_from_str(&self, content: &str, format: Option<Format>) -> Result<AlertList>;
}

/// Operations for the vendor and product catalog.
///
/// Vendors and products are identified by the numeric ids JVN assigns (`vid`,
/// `pid`) and by CPE names. Both lists can be narrowed with `cpeName`,
/// `vendorId` or `keyword`; the product list additionally with `productId`.
#[cfg(feature = "catalog")]
#[async_trait]
pub trait CatalogOperations {
    /// Retrieves the vendor list (`getVendorList`).
    async fn vendor_list(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<VendorList>;
    /// Decodes a vendor list body.
    fn vendor_list_from_str(&self, content: &str, format: Option<Format>) -> Result<VendorList>;
    /// Retrieves the product list (`getProductList`).
    async fn product_list(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<ProductList>;
    /// Decodes a product list body.
    fn product_list_from_str(&self, content: &str, format: Option<Format>)
    -> Result<ProductList>;
}

/// Operations for aggregated vulnerability statistics (`getStatistics`).
///
/// Statistics exist for two feeds. `hnd` aggregates the JVN iPedia database by
/// theme (`sumJvnDb`, `sumCvss`, `sumCwe`); `itm` aggregates countermeasure items.
#[cfg(feature = "statistics")]
#[async_trait]
pub trait StatisticsOperations {
    /// Retrieves statistics for an explicit feed.
    async fn statistics(
        &self,
        cancel: &CancellationToken,
        feed: Feed,
        opts: Option<Parameters>,
    ) -> Result<Statistics>;
    /// Retrieves statistics from the `hnd` feed.
    async fn statistics_hnd(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<Statistics>;
    /// Retrieves statistics from the `itm` feed.
    async fn statistics_itm(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<Statistics>;
    /// Decodes a statistics body.
    fn statistics_from_str(&self, content: &str, format: Option<Format>) -> Result<Statistics>;
}

/// Operations for JVN iPedia vulnerability records.
#[cfg(feature = "vulnerabilities")]
#[async_trait]
pub trait VulnerabilityOperations {
    /// Retrieves full records for one or more vulnerabilities (`getVulnDetailInfo`).
    ///
    /// `vulnId` accepts a single `JVNDB-YYYY-NNNNNN` identifier or several joined with `+`.
    async fn vuln_detail_info(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<VulnDetailInfo>;
    /// Decodes a vulnerability detail body.
    fn vuln_detail_info_from_str(
        &self,
        content: &str,
        format: Option<Format>,
    ) -> Result<VulnDetailInfo>;
    /// Searches vulnerability summaries (`getVulnOverviewList`).
    async fn vuln_overview_list(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<VulnOverviewList>;
    /// Decodes a vulnerability overview body.
    fn vuln_overview_list_from_str(
        &self,
        content: &str,
        format: Option<Format>,
    ) -> Result<VulnOverviewList>;
}
