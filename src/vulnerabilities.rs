//! JVN iPedia vulnerability records.
//!
//! `getVulnOverviewList` searches the database and answers with an RSS 1.0
//! (RDF) document of short summaries. `getVulnDetailInfo` returns full VULDEF
//! records for the ids given in `vulnId`.

use super::MyJvn;
use super::error::Result;
use super::options::{Feed, Format, Method, Parameters, RequestDescriptor};
use super::parsing::{Handling, ResponseDecoder, Status};
use super::traits::VulnerabilityOperations;
use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Response of `getVulnDetailInfo`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VulnDetailInfo {
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "@schemaLocation", alias = "@xsi:schemaLocation")]
    pub schema_location: String,
    #[serde(rename = "@lang", alias = "@xml:lang")]
    pub language: String,
    /// One record per requested id.
    #[serde(rename = "Vulinfo")]
    pub vul_infos: Vec<VulInfo>,
    #[serde(alias = "sec:handling")]
    pub handling: Handling,
    #[serde(rename = "Status", alias = "status:Status")]
    pub status: Status,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VulInfo {
    /// JVN iPedia id, e.g. `JVNDB-2020-006469`.
    #[serde(rename = "VulinfoID")]
    pub id: String,
    #[serde(rename = "VulinfoData")]
    pub data: VulInfoData,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VulInfoData {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "VulinfoDescription")]
    pub description: VulInfoDescription,
    #[serde(rename = "Affected")]
    pub affected: Affected,
    #[serde(rename = "Impact")]
    pub impact: Impact,
    #[serde(rename = "Solution")]
    pub solution: Solution,
    #[serde(rename = "Related")]
    pub related: Related,
    #[serde(rename = "History")]
    pub history: History,
    #[serde(rename = "DateFirstPublished")]
    pub date_first_published: String,
    #[serde(rename = "DateLastUpdated")]
    pub date_last_updated: String,
    #[serde(rename = "DatePublic")]
    pub date_public: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VulInfoDescription {
    #[serde(rename = "Overview")]
    pub overview: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Affected {
    #[serde(rename = "AffectedItem")]
    pub items: Vec<AffectedItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AffectedItem {
    /// Vendor name.
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ProductName")]
    pub product_name: String,
    #[serde(rename = "Cpe")]
    pub cpe: Cpe,
    #[serde(rename = "VersionNumber")]
    pub version_numbers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Cpe {
    /// CPE specification version, e.g. `2.2`.
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "$text", alias = "#text")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Impact {
    #[serde(rename = "Cvss")]
    pub cvss: Vec<Cvss>,
    #[serde(rename = "ImpactItem")]
    pub items: Vec<ImpactItem>,
}

/// CVSS assessment. Records usually carry one per CVSS version.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Cvss {
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "Severity")]
    pub severity: Severity,
    /// Base score, e.g. `9.8`.
    #[serde(rename = "Base")]
    pub base: String,
    #[serde(rename = "Vector")]
    pub vector: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Severity {
    #[serde(rename = "@type")]
    pub severity_type: String,
    #[serde(rename = "$text", alias = "#text")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImpactItem {
    #[serde(rename = "Description")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Solution {
    #[serde(rename = "SolutionItem")]
    pub items: Vec<SolutionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolutionItem {
    #[serde(rename = "Description")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Related {
    #[serde(rename = "RelatedItem")]
    pub items: Vec<RelatedItem>,
}

/// A reference to a vendor page, advisory, CVE or CWE entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RelatedItem {
    /// `vendor`, `advisory` or `cwe`.
    #[serde(rename = "@type")]
    pub related_type: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "VulinfoID")]
    pub vulinfo_id: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Title")]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct History {
    #[serde(rename = "HistoryItem")]
    pub items: Vec<HistoryItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistoryItem {
    #[serde(rename = "HistoryNo")]
    pub number: String,
    #[serde(rename = "DateTime")]
    pub date_time: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl VulnDetailInfo {
    /// Looks a record up by its JVN iPedia id.
    pub fn find(&self, id: &str) -> Option<&VulInfo> {
        self.vul_infos.iter().find(|info| info.id == id)
    }
}

impl Related {
    /// CVE ids referenced by advisories.
    pub fn cve_ids(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|item| item.vulinfo_id.starts_with("CVE-"))
            .map(|item| item.vulinfo_id.as_str())
    }
}

/// Response of `getVulnOverviewList`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VulnOverviewList {
    #[serde(rename = "@schemaLocation", alias = "@xsi:schemaLocation")]
    pub schema_location: String,
    #[serde(rename = "@lang", alias = "@xml:lang")]
    pub language: String,
    pub channel: Channel,
    #[serde(rename = "item")]
    pub items: Vec<OverviewItem>,
    #[serde(rename = "Status", alias = "status:Status")]
    pub status: Status,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Channel {
    #[serde(rename = "@about", alias = "@rdf:about")]
    pub about: String,
    pub title: String,
    pub link: String,
    pub description: String,
    #[serde(alias = "dc:date")]
    pub date: String,
    #[serde(alias = "dcterms:issued")]
    pub issued: String,
    #[serde(alias = "dcterms:modified")]
    pub modified: String,
    #[serde(alias = "sec:handling")]
    pub handling: Handling,
    pub items: ChannelItems,
}

/// Table of contents of the channel: one `rdf:li` per item, in order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChannelItems {
    #[serde(rename = "Seq", alias = "rdf:Seq")]
    pub seq: ChannelSeq,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChannelSeq {
    #[serde(rename = "li", alias = "rdf:li")]
    pub entries: Vec<ChannelSeqEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChannelSeqEntry {
    #[serde(rename = "@resource", alias = "@rdf:resource")]
    pub resource: String,
}

/// Summary of one vulnerability.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverviewItem {
    #[serde(rename = "@about", alias = "@rdf:about")]
    pub about: String,
    pub title: String,
    pub link: String,
    pub description: String,
    #[serde(alias = "dc:creator")]
    pub creator: String,
    /// JVN iPedia id.
    #[serde(alias = "sec:identifier")]
    pub identifier: String,
    #[serde(rename = "references", alias = "sec:references")]
    pub references: Vec<Reference>,
    #[serde(rename = "cpe", alias = "sec:cpe")]
    pub cpes: Vec<OverviewCpe>,
    #[serde(rename = "cvss", alias = "sec:cvss")]
    pub cvss: Vec<OverviewCvss>,
    #[serde(alias = "dc:date")]
    pub date: String,
    #[serde(alias = "dcterms:issued")]
    pub issued: String,
    #[serde(alias = "dcterms:modified")]
    pub modified: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Reference {
    /// `CVE`, `JVN`, ... Empty for CWE references.
    #[serde(rename = "@source")]
    pub source: String,
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@title")]
    pub title: String,
    /// Reference URL.
    #[serde(rename = "$text", alias = "#text")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverviewCpe {
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "@vendor")]
    pub vendor: String,
    #[serde(rename = "@product")]
    pub product: String,
    #[serde(rename = "$text", alias = "#text")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverviewCvss {
    #[serde(rename = "@score")]
    pub score: String,
    #[serde(rename = "@severity")]
    pub severity: String,
    #[serde(rename = "@vector")]
    pub vector: String,
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "@type")]
    pub cvss_type: String,
}

impl OverviewItem {
    /// The CVSS entry for a given CVSS version (`2.0`, `3.0`).
    pub fn cvss_for(&self, version: &str) -> Option<&OverviewCvss> {
        self.cvss.iter().find(|cvss| cvss.version == version)
    }
}

/// Vulnerability operations for the MyJVN API.
///
/// # Examples
///
/// ```ignore
/// use myjvn::{MyJvn, Parameters, VulnerabilityOperations};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MyJvn::new()?;
///     let cancel = CancellationToken::new();
///
///     let opts = Parameters::new().with_keyword("openssl").with_language("en");
///     let overview = client.vuln_overview_list(&cancel, Some(opts)).await?;
///
///     if let Some(item) = overview.items.first() {
///         let opts = Parameters::new().with_vuln_id(item.identifier.clone());
///         let detail = client.vuln_detail_info(&cancel, Some(opts)).await?;
///         for info in &detail.vul_infos {
///             println!("{}: {}", info.id, info.data.title);
///         }
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
impl VulnerabilityOperations for MyJvn {
    async fn vuln_detail_info(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<VulnDetailInfo> {
        let request = RequestDescriptor::new(Method::GetVulnDetailInfo, Feed::Hnd, opts);
        self.fetch(&request, cancel).await
    }

    fn vuln_detail_info_from_str(
        &self,
        content: &str,
        format: Option<Format>,
    ) -> Result<VulnDetailInfo> {
        ResponseDecoder::new(format).decode_str(content)
    }

    async fn vuln_overview_list(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<VulnOverviewList> {
        let request = RequestDescriptor::new(Method::GetVulnOverviewList, Feed::Hnd, opts);
        self.fetch(&request, cancel).await
    }

    fn vuln_overview_list_from_str(
        &self,
        content: &str,
        format: Option<Format>,
    ) -> Result<VulnOverviewList> {
        ResponseDecoder::new(format).decode_str(content)
    }
}
