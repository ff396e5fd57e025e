//! Rescue organization records

use serde::{Deserialize, Serialize};

use super::lenient;

/// Fields fetched for an organization profile
pub const ORGANIZATION_FIELDS: &[&str] = &[
    "orgID",
    "orgName",
    "orgType",
    "orgAbout",
    "orgServices",
    "orgAdoptionProcess",
    "orgAddress",
    "orgCity",
    "orgState",
    "orgPostalcode",
    "orgCountry",
    "orgPhone",
    "orgEmail",
    "orgWebsiteUrl",
    "orgFacebookUrl",
];

/// Upstream id field for organizations
pub const ORGANIZATION_ID_FIELD: &str = "orgID";

/// A rescue organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Record id
    #[serde(rename = "orgID", deserialize_with = "lenient::id")]
    pub id: String,
    /// Name
    #[serde(rename = "orgName", default)]
    pub name: Option<String>,
    /// Shelter, rescue, ...
    #[serde(rename = "orgType", default)]
    pub org_type: Option<String>,
    /// About text
    #[serde(rename = "orgAbout", default)]
    pub about: Option<String>,
    /// Services offered
    #[serde(rename = "orgServices", default)]
    pub services: Option<String>,
    /// Adoption process description
    #[serde(rename = "orgAdoptionProcess", default)]
    pub adoption_process: Option<String>,
    /// Street address
    #[serde(rename = "orgAddress", default)]
    pub address: Option<String>,
    /// City
    #[serde(rename = "orgCity", default)]
    pub city: Option<String>,
    /// State or province
    #[serde(rename = "orgState", default)]
    pub state: Option<String>,
    /// Postal code
    #[serde(rename = "orgPostalcode", default, deserialize_with = "lenient::optional_string")]
    pub postal_code: Option<String>,
    /// Country
    #[serde(rename = "orgCountry", default)]
    pub country: Option<String>,
    /// Phone
    #[serde(rename = "orgPhone", default, deserialize_with = "lenient::optional_string")]
    pub phone: Option<String>,
    /// Email
    #[serde(rename = "orgEmail", default)]
    pub email: Option<String>,
    /// Website
    #[serde(rename = "orgWebsiteUrl", default)]
    pub website_url: Option<String>,
    /// Facebook page
    #[serde(rename = "orgFacebookUrl", default)]
    pub facebook_url: Option<String>,
}
