//! USPS request and response DTOs.
//!
//! Requests serialize to the field names of the USPS Web Tools `RateV4` and
//! `SDCGetLocations` APIs. Responses arrive in the array shape produced by
//! the carrier gateway, where XML attributes live under `@attributes` and a
//! repeated element collapses to a bare object when it occurs once.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Service scope of a rate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServiceClass {
    /// Price every service the carrier offers for the package.
    #[serde(rename = "ALL")]
    All,
}

/// Packaging container type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Container {
    #[serde(rename = "VARIABLE")]
    Variable,
}

/// Package size category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PackageSize {
    #[serde(rename = "REGULAR")]
    Regular,
}

/// A USPS-side address.
///
/// The rate endpoint prices by ZIP only, so these are carried on the
/// package for completeness but never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarrierAddress {
    pub firm_name: Option<String>,
    pub address: String,
    /// Apartment or suite, from address line 2.
    pub apt: String,
    pub city: String,
    pub state: String,
    pub zip5: String,
    pub zip4: Option<String>,
}

/// A single package in a `RateV4` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatePackage {
    pub service: ServiceClass,

    pub zip_origination: String,

    pub zip_destination: String,

    /// Whole pounds. Omitted when the shipment has no weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pounds: Option<u32>,

    /// Ounces beyond the whole pounds. Omitted when the shipment has no weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ounces: Option<Decimal>,

    pub container: Container,

    pub size: PackageSize,

    pub machinable: bool,

    /// `YYYY-MM-DD`.
    pub ship_date: String,

    #[serde(skip)]
    pub origin: CarrierAddress,

    #[serde(skip)]
    pub destination: CarrierAddress,
}

/// Route type for delivery estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum RouteType {
    /// Ground / domestic parcel mail class.
    Ground,
}

impl From<RouteType> for u8 {
    fn from(route: RouteType) -> u8 {
        match route {
            RouteType::Ground => 3,
        }
    }
}

/// Origin and destination for a delivery-estimate lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeliveryRoute {
    pub mail_class: RouteType,
    pub origin_zip: String,
    pub destination_zip: String,
}

impl DeliveryRoute {
    pub fn new(
        mail_class: RouteType,
        origin_zip: impl Into<String>,
        destination_zip: impl Into<String>,
    ) -> Self {
        Self {
            mail_class,
            origin_zip: origin_zip.into(),
            destination_zip: destination_zip.into(),
        }
    }
}

/// Raw rate response exactly as the carrier returned it.
///
/// Only the postage list has a known shape; everything else is opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRateResponse(pub serde_json::Value);

impl RawRateResponse {
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for RawRateResponse {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Either a list or a lone element that the gateway unwrapped.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Top-level rate response.
#[derive(Debug, Clone, Deserialize)]
pub struct RateV4Envelope {
    #[serde(rename = "RateV4Response")]
    pub rate_v4_response: Option<RateV4Response>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateV4Response {
    pub package: Option<PackageResponse>,
}

/// Per-package section of the rate response.
///
/// Postage entries stay raw here and are read one at a time, so an entry
/// of unexpected shape cannot reject its neighbours.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageResponse {
    pub postage: Option<OneOrMany<Value>>,

    /// Set instead of `postage` when the carrier rejects the package
    /// (e.g., an unknown destination ZIP).
    pub error: Option<CarrierErrorBody>,
}

/// One service/price pairing.
///
/// Every field is optional so that a single odd entry does not spoil the
/// whole response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Postage {
    #[serde(rename = "@attributes")]
    pub attributes: Option<PostageAttributes>,

    pub mail_service: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub rate: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostageAttributes {
    #[serde(rename = "CLASSID", default, deserialize_with = "string_or_number")]
    pub class_id: Option<String>,
}

/// Gateways differ on whether numeric values arrive quoted.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }),
    )
}

/// Carrier error element (`<Error>`), top level or per package.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CarrierErrorBody {
    pub number: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package() -> RatePackage {
        RatePackage {
            service: ServiceClass::All,
            zip_origination: "90210".into(),
            zip_destination: "10001".into(),
            pounds: Some(2),
            ounces: Some(Decimal::ZERO),
            container: Container::Variable,
            size: PackageSize::Regular,
            machinable: true,
            ship_date: "2024-03-15".into(),
            origin: CarrierAddress::default(),
            destination: CarrierAddress::default(),
        }
    }

    #[test]
    fn serialize_package() {
        let json = serde_json::to_value(package()).unwrap();

        assert_eq!(json["Service"], "ALL");
        assert_eq!(json["ZipOrigination"], "90210");
        assert_eq!(json["ZipDestination"], "10001");
        assert_eq!(json["Pounds"], 2);
        assert_eq!(json["Ounces"], "0");
        assert_eq!(json["Container"], "VARIABLE");
        assert_eq!(json["Size"], "REGULAR");
        assert_eq!(json["Machinable"], true);
        assert_eq!(json["ShipDate"], "2024-03-15");
        assert!(json.get("Origin").is_none());
    }

    #[test]
    fn weightless_package_omits_weight() {
        let mut package = package();
        package.pounds = None;
        package.ounces = None;

        let json = serde_json::to_value(package).unwrap();

        assert!(json.get("Pounds").is_none());
        assert!(json.get("Ounces").is_none());
    }

    #[test]
    fn serialize_route() {
        let route = DeliveryRoute::new(RouteType::Ground, "90210", "10001");
        let json = serde_json::to_value(route).unwrap();

        assert_eq!(json["MailClass"], 3);
        assert_eq!(json["OriginZip"], "90210");
        assert_eq!(json["DestinationZip"], "10001");
    }

    #[test]
    fn deserialize_postage_list() {
        let json = r#"{
            "RateV4Response": {
                "Package": {
                    "@attributes": {"ID": "0"},
                    "ZipOrigination": "90210",
                    "Postage": [
                        {"@attributes": {"CLASSID": "1"}, "MailService": "Priority Mail", "Rate": "24.70"},
                        {"@attributes": {"CLASSID": "6"}, "MailService": "Media Mail", "Rate": "6.50"}
                    ]
                }
            }
        }"#;

        let envelope: RateV4Envelope = serde_json::from_str(json).unwrap();
        let postage = envelope
            .rate_v4_response
            .unwrap()
            .package
            .unwrap()
            .postage
            .unwrap()
            .into_vec();

        assert_eq!(postage.len(), 2);
        assert_eq!(postage[0]["@attributes"]["CLASSID"], "1");
        assert_eq!(postage[1]["MailService"], "Media Mail");
    }

    #[test]
    fn deserialize_postage_entry() {
        let entry: Postage = serde_json::from_str(
            r#"{"@attributes": {"CLASSID": "6"}, "MailService": "Media Mail", "Rate": "6.50"}"#,
        )
        .unwrap();

        assert_eq!(entry.attributes.unwrap().class_id.as_deref(), Some("6"));
        assert_eq!(entry.mail_service.as_deref(), Some("Media Mail"));
        assert_eq!(entry.rate.as_deref(), Some("6.50"));
    }

    #[test]
    fn numeric_rate_and_class_id_accepted() {
        let entry: Postage = serde_json::from_str(
            r#"{"@attributes": {"CLASSID": 1}, "MailService": "Priority Mail", "Rate": 24.7}"#,
        )
        .unwrap();

        assert_eq!(entry.attributes.unwrap().class_id.as_deref(), Some("1"));
        assert_eq!(entry.rate.as_deref(), Some("24.7"));
    }

    #[test]
    fn absent_rate_and_class_id_are_none() {
        let entry: Postage =
            serde_json::from_str(r#"{"@attributes": {}, "MailService": "Media Mail"}"#).unwrap();

        assert_eq!(entry.attributes.unwrap().class_id, None);
        assert_eq!(entry.rate, None);
    }

    #[test]
    fn wrong_typed_rate_rejected() {
        let result: Result<Postage, _> =
            serde_json::from_str(r#"{"MailService": "Media Mail", "Rate": [6.5]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_single_postage() {
        let json = r#"{
            "RateV4Response": {
                "Package": {
                    "Postage": {"@attributes": {"CLASSID": "3"}, "MailService": "Priority Mail Express", "Rate": "30.45"}
                }
            }
        }"#;

        let envelope: RateV4Envelope = serde_json::from_str(json).unwrap();
        let postage = envelope
            .rate_v4_response
            .unwrap()
            .package
            .unwrap()
            .postage
            .unwrap()
            .into_vec();

        assert_eq!(postage.len(), 1);
        assert_eq!(postage[0]["Rate"], "30.45");
    }

    #[test]
    fn deserialize_package_error() {
        let json = r#"{
            "RateV4Response": {
                "Package": {
                    "Error": {"Number": "-2147219498", "Description": "Please enter a valid ZIP Code for the recipient."}
                }
            }
        }"#;

        let envelope: RateV4Envelope = serde_json::from_str(json).unwrap();
        let package = envelope.rate_v4_response.unwrap().package.unwrap();

        assert!(package.postage.is_none());
        assert_eq!(
            package.error.unwrap().number.as_deref(),
            Some("-2147219498")
        );
    }
}
