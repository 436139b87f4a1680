// IP addresses assigned to equipment. At most one per equipment is
// primary; the server enforces that when set-primary is called.

use chrono::NaiveDateTime;
use serde::Serialize;

use netequip_api::{Id, IpAddress, IpAddressPayload, paths};

use crate::config::DisplayOptions;
use crate::error::CoreError;
use crate::form::{self, form_fields};
use crate::page::{EntityPage, Outcome};
use crate::schema::{EntitySchema, Facet, FacetOption, Reference, ReferenceData, Summary, UniqueProbe};
use crate::validate::{self, ValidationError};

pub struct IpAddressSchema;

pub type IpAddressPage = EntityPage<IpAddressSchema>;

form_fields! {
    pub struct IpAddressForm {
        equipment_id => "equipmentId",
        ip_address => "ipAddress",
        subnet_mask => "subnetMask",
        gateway => "gateway",
        network_type => "networkType",
        is_primary => "isPrimary",
        assigned_date => "assignedDate",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpAddressFilter {
    pub equipment_id: Option<Id>,
    pub network_type: Option<String>,
    pub primary: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IpAddressStats {
    pub total: usize,
    pub primary: usize,
}

impl Summary for IpAddressStats {
    fn entries(&self, _display: &DisplayOptions) -> Vec<(&'static str, String)> {
        vec![
            ("Total", self.total.to_string()),
            ("Primary", self.primary.to_string()),
        ]
    }
}

impl EntitySchema for IpAddressSchema {
    type Record = IpAddress;
    type Form = IpAddressForm;
    type Payload = IpAddressPayload;
    type Filter = IpAddressFilter;
    type Stats = IpAddressStats;

    const PATH: &'static str = paths::IP_ADDRESSES;
    const TITLE: &'static str = "IP address";
    const REFERENCES: &'static [Reference] = &[Reference::Equipment];

    fn id(record: &IpAddress) -> Id {
        record.id
    }

    fn label(record: &IpAddress) -> String {
        record.ip_address.clone()
    }

    fn search_fields(record: &IpAddress) -> Vec<&str> {
        [
            Some(record.ip_address.as_str()),
            record.equipment_name.as_deref(),
            record.gateway.as_deref(),
            record.subnet_mask.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn matches(filter: &IpAddressFilter, record: &IpAddress, _now: NaiveDateTime) -> bool {
        filter
            .equipment_id
            .is_none_or(|id| record.equipment_id == Some(id))
            && filter
                .network_type
                .as_ref()
                .is_none_or(|t| record.network_type.as_deref() == Some(t.as_str()))
            && filter.primary.is_none_or(|p| record.primary() == p)
    }

    fn stats(records: &[IpAddress], _now: NaiveDateTime) -> IpAddressStats {
        IpAddressStats {
            total: records.len(),
            primary: records.iter().filter(|ip| ip.primary()).count(),
        }
    }

    fn facets(records: &[IpAddress], references: &ReferenceData) -> Vec<Facet> {
        vec![
            Facet::new("equipmentId", references.equipment_options()),
            Facet::distinct(
                "networkType",
                records.iter().map(|ip| ip.network_type.as_deref()),
            ),
            Facet::new(
                "primary",
                vec![
                    FacetOption::new("true", "Primary"),
                    FacetOption::new("false", "Secondary"),
                ],
            ),
        ]
    }

    fn new_form(now: NaiveDateTime) -> IpAddressForm {
        IpAddressForm {
            assigned_date: form::raw_date(now.date()),
            ..IpAddressForm::default()
        }
    }

    fn form_from_record(record: &IpAddress) -> IpAddressForm {
        IpAddressForm {
            equipment_id: form::raw(record.equipment_id),
            ip_address: record.ip_address.clone(),
            subnet_mask: form::raw(record.subnet_mask.as_deref()),
            gateway: form::raw(record.gateway.as_deref()),
            network_type: form::raw(record.network_type.as_deref()),
            is_primary: record.primary().to_string(),
            assigned_date: record.assigned_date.map(form::raw_date).unwrap_or_default(),
        }
    }

    fn build_payload(form: &IpAddressForm) -> Result<IpAddressPayload, ValidationError> {
        let equipment_id = form::require(
            "equipmentId",
            form::parse_id("equipmentId", &form.equipment_id)?,
        )?;

        let ip_address = form::required("ipAddress", &form.ip_address)?;
        validate::check_pattern("ipAddress", Some(&ip_address), validate::is_ipv4, "IPv4 address")?;

        let subnet_mask = form::text(&form.subnet_mask);
        validate::check_max_len("subnetMask", subnet_mask.as_deref(), 45)?;
        let gateway = form::text(&form.gateway);
        validate::check_max_len("gateway", gateway.as_deref(), 45)?;
        let network_type = form::text(&form.network_type);
        validate::check_max_len("networkType", network_type.as_deref(), 20)?;

        Ok(IpAddressPayload {
            equipment_id,
            ip_address,
            subnet_mask,
            gateway,
            network_type,
            is_primary: form::parse_flag("isPrimary", &form.is_primary)?,
            assigned_date: form::parse_date("assignedDate", &form.assigned_date)?,
        })
    }

    fn uniqueness_probe(payload: &IpAddressPayload) -> Option<UniqueProbe> {
        Some(UniqueProbe::IpAddress(payload.ip_address.clone()))
    }

    fn delete_prompt(record: &IpAddress) -> String {
        format!("Delete IP address \"{}\"?", record.ip_address)
    }
}

impl EntityPage<IpAddressSchema> {
    /// Make a loaded address the primary one of its equipment.
    pub async fn set_primary(&mut self, id: Id) -> Result<Outcome, CoreError> {
        if self.find(id).is_none() {
            return Ok(Outcome::NotInCache);
        }
        let result = self.client().set_primary_ip(id).await;
        self.finish_action(result, "IP address set as primary").await?;
        Ok(Outcome::Done)
    }

    pub async fn unset_primary(&mut self, id: Id) -> Result<Outcome, CoreError> {
        if self.find(id).is_none() {
            return Ok(Outcome::NotInCache);
        }
        let result = self.client().unset_primary_ip(id).await;
        self.finish_action(result, "IP address is no longer primary")
            .await?;
        Ok(Outcome::Done)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::form::FormFields;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(16, 45, 0)
            .unwrap()
    }

    #[test]
    fn new_form_assigns_today() {
        assert_eq!(IpAddressSchema::new_form(now()).assigned_date, "2024-03-14");
    }

    #[test]
    fn rejects_out_of_range_octets() {
        let mut form = IpAddressSchema::new_form(now());
        form.set("equipmentId", "1").unwrap();
        form.set("ipAddress", "999.1.1.1").unwrap();
        let err = IpAddressSchema::build_payload(&form).unwrap_err();
        assert_eq!(err.field, "ipAddress");
        assert_eq!(err.reason, "\"999.1.1.1\" is not a valid IPv4 address");
    }

    #[test]
    fn builds_payload() {
        let mut form = IpAddressSchema::new_form(now());
        form.set("equipmentId", "3").unwrap();
        form.set("ipAddress", " 10.0.0.5 ").unwrap();
        form.set("isPrimary", "true").unwrap();
        form.set("networkType", "").unwrap();

        let payload = IpAddressSchema::build_payload(&form).unwrap();
        assert_eq!(payload.ip_address, "10.0.0.5");
        assert!(payload.is_primary);
        assert_eq!(payload.network_type, None);
        assert_eq!(payload.assigned_date, NaiveDate::from_ymd_opt(2024, 3, 14));
    }

    #[test]
    fn mask_and_gateway_keep_free_form_values() {
        let record = IpAddress {
            id: 4,
            equipment_id: Some(1),
            ip_address: "10.0.0.5".into(),
            subnet_mask: Some("/24".into()),
            gateway: Some("fe80::1".into()),
            ..IpAddress::default()
        };
        let form = IpAddressSchema::form_from_record(&record);
        let payload = IpAddressSchema::build_payload(&form).unwrap();
        assert_eq!(payload.subnet_mask.as_deref(), Some("/24"));
        assert_eq!(payload.gateway.as_deref(), Some("fe80::1"));
    }

    #[test]
    fn long_network_type_is_rejected() {
        let mut form = IpAddressSchema::new_form(now());
        form.set("equipmentId", "1").unwrap();
        form.set("ipAddress", "10.0.0.5").unwrap();
        form.set("networkType", "management-out-of-band").unwrap();
        assert_eq!(
            IpAddressSchema::build_payload(&form).unwrap_err().field,
            "networkType"
        );
    }

    #[test]
    fn primary_filter_and_stats() {
        let records = vec![
            IpAddress {
                id: 1,
                ip_address: "10.0.0.1".into(),
                is_primary: Some(true),
                ..IpAddress::default()
            },
            IpAddress {
                id: 2,
                ip_address: "10.0.0.2".into(),
                ..IpAddress::default()
            },
        ];
        assert_eq!(IpAddressSchema::stats(&records, now()).primary, 1);

        let secondary = IpAddressFilter {
            primary: Some(false),
            ..IpAddressFilter::default()
        };
        let hits: Vec<_> = records
            .iter()
            .filter(|ip| IpAddressSchema::matches(&secondary, ip, now()))
            .map(|ip| ip.id)
            .collect();
        assert_eq!(hits, vec![2]);
    }
}
