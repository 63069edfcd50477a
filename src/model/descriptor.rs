//! Static entity descriptors: table, path segment, and the ordered field list for each record type.

use crate::model::FieldValues;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column name and form field name.
    pub name: &'static str,
    /// Human label used in forms, table headers, and validation messages.
    pub label: &'static str,
    pub required: bool,
}

impl FieldSpec {
    const fn optional(name: &'static str, label: &'static str) -> Self {
        FieldSpec { name, label, required: false }
    }

    const fn required(name: &'static str, label: &'static str) -> Self {
        FieldSpec { name, label, required: true }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub name: &'static str,
    pub table_name: &'static str,
    pub path_segment: &'static str,
    /// e.g. "System Information"; used in titles and notices.
    pub label: &'static str,
    pub fields: &'static [FieldSpec],
}

impl EntityDescriptor {
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// First required field that is absent or empty. Values are not trimmed.
    pub fn missing_required(&self, values: &FieldValues) -> Option<&FieldSpec> {
        self.fields.iter().filter(|f| f.required).find(|f| {
            values
                .get(f.name)
                .and_then(|v| v.as_deref())
                .map_or(true, str::is_empty)
        })
    }

    /// Keep only declared fields from a submitted form. Absent fields become `None`.
    pub fn extract(&self, form: &HashMap<String, String>) -> FieldValues {
        self.fields
            .iter()
            .map(|f| (f.name.to_string(), form.get(f.name).cloned()))
            .collect()
    }
}

pub static COMPUTER_SYSTEM: EntityDescriptor = EntityDescriptor {
    name: "ComputerSystem",
    table_name: "computer_system",
    path_segment: "system_info",
    label: "System Information",
    fields: &[
        FieldSpec::optional("floor", "Floor"),
        FieldSpec::optional("department", "Department"),
        FieldSpec::required("host_name", "Host Name"),
        FieldSpec::optional("employee_name", "Employee Name"),
        FieldSpec::optional("ip_address", "IP Address"),
        FieldSpec::optional("operating_system", "Operating System"),
        FieldSpec::optional("product_model", "Product Model"),
        FieldSpec::optional("pc_type", "PC Type"),
        FieldSpec::optional("processor", "Processor"),
        FieldSpec::optional("price", "Price"),
        FieldSpec::optional("ram_size", "RAM Size"),
        FieldSpec::optional("hard_disk_type", "Hard Disk Type"),
        FieldSpec::optional("hard_disk_size", "Hard Disk Size"),
        FieldSpec::optional("hard_disk_sn", "Hard Disk S/N"),
        FieldSpec::optional("ssd_disk_type", "SSD Disk Type"),
        FieldSpec::optional("ssd_disk_size", "SSD Disk Size"),
        FieldSpec::optional("ssd_hard_disk_sn", "SSD Hard Disk S/N"),
        FieldSpec::optional("adapter_mac_address", "Adapter MAC Address"),
        FieldSpec::optional("external_lancard", "External LAN Card"),
        FieldSpec::optional("display_make_model", "Display Make/Model"),
        FieldSpec::optional("display_serial_number", "Display Serial Number"),
    ],
};

pub static ROUTER: EntityDescriptor = EntityDescriptor {
    name: "Router",
    table_name: "router",
    path_segment: "router_info",
    label: "Router Information",
    fields: &[
        FieldSpec::optional("department", "Department"),
        FieldSpec::optional("router_name", "Router Name"),
        FieldSpec::optional("router_model_name", "Router Model Name"),
        FieldSpec::optional("serial_no", "Serial No"),
        FieldSpec::optional("router_connected", "Router Connected"),
        FieldSpec::optional("price_list", "Price List"),
    ],
};
