//! Built-in lead schema and lists of values.
//!
//! `lead_defaults()` is passed to `SchemaContext::open().with_defaults()` to
//! seed a schema directory on first open. Existing files are never
//! overwritten, so deployments can customise any definition.

use crate::context::SchemaDefaults;
use crate::lov::LovOption;
use crate::types::{DataType, FieldDef};

fn options(pairs: &[(&str, &str)]) -> Vec<LovOption> {
    pairs
        .iter()
        .map(|(value, label)| LovOption::new(*value, *label))
        .collect()
}

/// The full built-in lead schema.
pub fn lead_defaults() -> SchemaDefaults {
    SchemaDefaults::new()
        // =====================================================================
        // Identification
        // =====================================================================
        .field(
            FieldDef::new("lead_id", "Lead ID", DataType::Text)
                .order(0)
                .read_only()
                .pattern(r"^LD-\d{4,}$", Some("Lead ID must look like LD-0001")),
        )
        // =====================================================================
        // Company
        // =====================================================================
        .field(
            FieldDef::new("company_name", "Company Name", DataType::Text)
                .order(1)
                .required()
                .max_length(120),
        )
        .field(
            FieldDef::new("country", "Country", DataType::Dropdown)
                .order(2)
                .required()
                .lov("COUNTRY_LOV"),
        )
        .field(
            FieldDef::new("city", "City", DataType::Text)
                .order(3)
                .max_length(80),
        )
        // =====================================================================
        // Contact
        // =====================================================================
        .field(
            FieldDef::new("primary_contact_name", "Primary Contact", DataType::Text)
                .order(4)
                .required()
                .max_length(120),
        )
        .field(
            FieldDef::new("email", "Email", DataType::Email)
                .order(5)
                .required()
                .max_length(254),
        )
        .field(
            FieldDef::new("phone", "Phone", DataType::Phone)
                .order(6)
                .max_length(30)
                .help("Include the country code"),
        )
        // =====================================================================
        // Lead management
        // =====================================================================
        .field(
            FieldDef::new("lead_status", "Lead Status", DataType::Dropdown)
                .order(7)
                .required()
                .lov("LEAD_STATUS_LOV")
                .default_value("NEW"),
        )
        .field(
            FieldDef::new("assigned_sales_rep", "Assigned Sales Rep", DataType::User)
                .order(8)
                .lov("SALES_REP_LOV"),
        )
        .field(
            FieldDef::new("lead_source", "Lead Source", DataType::Dropdown)
                .order(9)
                .lov("LEAD_SOURCE_LOV"),
        )
        // =====================================================================
        // Services & volume
        // =====================================================================
        .field(
            FieldDef::new(
                "service_line_interested",
                "Service Lines Interested",
                DataType::MultiSelect,
            )
            .order(10)
            .required()
            .lov("SERVICE_LINE_INTERESTED_LOV"),
        )
        .field(
            FieldDef::new(
                "estimated_monthly_volume",
                "Estimated Monthly Volume",
                DataType::Number,
            )
            .order(11)
            .min("0")
            .max("1000000")
            .scale(2)
            .help("Shipments per month"),
        )
        .field(
            FieldDef::new("expected_start_date", "Expected Start Date", DataType::Date)
                .order(12),
        )
        .field(
            FieldDef::new("notes", "Notes", DataType::TextArea)
                .order(13)
                .max_length(2000),
        )
        // =====================================================================
        // Lists of values
        // =====================================================================
        .lov(
            "LEAD_SOURCE_LOV",
            options(&[
                ("WEBSITE", "Website"),
                ("REFERRAL", "Referral"),
                ("AGENT", "Agent"),
                ("COLD_CALL", "Cold Call"),
            ]),
        )
        .lov(
            "LEAD_STATUS_LOV",
            options(&[
                ("NEW", "New"),
                ("CONTACTED", "Contacted"),
                ("QUALIFIED", "Qualified"),
                ("DISQUALIFIED", "Disqualified"),
            ]),
        )
        .lov(
            "COUNTRY_LOV",
            options(&[
                ("US", "United States"),
                ("CA", "Canada"),
                ("UK", "United Kingdom"),
                ("AU", "Australia"),
                ("SG", "Singapore"),
                ("HK", "Hong Kong"),
            ]),
        )
        .lov(
            "SERVICE_LINE_INTERESTED_LOV",
            options(&[
                ("FREIGHT_FORWARDING", "Freight Forwarding"),
                ("TRANSPORTATION", "Transportation"),
                ("3PL", "3PL"),
                ("CUSTOMS_BROKERAGE", "Customs Brokerage"),
            ]),
        )
        .lov("SALES_REP_LOV", Vec::new())
}
