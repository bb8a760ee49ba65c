// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CRD YAML Generator
//!
//! Generates Kubernetes CRD YAML files from Rust types defined in src/crd.rs.
//! This ensures the YAML files in deploy/crds/ are always in sync with the Rust code.
//!
//! Usage:
//!   cargo run --bin crdgen
//!
//! Generated files will be written to deploy/crds/ with proper headers.

use kube::CustomResourceExt;
use route53_operator::crd::{ARecord, CNAMERecord, TXTRecord};
use serde_json::Value;
use std::fs;
use std::path::Path;

const COPYRIGHT_HEADER: &str = "# Copyright (c) 2025 Erick Bourgeois, firestoned
# SPDX-License-Identifier: MIT
#
# This file is AUTO-GENERATED from src/crd.rs
# DO NOT EDIT MANUALLY - Run `cargo run --bin crdgen` to regenerate
#
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("deploy/crds");

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    println!("Generating CRD YAML files from src/crd.rs...");

    generate_crd::<ARecord>("arecords.crd.yaml", output_dir)?;
    generate_crd::<CNAMERecord>("cnamerecords.crd.yaml", output_dir)?;
    generate_crd::<TXTRecord>("txtrecords.crd.yaml", output_dir)?;

    println!("✓ Successfully generated CRD YAML files in deploy/crds/");
    println!("\nNext steps:");
    println!("  1. Review the generated files");
    println!("  2. Deploy with: kubectl apply -f deploy/crds/");

    Ok(())
}

fn generate_crd<T>(filename: &str, output_dir: &Path) -> Result<(), Box<dyn std::error::Error>>
where
    T: CustomResourceExt,
{
    let crd = T::crd();

    // Convert CRD to JSON for manipulation
    let mut crd_json: Value = serde_json::to_value(&crd)?;

    // Let the status schema accept fields future versions may add: the
    // API server would otherwise prune anything the schema doesn't name
    if let Some(versions) = crd_json["spec"]["versions"].as_array_mut() {
        for version in versions {
            let status_schema =
                &mut version["schema"]["openAPIV3Schema"]["properties"]["status"];
            if !status_schema.is_null() {
                status_schema["x-kubernetes-preserve-unknown-fields"] = Value::Bool(true);
            }
        }
    }

    // Convert back to YAML
    let yaml = serde_yaml::to_string(&crd_json)?;

    // Add copyright header
    let content = format!("{COPYRIGHT_HEADER}{yaml}");

    let output_path = output_dir.join(filename);
    fs::write(&output_path, content)?;

    println!("  ✓ Generated {filename}");

    Ok(())
}
