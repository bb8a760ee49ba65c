// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Route53 integration: wire types, the API collaborator, the typed record
//! model, and the generic CRUD engine.

pub mod client;
pub mod crud;
pub mod records;
pub mod types;

pub use client::{Route53Api, Route53Client};
pub use crud::{ACrud, CnameCrud, RecordCrud, TxtCrud};
