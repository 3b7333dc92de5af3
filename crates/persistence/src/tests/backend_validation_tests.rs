// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend validation tests for multi-database support.
//!
//! These tests validate that the persistence layer works correctly on
//! MariaDB/MySQL in addition to the default `SQLite` backend. They focus
//! on infrastructure and schema compatibility, not business logic; the
//! standard suite against `SQLite` covers the latter.
//!
//! ## Test Execution
//!
//! - `SQLite` tests run normally via `cargo test`
//! - MariaDB tests are marked `#[ignore]` and run only via
//!   `cargo xtask test-mariadb`, which provisions the container and sets
//!   `DATABASE_URL` and `DOCK_VISIT_TEST_BACKEND`
//!
//! Tests fail fast if required infrastructure is missing.

use std::env;

use diesel::MysqlConnection;
use diesel::prelude::*;

use crate::backend::mysql;
use crate::{AdmissionOutcome, Persistence};

/// Helper to get the `MariaDB` connection URL from environment.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set, indicating missing infrastructure.
fn get_mariadb_url() -> String {
    env::var("DATABASE_URL")
        .expect("DATABASE_URL not set - MariaDB tests must be run via `cargo xtask test-mariadb`")
}

/// Helper to verify we're running in the `MariaDB` test environment.
///
/// # Panics
///
/// Panics if `DOCK_VISIT_TEST_BACKEND` is not set to `mariadb`.
fn verify_mariadb_test_environment() {
    let backend = env::var("DOCK_VISIT_TEST_BACKEND").expect(
        "DOCK_VISIT_TEST_BACKEND not set - MariaDB tests must be run via `cargo xtask test-mariadb`",
    );
    assert_eq!(
        backend, "mariadb",
        "DOCK_VISIT_TEST_BACKEND must be 'mariadb'"
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_connection() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = MysqlConnection::establish(&url);
    assert!(
        result.is_ok(),
        "Failed to connect to MariaDB: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_migrations_apply_cleanly() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = mysql::initialize_database(&url);
    assert!(
        result.is_ok(),
        "Migrations failed on MariaDB: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_admission_respects_the_capacity_window() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let mut persistence =
        Persistence::new_with_mysql(&url).expect("Failed to initialize MariaDB persistence");

    let operator_id = persistence
        .create_operator("mariadb-op", "MariaDB Operator", "hunter2hunter2", "Operator")
        .expect("Failed to create operator");
    let (tenant_id, _) = persistence
        .create_tenant_with_login(
            "MariaDB Tenant",
            "MariaDB Tenant S.A.",
            "20900800700",
            "ruc20900800700",
            "temp1234",
        )
        .expect("Failed to create tenant");

    let window = ("2031-03-01T09:00:00Z", "2031-03-01T10:00:00Z");
    for minute in 0..8 {
        let record = super::helpers::visit_record(
            &format!("2031-03-01T09:0{minute}:00Z"),
            tenant_id,
            operator_id,
        );
        let outcome = persistence
            .admit_visit(&record, window.0, window.1, 8)
            .expect("Admission failed");
        assert!(matches!(outcome, AdmissionOutcome::Created(_)));
    }

    let ninth = super::helpers::visit_record("2031-03-01T09:30:00Z", tenant_id, operator_id);
    let outcome = persistence
        .admit_visit(&ninth, window.0, window.1, 8)
        .expect("Admission query failed");
    assert_eq!(outcome, AdmissionOutcome::SlotFull { existing: 8 });
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_rejects_duplicate_tenant_tax_id_atomically() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let mut persistence =
        Persistence::new_with_mysql(&url).expect("Failed to initialize MariaDB persistence");

    persistence
        .create_tenant_with_login(
            "Duplicated",
            "Duplicated S.A.",
            "20111222333",
            "ruc20111222333",
            "temp1234",
        )
        .expect("First creation should succeed");

    let result = persistence.create_tenant_with_login(
        "Duplicated Again",
        "Duplicated Again S.A.",
        "20111222333",
        "ruc20111222333b",
        "temp1234",
    );
    assert!(result.is_err(), "Duplicate tax id must be rejected");

    // The provisioned login from the failed transaction must not remain
    assert!(
        persistence
            .get_operator_by_login("ruc20111222333b")
            .expect("Query failed")
            .is_none()
    );
}
