// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use vector_catalog_gateway::QueryFingerprint;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_fingerprint_is_deterministic() {
    let a = QueryFingerprint::derive("taxi ride from JFK", 5, "nyc_taxi_2023");
    let b = QueryFingerprint::derive("taxi ride from JFK", 5, "nyc_taxi_2023");

    assert_eq!(a, b);
    assert_eq!(a.as_str().len(), 16);
    assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_fingerprint_is_case_and_trim_insensitive() {
    let reference = QueryFingerprint::derive("taxi ride from jfk", 5, "nyc_taxi_2023");

    assert_eq!(
        QueryFingerprint::derive("Taxi Ride From JFK", 5, "nyc_taxi_2023"),
        reference,
    );
    assert_eq!(
        QueryFingerprint::derive("  taxi ride from jfk\t\n", 5, "nyc_taxi_2023"),
        reference,
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_fingerprint_discriminates_on_every_tuple_component() {
    let reference = QueryFingerprint::derive("taxi ride", 5, "nyc_taxi_2023");

    assert_ne!(
        QueryFingerprint::derive("bus ride", 5, "nyc_taxi_2023"),
        reference,
    );
    assert_ne!(
        QueryFingerprint::derive("taxi ride", 6, "nyc_taxi_2023"),
        reference,
    );
    assert_ne!(
        QueryFingerprint::derive("taxi ride", 5, "nyc_taxi_2022"),
        reference,
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_fingerprint_inner_whitespace_is_significant() {
    assert_ne!(
        QueryFingerprint::derive("taxi  ride", 5, "nyc_taxi_2023"),
        QueryFingerprint::derive("taxi ride", 5, "nyc_taxi_2023"),
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
