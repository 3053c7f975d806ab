//! End-to-end generation scenarios for stellar-mapper
//!
//! Small worked networks checked against hand-computed results, plus the
//! pipeline driven from a catalog CSV.

use nalgebra::Point3;
use stellar_mapper::core::{count_components, is_connected, prune_candidates};
use stellar_mapper::formats::{read_catalog_from, read_network, write_network};
use stellar_mapper::{
    generate_network, Edge, GenerationParams, InclusionFlags, RawObservation, StellarSystem,
};
use tempfile::TempDir;

fn system(id: usize, x: f64, y: f64, z: f64) -> StellarSystem {
    StellarSystem::new(id, format!("S{}", id), Point3::new(x, y, z))
}

// ============================================================================
// Worked scenarios
// ============================================================================

#[test]
fn test_two_systems_within_jump_range() {
    let systems = vec![system(0, 0.0, 0.0, 0.0), system(1, 5.0, 5.0, 0.0)];
    let edges = prune_candidates(&systems, [(0, 1)], 10.0);

    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].key(), (0, 1));
    assert!((edges[0].distance - 7.0710678).abs() < 1e-6);
    assert_eq!(count_components(&systems, &edges), 1);
    assert!(is_connected(&systems, &edges));
}

#[test]
fn test_two_systems_out_of_jump_range() {
    let systems = vec![system(0, 0.0, 0.0, 0.0), system(1, 20.0, 0.0, 0.0)];
    let edges = prune_candidates(&systems, [(0, 1)], 10.0);

    assert!(edges.is_empty());
    assert_eq!(count_components(&systems, &edges), 2);
    assert!(!is_connected(&systems, &edges));
}

#[test]
fn test_triple_system_aggregates() {
    let rows = vec![
        RawObservation::new(42, "*", "A").with_spectral_type("G"),
        RawObservation::new(42, "*", "B").with_spectral_type("K"),
        RawObservation::new(42, "*", "C").with_spectral_type("M"),
    ];
    let network = generate_network(&rows, &GenerationParams::new(10.0)).unwrap();

    assert_eq!(network.systems.len(), 1);
    let names: Vec<_> = network.systems[0]
        .components
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert!(network.edges.is_empty());
    assert!(network.is_connected());
}

#[test]
fn test_uncertain_low_mass_row_follows_flag() {
    let rows = vec![
        RawObservation::new(1, "*", "bright").at(10.0, 10.0, 300.0),
        RawObservation::new(2, "LM?", "faint").at(20.0, 20.0, 300.0),
    ];

    let excluded = generate_network(&rows, &GenerationParams::new(10.0)).unwrap();
    assert_eq!(excluded.systems.len(), 1);

    let params = GenerationParams::new(10.0).with_inclusion(InclusionFlags {
        include_low_mass: true,
        ..Default::default()
    });
    let included = generate_network(&rows, &params).unwrap();
    assert_eq!(included.systems.len(), 2);
}

#[test]
fn test_empty_catalog() {
    let network = generate_network(&[], &GenerationParams::new(10.0)).unwrap();

    assert!(network.systems.is_empty());
    assert!(network.edges.is_empty());
    assert_eq!(network.component_count(), 0);
    assert!(!network.is_connected());
}

// ============================================================================
// Geometry through the full pipeline
// ============================================================================

#[test]
fn test_zero_parallax_systems_collapse_to_origin() {
    let rows = vec![
        RawObservation::new(1, "*", "unknown 1").at(10.0, 10.0, 0.0),
        RawObservation::new(2, "*", "unknown 2").at(50.0, -20.0, -3.0),
    ];
    let network = generate_network(&rows, &GenerationParams::new(10.0)).unwrap();

    assert_eq!(network.systems.len(), 2);
    assert!(network.systems.iter().all(|s| s.position() == Point3::origin()));
    assert!(network.edges.iter().all(|e| e.system1_id != e.system2_id));
}

#[test]
fn test_cube_corners_connect_along_short_edges() {
    // Eight systems on the corners of a 2 pc cube, built from Cartesian
    // positions so the expected lengths are exact.
    let mut systems = Vec::new();
    for (id, (x, y, z)) in [
        (0.0, 0.0, 0.0),
        (2.0, 0.0, 0.0),
        (0.0, 2.0, 0.0),
        (2.0, 2.0, 0.0),
        (0.0, 0.0, 2.0),
        (2.0, 0.0, 2.0),
        (0.0, 2.0, 2.0),
        (2.1, 2.1, 2.1),
    ]
    .into_iter()
    .enumerate()
    {
        systems.push(system(id, x, y, z));
    }

    let edges = stellar_mapper::build_edges(&systems, 2.0).unwrap();
    assert!(!edges.is_empty());
    assert!(edges.iter().all(|e| (e.distance - 2.0).abs() < 1e-12));
    // The perturbed corner has no neighbour at exactly 2 pc
    assert!(edges.iter().all(|e| e.system1_id != 7 && e.system2_id != 7));
    assert!(count_components(&systems, &edges) >= 2);
}

// ============================================================================
// Catalog to JSON
// ============================================================================

#[test]
fn test_catalog_to_json_and_back() {
    let csv = "\
NB_SYS,OBJ_CAT,OBJ_NAME,SYSTEM_NAME,RA,DEC,PARALLAX,SP_TYPE
1,*,Sun-like,,0,0,500,G2V
2,*,Red dwarf,,60,10,400,M4.5V
2,BD,Companion,,60,10,400,T8
3,*,Orange,,120,-15,450,K5V
4,*,Distant,,200,40,350,M1V
5,*,Southern,,300,-50,420,M3V
";
    let rows = read_catalog_from(csv.as_bytes()).unwrap();
    assert_eq!(rows.len(), 6);

    let params = GenerationParams::new(10.0).with_inclusion(InclusionFlags::all());
    let network = generate_network(&rows, &params).unwrap();
    assert_eq!(network.systems.len(), 5);
    assert_eq!(network.systems[1].components.len(), 2);
    assert_eq!(network.systems[1].components[1].spectral_type, "T");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("network.json");
    write_network(&network, &path).unwrap();

    let restored = read_network(&path).unwrap();
    assert_eq!(restored, network);
    assert!(restored.is_connected());
    assert!(restored
        .edges
        .iter()
        .all(|e: &Edge| e.distance <= restored.jump_distance));
}
