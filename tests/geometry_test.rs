use ndarray::{array, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spatial_graph::geometry::{compact, compute_ranges, range_lengths, remap};
use spatial_graph::{GeometryMode, GeometryRange, GeometryValues, Graph, GraphError, COORDINATES};

fn ranges(pairs: &[(usize, usize)]) -> Vec<GeometryRange> {
    pairs.iter().copied().map(GeometryRange::from).collect()
}

/// Samples whose first column encodes (edge, sample) so they can be traced
fn tagged_samples(edge: usize, len: usize) -> Array2<f64> {
    Array2::from_shape_fn((len, 3), |(i, j)| (edge * 100 + i) as f64 + j as f64 * 0.25)
}

/// Random graph whose edge polylines run exactly between their vertex coordinates
fn random_consistent_graph(rng: &mut StdRng, n_vertices: usize, n_edges: usize) -> Graph {
    let mut graph = Graph::new();
    graph.add_vertices(n_vertices);
    let coordinates = Array2::from_shape_fn((n_vertices, 3), |_| rng.gen_range(0.0..100.0));
    graph.set_vertex_coordinates(coordinates.clone()).unwrap();

    let edges: Vec<(usize, usize)> = (0..n_edges)
        .map(|_| (rng.gen_range(0..n_vertices), rng.gen_range(0..n_vertices)))
        .collect();
    graph.add_edges(&edges).unwrap();

    let geometry: Vec<Array2<f64>> = edges
        .iter()
        .map(|&(s, t)| {
            let inner = rng.gen_range(0..4);
            let n = inner + 2;
            let mut samples = Array2::zeros((n, 3));
            samples.row_mut(0).assign(&coordinates.row(s));
            for i in 1..n - 1 {
                for j in 0..3 {
                    samples[[i, j]] = rng.gen_range(0.0..100.0);
                }
            }
            samples.row_mut(n - 1).assign(&coordinates.row(t));
            samples
        })
        .collect();
    graph.set_edge_geometry(COORDINATES, geometry).unwrap();
    graph
}

#[test]
fn test_packing_law() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let lengths: Vec<usize> = (0..rng.gen_range(0..30)).map(|_| rng.gen_range(0..10)).collect();
        let packed = compute_ranges(&lengths);
        for (i, range) in packed.iter().enumerate() {
            assert_eq!(range.start, lengths[..i].iter().sum::<usize>());
            assert_eq!(range.end, lengths[..=i].iter().sum::<usize>());
        }
        assert_eq!(range_lengths(&packed).iter().sum::<usize>(), lengths.iter().sum::<usize>());
    }
}

#[test]
fn test_compaction_idempotence() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let mut offset = 0;
        let gappy: Vec<GeometryRange> = (0..rng.gen_range(1..20))
            .map(|_| {
                offset += rng.gen_range(0..5);
                let len = rng.gen_range(0..6);
                let range = GeometryRange::new(offset, offset + len);
                offset += len;
                range
            })
            .collect();
        let once = compact(&gappy);
        assert_eq!(compact(&once), once);
        assert_eq!(range_lengths(&once), range_lengths(&gappy));
    }
}

#[test]
fn test_remap_guard() {
    let values = Array2::<f64>::zeros((10, 2));
    let err = remap(&ranges(&[(0, 4), (4, 10)]), &ranges(&[(0, 4), (4, 9)]), &values).unwrap_err();
    assert!(matches!(err, GraphError::Consistency(_)));

    let err = remap(&ranges(&[(0, 4)]), &ranges(&[(0, 4), (4, 4)]), &values).unwrap_err();
    assert!(matches!(err, GraphError::Consistency(_)));
}

#[test]
fn test_sub_graph_compacts_packed_geometry() {
    let mut graph = Graph::new();
    graph.add_vertices(10);
    graph.add_edges(&[(1, 3), (2, 5), (6, 7), (7, 9)]).unwrap();
    let geometry: Vec<Array2<f64>> = [3, 4, 5, 6]
        .iter()
        .enumerate()
        .map(|(edge, &len)| tagged_samples(edge, len))
        .collect();
    graph.set_edge_geometry(COORDINATES, geometry.clone()).unwrap();

    assert_eq!(
        graph.edge_geometry_indices().unwrap(),
        ranges(&[(0, 3), (3, 7), (7, 12), (12, 18)])
    );
    assert_eq!(graph.edge_geometry_flat(COORDINATES).unwrap().nrows(), 18);

    let keep: Vec<bool> = (0..10).map(|v| v < 5).collect();
    let sub = graph.sub_graph(Some(&keep), None).unwrap();
    assert_eq!(sub.n_vertices(), 5);
    assert_eq!(sub.edge_connectivity(), vec![(1, 3)]);
    assert_eq!(sub.edge_geometry_indices().unwrap(), ranges(&[(0, 3)]));
    assert_eq!(sub.edge_geometry_flat(COORDINATES).unwrap(), geometry[0]);

    // the source graph is untouched
    assert_eq!(graph.edge_geometry_flat(COORDINATES).unwrap().nrows(), 18);
}

#[test]
fn test_view_reads_backing_arrays() {
    let mut graph = Graph::new();
    graph.add_vertices(10);
    graph.add_edges(&[(1, 3), (2, 5), (6, 7), (7, 9)]).unwrap();
    let geometry: Vec<Array2<f64>> = [3, 4, 5, 6]
        .iter()
        .enumerate()
        .map(|(edge, &len)| tagged_samples(edge, len))
        .collect();
    graph.set_edge_geometry(COORDINATES, geometry.clone()).unwrap();

    let keep: Vec<bool> = (0..10).map(|v| v >= 5).collect();
    let view = graph.view(Some(&keep), None).unwrap();
    assert_eq!(view.edges(), vec![2, 3]);
    assert_eq!(view.edge_geometry_indices().unwrap(), ranges(&[(7, 12), (12, 18)]));
    assert_eq!(view.edge_geometry_flat(COORDINATES).unwrap().nrows(), 18);
    assert_eq!(view.edge_geometry(COORDINATES).unwrap(), geometry[2..].to_vec());
}

#[test]
fn test_mode_round_trip_is_lossless() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut graph = random_consistent_graph(&mut rng, 30, 60);
    let radii: Vec<Vec<f64>> = graph
        .edge_geometry_lengths(COORDINATES)
        .unwrap()
        .into_iter()
        .map(|n| (0..n).map(|_| rng.gen_range(0.5..3.0)).collect())
        .collect();
    graph.set_edge_geometry("radii", GeometryValues::from_scalars(radii)).unwrap();

    let coordinates = graph.edge_geometry(COORDINATES).unwrap();
    let radii = graph.edge_geometry("radii").unwrap();

    graph.set_edge_geometry_mode(GeometryMode::Scattered).unwrap();
    assert_eq!(graph.edge_geometry(COORDINATES).unwrap(), coordinates);
    assert_eq!(graph.edge_geometry("radii").unwrap(), radii);

    graph.set_edge_geometry_mode(GeometryMode::Packed).unwrap();
    assert_eq!(graph.edge_geometry(COORDINATES).unwrap(), coordinates);
    assert_eq!(graph.edge_geometry("radii").unwrap(), radii);

    // converting to the current mode is a no-op
    graph.set_edge_geometry_mode(GeometryMode::Packed).unwrap();
    assert_eq!(graph.edge_geometry_mode(), GeometryMode::Packed);
}

#[test]
fn test_flat_and_list_reads_agree_in_both_modes() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut graph = random_consistent_graph(&mut rng, 12, 20);
    for mode in [GeometryMode::Packed, GeometryMode::Scattered] {
        graph.set_edge_geometry_mode(mode).unwrap();
        let list = graph.edge_geometry(COORDINATES).unwrap();
        let flat = graph.edge_geometry_flat(COORDINATES).unwrap();
        let indices = graph.edge_geometry_indices().unwrap();
        for (samples, range) in list.iter().zip(&indices) {
            assert_eq!(samples, &flat.slice(ndarray::s![range.as_range(), ..]).to_owned());
        }
    }
}

#[test]
fn test_sub_graph_keeps_geometry_consistent() {
    let mut rng = StdRng::seed_from_u64(1234);
    for mode in [GeometryMode::Packed, GeometryMode::Scattered] {
        let mut graph = random_consistent_graph(&mut rng, 40, 80);
        graph.set_edge_geometry_mode(mode).unwrap();
        assert!(graph.is_edge_geometry_consistent().unwrap());

        let keep: Vec<bool> = (0..40).map(|_| rng.gen_bool(0.6)).collect();
        let sub = graph.sub_graph(Some(&keep), None).unwrap();
        assert!(sub.is_edge_geometry_consistent().unwrap());
        assert_eq!(
            sub.edge_geometry_lengths(COORDINATES).unwrap().len(),
            sub.n_edges()
        );
    }
}

#[test]
fn test_packed_single_edge_write_is_unsupported() {
    let mut graph = Graph::new();
    graph.add_vertices(2);
    graph.add_edge(0, 1).unwrap();
    graph
        .set_edge_geometry(COORDINATES, vec![array![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]])
        .unwrap();
    let err = graph
        .set_edge_geometry_of(COORDINATES, 0, array![[0.0, 0.0, 0.0]])
        .unwrap_err();
    assert!(matches!(err, GraphError::UnsupportedOperation(_)));
}

#[test]
fn test_edge_mesh_follows_mutations() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut graph = random_consistent_graph(&mut rng, 10, 15);
    let lengths = graph.edge_geometry_lengths(COORDINATES).unwrap();
    let expected: usize = lengths.iter().map(|&n| n - 1).sum();
    assert_eq!(graph.edge_mesh().unwrap().n_segments(), expected);

    graph.remove_edge(0).unwrap();
    assert_eq!(graph.edge_mesh().unwrap().n_segments(), expected - (lengths[0] - 1));
}
