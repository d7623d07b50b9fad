use ndarray::array;
use spatial_graph::{EdgeFilterMode, Graph, GraphError, SliceBound, COORDINATES};

/// Two components: a triangle 0-1-2 and a path 3-4, plus isolated vertex 5
fn two_components() -> Graph {
    let mut graph = Graph::new();
    graph.add_vertices(6);
    graph.add_edges(&[(0, 1), (1, 2), (2, 0), (3, 4)]).unwrap();
    graph.define_vertex_property("id", vec![0i64, 1, 2, 3, 4, 5]).unwrap();
    graph.define_edge_property("id", vec![10i64, 11, 12, 13]).unwrap();
    graph
}

#[test]
fn test_sub_graph_renumbers_in_order() {
    let graph = two_components();
    let keep = [false, true, true, true, true, false];
    let sub = graph.sub_graph(Some(&keep), None).unwrap();

    assert_eq!(sub.n_vertices(), 4);
    assert_eq!(sub.edge_connectivity(), vec![(0, 1), (2, 3)]);
    assert_eq!(sub.vertex_property("id").unwrap().as_integers(), Some(&[1, 2, 3, 4][..]));
    assert_eq!(sub.edge_property("id").unwrap().as_integers(), Some(&[11, 13][..]));
}

#[test]
fn test_sub_graph_with_edge_filter() {
    let graph = two_components();
    let sub = graph.sub_graph(None, Some(&[true, false, true, false])).unwrap();
    assert_eq!(sub.n_vertices(), 6);
    assert_eq!(sub.edge_property("id").unwrap().as_integers(), Some(&[10, 12][..]));
}

#[test]
fn test_filter_length_mismatch() {
    let graph = two_components();
    let err = graph.sub_graph(Some(&[true, false]), None).unwrap_err();
    assert!(matches!(err, GraphError::DimensionMismatch { expected: 6, found: 2, .. }));
    assert!(graph.view(None, Some(&[true])).is_err());
}

#[test]
fn test_view_does_not_renumber() {
    let graph = two_components();
    let keep = [false, false, false, true, true, true];
    let view = graph.view(Some(&keep), None).unwrap();
    assert_eq!(view.vertices(), vec![3, 4, 5]);
    assert_eq!(view.edges(), vec![3]);
    assert_eq!(view.edge_connectivity(), vec![(3, 4)]);
    assert_eq!(view.vertex_degrees(), vec![1, 1, 0]);
    assert!(view.edge_property_value("id", 0).is_err());
    assert_eq!(view.edge_property_value("id", 3).unwrap().as_integer(), Some(13));
}

#[test]
fn test_remove_isolated_vertices() {
    let mut graph = two_components();
    graph.remove_isolated_vertices().unwrap();
    assert_eq!(graph.n_vertices(), 5);
    assert_eq!(graph.vertex_property("id").unwrap().as_integers(), Some(&[0, 1, 2, 3, 4][..]));
}

#[test]
fn test_remove_isolated_edges_uses_degree_snapshot() {
    // 0-1 is an isolated pair; 2-3-4 is a path whose end edges must survive
    let mut graph = Graph::new();
    graph.add_vertices(5);
    graph.add_edges(&[(0, 1), (2, 3), (3, 4)]).unwrap();
    graph.remove_isolated_edges().unwrap();

    assert_eq!(graph.n_vertices(), 3);
    assert_eq!(graph.edge_connectivity(), vec![(0, 1), (1, 2)]);
}

#[test]
fn test_largest_component() {
    let graph = two_components();
    let labels = graph.label_components();
    assert_eq!(labels.labels, vec![0, 0, 0, 1, 1, 2]);
    assert_eq!(labels.counts, vec![3, 2, 1]);

    let largest = graph.largest_component().unwrap();
    assert_eq!(largest.n_vertices(), 3);
    assert_eq!(largest.n_edges(), 3);

    let view = graph.largest_component_view().unwrap();
    assert_eq!(view.vertices(), vec![0, 1, 2]);
}

#[test]
fn test_largest_component_ties_pick_lowest_label() {
    let mut graph = Graph::new();
    graph.add_vertices(4);
    graph.add_edges(&[(2, 3), (0, 1)]).unwrap();
    graph.define_vertex_property("id", vec![0i64, 1, 2, 3]).unwrap();
    let largest = graph.largest_component().unwrap();
    assert_eq!(largest.vertex_property("id").unwrap().as_integers(), Some(&[0, 1][..]));
}

#[test]
fn test_largest_component_of_empty_graph() {
    let graph = Graph::new();
    let largest = graph.largest_component().unwrap();
    assert_eq!(largest.n_vertices(), 0);
}

#[test]
fn test_remove_self_loops() {
    let mut graph = Graph::new();
    graph.add_vertices(2);
    graph.add_edges(&[(0, 0), (0, 1), (1, 1)]).unwrap();
    graph.remove_self_loops().unwrap();
    assert_eq!(graph.edge_connectivity(), vec![(0, 1)]);
}

#[test]
fn test_sub_slice() {
    let mut graph = Graph::new();
    graph.add_vertices(4);
    graph.add_edges(&[(0, 1), (1, 2), (2, 3)]).unwrap();
    graph
        .set_vertex_coordinates(array![
            [0.0, 0.0, 0.0],
            [5.0, 1.0, 0.0],
            [10.0, 2.0, 0.0],
            [15.0, 3.0, 0.0]
        ])
        .unwrap();

    let bounds = [SliceBound::range(4.0, 12.0)];
    assert_eq!(
        graph.sub_slice_vertex_filter(&bounds).unwrap(),
        vec![false, true, true, false]
    );
    let sub = graph.sub_slice(&bounds).unwrap();
    assert_eq!(sub.n_vertices(), 2);
    assert_eq!(sub.edge_connectivity(), vec![(0, 1)]);
    assert_eq!(sub.vertex_coordinates_axis(0usize).unwrap(), vec![5.0, 10.0]);
}

#[test]
fn test_sub_slice_with_geometry() {
    let mut graph = Graph::new();
    graph.add_vertices(3);
    graph.add_edges(&[(0, 1), (1, 2)]).unwrap();
    graph
        .set_vertex_coordinates(array![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]])
        .unwrap();
    graph
        .set_edge_geometry(
            COORDINATES,
            vec![
                array![[0.0, 0.0], [0.5, 0.2], [1.0, 0.0]],
                array![[1.0, 0.0], [2.0, 0.0]],
            ],
        )
        .unwrap();

    let sub = graph.sub_slice(&[SliceBound::Range { start: Some(0.5), stop: None }]).unwrap();
    assert_eq!(sub.n_edges(), 1);
    assert_eq!(sub.edge_geometry_flat(COORDINATES).unwrap(), array![[1.0, 0.0], [2.0, 0.0]]);
    assert!(sub.is_edge_geometry_consistent().unwrap());
}

#[test]
fn test_filter_mode_keywords_map_edges() {
    let graph = two_components();
    let filter = [true, true, false, true, false, false];
    let both: EdgeFilterMode = "and".parse().unwrap();
    let either: EdgeFilterMode = "or".parse().unwrap();
    assert_eq!(
        graph.vertex_filter_to_edge_filter(&filter, both).unwrap(),
        vec![true, false, false, false]
    );
    assert_eq!(
        graph.vertex_filter_to_edge_filter(&filter, either).unwrap(),
        vec![true, true, true, true]
    );
    assert!("nand".parse::<EdgeFilterMode>().is_err());
}

#[test]
fn test_vertex_to_edge_label_mean() {
    let graph = two_components();
    let label = graph
        .vertex_to_edge_label_mean(&[0.0, 2.0, 4.0, 1.0, 3.0, 9.0])
        .unwrap();
    assert_eq!(label, vec![1.0, 3.0, 2.0, 2.0]);
}
