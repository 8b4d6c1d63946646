use skyroute_core::{Airport, DatasetKind, Endpoint, Error, Network};

const AIRPORTS: &str = r#"{
  "nodes": [
    { "id": "ATL", "name": "Hartsfield-Jackson", "passengers": 96178899, "longitude": -84.43, "latitude": 33.64, "state": "GA" },
    { "id": "ORD", "name": "O'Hare", "passengers": 79828183, "longitude": -87.90, "latitude": 41.97 },
    { "id": "DEN", "name": "Denver", "passengers": 58266515, "longitude": -104.67, "latitude": 39.86 }
  ],
  "links": [
    { "source": "ATL", "target": "ORD", "weight": 3 },
    { "source": 2, "target": 0 }
  ]
}"#;

fn airport(id: &str) -> Airport {
    Airport {
        id: id.to_string(),
        name: id.to_string(),
        passengers: 1.0,
        longitude: 0.0,
        latitude: 0.0,
    }
}

#[test]
fn network_resolves_ids_and_indices() {
    let net = Network::from_json_str(AIRPORTS).unwrap();
    assert_eq!(net.len(), 3);
    assert_eq!(net.airport(1).unwrap().name, "O'Hare");
    assert_eq!(net.index_of("DEN"), Some(2));

    let routes: Vec<(usize, usize)> = net.routes().iter().map(|r| (r.source, r.target)).collect();
    assert_eq!(routes, vec![(0, 1), (2, 0)]);
}

#[test]
fn network_defaults_missing_ids_to_index() {
    let net = Network::from_json_str(
        r#"{ "nodes": [
              { "name": "a", "longitude": 0, "latitude": 0 },
              { "name": "b", "longitude": 1, "latitude": 1 }
            ],
            "links": [ { "source": 0, "target": "1" } ] }"#,
    )
    .unwrap();
    assert_eq!(net.airport(0).unwrap().id, "0");
    assert_eq!(net.airport(0).unwrap().passengers, 0.0);
    assert_eq!(net.routes()[0].target, 1);
}

#[test]
fn network_rejects_dangling_route() {
    let err = Network::new(
        vec![airport("A"), airport("B")],
        vec![(Endpoint::from("A"), Endpoint::from("Z"))],
    )
    .unwrap_err();
    match err {
        Error::UnknownEndpoint { route, endpoint } => {
            assert_eq!(route, 0);
            assert_eq!(endpoint, "Z");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = Network::new(vec![airport("A")], vec![(0.into(), 7.into())]).unwrap_err();
    assert!(matches!(err, Error::UnknownEndpoint { ref endpoint, .. } if endpoint == "7"));
}

#[test]
fn network_rejects_duplicate_ids() {
    let err = Network::new(vec![airport("A"), airport("A")], Vec::new()).unwrap_err();
    assert!(matches!(err, Error::DuplicateAirport { ref id } if id == "A"));
}

#[test]
fn malformed_network_is_unavailable() {
    let err = Network::from_json_str(r#"{ "nodes": [ { "name": 3 } ] }"#).unwrap_err();
    assert!(matches!(
        err,
        Error::DataUnavailable {
            dataset: DatasetKind::Network,
            ..
        }
    ));
}
