use conley_morse::config::{Configuration, ModelInfo, ParameterSpace, PhaseSpace, RefinementLimits};
use conley_morse::conley::BoundingBox;
use conley_morse::geometry::Rect;
use conley_morse::io::parameter::{ParameterBoxRecord, read_records, write_records};
use conley_morse::maps::LeslieMap;
use conley_morse::sweep::ParameterSweep;

fn leslie_config() -> Configuration {
    Configuration {
        model: ModelInfo {
            name: "leslie".into(),
            desc: String::new(),
        },
        param: ParameterSpace {
            dim: 2,
            subdiv_depth: 1,
            bounds: Rect::new(vec![19.0, 9.0], vec![21.0, 11.0]).unwrap(),
        },
        phase: PhaseSpace {
            dim: 2,
            bounds: Rect::new(vec![0.0, 0.0], vec![320.056, 224.040]).unwrap(),
            subdiv: RefinementLimits {
                min_depth: 4,
                max_depth: 5,
                complexity_limit: 10_000,
                compute_invariants: true,
            },
        },
    }
}

#[test]
fn leslie_sweep_records_every_box() {
    let cfg = leslie_config();
    cfg.validate().unwrap();
    let sweep = ParameterSweep::from_config(&cfg, LeslieMap::new);
    assert_eq!(sweep.len(), 2);
    let outcomes = sweep.run(&BoundingBox);
    assert_eq!(outcomes.len(), 2);

    let records: Vec<ParameterBoxRecord<Rect>> = outcomes.iter().map(ParameterBoxRecord::from).collect();
    for (i, rec) in records.iter().enumerate() {
        assert_eq!(rec.index, i);
        assert!(rec.error.is_none());
        let graph = rec.graph.as_ref().unwrap();
        assert!(graph.vertex_count >= 1);
        assert!(graph.invariants.iter().all(Option::is_some));
    }

    let path = std::env::temp_dir().join(format!("conley_morse_sweep_{}.json", std::process::id()));
    write_records(&path, &records).unwrap();
    let back: Vec<ParameterBoxRecord<Rect>> = read_records(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(back.len(), records.len());
    for (a, b) in back.iter().zip(&records) {
        let (ga, gb) = (a.graph.as_ref().unwrap(), b.graph.as_ref().unwrap());
        assert_eq!(ga.edges, gb.edges);
        assert_eq!(ga.cell_sets, gb.cell_sets);
    }
    let graph = back[0].graph.clone().unwrap().into_graph().unwrap();
    assert_eq!(graph.num_vertices(), records[0].graph.as_ref().unwrap().vertex_count);
}
