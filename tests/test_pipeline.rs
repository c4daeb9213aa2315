//! End-to-end pipeline runs against the canned fixture endpoint.  Each test
//! parses a pipe-delimited command string the same way the binary does and
//! checks the JSON the final stage produces.

use serde_json::Value;

use goograin::cmd_pipeline::build_pipeline;

const FIXTURE: &str = "tests/fixtures/agri.json";

async fn run_pipeline(arg_str: &str) -> Value {
    let (pipeline, _output_format) =
        build_pipeline("goograin-tool", arg_str).expect("pipeline should parse");
    pipeline
        .run()
        .await
        .expect("pipeline should run")
        .to_json()
}

fn node_iri(num: u32) -> String {
    format!(
        "https://agriculture.ld.admin.ch/crops/cultivationtype/{}",
        num
    )
}

#[tokio::test]
async fn test_search_ranks_exact_name_first() {
    let results = run_pipeline(&format!("--server {} search weizen", FIXTURE)).await;

    assert_eq!(results["term"], "weizen");
    assert_eq!(results["total_count"], 2);

    let records = results["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    // exact (1000) + contains (40) + starts-with (20) + direct child (15)
    assert_eq!(records[0]["name"], "Weizen");
    assert_eq!(records[0]["score"], 1075);
    // contains (40) + common name (30) + direct parent (25)
    assert_eq!(records[1]["name"], "Sommerweizen");
    assert_eq!(records[1]["score"], 95);
}

#[tokio::test]
async fn test_filter_class_narrows_without_touching_total() {
    let results = run_pipeline(&format!(
        "--server {} fetch-crops | search weizen | filter-class https://agriculture.ld.admin.ch/crops/MainCrop",
        FIXTURE
    ))
    .await;

    // Weizen outscores Sommerweizen but is not a MainCrop; the filter drops
    // it while the pre-filter match count survives for the presenter.
    assert_eq!(results["total_count"], 2);
    let records = results["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Sommerweizen");
}

#[tokio::test]
async fn test_lineage_spans_both_directions() {
    let results = run_pipeline(&format!(
        "--server {} fetch-hierarchy | lineage {}",
        FIXTURE,
        node_iri(10)
    ))
    .await;

    assert_eq!(results["selected"], node_iri(10));
    let node_ids: Vec<&str> = results["node_ids"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    // Parent, self, child; the sibling branch (Kartoffel) is absent.
    assert_eq!(node_ids, vec![node_iri(1), node_iri(10), node_iri(11)]);
}

#[tokio::test]
async fn test_highlight_recolors_lineage_and_dims_the_rest() {
    let results = run_pipeline(&format!(
        "--server {} fetch-hierarchy | highlight {}",
        FIXTURE,
        node_iri(11)
    ))
    .await;

    let states: Vec<(&str, &str)> = results["node_styles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|style| {
            (
                style["id"].as_str().unwrap(),
                style["state"].as_str().unwrap(),
            )
        })
        .collect();

    let state_of = |iri: String| {
        states
            .iter()
            .find(|(id, _)| *id == iri)
            .map(|(_, state)| *state)
            .unwrap()
    };
    assert_eq!(state_of(node_iri(11)), "Focus");
    assert_eq!(state_of(node_iri(10)), "Highlighted");
    assert_eq!(state_of(node_iri(1)), "Highlighted");
    assert_eq!(state_of(node_iri(12)), "Dimmed");

    let edge_states: Vec<(&str, &str)> = results["edge_styles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|style| {
            (
                style["id"].as_str().unwrap(),
                style["state"].as_str().unwrap(),
            )
        })
        .collect();
    for (id, state) in edge_states {
        if id.contains("cultivationtype/12") {
            assert_eq!(state, "Dimmed", "sibling edge {} should dim", id);
        } else {
            assert_eq!(state, "Highlighted", "lineage edge {} should light up", id);
        }
    }
}

#[tokio::test]
async fn test_node_details_enrich_feeds_system_highlight() {
    // Details for the node travel with the graph, so the reset pass can mark
    // it active in AGIS on a date inside its validity interval.
    let results = run_pipeline(&format!(
        "--server {} fetch-hierarchy | node-details {} | highlight --system AGIS --date 2022-06-01",
        FIXTURE,
        node_iri(11)
    ))
    .await;

    for style in results["node_styles"].as_array().unwrap() {
        let expected = if style["id"] == Value::String(node_iri(11)) {
            "SystemActive"
        } else {
            "Normal"
        };
        assert_eq!(style["state"], expected);
    }
}

#[tokio::test]
async fn test_membership_interval_is_inclusive_and_bounded() {
    // A day past validThrough must not count as active.
    let results = run_pipeline(&format!(
        "--server {} fetch-hierarchy | node-details {} | highlight --system AGIS --date 2025-01-01",
        FIXTURE,
        node_iri(11)
    ))
    .await;

    for style in results["node_styles"].as_array().unwrap() {
        assert_eq!(style["state"], "Normal");
    }
}

#[tokio::test]
async fn test_node_details_standalone_yields_typed_node() {
    let results = run_pipeline(&format!(
        "--server {} node-details {}",
        FIXTURE,
        node_iri(11)
    ))
    .await;

    assert_eq!(results["id"], node_iri(11));
    assert_eq!(results["title"], "Sommerweizen");
    assert_eq!(results["taxon_name"], "Triticum aestivum");
    assert_eq!(results["memberships"][0]["system_name"], "AGIS");
    assert_eq!(results["memberships"][0]["identifier"], "514");
    assert_eq!(results["attributes"][0]["type_name"], "Kulturform");
    assert_eq!(results["attributes"][0]["value_name"], "Sommerkultur");
}

#[tokio::test]
async fn test_search_records_history_for_suggestions() {
    let history_dir = tempfile::tempdir().unwrap();
    let dir_arg = history_dir.path().to_str().unwrap();

    run_pipeline(&format!(
        "--server {} search Kartoffel --history-dir {}",
        FIXTURE, dir_arg
    ))
    .await;

    let suggestions = run_pipeline(&format!(
        "--server {} suggest kar --history-dir {}",
        FIXTURE, dir_arg
    ))
    .await;

    let suggestions = suggestions.as_array().unwrap();
    // The history entry wins and the identical corpus name is deduplicated.
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["kind"], "History");
    assert_eq!(suggestions[0]["text"], "kartoffel");
}

#[tokio::test]
async fn test_suggest_falls_back_to_corpus_names() {
    let suggestions = run_pipeline(&format!("--server {} suggest wei", FIXTURE)).await;

    let suggestions = suggestions.as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["kind"], "Corpus");
    assert_eq!(suggestions[0]["text"], "Weizen");
}
