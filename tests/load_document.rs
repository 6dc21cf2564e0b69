//! End-to-end load of a JSON configuration document, the same path the CLI
//! takes: JSON text -> node tree -> walk -> regroup -> validate.

use cycle_config::doc::json::parse_document;
use cycle_config::loader::CycleConfig;
use pretty_assertions::assert_eq;

const DOCUMENT: &str = r#"{
    "name": "JobConfiguration",
    "children": [
        {
            "name": "InputData",
            "attributes": { "Type": "mc", "Version": "1" },
            "children": [
                { "name": "In", "attributes": { "FileName": "mc_a.root", "Lumi": "3.0" } },
                { "name": "In", "attributes": { "FileName": "mc_b.root", "Lumi": "4.0" } },
                { "name": "InputTree", "attributes": { "Name": "CollectionTree" } }
            ]
        },
        {
            "name": "InputData",
            "attributes": { "Type": "data", "Lumi": "50.0", "NEventsMax": "500" },
            "children": [
                { "name": "In", "attributes": { "FileName": "data_a.root", "Lumi": "12.5" } },
                {
                    "name": "EVInputTree",
                    "attributes": { "BaseName": "view", "Number": "2", "CollTreeName": "CollectionTree" }
                },
                { "name": "OutputTree", "attributes": { "Name": "selected" } }
            ]
        },
        {
            "name": "InputData",
            "attributes": { "Type": "mc", "Version": "2" },
            "children": [
                { "name": "In", "attributes": { "FileName": "mc_c.root", "Lumi": "5.0" } }
            ]
        },
        {
            "name": "UserConfig",
            "children": [
                { "name": "Item", "attributes": { "Name": "JetCollection", "Value": "AntiKt4" } },
                { "name": "Item", "attributes": { "Name": "PtCuts", "Value": "20.0 30.0" } },
                { "name": "Item", "attributes": { "Name": "Misspelled", "Value": "x" } }
            ]
        }
    ]
}"#;

#[test]
fn loads_groups_and_validates_a_whole_document() {
    let root = parse_document(DOCUMENT).unwrap();

    let mut cycle = CycleConfig::new();
    cycle.properties.declare_str("JetCollection", "");
    cycle.properties.declare_double_list("PtCuts", vec![]);

    cycle.load(&root).unwrap();

    // Properties were bound from UserConfig; the misspelled one warned.
    assert_eq!(cycle.properties.str_value("JetCollection"), Some("AntiKt4"));
    assert_eq!(cycle.properties.double_list("PtCuts").unwrap(), &[20.0, 30.0]);

    // The two mc datasets were interleaved with the data one in the
    // document; after the load they sit next to each other, in document
    // order, and the data one moved.
    let order: Vec<(&str, i64)> = cycle
        .datasets
        .iter()
        .map(|d| (d.data_type.as_str(), d.version))
        .collect();
    assert_eq!(order, vec![("data", 0), ("mc", 1), ("mc", 2)]);

    // One warning for the misspelled property, plus repositioning warnings.
    let unknown: Vec<_> = cycle
        .diagnostics
        .entries()
        .iter()
        .filter(|d| d.message.contains("Misspelled"))
        .collect();
    assert_eq!(unknown.len(), 1);
    assert_eq!(cycle.diagnostics.error_count(), 0);
}

#[test]
fn luminosity_bookkeeping_survives_the_full_path() {
    let root = parse_document(DOCUMENT).unwrap();

    let mut cycle = CycleConfig::new();
    cycle.load(&root).unwrap();

    let data = cycle
        .datasets
        .iter_mut()
        .find(|d| d.data_type == "data")
        .unwrap();

    // Explicit lumi wins over the 12.5 file sum.
    assert_eq!(data.total_lumi().unwrap(), 50.0);
    assert_eq!(data.lumi_file_sum(), 12.5);

    // The execution engine fills in the event counts; the cap then scales.
    data.set_events_total(1000);
    data.set_file_events(0, 1000);
    assert_eq!(data.input_files()[0].events, 1000);
    assert_eq!(data.scaled_lumi().unwrap(), 25.0);

    let mc: Vec<_> = cycle
        .datasets
        .iter()
        .filter(|d| d.data_type == "mc")
        .collect();
    assert_eq!(mc[0].total_lumi().unwrap(), 7.0);
    assert_eq!(mc[1].total_lumi().unwrap(), 5.0);

    // Event-view expansion made it through serialization and the walk.
    let data = cycle.datasets.iter().find(|d| d.data_type == "data").unwrap();
    let views: Vec<&str> = data.ev_input_trees.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(views, vec!["view0", "view1"]);
}
