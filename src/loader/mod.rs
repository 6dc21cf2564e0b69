//! Configuration loading: walking the document tree, building datasets and
//! populating user properties.
//!
//! Expected document shape, top level down:
//!
//! JobConfiguration
//! ├── InputData  Type= Version= Lumi= NEventsMax=
//! │   ├── GeneratorCut  Tree= Formula=
//! │   ├── In            FileName= Lumi=
//! │   ├── InputTree     Name=
//! │   ├── EVInputTree   BaseName= Number= CollTreeName=
//! │   └── OutputTree    Name=
//! └── UserConfig
//!     └── Item  Name= Value=
//!
//! Unknown top-level nodes are ignored; an unknown node inside InputData is
//! reported and skipped. After the walk the datasets are regrouped by type
//! and every record must have a nonzero total luminosity.

pub mod group;

use crate::dataset::{EvViewTree, GeneratorCut, InputData, InputFile, TreeRef};
use crate::diagnostics::Diagnostics;
use crate::doc::ConfigNode;
use crate::error::ConfigError;
use crate::props::{PropertyRegistry, parse_double_lenient, parse_int_lenient};

/// One processing unit's configuration state: the typed property slots it
/// declared, the datasets read from the document, and everything that was
/// flagged along the way. Create it fresh per configuration load; after a
/// successful [`load`](CycleConfig::load) the datasets are grouped,
/// validated and ready for the execution engine.
#[derive(Debug, Clone, Default)]
pub struct CycleConfig {
    pub properties: PropertyRegistry,
    pub datasets: Vec<InputData>,
    pub diagnostics: Diagnostics,
}

impl CycleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the document once, in document order. Childless top-level nodes
    /// are skipped; `InputData` subtrees each produce one dataset record and
    /// `UserConfig` items populate the property registry. The regrouping and
    /// the zero-luminosity check run exactly once, after the whole document
    /// has been walked.
    pub fn load(&mut self, root: &ConfigNode) -> Result<(), ConfigError> {
        log::info!("initializing cycle configuration");

        for node in root.children() {
            if !node.has_children() {
                continue;
            }
            match node.name() {
                "InputData" => {
                    let data = read_input_data(node, &mut self.diagnostics);
                    self.datasets.push(data);
                }
                "UserConfig" => self.read_user_config(node),
                _ => {}
            }
        }

        self.datasets =
            group::regroup_by_type(std::mem::take(&mut self.datasets), &mut self.diagnostics)?;

        for data in &self.datasets {
            log::info!("{}", data);
            data.total_lumi()?;
        }

        Ok(())
    }

    fn read_user_config(&mut self, node: &ConfigNode) {
        for item in node.children() {
            if !item.has_attributes() || item.name() != "Item" {
                continue;
            }
            let name = item.attribute("Name").unwrap_or("");
            let value = item.attribute("Value").unwrap_or("");
            log::debug!(
                "found user property with name \"{}\" and value \"{}\"",
                name,
                value
            );
            self.properties.apply(name, value, &mut self.diagnostics);
        }
    }
}

/// Build one dataset record from an `InputData` subtree. Malformed child
/// entries are reported and skipped; they never abort the load.
fn read_input_data(node: &ConfigNode, diagnostics: &mut Diagnostics) -> InputData {
    let mut data = InputData::new();

    if let Some(data_type) = node.attribute("Type") {
        data.data_type = data_type.to_string();
        log::info!("reading input data: {}", data.data_type);
    }
    if let Some(version) = node.attribute("Version") {
        data.version = parse_int_lenient(version, "Version", diagnostics);
    }
    if let Some(lumi) = node.attribute("Lumi") {
        data.explicit_lumi = parse_double_lenient(lumi, "Lumi", diagnostics);
    }
    if let Some(max) = node.attribute("NEventsMax") {
        data.n_events_max = parse_int_lenient(max, "NEventsMax", diagnostics);
    }

    for child in node.children() {
        if !child.has_attributes() {
            continue;
        }

        match child.name() {
            "GeneratorCut" => {
                let tree = child.attribute("Tree").unwrap_or("");
                let formula = child.attribute("Formula").unwrap_or("");
                data.gen_cuts.push(GeneratorCut::new(tree, formula));
            }
            "In" => {
                let path = child.attribute("FileName").unwrap_or("");
                let lumi = match child.attribute("Lumi") {
                    Some(raw) => parse_double_lenient(raw, "Lumi", diagnostics),
                    None => 0.0,
                };
                data.add_input_file(InputFile::new(path, lumi));
            }
            "InputTree" => {
                let name = child.attribute("Name").unwrap_or("");
                data.input_trees.push(TreeRef::new(name));
            }
            "EVInputTree" => {
                let base_name = child.attribute("BaseName").unwrap_or("");
                let coll_tree = child.attribute("CollTreeName").unwrap_or("");
                let number = match child.attribute("Number") {
                    Some(raw) => parse_int_lenient(raw, "Number", diagnostics),
                    None => 0,
                };
                for index in 0..number.max(0) {
                    data.ev_input_trees
                        .push(EvViewTree::new(base_name, index, coll_tree));
                }
            }
            "OutputTree" => {
                let name = child.attribute("Name").unwrap_or("");
                data.output_trees.push(TreeRef::new(name));
            }
            other => {
                diagnostics.error(format!("unknown field \"{}\" in InputData", other));
            }
        }
    }

    data
}
