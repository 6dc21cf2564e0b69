//! Input dataset model.
//!
//! One [`InputData`] record describes a logical group of input files and
//! trees sharing a sample type, together with the luminosity bookkeeping
//! the execution engine needs for event weighting. Records are built by the
//! loader, regrouped once, and then handed to the engine read-only; the
//! engine fills in `events_total` (and per-file event counts) after it has
//! opened the files.

use crate::error::ConfigError;
use std::fmt;

/// A per-tree selection expression applied at generation level.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorCut {
    pub tree_name: String,
    pub formula: String,
}

impl GeneratorCut {
    pub fn new(tree_name: impl Into<String>, formula: impl Into<String>) -> Self {
        Self {
            tree_name: tree_name.into(),
            formula: formula.into(),
        }
    }
}

/// One input file with its integrated luminosity. `events` is zero until
/// the execution engine has read the file.
#[derive(Debug, Clone, PartialEq)]
pub struct InputFile {
    pub path: String,
    pub lumi: f64,
    pub events: u64,
}

impl InputFile {
    pub fn new(path: impl Into<String>, lumi: f64) -> Self {
        Self {
            path: path.into(),
            lumi,
            events: 0,
        }
    }
}

/// A plain named tree reference, used for both input and output trees.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRef {
    pub name: String,
}

impl TreeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One of N numbered event-view trees expanded from a common base name.
#[derive(Debug, Clone, PartialEq)]
pub struct EvViewTree {
    /// Derived name, base name plus index.
    pub name: String,
    pub base_name: String,
    pub index: i64,
    pub coll_tree_name: String,
}

impl EvViewTree {
    pub fn new(
        base_name: impl Into<String>,
        index: i64,
        coll_tree_name: impl Into<String>,
    ) -> Self {
        let base_name = base_name.into();
        Self {
            name: format!("{}{}", base_name, index),
            base_name,
            index,
            coll_tree_name: coll_tree_name.into(),
        }
    }
}

/// One logical input dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct InputData {
    /// Sample type; datasets of the same type are processed consecutively.
    pub data_type: String,
    pub version: i64,
    /// Luminosity given explicitly in the document; 0 means "not given".
    pub explicit_lumi: f64,
    /// Cap on the number of events to process; -1 means no cap.
    pub n_events_max: i64,
    pub gen_cuts: Vec<GeneratorCut>,
    input_files: Vec<InputFile>,
    pub input_trees: Vec<TreeRef>,
    pub ev_input_trees: Vec<EvViewTree>,
    pub output_trees: Vec<TreeRef>,
    /// Running sum of per-file luminosities, updated on every append.
    lumi_file_sum: f64,
    /// Total events the execution engine saw across all files.
    events_total: u64,
}

impl Default for InputData {
    fn default() -> Self {
        Self::new()
    }
}

impl InputData {
    pub fn new() -> Self {
        Self {
            data_type: "unknown".to_string(),
            version: 0,
            explicit_lumi: 0.0,
            n_events_max: -1,
            gen_cuts: Vec::new(),
            input_files: Vec::new(),
            input_trees: Vec::new(),
            ev_input_trees: Vec::new(),
            output_trees: Vec::new(),
            lumi_file_sum: 0.0,
            events_total: 0,
        }
    }

    /// Append an input file and fold its luminosity into the running sum.
    pub fn add_input_file(&mut self, file: InputFile) {
        self.lumi_file_sum += file.lumi;
        self.input_files.push(file);
    }

    pub fn input_files(&self) -> &[InputFile] {
        &self.input_files
    }

    pub fn lumi_file_sum(&self) -> f64 {
        self.lumi_file_sum
    }

    pub fn events_total(&self) -> u64 {
        self.events_total
    }

    /// Called by the execution engine once it has counted the events in all
    /// input files.
    pub fn set_events_total(&mut self, events: u64) {
        self.events_total = events;
    }

    /// Record the event count of one input file, by its position in
    /// [`input_files`](Self::input_files). Called by the execution engine
    /// after reading the file; an out-of-range index is a caller bug and
    /// panics. Only the event count is writable this way, so the running
    /// luminosity sum stays consistent with the file list.
    pub fn set_file_events(&mut self, index: usize, events: u64) {
        self.input_files[index].events = events;
    }

    /// Total luminosity of the dataset: the explicit value when one was
    /// given, otherwise the sum over the input files. A zero total is a
    /// configuration error the run must not proceed with.
    pub fn total_lumi(&self) -> Result<f64, ConfigError> {
        let lumi = if self.explicit_lumi != 0.0 {
            self.explicit_lumi
        } else {
            self.lumi_file_sum
        };
        if lumi == 0.0 {
            return Err(ConfigError::ZeroLuminosity {
                data_type: self.data_type.clone(),
            });
        }
        Ok(lumi)
    }

    /// Luminosity rescaled for a partial run. With an event cap set, only
    /// `n_events_max` of `events_total` events are processed, so the
    /// effective luminosity shrinks by the same ratio. Callers must only
    /// invoke this before `set_events_total` when no cap is set.
    pub fn scaled_lumi(&self) -> Result<f64, ConfigError> {
        let total = self.total_lumi()?;
        if self.n_events_max >= 0 {
            debug_assert!(self.events_total > 0, "event cap set but no events counted");
            Ok(total * self.n_events_max as f64 / self.events_total as f64)
        } else {
            Ok(total)
        }
    }
}

impl fmt::Display for InputData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " ---------------------------------------------------------")?;
        writeln!(f, " Type               : {}", self.data_type)?;
        writeln!(f, " Version            : {}", self.version)?;
        match self.total_lumi() {
            Ok(lumi) => writeln!(f, " Total luminosity   : {} pb-1", lumi)?,
            Err(_) => writeln!(f, " Total luminosity   : ZERO")?,
        }
        writeln!(f, " NEventsMax         : {}", self.n_events_max)?;
        for cut in &self.gen_cuts {
            writeln!(
                f,
                " Generator cut      : Tree: {} Formula: {}",
                cut.tree_name, cut.formula
            )?;
        }
        for file in &self.input_files {
            writeln!(
                f,
                " Input file         : '{}' (file) | '{}' (lumi)",
                file.path, file.lumi
            )?;
        }
        for tree in &self.input_trees {
            writeln!(f, " Input tree         : '{}'", tree.name)?;
        }
        for tree in &self.ev_input_trees {
            writeln!(
                f,
                " EV input tree      : '{}' (tree) | '{}' (base name) | '{}' (coll. tree name)",
                tree.name, tree.base_name, tree.coll_tree_name
            )?;
        }
        for tree in &self.output_trees {
            writeln!(f, " Output tree        : '{}'", tree.name)?;
        }
        write!(f, " ---------------------------------------------------------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn file_lumi_sum_tracks_appends() {
        let mut data = InputData::new();
        data.add_input_file(InputFile::new("a.root", 3.0));
        data.add_input_file(InputFile::new("b.root", 4.0));

        assert_eq!(data.lumi_file_sum(), 7.0);
        assert_eq!(data.input_files().len(), 2);
    }

    #[test]
    fn file_events_are_written_per_file() {
        let mut data = InputData::new();
        data.add_input_file(InputFile::new("a.root", 3.0));
        data.add_input_file(InputFile::new("b.root", 4.0));

        data.set_file_events(0, 1200);
        data.set_file_events(1, 800);

        assert_eq!(data.input_files()[0].events, 1200);
        assert_eq!(data.input_files()[1].events, 800);
        // The luminosity bookkeeping is untouched by event counting.
        assert_eq!(data.lumi_file_sum(), 7.0);
    }

    #[test]
    fn explicit_lumi_overrides_file_sum() {
        let mut data = InputData::new();
        data.explicit_lumi = 50.0;
        data.add_input_file(InputFile::new("a.root", 12.5));

        assert_eq!(data.total_lumi().unwrap(), 50.0);
    }

    #[test]
    fn file_sum_used_when_no_explicit_lumi() {
        let mut data = InputData::new();
        data.add_input_file(InputFile::new("a.root", 3.0));
        data.add_input_file(InputFile::new("b.root", 4.0));

        assert_eq!(data.total_lumi().unwrap(), 7.0);
    }

    #[test]
    fn zero_lumi_is_fatal() {
        let data = InputData::new();

        assert_eq!(
            data.total_lumi(),
            Err(ConfigError::ZeroLuminosity {
                data_type: "unknown".to_string()
            })
        );
    }

    #[test]
    fn scaled_lumi_applies_event_cap() {
        let mut data = InputData::new();
        data.explicit_lumi = 10.0;
        data.n_events_max = 500;
        data.set_events_total(1000);

        assert_eq!(data.scaled_lumi().unwrap(), 5.0);
    }

    #[test]
    fn scaled_lumi_without_cap_is_total_lumi() {
        let mut data = InputData::new();
        data.explicit_lumi = 10.0;
        data.set_events_total(123_456);

        assert_eq!(data.scaled_lumi().unwrap(), 10.0);
    }

    #[test]
    fn ev_view_tree_name_is_base_plus_index() {
        let tree = EvViewTree::new("view", 2, "CollectionTree");

        assert_eq!(tree.name, "view2");
        assert_eq!(tree.base_name, "view");
        assert_eq!(tree.index, 2);
    }

    #[test]
    fn summary_lists_every_entry() {
        let mut data = InputData::new();
        data.data_type = "data".to_string();
        data.explicit_lumi = 1.0;
        data.gen_cuts.push(GeneratorCut::new("truth", "pt > 10"));
        data.add_input_file(InputFile::new("a.root", 1.0));
        data.input_trees.push(TreeRef::new("reco"));
        data.output_trees.push(TreeRef::new("out"));

        let summary = data.to_string();
        assert!(summary.contains("Type               : data"));
        assert!(summary.contains("Generator cut      : Tree: truth Formula: pt > 10"));
        assert!(summary.contains("'a.root' (file)"));
        assert!(summary.contains("Input tree         : 'reco'"));
        assert!(summary.contains("Output tree        : 'out'"));
    }
}
